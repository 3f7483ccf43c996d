//! Kernel taint flags and their parenthesized letter encoding.
//!
//! The seventh column of `/proc/modules` carries the taint state a module contributed to the
//! kernel, printed as a parenthesized list of single letters, e.g. `(OE)` for an unsigned
//! out-of-tree module. This module provides the [`Tainted`] flag set together with a
//! bidirectional codec between the flag set and that textual form.
//!
//! # Encoding
//!
//! - The empty flag set is written as `()`.
//! - A non-empty set is written as `(` followed by the letter of every set flag in ascending
//!   bit order, followed by `)`. This is the same order the kernel prints taint letters in.
//! - Decoding accepts letters in any order and ignores duplicates.
//!
//! # Examples
//!
//! ```rust
//! use procmodules::Tainted;
//!
//! let tainted: Tainted = "(OE)".parse()?;
//! assert_eq!(tainted, Tainted::OOT_MODULE | Tainted::UNSIGNED_MODULE);
//! assert_eq!(tainted.to_string(), "(OE)");
//! assert_eq!(Tainted::empty().to_string(), "()");
//! # Ok::<(), procmodules::Error>(())
//! ```
//!
//! # References
//!
//! - Linux kernel documentation, `admin-guide/tainted-kernels`

use std::{fmt, str::FromStr};

use bitflags::bitflags;

use crate::{Error, Result};

bitflags! {
    /// The taint flags a module can report.
    ///
    /// Bit values match the kernel's `TAINT_*` numbering, so the raw value of a [`Tainted`]
    /// is directly comparable with `/proc/sys/kernel/tainted`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Tainted: u32 {
        /// (P) A module with a non-GPL license has been loaded.
        const PROPRIETARY_MODULE = 1 << 0;
        /// (F) A module was force loaded.
        const FORCED_MODULE = 1 << 1;
        /// (S) The kernel is running on an out of specification system.
        const CPU_OUT_OF_SPEC = 1 << 2;
        /// (R) A module was force unloaded.
        const FORCED_RMMOD = 1 << 3;
        /// (M) A machine check exception occurred.
        const MACHINE_CHECK = 1 << 4;
        /// (B) A bad page was discovered.
        const BAD_PAGE = 1 << 5;
        /// (U) Taint requested by userspace.
        const USER = 1 << 6;
        /// (D) The kernel died recently (OOPS or BUG).
        const DIE = 1 << 7;
        /// (A) An ACPI table was overridden by the user.
        const OVERRIDDEN_ACPI_TABLE = 1 << 8;
        /// (W) The kernel issued a warning.
        const WARN = 1 << 9;
        /// (C) A staging driver was loaded.
        const CRAP = 1 << 10;
        /// (I) Working around a severe firmware bug.
        const FIRMWARE_WORKAROUND = 1 << 11;
        /// (O) An out-of-tree module was loaded.
        const OOT_MODULE = 1 << 12;
        /// (E) An unsigned module was loaded.
        const UNSIGNED_MODULE = 1 << 13;
        /// (L) A soft lockup occurred.
        const SOFTLOCKUP = 1 << 14;
        /// (K) The kernel has been live patched.
        const LIVEPATCH = 1 << 15;
        /// (X) Auxiliary taint, defined for and used by distros.
        const AUX = 1 << 16;
        /// (T) The kernel was built with the struct randomization plugin.
        const RANDSTRUCT = 1 << 17;
    }
}

/// One row of the taint table: a flag, its letter and what it means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaintFlag {
    /// The single-bit flag
    pub flag: Tainted,
    /// The letter used in the parenthesized encoding
    pub letter: char,
    /// Human readable meaning of the flag
    pub description: &'static str,
}

const fn entry(flag: Tainted, letter: char, description: &'static str) -> TaintFlag {
    TaintFlag {
        flag,
        letter,
        description,
    }
}

/// The taint table in ascending bit order. Encoding emits letters in this order.
pub static TAINT_FLAGS: [TaintFlag; 18] = [
    entry(
        Tainted::PROPRIETARY_MODULE,
        'P',
        "A module with a non-GPL license has been loaded",
    ),
    entry(Tainted::FORCED_MODULE, 'F', "A module was force loaded by insmod -f"),
    entry(
        Tainted::CPU_OUT_OF_SPEC,
        'S',
        "Unsafe SMP processors or an otherwise out of specification system",
    ),
    entry(
        Tainted::FORCED_RMMOD,
        'R',
        "A module was forcibly unloaded by rmmod -f",
    ),
    entry(
        Tainted::MACHINE_CHECK,
        'M',
        "A hardware machine check error occurred",
    ),
    entry(Tainted::BAD_PAGE, 'B', "A bad page was discovered"),
    entry(
        Tainted::USER,
        'U',
        "The user asked that the system be marked tainted",
    ),
    entry(Tainted::DIE, 'D', "The kernel has died recently (OOPS or BUG)"),
    entry(
        Tainted::OVERRIDDEN_ACPI_TABLE,
        'A',
        "The ACPI DSDT has been overridden by the user",
    ),
    entry(Tainted::WARN, 'W', "A kernel warning has occurred"),
    entry(Tainted::CRAP, 'C', "A module from drivers/staging was loaded"),
    entry(
        Tainted::FIRMWARE_WORKAROUND,
        'I',
        "The system is working around a severe firmware bug",
    ),
    entry(Tainted::OOT_MODULE, 'O', "An out-of-tree module has been loaded"),
    entry(
        Tainted::UNSIGNED_MODULE,
        'E',
        "An unsigned module has been loaded on a kernel supporting module signatures",
    ),
    entry(Tainted::SOFTLOCKUP, 'L', "A soft lockup has previously occurred"),
    entry(Tainted::LIVEPATCH, 'K', "The kernel has been live patched"),
    entry(Tainted::AUX, 'X', "Auxiliary taint, defined and used by distros"),
    entry(
        Tainted::RANDSTRUCT,
        'T',
        "The kernel was built with the struct randomization plugin",
    ),
];

impl Tainted {
    /// Look up the flag for a single taint letter.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Tainted> {
        TAINT_FLAGS
            .iter()
            .find(|row| row.letter == letter)
            .map(|row| row.flag)
    }

    /// The taint table rows for every flag set in `self`, in ascending bit order.
    pub fn entries(self) -> impl Iterator<Item = &'static TaintFlag> {
        TAINT_FLAGS
            .iter()
            .filter(move |row| self.contains(row.flag))
    }

    /// The letters of all set flags, without the surrounding parentheses.
    #[must_use]
    pub fn letters(self) -> String {
        self.entries().map(|row| row.letter).collect()
    }

    /// Decode the parenthesized form, e.g. `(OE)`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidTaintedFormat`] if `text` is not wrapped in parentheses and
    /// [`Error::UnknownTaintedFlag`] for the first letter that is not in [`TAINT_FLAGS`].
    pub fn decode(text: &str) -> Result<Tainted> {
        let Some(body) = text
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
        else {
            return Err(Error::InvalidTaintedFormat(text.to_string()));
        };

        body.chars().try_fold(Tainted::empty(), |combined, letter| {
            Tainted::from_letter(letter)
                .map(|flag| combined | flag)
                .ok_or(Error::UnknownTaintedFlag(letter))
        })
    }

    /// Encode into the parenthesized form. The empty set encodes to `()`.
    #[must_use]
    pub fn encode(self) -> String {
        self.to_string()
    }
}

impl Default for Tainted {
    fn default() -> Self {
        Tainted::empty()
    }
}

impl fmt::Display for Tainted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.letters())
    }
}

impl FromStr for Tainted {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Tainted::decode(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_bit_order() {
        for (bit, row) in TAINT_FLAGS.iter().enumerate() {
            assert_eq!(row.flag.bits(), 1 << bit, "letter {}", row.letter);
        }
        assert_eq!(Tainted::all().bits(), (1 << 18) - 1);

        let letters: String = TAINT_FLAGS.iter().map(|row| row.letter).collect();
        assert_eq!(letters, "PFSRMBUDAWCIOELKXT");
    }

    #[test]
    fn test_empty() {
        assert_eq!(Tainted::empty().encode(), "()");
        assert_eq!(Tainted::decode("()").unwrap(), Tainted::empty());
    }

    #[test]
    fn test_decode_multiple() {
        let tainted = Tainted::decode("(OE)").unwrap();
        assert_eq!(tainted.bits(), 4096 | 8192);
        assert_eq!(tainted, Tainted::OOT_MODULE | Tainted::UNSIGNED_MODULE);
    }

    #[test]
    fn test_decode_is_order_independent_and_idempotent() {
        let expected = Tainted::PROPRIETARY_MODULE | Tainted::OOT_MODULE;
        assert_eq!(Tainted::decode("(PO)").unwrap(), expected);
        assert_eq!(Tainted::decode("(OP)").unwrap(), expected);
        assert_eq!(Tainted::decode("(OPOOP)").unwrap(), expected);
    }

    #[test]
    fn test_encode_ascending_order() {
        let tainted = Tainted::RANDSTRUCT | Tainted::UNSIGNED_MODULE | Tainted::PROPRIETARY_MODULE;
        assert_eq!(tainted.encode(), "(PET)");
        assert_eq!(tainted.to_string(), "(PET)");
    }

    #[test]
    fn test_unknown_flag() {
        assert!(matches!(
            Tainted::decode("(Z)"),
            Err(Error::UnknownTaintedFlag('Z'))
        ));
        assert!(matches!(
            Tainted::decode("(OEz)"),
            Err(Error::UnknownTaintedFlag('z'))
        ));
    }

    #[test]
    fn test_invalid_format() {
        for input in ["", "(", ")", "OE", "(OE", "OE)", ")OE(", "[OE]"] {
            assert!(
                matches!(Tainted::decode(input), Err(Error::InvalidTaintedFormat(ref s)) if s == input),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_round_trip_all_masks() {
        for bits in 0..(1u32 << 18) {
            let tainted = Tainted::from_bits(bits).unwrap();
            let encoded = tainted.encode();
            assert_eq!(encoded, format!("{tainted}"));
            assert_eq!(Tainted::decode(&encoded).unwrap(), tainted);
        }
    }

    #[test]
    fn test_single_flags() {
        for row in &TAINT_FLAGS {
            let decoded = Tainted::decode(&row.flag.encode()).unwrap();
            assert_eq!(decoded, row.flag);
            assert_eq!(decoded.bits().count_ones(), 1);
            assert_eq!(Tainted::from_letter(row.letter), Some(row.flag));
        }
        assert_eq!(Tainted::from_letter('Q'), None);
    }

    #[test]
    fn test_entries() {
        let descriptions: Vec<_> = (Tainted::OOT_MODULE | Tainted::UNSIGNED_MODULE)
            .entries()
            .map(|row| row.letter)
            .collect();
        assert_eq!(descriptions, vec!['O', 'E']);
    }
}
