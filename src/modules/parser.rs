//! Line parser and record builder for `/proc/modules`.
//!
//! Each line holds six or seven whitespace separated columns:
//!
//! ```text
//! <name> <mem-size> <instances> <deps-or-dash> <state> <offset> [<tainted>]
//! ```
//!
//! Numeric columns accept either plain decimal or `0x`-prefixed hexadecimal. The dependency
//! column is `-` when empty and otherwise a comma separated list that usually ends with a
//! trailing comma. The tainted column is decoded with [`Tainted::decode`].
//!
//! Parsing is fail-fast: the first bad line aborts the whole source and no partial map is
//! returned.

use std::io::BufRead;

use crate::{
    modules::{Field, LoadState, ModuleMap, ModuleRecord},
    Error, Result, Tainted,
};

const MIN_FIELDS_PER_LINE: usize = 6;
const MAX_FIELDS_PER_LINE: usize = 7;

/// Dependency column value meaning "no dependencies".
pub(crate) const NO_DEPS: &str = "-";
/// Separator between names in the dependency column.
pub(crate) const DEPS_DELIMITER: char = ',';

const HEX_PREFIX: &str = "0x";
const SIGN_PLUS: char = '+';

/// Parse every line of `reader` into a module map keyed by module name.
///
/// `source_name` is only used for error context and logging, typically the path the reader
/// was opened from.
///
/// # Errors
/// Returns [`Error::SourceRead`] if reading fails, otherwise the first line-level error
/// wrapped in [`Error::Line`].
///
/// # Examples
///
/// ```rust
/// use procmodules::parse_modules;
///
/// let input = "\
/// snd_hda_intel 57344 3 - Live 0xffffffffc0b5e000
/// usbcore 155648 6 ehci_hcd,xhci_hcd, Live 0x0000000000000000 (O)
/// ";
/// let modules = parse_modules(input.as_bytes(), "fixture")?;
/// assert_eq!(modules.len(), 2);
/// assert_eq!(modules["usbcore"].instances, 6);
/// # Ok::<(), procmodules::Error>(())
/// ```
pub fn parse_modules<R: BufRead>(reader: R, source_name: &str) -> Result<ModuleMap> {
    let mut modules = ModuleMap::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| Error::SourceRead {
            name: source_name.to_string(),
            source,
        })?;

        let record =
            parse_line(&line).map_err(|error| error.at_line(source_name, index + 1, &line))?;

        log::trace!("{source_name}:{}: parsed module {}", index + 1, record.name);
        if let Some(previous) = modules.insert(record.name.clone(), record) {
            log::warn!(
                "{source_name}:{}: duplicate module {}, replacing earlier entry",
                index + 1,
                previous.name
            );
        }
    }

    log::debug!("parsed {} modules from {source_name}", modules.len());
    Ok(modules)
}

/// Parse a single line into a [`ModuleRecord`].
pub(crate) fn parse_line(line: &str) -> Result<ModuleRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if !(MIN_FIELDS_PER_LINE..=MAX_FIELDS_PER_LINE).contains(&fields.len()) {
        return Err(Error::InvalidLine {
            line: line.to_string(),
            fields: fields.len(),
        });
    }

    let mem_size = parse_uint(fields[1], Field::MemorySize)?;
    let instances = parse_uint(fields[2], Field::InstanceCount)?;
    let dependencies = split_deps(fields[3]);
    let state = LoadState::parse(fields[4])?;
    let offset = parse_uint(fields[5], Field::Offset)?;
    let tainted = match fields.get(6) {
        Some(text) => Tainted::decode(text)?,
        None => Tainted::empty(),
    };

    Ok(ModuleRecord {
        name: fields[0].to_string(),
        mem_size,
        instances,
        dependencies,
        state,
        offset,
        tainted,
    })
}

/// Decode an unsigned 64-bit column, `0x` prefixed hex or decimal. Signs are rejected.
fn parse_uint(text: &str, field: Field) -> Result<u64> {
    let (digits, radix) = match text.strip_prefix(HEX_PREFIX) {
        Some(digits) => (digits, 16),
        None => (text, 10),
    };

    let parsed = if digits.starts_with(SIGN_PLUS) {
        // from_str_radix accepts a leading '+', but a lone sign is always InvalidDigit
        u64::from_str_radix("+", radix)
    } else {
        u64::from_str_radix(digits, radix)
    };

    parsed.map_err(|source| Error::InvalidField {
        field,
        value: text.to_string(),
        source,
    })
}

/// Decode the dependency column. A lone trailing delimiter does not produce an empty entry and
/// the `-` marker is never returned as a dependency name.
fn split_deps(text: &str) -> Vec<String> {
    if text == NO_DEPS {
        return Vec::new();
    }

    let list = text.strip_suffix(DEPS_DELIMITER).unwrap_or(text);
    if list.is_empty() {
        return Vec::new();
    }

    list.split(DEPS_DELIMITER)
        .filter(|name| *name != NO_DEPS)
        .map(str::to_string)
        .collect()
}
