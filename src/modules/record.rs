use std::fmt;

use crate::{
    modules::{parser, LoadState},
    Result, Tainted,
};

/// One loaded kernel module, decoded from a single `/proc/modules` line.
///
/// # Examples
///
/// ```rust
/// use procmodules::{LoadState, ModuleRecord, Tainted};
///
/// let record = ModuleRecord::parse_line(
///     "usbcore 155648 6 ehci_hcd,xhci_hcd, Live 0x0000000000000000 (O)",
/// )?;
/// assert_eq!(record.name, "usbcore");
/// assert_eq!(record.dependencies, ["ehci_hcd", "xhci_hcd"]);
/// assert_eq!(record.state, LoadState::Live);
/// assert_eq!(record.tainted, Tainted::OOT_MODULE);
/// # Ok::<(), procmodules::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRecord {
    /// Module name, the key of the module map
    pub name: String,
    /// Bytes of memory occupied by the module
    pub mem_size: u64,
    /// Number of active instances/references
    pub instances: u64,
    /// Module names listed in the dependency column, in source order
    pub dependencies: Vec<String>,
    /// Current lifecycle stage
    pub state: LoadState,
    /// Kernel memory offset. Zero when the kernel hides addresses from the reader.
    pub offset: u64,
    /// Taint flags, empty when the line had no seventh column
    pub tainted: Tainted,
}

impl ModuleRecord {
    /// Parse a single `/proc/modules` line.
    ///
    /// # Errors
    /// Returns the same line-level errors as [`crate::parse_modules`], without line context.
    pub fn parse_line(line: &str) -> Result<ModuleRecord> {
        parser::parse_line(line)
    }

    /// `true` if this module reported any taint flag.
    #[must_use]
    pub fn is_tainted(&self) -> bool {
        !self.tainted.is_empty()
    }

    /// `true` if `name` appears in this module's dependency column.
    #[must_use]
    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.iter().any(|dep| dep == name)
    }
}

/// Renders the record the way the kernel prints it. The tainted column is only written when
/// at least one flag is set.
impl fmt::Display for ModuleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} ", self.name, self.mem_size, self.instances)?;

        if self.dependencies.is_empty() {
            f.write_str(parser::NO_DEPS)?;
        } else {
            for dep in &self.dependencies {
                write!(f, "{dep}{}", parser::DEPS_DELIMITER)?;
            }
        }

        write!(f, " {} 0x{:016x}", self.state, self.offset)?;
        if self.is_tainted() {
            write!(f, " {}", self.tainted)?;
        }
        Ok(())
    }
}
