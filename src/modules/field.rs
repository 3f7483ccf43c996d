use std::fmt;

use strum::{EnumCount, EnumIter};

/// The columns of a `/proc/modules` line, in order.
///
/// Used to name the failing column in parse errors. The [`fmt::Display`] form reads like
/// `mem size (field 2)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, EnumCount)]
pub enum Field {
    /// Module name (field 1)
    Name,
    /// Memory footprint in bytes (field 2)
    MemorySize,
    /// Instance/reference count (field 3)
    InstanceCount,
    /// Comma separated dependency list or `-` (field 4)
    Dependencies,
    /// Load state (field 5)
    State,
    /// Kernel memory offset (field 6)
    Offset,
    /// Optional parenthesized taint letters (field 7)
    Tainted,
}

impl Field {
    /// 1-based column index of this field.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize + 1
    }

    /// Short lower case name of the field.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::MemorySize => "mem size",
            Field::InstanceCount => "instances",
            Field::Dependencies => "dependencies",
            Field::State => "state",
            Field::Offset => "offset",
            Field::Tainted => "tainted",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (field {})", self.name(), self.index())
    }
}
