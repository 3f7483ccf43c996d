use std::{io, num::ParseIntError, path::PathBuf};

use thiserror::Error;

use crate::modules::Field;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every error is fail-fast: the first problem encountered terminates the parse of the whole
/// source and no partial module map is ever returned.
///
/// # Error Categories
///
/// ## Source Errors
/// - [`Error::SourceOpen`] - The module list could not be opened
/// - [`Error::SourceRead`] - Reading the module list failed mid-stream
///
/// ## Line Errors
/// - [`Error::InvalidLine`] - A line did not have 6 or 7 fields
/// - [`Error::InvalidField`] - A numeric field was neither valid decimal nor valid `0x` hex
/// - [`Error::UnknownState`] - The load state column held an unknown token
/// - [`Error::InvalidTaintedFormat`] - The tainted column was not wrapped in parentheses
/// - [`Error::UnknownTaintedFlag`] - The tainted column held a letter outside the taint table
///
/// Line errors raised while reading a source are wrapped in [`Error::Line`], which adds the
/// source name, line number and raw line text. Use [`Error::root`] to get at the kind.
///
/// # Examples
///
/// ```rust
/// use procmodules::{parse_modules, Error};
///
/// let input = "snd 1024 0 - Live 0x0\nbroken 1 2\n";
/// match parse_modules(input.as_bytes(), "fixture") {
///     Err(error) => {
///         assert!(matches!(error.root(), Error::InvalidLine { .. }));
///         assert_eq!(error.line_number(), Some(2));
///     }
///     Ok(_) => unreachable!(),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The module list could not be opened.
    ///
    /// Typically a missing path or a permission problem.
    #[error("Error opening {}: {source}", .path.display())]
    SourceOpen {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A read failure occurred after the source was opened.
    #[error("Error reading {name}: {source}")]
    SourceRead {
        /// Display name of the source (usually its path)
        name: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A line had fewer than 6 or more than 7 whitespace separated fields.
    #[error("invalid input line {line:?}: expected 6 or 7 fields, found {fields}")]
    InvalidLine {
        /// The offending line
        line: String,
        /// Number of fields that were found
        fields: usize,
    },

    /// A numeric field could not be parsed as an unsigned 64-bit integer.
    #[error("invalid {field}: {value:?}: {source}")]
    InvalidField {
        /// Which column failed
        field: Field,
        /// The text of the column
        value: String,
        /// Why the integer parse failed
        #[source]
        source: ParseIntError,
    },

    /// The load state column did not match `Live`, `Loading` or `Unloading`.
    #[error("unknown state (field 5): {0:?}")]
    UnknownState(String),

    /// The tainted column was not of the form `(...)`.
    #[error("invalid tainted (field 7) format: {0:?}")]
    InvalidTaintedFormat(String),

    /// The tainted column contained a letter that is not in the taint table.
    #[error("unknown flag ({0}) in tainted (field 7)")]
    UnknownTaintedFlag(char),

    /// Context wrapper around a line-level error.
    #[error("error parsing {source_name} line {line_number} ({line:?}): {error}")]
    Line {
        /// Display name of the source
        source_name: String,
        /// 1-based line number
        line_number: usize,
        /// The raw line text
        line: String,
        /// The line-level error
        #[source]
        error: Box<Error>,
    },
}

impl Error {
    /// Returns the innermost error, unwrapping any [`Error::Line`] context.
    #[must_use]
    pub fn root(&self) -> &Error {
        match self {
            Error::Line { error, .. } => error.root(),
            other => other,
        }
    }

    /// The 1-based line number the error was raised on, if it came from a line.
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Error::Line { line_number, .. } => Some(*line_number),
            _ => None,
        }
    }

    /// The column this error refers to, if any.
    #[must_use]
    pub fn field(&self) -> Option<Field> {
        match self.root() {
            Error::InvalidField { field, .. } => Some(*field),
            Error::UnknownState(_) => Some(Field::State),
            Error::InvalidTaintedFormat(_) | Error::UnknownTaintedFlag(_) => Some(Field::Tainted),
            _ => None,
        }
    }

    pub(crate) fn at_line(self, source_name: &str, line_number: usize, line: &str) -> Error {
        Error::Line {
            source_name: source_name.to_string(),
            line_number,
            line: line.to_string(),
            error: Box::new(self),
        }
    }
}
