use std::{fmt, str::FromStr};

use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::{Error, Result};

/// Lifecycle stage of a loaded module, as printed in the fifth column of `/proc/modules`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, EnumCount)]
pub enum LoadState {
    /// The module is fully initialised and running
    Live,
    /// The module's init function has not finished yet
    Loading,
    /// The module is being removed
    Unloading,
}

impl LoadState {
    /// The token the kernel prints for this state.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LoadState::Live => "Live",
            LoadState::Loading => "Loading",
            LoadState::Unloading => "Unloading",
        }
    }

    /// Decode a state token. Matching is exact and case sensitive.
    ///
    /// # Errors
    /// Returns [`Error::UnknownState`] for any other text.
    pub fn parse(text: &str) -> Result<LoadState> {
        LoadState::iter()
            .find(|state| state.as_str() == text)
            .ok_or_else(|| Error::UnknownState(text.to_string()))
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoadState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        LoadState::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known() {
        assert_eq!(LoadState::parse("Live").unwrap(), LoadState::Live);
        assert_eq!(LoadState::parse("Loading").unwrap(), LoadState::Loading);
        assert_eq!(
            "Unloading".parse::<LoadState>().unwrap(),
            LoadState::Unloading
        );
    }

    #[test]
    fn test_parse_unknown() {
        for input in ["live", "LIVE", "", "Gone", "Live "] {
            assert!(
                matches!(LoadState::parse(input), Err(Error::UnknownState(ref s)) if s == input),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_display_round_trip() {
        for state in LoadState::iter() {
            assert_eq!(LoadState::parse(&state.to_string()).unwrap(), state);
        }
        assert_eq!(LoadState::COUNT, 3);
    }
}
