use serde::{Serialize, Serializer};

/// Tri-state answer used by accommodation features and resident criteria.
///
/// Serialised as its numeric code (`0`, `1`, `2`), which is what the
/// accommodation pages read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiscretionaryValue {
    No,
    Yes,
    #[default]
    Unspecified,
}

impl DiscretionaryValue {
    pub fn code(self) -> u8 {
        match self {
            Self::No => 0,
            Self::Yes => 1,
            Self::Unspecified => 2,
        }
    }

    /// Strict mapping of a stored code.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::No,
            1 => Self::Yes,
            _ => Self::Unspecified,
        }
    }

    /// Mapping for fields whose stored value is read with "falsy means
    /// unspecified" semantics: a stored `0` or a missing value is
    /// `Unspecified`, never `No`.
    pub fn from_falsy_coalesced(raw: Option<i64>) -> Self {
        match raw {
            None | Some(0) => Self::Unspecified,
            Some(code) => Self::from_code(code),
        }
    }
}

impl Serialize for DiscretionaryValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}
