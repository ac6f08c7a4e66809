//! Stable diagnostic codes for ranking-spec validation.
//!
//! Codes serialize as snake_case strings and are safe to match on from
//! JSON consumers; messages and hints are not.

use std::fmt;

use serde::Serialize;

/// Machine-readable category of a [`super::errors::RankSpecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The `v` field names a spec version this crate does not understand.
    UnsupportedVersion,
    /// A numeric setting lies outside its valid range.
    OutOfRange,
    /// Two settings contradict or one has no effect given another.
    InvalidCombo,
    /// A limit is set to a value that would reject every input.
    LimitExceeded,
    /// A field is not part of the schema.
    UnknownField,
    /// Catch-all for custom rules.
    ValidationFailed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion => "unsupported_version",
            Self::OutOfRange => "out_of_range",
            Self::InvalidCombo => "invalid_combo",
            Self::LimitExceeded => "limit_exceeded",
            Self::UnknownField => "unknown_field",
            Self::ValidationFailed => "validation_failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_form_matches_as_str() {
        for code in [
            ErrorCode::UnsupportedVersion,
            ErrorCode::OutOfRange,
            ErrorCode::InvalidCombo,
            ErrorCode::LimitExceeded,
            ErrorCode::UnknownField,
            ErrorCode::ValidationFailed,
        ] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, code.as_str());
        }
    }
}
