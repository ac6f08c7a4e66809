//! Ranking-spec validation errors.

use serde::Serialize;
use thiserror::Error;

use super::error_code::ErrorCode;

/// One problem found in a [`super::spec::RankSpec`].
///
/// `path` is a JSON pointer to the offending field (empty for the root).
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("[{code}] {path}: {message}")]
pub struct RankSpecError {
    pub code: ErrorCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl RankSpecError {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    /// Attach a suggestion for fixing the problem.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
