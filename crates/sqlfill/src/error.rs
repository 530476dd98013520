//! Error types for sqlfill

use thiserror::Error;

/// Result type alias for sqlfill operations
pub type FillResult<T> = Result<T, FillError>;

/// Errors raised while building fillers or rendering templates.
///
/// Every variant is a construction-time mistake by the caller. Optional
/// conditions that end up rendering nothing are not errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FillError {
    /// A dynamically built query unit had an unsupported shape
    #[error("Invalid query unit: {0}")]
    InvalidUnit(String),

    /// `where_` was called without any unit
    #[error("Where clause cannot be empty")]
    EmptyWhere,

    /// `values` was called with no defined column
    #[error("Data cannot be empty")]
    EmptyValues,

    /// `set` was called with no defined column
    #[error("Set clause cannot be empty")]
    EmptySet,

    /// A column identifier failed validation
    #[error("Invalid identifier: {0}")]
    InvalidIdent(String),

    /// Template segments and fillers do not interleave
    #[error("Template has {segments} text segments for {fillers} fillers (expected fillers + 1)")]
    SegmentMismatch { segments: usize, fillers: usize },

    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),
}

impl FillError {
    /// Create an invalid unit error
    pub fn invalid_unit(message: impl Into<String>) -> Self {
        Self::InvalidUnit(message.into())
    }

    /// Create an invalid identifier error
    pub fn invalid_ident(message: impl Into<String>) -> Self {
        Self::InvalidIdent(message.into())
    }

    /// Check if this is an invalid unit error
    pub fn is_invalid_unit(&self) -> bool {
        matches!(self, Self::InvalidUnit(_))
    }
}

/// Log a construction error before handing it back to the caller.
pub(crate) fn reject<T>(err: FillError) -> FillResult<T> {
    #[cfg(feature = "tracing")]
    tracing::warn!(target: "sqlfill.fill", error = %err, "rejected SQL fragment");
    Err(err)
}
