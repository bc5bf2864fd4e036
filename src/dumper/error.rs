//! Error types for dump operations

use super::formats::FormatError;
use thiserror::Error;

/// Failures a dump can raise. Problems inside the graph (unreadable fields,
/// panicking `Describe` impls) never surface here; they render as fault
/// placeholders instead.
#[derive(Debug, Error)]
pub enum DumpError {
    /// The caller-supplied label was empty or whitespace only.
    #[error("dump label must not be empty or whitespace (got {0:?})")]
    InvalidLabel(String),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A field filter or opaque-type pattern failed to compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl DumpError {
    pub fn is_invalid_label(&self) -> bool {
        matches!(self, DumpError::InvalidLabel(_))
    }

    pub fn is_format(&self) -> bool {
        matches!(self, DumpError::Format(_))
    }

    pub fn is_config(&self) -> bool {
        matches!(self, DumpError::Config(_) | DumpError::InvalidPattern { .. })
    }
}

pub type Result<T, E = DumpError> = std::result::Result<T, E>;
