//! Error types for rewrite operations.

use thiserror::Error;

/// Result type for rewrite operations.
pub type RewriteResult<T> = Result<T, RewriteError>;

/// Errors that can occur while scanning and rewriting a stream.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// The input stream failed mid-scan.
    #[error("Failed to read input: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },

    /// A rule was registered whose pattern does not define exactly one
    /// capture group.
    #[error("Pattern `{pattern}` must define exactly one capture group, found {groups}")]
    InvalidPattern { pattern: String, groups: usize },
}

impl RewriteError {
    /// Create a read error from an underlying I/O failure.
    pub fn read(source: std::io::Error) -> Self {
        Self::Read { source }
    }

    /// Create an invalid-pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, groups: usize) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            groups,
        }
    }
}
