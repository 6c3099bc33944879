//! Error handling for the `gnat` CLI.

use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI-specific errors.
#[derive(Error, Debug)]
pub enum CliError {
    /// Error from the `gnat-core` kernel
    #[error("kernel error: {0}")]
    Kernel(#[from] gnat_core::GnatError),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line in an input file
    #[error("{file}:{line}: {reason}")]
    Parse {
        /// File the malformed line came from
        file: String,
        /// 1-based line number
        line: usize,
        /// Human-readable reason
        reason: String,
    },

    /// Invalid command-line arguments
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    /// Catch-all for unexpected failures
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create a parse error.
    pub fn parse(file: impl Into<String>, line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Create an invalid-arguments error.
    pub fn invalid_args(msg: impl Into<String>) -> Self {
        Self::InvalidArgs(msg.into())
    }
}
