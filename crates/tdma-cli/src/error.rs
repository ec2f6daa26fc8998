//! CLI error types.

use std::path::PathBuf;

use tdma_core::TdmaError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A coefficient could not be parsed as a number.
    #[error("Invalid number in {sequence}: {value:?}")]
    InvalidNumber {
        /// Which sequence was being parsed.
        sequence: String,
        /// The offending token.
        value: String,
    },

    /// The input file extension is not one of json, toml, csv.
    #[error("Unsupported input format: {0}. Use .json, .toml or .csv.")]
    UnsupportedFormat(String),

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Input file could not be decoded.
    #[error("Failed to parse {path}: {reason}")]
    Parse {
        /// File being read.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Solver error.
    #[error(transparent)]
    Solver(#[from] TdmaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Creates a parse error for `path`.
    pub fn parse(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
