//! Error types for orgchain.
//!
//! Library crates use [`OrgChainError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all orgchain operations.
#[derive(Debug, thiserror::Error)]
pub enum OrgChainError {
    /// A record in the hierarchy file does not have the expected shape.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A queried employee is not present in the hierarchy.
    #[error("unknown employee: '{name}'")]
    UnknownEmployee { name: String },

    /// Following manager links from `employee` revisited a node.
    #[error("management cycle detected starting at '{employee}': {}", chain.join(" -> "))]
    CycleDetected { employee: String, chain: Vec<String> },

    /// The two employees do not share any ancestor.
    #[error("'{first}' and '{second}' are in disconnected hierarchies")]
    DisconnectedHierarchy { first: String, second: String },

    /// An employee was re-declared with a different manager under the `reject` policy.
    #[error(
        "employee '{employee}' already reports to '{existing}', refusing to reassign to '{requested}'"
    )]
    ConflictingManager {
        employee: String,
        existing: String,
        requested: String,
    },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, OrgChainError>;

impl OrgChainError {
    /// Create a parse error for a 1-based line number.
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: msg.into(),
        }
    }

    /// Create an unknown-employee error.
    pub fn unknown_employee(name: impl Into<String>) -> Self {
        Self::UnknownEmployee { name: name.into() }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
