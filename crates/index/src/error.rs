//! Index Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction, following the same layout as the other crates in this
//! workspace.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An index error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for index operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// A single file could not be scanned. The tree walk logs and skips
    /// these; they only surface to callers scanning one file directly.
    #[display("failed to scan file: {}", _0.display())]
    Scan(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Scan(_))
    }
}
