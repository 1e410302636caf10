//! CLI Error Types
//!
//! Structured errors using `exn`, same layout as the workspace crates.

use derive_more::{Display, Error};

/// A CLI error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("failed to load configuration")]
    Config,
}
