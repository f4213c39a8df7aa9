//! Snapshot Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use shelf_models::ResourceId;

/// A snapshot error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for snapshot operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Two records in the same snapshot share an id
    #[display("duplicate resource id: {_0}")]
    Duplicate(#[error(not(source))] ResourceId),
    /// The resource does not exist in the source
    #[display("resource not found: {_0}")]
    NotFound(#[error(not(source))] ResourceId),
    /// The source could not produce a snapshot right now
    #[display("snapshot source unavailable: {_0}")]
    Unavailable(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
