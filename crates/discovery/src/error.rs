//! Discovery Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction. An empty result is never an error: callers receive an
//! empty `Vec` instead.

use derive_more::{Display, Error};
use shelf_models::ResourceId;

/// A discovery error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
/// A request handler would typically map them onto 404, 400, 409 and 403.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The reference resource is not part of the snapshot.
    #[display("resource not found: {_0}")]
    NotFound(#[error(not(source))] ResourceId),
    /// No tag with this id exists in the catalog.
    #[display("tag not found: {_0}")]
    TagNotFound(#[error(not(source))] u64),
    /// A request parameter is out of range or malformed.
    #[display("invalid argument '{argument}': {reason}")]
    InvalidArgument {
        /// Name of the offending parameter.
        argument: &'static str,
        /// Why it was rejected.
        reason: String,
    },
    /// The value collides with something that already exists.
    #[display("already exists: {_0}")]
    Conflict(#[error(not(source))] String),
    /// The caller is not allowed to perform the operation.
    #[display("forbidden: {_0}")]
    Forbidden(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Every operation is a pure function of its inputs: retrying with
        // the same inputs gives the same answer.
        false
    }

    pub(crate) fn invalid(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }
}
