//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Errors from the snapshot source and
//! the discovery core are raised over the original `Exn`, so the full tree
//! stays available for reporting.

use derive_more::{Display, Error};
use shelf_config::error::{Error as ConfigError, ErrorKind as ConfigErrorKind};
use shelf_discovery::error::{Error as DiscoveryError, ErrorKind as DiscoveryErrorKind};
use shelf_snapshot::error::{Error as SnapshotError, ErrorKind as SnapshotErrorKind};

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The snapshot source failed to produce a snapshot
    #[display("snapshot source error: {_0}")]
    Source(SnapshotErrorKind),
    /// The configuration handed to the facade is out of range
    #[display("invalid configuration: {_0}")]
    Config(ConfigErrorKind),
    /// The request was rejected by the discovery core
    #[display("{_0}")]
    Discovery(DiscoveryErrorKind),
}
impl ErrorKind {
    /// Convert a snapshot error into a library error, keeping the snapshot
    /// crate's `Exn` frame as a child in the error tree.
    #[track_caller]
    pub fn snapshot(err: SnapshotError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Source(inner))
    }

    /// Convert a configuration error into a library error, keeping the
    /// config crate's `Exn` frame as a child in the error tree.
    #[track_caller]
    pub fn config(err: ConfigError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Config(inner))
    }

    /// Convert a discovery error into a library error, keeping the discovery
    /// crate's `Exn` frame as a child in the error tree.
    #[track_caller]
    pub fn discovery(err: DiscoveryError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Discovery(inner))
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Source(kind) => kind.is_retryable(),
            Self::Config(kind) => kind.is_retryable(),
            Self::Discovery(kind) => kind.is_retryable(),
        }
    }
}
