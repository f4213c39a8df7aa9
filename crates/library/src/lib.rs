//! Resource discovery over a snapshot source.
//!
//! [`Discovery`] is what a request handler holds on to: every call loads a
//! fresh snapshot from the configured [`SnapshotSource`](shelf_snapshot::SnapshotSource),
//! runs the pure discovery core against it, and hands back owned records.

mod discovery;
pub mod error;

pub use crate::discovery::Discovery;
