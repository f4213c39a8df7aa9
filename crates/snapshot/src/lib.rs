//! Snapshot sources for the discovery core.
//!
//! The discovery core only ever sees a fully materialised, read-only
//! collection of resources. This crate defines where that collection comes
//! from ([`SnapshotSource`]), ships an in-memory implementation
//! ([`MemorySource`]), and derives reverse lookups ([`TagIndex`]) from a
//! snapshot rather than storing back-pointers in the model.

pub mod error;
mod index;
mod memory;
mod source;

pub use crate::index::TagIndex;
pub use crate::memory::MemorySource;
pub use crate::source::SnapshotSource;
use std::sync::Arc;

pub type SourceHandle = Arc<dyn SnapshotSource + Send + Sync>;
