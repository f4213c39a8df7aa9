//! Resource discovery: search filtering and related-resource recommendations.
//!
//! Everything in this crate is a pure, synchronous function over a snapshot of
//! [`ResourceRecord`](shelf_models::ResourceRecord)s supplied by the caller.
//! Nothing is fetched, cached, mutated or logged at error level here; every
//! condition is handed back to the caller through [`error::Result`].
//!
//! - [`filter`] narrows a snapshot by keyword, category and tags, keeping the
//!   snapshot order.
//! - [`Recommender`] (or the [`recommend`] shorthand) ranks resources by tag
//!   overlap with a reference resource, falling back to popularity.
//! - [`tags`] and [`catalog`] hold the smaller listing helpers.

pub mod catalog;
pub mod error;
mod recommend;
mod search;
pub mod tags;

pub use crate::recommend::{DEFAULT_LIMIT, PopularityWeights, Recommender, recommend};
pub use crate::search::{SearchQuery, filter};
