//! Tag-overlap recommendations.
//!
//! Given a reference resource, the remaining resources are ranked by how many
//! tag ids they share with it. Tag overlap is a cheap stand-in for topical
//! similarity and needs no similarity index. When the reference carries no
//! tags at all there is nothing to overlap with, so the ranking falls back to
//! a popularity score instead.
//!
//! Both the popularity weights and the rating tie-break are tunables rather
//! than domain truths; see [`PopularityWeights`].

use crate::error::{ErrorKind, Result};
use exn::OptionExt;
use shelf_models::{ResourceId, ResourceRecord};
use std::cmp::{Ordering, Reverse};
use std::collections::HashSet;
use tracing::instrument;

/// Result size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: usize = 10;

/// Weights of the popularity score: `downloads * download_weight + views * view_weight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PopularityWeights {
    pub download_weight: u64,
    pub view_weight: u64,
}
impl Default for PopularityWeights {
    fn default() -> Self {
        Self {
            download_weight: 2,
            view_weight: 1,
        }
    }
}
impl PopularityWeights {
    pub fn new(download_weight: u64, view_weight: u64) -> Self {
        Self {
            download_weight,
            view_weight,
        }
    }

    /// Popularity score of a resource. Saturates instead of overflowing.
    pub fn score(&self, resource: &ResourceRecord) -> u64 {
        resource
            .download_count
            .saturating_mul(self.download_weight)
            .saturating_add(resource.view_count.saturating_mul(self.view_weight))
    }
}

/// Ranking key for a candidate sharing tags with the reference.
#[derive(Debug, Clone, Copy)]
struct Overlap {
    common: usize,
    rating: f64,
}
impl Overlap {
    /// Higher overlap first, then higher rating. Unrated (or non-finite) counts as `0.0`.
    fn rank(&self, other: &Self) -> Ordering {
        other.common.cmp(&self.common).then_with(|| other.rating.total_cmp(&self.rating))
    }
}

/// A candidate paired with its score, only alive for the duration of a sort.
struct Scored<'a, S> {
    resource: &'a ResourceRecord,
    score: S,
}

/// Ranks resources related to a reference resource.
///
/// ```
/// use shelf_discovery::Recommender;
/// use shelf_models::{ResourceId, ResourceRecord, TagRef};
///
/// let resources = vec![
///     ResourceRecord::new(1, "Intro to ML").with_tags([TagRef::new(1, "math"), TagRef::new(2, "ai")]),
///     ResourceRecord::new(2, "Prompting").with_tag(TagRef::new(2, "ai")),
///     ResourceRecord::new(3, "Watercolours"),
/// ];
/// let related = Recommender::default().recommend(&resources, ResourceId::new(1), 10).unwrap();
/// assert_eq!(related.len(), 1);
/// assert_eq!(related[0].title, "Prompting");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recommender {
    weights: PopularityWeights,
}
impl Recommender {
    pub fn new(weights: PopularityWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &PopularityWeights {
        &self.weights
    }

    /// Recommend up to `limit` resources related to `reference`.
    ///
    /// - If the reference is untagged, every other resource is returned, most
    ///   popular first.
    /// - Otherwise only tagged resources sharing at least one tag id with the
    ///   reference are returned, ordered by the number of shared tags and
    ///   then by average rating.
    ///
    /// Ties keep the order of `resources`. The reference itself is never part
    /// of the result.
    ///
    /// Returns [`ErrorKind::InvalidArgument`] if `limit` is zero, and
    /// [`ErrorKind::NotFound`] if `reference` is not in `resources`.
    #[instrument(level = "debug", skip(self, resources), fields(snapshot = resources.len()))]
    pub fn recommend<'a>(
        &self,
        resources: &'a [ResourceRecord],
        reference: ResourceId,
        limit: usize,
    ) -> Result<Vec<&'a ResourceRecord>> {
        if limit == 0 {
            exn::bail!(ErrorKind::invalid("limit", "must be a positive integer"));
        }
        let reference = resources
            .iter()
            .find(|r| r.id == reference)
            .ok_or_raise(|| ErrorKind::NotFound(reference))?;
        let mut ranked = match reference.is_tagged() {
            true => self.by_tag_overlap(resources, reference),
            false => self.by_popularity(resources, reference),
        };
        ranked.truncate(limit);
        tracing::debug!(recommended = ranked.len(), tagged = reference.is_tagged(), "ranked candidates");
        Ok(ranked)
    }

    fn by_popularity<'a>(&self, resources: &'a [ResourceRecord], reference: &ResourceRecord) -> Vec<&'a ResourceRecord> {
        let mut scored: Vec<Scored<u64>> = resources
            .iter()
            .filter(|r| r.id != reference.id)
            .map(|resource| Scored {
                resource,
                score: self.weights.score(resource),
            })
            .collect();
        // Stable sort: equal scores keep their snapshot order.
        scored.sort_by_key(|s| Reverse(s.score));
        scored.into_iter().map(|s| s.resource).collect()
    }

    fn by_tag_overlap<'a>(&self, resources: &'a [ResourceRecord], reference: &ResourceRecord) -> Vec<&'a ResourceRecord> {
        let wanted: HashSet<u64> = reference.tag_ids();
        let mut scored: Vec<Scored<Overlap>> = resources
            .iter()
            .filter(|r| r.id != reference.id && r.is_tagged())
            .filter_map(|resource| {
                let common = resource.tag_ids().intersection(&wanted).count();
                (common > 0).then(|| Scored {
                    resource,
                    score: Overlap {
                        common,
                        rating: resource.average_rating.filter(|r| r.is_finite()).unwrap_or(0.0),
                    },
                })
            })
            .collect();
        scored.sort_by(|a, b| a.score.rank(&b.score));
        scored.into_iter().map(|s| s.resource).collect()
    }
}

/// Recommend with the default [`PopularityWeights`]. See [`Recommender::recommend`].
pub fn recommend(resources: &[ResourceRecord], reference: ResourceId, limit: usize) -> Result<Vec<&ResourceRecord>> {
    Recommender::default().recommend(resources, reference, limit)
}
