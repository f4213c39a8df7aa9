use crate::error::Result;
use async_trait::async_trait;
use shelf_discovery::catalog::{distinct_categories, distinct_tags};
use shelf_models::{CategoryRef, ResourceRecord, TagRef};

/// Supplies point-in-time snapshots of the resource collection.
///
/// Implementations own isolation: a snapshot returned by
/// [`load_all_resources()`](Self::load_all_resources) must not change while
/// the caller reads it, which in practice means handing out an owned copy or
/// reading inside a consistent transaction. No pagination is expected; the
/// discovery core works on the whole collection at once.
///
/// # Examples
///
/// ```
/// use shelf_snapshot::{SnapshotSource, error::Result};
///
/// async fn count_untagged(source: &dyn SnapshotSource) -> Result<usize> {
///     let snapshot = source.load_all_resources().await?;
///     Ok(snapshot.iter().filter(|r| !r.is_tagged()).count())
/// }
/// ```
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Name of the configured source (used for logging only).
    fn name(&self) -> &str;

    /// Load every resource, including its category and tag sets.
    ///
    /// Resource ids must be unique within the returned collection. The order
    /// of the collection is the base order that search results preserve and
    /// that recommendation ties fall back to, so it should be stable (e.g. by
    /// id or insertion order).
    async fn load_all_resources(&self) -> Result<Vec<ResourceRecord>>;

    /// Load every known tag.
    ///
    /// Default implementation derives the tags from
    /// [`load_all_resources()`](Self::load_all_resources), which misses tags
    /// not attached to any resource. Sources with a tag table should override it.
    async fn load_all_tags(&self) -> Result<Vec<TagRef>> {
        let resources = self.load_all_resources().await?;
        Ok(distinct_tags(&resources))
    }

    /// Load every known category.
    ///
    /// Same caveat as [`load_all_tags()`](Self::load_all_tags).
    async fn load_all_categories(&self) -> Result<Vec<CategoryRef>> {
        let resources = self.load_all_resources().await?;
        Ok(distinct_categories(&resources))
    }
}
