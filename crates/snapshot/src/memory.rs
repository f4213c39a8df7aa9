//! In-memory snapshot source.

use crate::SnapshotSource;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::OptionExt;
use shelf_models::{CategoryRef, ResourceId, ResourceRecord, TagRef};
use std::collections::HashSet;
use tokio::sync::RwLock;
use tracing::instrument;

/// In-memory snapshot source.
///
/// Resources live in a `Vec` behind a [`RwLock`], so the collection can be
/// updated through `&self` while other tasks keep loading snapshots. Every
/// load hands out an owned copy taken under the read lock, which is what keeps
/// a snapshot stable for the duration of a discovery call.
///
/// Tag and category catalogs can be set explicitly to cover entries that are
/// not attached to any resource. Otherwise they are derived from the resources.
///
/// # Examples
///
/// ```
/// use shelf_models::{ResourceRecord, TagRef};
/// use shelf_snapshot::{MemorySource, SnapshotSource};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = MemorySource::with_resources([
///     ResourceRecord::new(1, "AI Basics").with_tag(TagRef::new(1, "ai")),
///     ResourceRecord::new(2, "Algebra"),
/// ])?;
/// assert_eq!(source.load_all_resources().await?.len(), 2);
/// assert_eq!(source.load_all_tags().await?.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct MemorySource {
    name: String,
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    resources: Vec<ResourceRecord>,
    tags: Option<Vec<TagRef>>,
    categories: Option<Vec<CategoryRef>>,
}

impl MemorySource {
    /// Create a source holding `resources`, in the given order.
    ///
    /// Fails with [`ErrorKind::Duplicate`] if two records share an id.
    pub fn with_resources(resources: impl IntoIterator<Item = ResourceRecord>) -> Result<Self> {
        let resources: Vec<_> = resources.into_iter().collect();
        let mut seen = HashSet::with_capacity(resources.len());
        if let Some(duplicate) = resources.iter().find(|r| !seen.insert(r.id)) {
            exn::bail!(ErrorKind::Duplicate(duplicate.id));
        }
        Ok(Self {
            name: "memory".to_string(),
            state: RwLock::new(State {
                resources,
                ..State::default()
            }),
        })
    }

    /// Change the name of the source.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the derived tag catalog with an explicit one.
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = TagRef>) -> Self {
        self.state.get_mut().tags = Some(tags.into_iter().collect());
        self
    }

    /// Replace the derived category catalog with an explicit one.
    pub fn with_categories(mut self, categories: impl IntoIterator<Item = CategoryRef>) -> Self {
        self.state.get_mut().categories = Some(categories.into_iter().collect());
        self
    }

    /// Insert `resource`, or replace the record with the same id in place.
    ///
    /// Returns the replaced record, if any.
    #[instrument(level = "debug", skip_all, fields(source = %self.name, id = %resource.id))]
    pub async fn upsert(&self, resource: ResourceRecord) -> Option<ResourceRecord> {
        let mut guard = self.state.write().await;
        match guard.resources.iter_mut().find(|r| r.id == resource.id) {
            Some(existing) => Some(std::mem::replace(existing, resource)),
            None => {
                guard.resources.push(resource);
                None
            },
        }
    }

    /// Remove the record with `id`, keeping the order of the rest.
    #[instrument(level = "debug", skip(self), fields(source = %self.name))]
    pub async fn remove(&self, id: ResourceId) -> Result<ResourceRecord> {
        let mut guard = self.state.write().await;
        let position = guard.resources.iter().position(|r| r.id == id).ok_or_raise(|| ErrorKind::NotFound(id))?;
        Ok(guard.resources.remove(position))
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.resources.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.resources.is_empty()
    }
}
impl Default for MemorySource {
    fn default() -> Self {
        Self {
            name: "memory".to_string(),
            state: RwLock::new(State::default()),
        }
    }
}

#[async_trait]
impl SnapshotSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load_all_resources(&self) -> Result<Vec<ResourceRecord>> {
        let resources = self.state.read().await.resources.clone();
        tracing::debug!(source = %self.name, count = resources.len(), "loaded resource snapshot");
        Ok(resources)
    }

    async fn load_all_tags(&self) -> Result<Vec<TagRef>> {
        let guard = self.state.read().await;
        Ok(match &guard.tags {
            Some(tags) => tags.clone(),
            None => shelf_discovery::catalog::distinct_tags(&guard.resources),
        })
    }

    async fn load_all_categories(&self) -> Result<Vec<CategoryRef>> {
        let guard = self.state.read().await;
        Ok(match &guard.categories {
            Some(categories) => categories.clone(),
            None => shelf_discovery::catalog::distinct_categories(&guard.resources),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> Vec<ResourceRecord> {
        vec![
            ResourceRecord::new(1, "AI Basics")
                .with_category(CategoryRef::new(2, "Computing"))
                .with_tag(TagRef::new(1, "ai")),
            ResourceRecord::new(2, "Algebra")
                .with_category(CategoryRef::new(1, "Mathematics"))
                .with_tags([TagRef::new(2, "math"), TagRef::new(1, "ai")]),
            ResourceRecord::new(3, "Pottery"),
        ]
    }

    fn ids(resources: &[ResourceRecord]) -> Vec<u64> {
        resources.iter().map(|r| r.id.get()).collect()
    }

    #[tokio::test]
    async fn test_load_keeps_order() {
        let source = MemorySource::with_resources(library()).unwrap();
        let snapshot = source.load_all_resources().await.unwrap();
        assert_eq!(ids(&snapshot), vec![1, 2, 3]);
        assert_eq!(source.name(), "memory");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut resources = library();
        resources.push(ResourceRecord::new(2, "Algebra again"));
        let Err(err) = MemorySource::with_resources(resources) else {
            panic!("expected duplicate id to be rejected");
        };
        assert_eq!(*err, ErrorKind::Duplicate(ResourceId::new(2)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_snapshot_is_isolated_from_updates() {
        let source = MemorySource::with_resources(library()).unwrap();
        let snapshot = source.load_all_resources().await.unwrap();
        source.upsert(ResourceRecord::new(4, "Physics")).await;
        source.remove(ResourceId::new(1)).await.unwrap();
        assert_eq!(ids(&snapshot), vec![1, 2, 3]);
        assert_eq!(ids(&source.load_all_resources().await.unwrap()), vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn test_upsert_replaces_in_place() {
        let source = MemorySource::with_resources(library()).unwrap();
        let replaced = source.upsert(ResourceRecord::new(2, "Linear Algebra")).await;
        assert_eq!(replaced.map(|r| r.title), Some("Algebra".to_string()));
        let snapshot = source.load_all_resources().await.unwrap();
        assert_eq!(ids(&snapshot), vec![1, 2, 3]);
        assert_eq!(snapshot[1].title, "Linear Algebra");
        assert_eq!(source.len().await, 3);
    }

    #[tokio::test]
    async fn test_remove_missing() {
        let source = MemorySource::default();
        assert!(source.is_empty().await);
        let err = source.remove(ResourceId::new(9)).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(id) if id.get() == 9));
    }

    #[tokio::test]
    async fn test_derived_catalogs() {
        let source = MemorySource::with_resources(library()).unwrap();
        let tags = source.load_all_tags().await.unwrap();
        assert_eq!(tags.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);
        let categories = source.load_all_categories().await.unwrap();
        assert_eq!(categories.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(), vec!["Mathematics", "Computing"]);
    }

    #[tokio::test]
    async fn test_explicit_catalogs() {
        let source = MemorySource::with_resources(library())
            .unwrap()
            .with_name("fixture")
            .with_tags([TagRef::predefined(9, "unused")])
            .with_categories([]);
        assert_eq!(source.name(), "fixture");
        let tags = source.load_all_tags().await.unwrap();
        assert_eq!(tags.len(), 1);
        assert!(tags[0].is_predefined);
        assert!(source.load_all_categories().await.unwrap().is_empty());
    }
}
