use crate::error::{ErrorKind, Result};
use exn::OptionExt;
use shelf_config::Config;
use shelf_discovery::error::ErrorKind as DiscoveryErrorKind;
use shelf_discovery::{Recommender, SearchQuery, filter, tags};
use shelf_models::{CategoryRef, ResourceId, ResourceRecord, TagRef};
use shelf_snapshot::{SourceHandle, TagIndex};
use std::collections::HashSet;
use tracing::instrument;

/// Search, recommendation and tag listing over a [`SourceHandle`].
///
/// Cheap to clone: clones share the same source. No state is kept between
/// calls, so two calls may observe different snapshots if the source changes
/// in between.
#[derive(Clone)]
pub struct Discovery {
    source: SourceHandle,
    recommender: Recommender,
    default_limit: usize,
    popular_limit: usize,
    max_tag_name_length: usize,
}

impl Discovery {
    /// Create a facade with the built-in defaults.
    pub fn new(source: SourceHandle) -> Self {
        Self::from_valid_config(source, &Config::default())
    }

    /// Create a facade using the limits and weights from `config`.
    ///
    /// Fails with [`ErrorKind::Config`] if `config` does not pass
    /// [`Config::validate()`].
    pub fn with_config(source: SourceHandle, config: &Config) -> Result<Self> {
        config.validate().map_err(ErrorKind::config)?;
        Ok(Self::from_valid_config(source, config))
    }

    fn from_valid_config(source: SourceHandle, config: &Config) -> Self {
        Self {
            source,
            recommender: Recommender::new(config.discovery.popularity),
            default_limit: config.discovery.default_limit,
            popular_limit: config.tags.popular_limit,
            max_tag_name_length: config.tags.max_name_length,
        }
    }

    /// Name of the underlying snapshot source.
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    async fn snapshot(&self) -> Result<Vec<ResourceRecord>> {
        let resources = self.source.load_all_resources().await.map_err(ErrorKind::snapshot)?;
        tracing::debug!(source = self.source.name(), count = resources.len(), "loaded snapshot");
        Ok(resources)
    }

    async fn tag_catalog(&self) -> Result<Vec<TagRef>> {
        self.source.load_all_tags().await.map_err(ErrorKind::snapshot)
    }

    /// Every resource, in source order.
    #[instrument(level = "debug", skip(self))]
    pub async fn list(&self) -> Result<Vec<ResourceRecord>> {
        self.snapshot().await
    }

    /// Resources matching `query`, in source order.
    #[instrument(level = "debug", skip(self))]
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<ResourceRecord>> {
        let snapshot = self.snapshot().await?;
        if query.is_empty() {
            return Ok(snapshot);
        }
        Ok(filter(&snapshot, query).into_iter().cloned().collect())
    }

    /// Resources related to `reference`, best match first.
    ///
    /// `limit` falls back to the configured default when `None`.
    #[instrument(level = "debug", skip(self))]
    pub async fn recommend(&self, reference: ResourceId, limit: Option<usize>) -> Result<Vec<ResourceRecord>> {
        let snapshot = self.snapshot().await?;
        let limit = limit.unwrap_or(self.default_limit);
        let related = self.recommender.recommend(&snapshot, reference, limit).map_err(ErrorKind::discovery)?;
        Ok(related.into_iter().cloned().collect())
    }

    /// The resource with id `id`.
    #[instrument(level = "debug", skip(self))]
    pub async fn resource(&self, id: ResourceId) -> Result<ResourceRecord> {
        let snapshot = self.snapshot().await?;
        snapshot
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_raise(|| DiscoveryErrorKind::NotFound(id))
            .map_err(ErrorKind::discovery)
    }

    /// Resources carrying the tag with `tag_id`, in source order.
    #[instrument(level = "debug", skip(self))]
    pub async fn tagged_with(&self, tag_id: u64) -> Result<Vec<ResourceRecord>> {
        let snapshot = self.snapshot().await?;
        let index = TagIndex::build(&snapshot);
        let wanted: HashSet<ResourceId> = index.resources_for(tag_id).iter().copied().collect();
        Ok(snapshot.into_iter().filter(|r| wanted.contains(&r.id)).collect())
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn categories(&self) -> Result<Vec<CategoryRef>> {
        self.source.load_all_categories().await.map_err(ErrorKind::snapshot)
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn tags(&self) -> Result<Vec<TagRef>> {
        self.tag_catalog().await
    }

    /// The tag with id `id`.
    #[instrument(level = "debug", skip(self))]
    pub async fn tag(&self, id: u64) -> Result<TagRef> {
        let catalog = self.tag_catalog().await?;
        tags::tag_by_id(&catalog, id).cloned().map_err(ErrorKind::discovery)
    }

    /// Custom tags created by `user`.
    #[instrument(level = "debug", skip(self))]
    pub async fn tags_created_by(&self, user: u64) -> Result<Vec<TagRef>> {
        let catalog = self.tag_catalog().await?;
        Ok(tags::created_by(&catalog, user).into_iter().cloned().collect())
    }

    /// Check that `user` may delete the tag with id `id`, returning that tag.
    ///
    /// Removing it is left to whoever owns the tag table.
    #[instrument(level = "debug", skip(self))]
    pub async fn check_tag_deletable(&self, id: u64, user: u64) -> Result<TagRef> {
        let catalog = self.tag_catalog().await?;
        let tag = tags::tag_by_id(&catalog, id).map_err(ErrorKind::discovery)?;
        tags::check_deletable(tag, user).map_err(ErrorKind::discovery)?;
        Ok(tag.clone())
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn predefined_tags(&self) -> Result<Vec<TagRef>> {
        let catalog = self.tag_catalog().await?;
        Ok(tags::predefined_tags(&catalog).into_iter().cloned().collect())
    }

    /// Most used tags first; `limit` falls back to the configured default.
    #[instrument(level = "debug", skip(self))]
    pub async fn popular_tags(&self, limit: Option<usize>) -> Result<Vec<TagRef>> {
        let catalog = self.tag_catalog().await?;
        let limit = limit.unwrap_or(self.popular_limit);
        let popular = tags::popular_tags(&catalog, limit).map_err(ErrorKind::discovery)?;
        Ok(popular.into_iter().cloned().collect())
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn search_tags(&self, keyword: &str) -> Result<Vec<TagRef>> {
        let catalog = self.tag_catalog().await?;
        Ok(tags::search_tags(&catalog, keyword).into_iter().cloned().collect())
    }

    /// Check a proposed custom tag name against the catalog, returning it trimmed.
    #[instrument(level = "debug", skip(self))]
    pub async fn validate_tag_name(&self, name: &str) -> Result<String> {
        let catalog = self.tag_catalog().await?;
        tags::validate_tag_name(&catalog, name, self.max_tag_name_length).map_err(ErrorKind::discovery)
    }
}
