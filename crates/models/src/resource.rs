use super::{CategoryRef, ResourceId, TagRef};
use std::collections::HashSet;
use time::OffsetDateTime;

/// An uploaded file and the metadata used to discover it.
///
/// Records are owned by the storage collaborator and only ever read (and
/// reordered) by the discovery core. Counters and the average rating are
/// maintained elsewhere: the rating in particular is computed by the database
/// and is `None` until the first rating arrives.
///
/// `categories` behaves as a set keyed by name and `tags` as a set keyed by
/// id. The `with_*` builders uphold that; code assigning the fields directly
/// is responsible for it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ResourceRecord {
    pub id: ResourceId,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub average_rating: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub view_count: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub download_count: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub categories: Vec<CategoryRef>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<TagRef>,
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub created_at: OffsetDateTime,
}
impl ResourceRecord {
    /// Create an untagged, uncategorised record with zeroed counters.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: ResourceId::new(id),
            title: title.into(),
            description: None,
            average_rating: None,
            view_count: 0,
            download_count: 0,
            categories: Vec::new(),
            tags: Vec::new(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.average_rating = Some(rating);
        self
    }

    pub fn with_views(mut self, views: u64) -> Self {
        self.view_count = views;
        self
    }

    pub fn with_downloads(mut self, downloads: u64) -> Self {
        self.download_count = downloads;
        self
    }

    pub fn with_created_at(mut self, created_at: OffsetDateTime) -> Self {
        self.created_at = created_at;
        self
    }

    /// Add a category, unless one with the same name is already present.
    pub fn with_category(mut self, category: CategoryRef) -> Self {
        if !self.categories.iter().any(|c| c.name == category.name) {
            self.categories.push(category);
        }
        self
    }

    /// Add a tag, unless one with the same id is already present.
    pub fn with_tag(mut self, tag: TagRef) -> Self {
        if !self.tags.iter().any(|t| t.id == tag.id) {
            self.tags.push(tag);
        }
        self
    }

    pub fn with_tags(self, tags: impl IntoIterator<Item = TagRef>) -> Self {
        tags.into_iter().fold(self, Self::with_tag)
    }

    pub fn with_categories(self, categories: impl IntoIterator<Item = CategoryRef>) -> Self {
        categories.into_iter().fold(self, Self::with_category)
    }

    pub fn is_tagged(&self) -> bool {
        !self.tags.is_empty()
    }

    /// The set of tag ids on this record.
    pub fn tag_ids(&self) -> HashSet<u64> {
        self.tags.iter().map(|t| t.id).collect()
    }
}
impl AsRef<ResourceRecord> for ResourceRecord {
    fn as_ref(&self) -> &ResourceRecord {
        self
    }
}
