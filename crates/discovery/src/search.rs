//! Keyword, category and tag filtering.
//!
//! Every criterion narrows the surviving set and none of them ever widens it.
//! Blank criteria are skipped entirely, so a default [`SearchQuery`] returns
//! the input unchanged. The input order is preserved: sorting is left to the
//! caller.

use shelf_models::ResourceRecord;
use tracing::instrument;

/// Search criteria, as received from the caller.
///
/// Values are kept verbatim; trimming and case folding happen when the query
/// is applied by [`filter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Substring searched for in the title and description
    pub keyword: Option<String>,
    /// Exact (case-insensitive) category name
    pub category: Option<String>,
    /// Tag names; a record matches if it carries any one of them
    pub tags: Vec<String>,
}
impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags<T: Into<String>>(mut self, tags: impl IntoIterator<Item = T>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Returns `true` if applying this query would not remove anything.
    pub fn is_empty(&self) -> bool {
        let criteria = Criteria::from(self);
        criteria.keyword.is_none() && criteria.category.is_none() && criteria.tags.is_empty()
    }
}

/// Normalized form of a [`SearchQuery`]: trimmed, lowercased, blanks dropped.
struct Criteria {
    keyword: Option<String>,
    category: Option<String>,
    tags: Vec<String>,
}
impl From<&SearchQuery> for Criteria {
    fn from(query: &SearchQuery) -> Self {
        Self {
            keyword: query.keyword.as_deref().and_then(normalize),
            category: query.category.as_deref().and_then(normalize),
            tags: query.tags.iter().filter_map(|t| normalize(t)).collect(),
        }
    }
}
impl Criteria {
    fn keyword(&self, resource: &ResourceRecord) -> bool {
        let Some(keyword) = &self.keyword else {
            return true;
        };
        resource.title.to_lowercase().contains(keyword)
            || resource.description.as_ref().is_some_and(|d| d.to_lowercase().contains(keyword))
    }

    fn category(&self, resource: &ResourceRecord) -> bool {
        let Some(category) = &self.category else {
            return true;
        };
        resource.categories.iter().any(|c| c.name.to_lowercase() == *category)
    }

    fn tags(&self, resource: &ResourceRecord) -> bool {
        if self.tags.is_empty() {
            return true;
        }
        resource.tags.iter().any(|t| self.tags.contains(&t.name.to_lowercase()))
    }
}

fn normalize(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Narrow `resources` down to the records matching `query`.
///
/// 1. **Keyword**: the trimmed keyword must be a case-insensitive substring of
///    the title or, when present, the description.
/// 2. **Category**: at least one category name must equal the trimmed
///    category, ignoring case.
/// 3. **Tags**: at least one tag name must equal any of the requested tags,
///    ignoring case.
///
/// Accepts any iterator of borrowed records so that a previous result can be
/// filtered again without cloning.
#[instrument(level = "debug", skip_all, fields(keyword = ?query.keyword, category = ?query.category, tags = query.tags.len()))]
pub fn filter<'a, I>(resources: I, query: &SearchQuery) -> Vec<&'a ResourceRecord>
where
    I: IntoIterator<Item = &'a ResourceRecord>,
{
    let criteria = Criteria::from(query);
    let matches: Vec<_> = resources
        .into_iter()
        .filter(|r| criteria.keyword(r))
        .filter(|r| criteria.category(r))
        .filter(|r| criteria.tags(r))
        .collect();
    tracing::debug!(matches = matches.len(), "filtered resources");
    matches
}
