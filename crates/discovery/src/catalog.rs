//! Tags and categories referenced by a snapshot.
//!
//! Used when the snapshot owner has no separate tag or category table to
//! list from. Each tag or category appears once, ordered by id.

use shelf_models::{CategoryRef, ResourceRecord, TagRef};
use std::collections::{BTreeMap, HashSet};

/// Every distinct tag (by id) carried by `resources`, ordered by id.
///
/// When the same id shows up with diverging details, the first occurrence wins.
pub fn distinct_tags<'a, I>(resources: I) -> Vec<TagRef>
where
    I: IntoIterator<Item = &'a ResourceRecord>,
{
    let mut tags = BTreeMap::new();
    for tag in resources.into_iter().flat_map(|r| &r.tags) {
        tags.entry(tag.id).or_insert_with(|| tag.clone());
    }
    tags.into_values().collect()
}

/// Every distinct category (by name) carried by `resources`, ordered by id.
pub fn distinct_categories<'a, I>(resources: I) -> Vec<CategoryRef>
where
    I: IntoIterator<Item = &'a ResourceRecord>,
{
    let mut seen = HashSet::new();
    let mut categories: Vec<CategoryRef> = resources
        .into_iter()
        .flat_map(|r| &r.categories)
        .filter(|c| seen.insert(c.name.as_str()))
        .cloned()
        .collect();
    categories.sort_by_key(|c| c.id);
    categories
}
