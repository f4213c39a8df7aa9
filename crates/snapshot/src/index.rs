use shelf_models::{ResourceId, ResourceRecord};
use std::collections::HashMap;

/// Reverse lookup from tag id to the resources carrying that tag.
///
/// Built from a snapshot and never updated in place: rebuild it from the next
/// snapshot instead. Resource ids under each tag keep snapshot order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    by_tag: HashMap<u64, Vec<ResourceId>>,
}
impl TagIndex {
    pub fn build<'a>(resources: impl IntoIterator<Item = &'a ResourceRecord>) -> Self {
        let mut by_tag: HashMap<u64, Vec<ResourceId>> = HashMap::new();
        for resource in resources {
            for tag_id in resource.tag_ids() {
                by_tag.entry(tag_id).or_default().push(resource.id);
            }
        }
        Self { by_tag }
    }

    /// Resources tagged with `tag_id`, empty if the tag is unused.
    pub fn resources_for(&self, tag_id: u64) -> &[ResourceId] {
        self.by_tag.get(&tag_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of resources carrying `tag_id` in this snapshot.
    pub fn usage(&self, tag_id: u64) -> usize {
        self.resources_for(tag_id).len()
    }

    /// Number of distinct tags in use.
    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}
