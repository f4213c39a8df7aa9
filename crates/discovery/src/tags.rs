//! Tag listing, lookup and naming rules.

use crate::error::{ErrorKind, Result};
use exn::OptionExt;
use shelf_models::TagRef;
use std::cmp::Reverse;
use tracing::instrument;

/// Number of tags returned by [`popular_tags`] when the caller does not ask for a limit.
pub const DEFAULT_POPULAR_LIMIT: usize = 20;
/// Longest accepted tag name, in characters.
pub const MAX_TAG_NAME_LENGTH: usize = 50;

/// The `limit` most used tags, by usage count descending. Ties keep input order.
#[instrument(level = "debug", skip(tags))]
pub fn popular_tags<'a, I>(tags: I, limit: usize) -> Result<Vec<&'a TagRef>>
where
    I: IntoIterator<Item = &'a TagRef>,
{
    if limit == 0 {
        exn::bail!(ErrorKind::invalid("limit", "must be a positive integer"));
    }
    let mut tags: Vec<_> = tags.into_iter().collect();
    tags.sort_by_key(|t| Reverse(t.usage_count));
    tags.truncate(limit);
    Ok(tags)
}

/// Only the system-curated tags, in input order.
pub fn predefined_tags<'a, I>(tags: I) -> Vec<&'a TagRef>
where
    I: IntoIterator<Item = &'a TagRef>,
{
    tags.into_iter().filter(|t| t.is_predefined).collect()
}

/// Tags whose name contains `keyword`, ignoring case. A blank keyword matches everything.
pub fn search_tags<'a, I>(tags: I, keyword: &str) -> Vec<&'a TagRef>
where
    I: IntoIterator<Item = &'a TagRef>,
{
    let keyword = keyword.trim().to_lowercase();
    tags.into_iter().filter(|t| t.name.to_lowercase().contains(&keyword)).collect()
}

/// Custom tags created by `user`, in input order.
pub fn created_by<'a, I>(tags: I, user: u64) -> Vec<&'a TagRef>
where
    I: IntoIterator<Item = &'a TagRef>,
{
    tags.into_iter().filter(|t| t.is_owned_by(user)).collect()
}

/// Lookup of a tag by id, failing with [`ErrorKind::TagNotFound`].
pub fn tag_by_id<'a, I>(tags: I, id: u64) -> Result<&'a TagRef>
where
    I: IntoIterator<Item = &'a TagRef>,
{
    tags.into_iter().find(|t| t.id == id).ok_or_raise(|| ErrorKind::TagNotFound(id))
}

/// Check that `user` may delete `tag`.
///
/// Predefined tags are never deletable, and custom tags only by their creator.
/// Both cases fail with [`ErrorKind::Forbidden`].
pub fn check_deletable(tag: &TagRef, user: u64) -> Result<()> {
    if tag.is_predefined {
        exn::bail!(ErrorKind::Forbidden("predefined tags cannot be deleted"));
    }
    if !tag.is_owned_by(user) {
        exn::bail!(ErrorKind::Forbidden("only the creator of a tag can delete it"));
    }
    Ok(())
}

/// Case-insensitive lookup of a tag by exact name.
pub fn find_tag<'a, I>(tags: I, name: &str) -> Option<&'a TagRef>
where
    I: IntoIterator<Item = &'a TagRef>,
{
    let name = name.trim().to_lowercase();
    tags.into_iter().find(|t| t.name.to_lowercase() == name)
}

/// Check that `name` is acceptable for a new custom tag and return it trimmed.
///
/// - [`ErrorKind::InvalidArgument`] if the trimmed name is empty or longer
///   than `max_length` characters.
/// - [`ErrorKind::Conflict`] if a tag with the same name, ignoring case,
///   already exists in `existing`.
#[instrument(level = "debug", skip(existing))]
pub fn validate_tag_name<'a, I>(existing: I, name: &str, max_length: usize) -> Result<String>
where
    I: IntoIterator<Item = &'a TagRef>,
{
    let trimmed = name.trim();
    if trimmed.is_empty() {
        exn::bail!(ErrorKind::invalid("name", "tag name cannot be empty"));
    }
    if trimmed.chars().count() > max_length {
        exn::bail!(ErrorKind::invalid(
            "name",
            format!("tag name cannot be longer than {max_length} characters")
        ));
    }
    if let Some(tag) = find_tag(existing, trimmed) {
        exn::bail!(ErrorKind::Conflict(tag.name.clone()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn tags() -> Vec<TagRef> {
        vec![
            TagRef::predefined(1, "Mathematics").with_usage_count(12),
            TagRef::new(2, "machine-learning").with_creator(7).with_usage_count(30),
            TagRef::predefined(3, "Physics").with_usage_count(12),
            TagRef::new(4, "exam-prep").with_creator(8),
            TagRef::predefined(5, "History").with_usage_count(40),
        ]
    }

    fn ids(tags: &[&TagRef]) -> Vec<u64> {
        tags.iter().map(|t| t.id).collect()
    }

    #[rstest]
    #[case(DEFAULT_POPULAR_LIMIT, vec![5, 2, 1, 3, 4])]
    #[case(3, vec![5, 2, 1])]
    #[case(1, vec![5])]
    fn test_popular_tags(tags: Vec<TagRef>, #[case] limit: usize, #[case] expected: Vec<u64>) {
        assert_eq!(ids(&popular_tags(&tags, limit).unwrap()), expected);
    }

    #[rstest]
    fn test_popular_tags_zero_limit(tags: Vec<TagRef>) {
        let err = popular_tags(&tags, 0).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidArgument { .. }));
    }

    #[rstest]
    fn test_predefined_tags(tags: Vec<TagRef>) {
        assert_eq!(ids(&predefined_tags(&tags)), vec![1, 3, 5]);
    }

    #[rstest]
    #[case("ma", vec![1, 2])]
    #[case("PHYS", vec![3])]
    #[case("  prep ", vec![4])]
    #[case("", vec![1, 2, 3, 4, 5])]
    #[case("chemistry", vec![])]
    fn test_search_tags(tags: Vec<TagRef>, #[case] keyword: &str, #[case] expected: Vec<u64>) {
        assert_eq!(ids(&search_tags(&tags, keyword)), expected);
    }

    #[rstest]
    #[case(7, vec![2])]
    #[case(8, vec![4])]
    #[case(9, vec![])]
    fn test_created_by(tags: Vec<TagRef>, #[case] user: u64, #[case] expected: Vec<u64>) {
        assert_eq!(ids(&created_by(&tags, user)), expected);
    }

    #[rstest]
    fn test_tag_by_id(tags: Vec<TagRef>) {
        assert_eq!(tag_by_id(&tags, 3).unwrap().name, "Physics");
        let err = tag_by_id(&tags, 42).unwrap_err();
        assert_eq!(*err, ErrorKind::TagNotFound(42));
    }

    #[rstest]
    #[case(2, 7, true)]
    #[case(4, 8, true)]
    // Someone else's custom tag.
    #[case(2, 8, false)]
    // Predefined tags have no owner.
    #[case(1, 7, false)]
    #[case(3, 8, false)]
    fn test_check_deletable(tags: Vec<TagRef>, #[case] id: u64, #[case] user: u64, #[case] allowed: bool) {
        let tag = tag_by_id(&tags, id).unwrap();
        match check_deletable(tag, user) {
            Ok(()) => assert!(allowed),
            Err(err) => {
                assert!(!allowed);
                assert!(matches!(&*err, ErrorKind::Forbidden(_)));
            },
        }
    }

    #[test]
    fn test_predefined_tag_not_deletable_even_with_creator() {
        let tag = TagRef::predefined(1, "Mathematics").with_creator(7);
        let err = check_deletable(&tag, 7).unwrap_err();
        assert_eq!(*err, ErrorKind::Forbidden("predefined tags cannot be deleted"));
    }

    #[rstest]
    fn test_find_tag(tags: Vec<TagRef>) {
        assert_eq!(find_tag(&tags, "history").map(|t| t.id), Some(5));
        assert_eq!(find_tag(&tags, "hist"), None);
    }

    #[rstest]
    #[case("  Chemistry  ", "Chemistry")]
    #[case("a", "a")]
    fn test_validate_tag_name(tags: Vec<TagRef>, #[case] name: &str, #[case] expected: &str) {
        assert_eq!(validate_tag_name(&tags, name, MAX_TAG_NAME_LENGTH).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("    ")]
    fn test_validate_tag_name_empty(tags: Vec<TagRef>, #[case] name: &str) {
        let err = validate_tag_name(&tags, name, MAX_TAG_NAME_LENGTH).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidArgument { argument: "name", .. }));
    }

    #[rstest]
    fn test_validate_tag_name_too_long(tags: Vec<TagRef>) {
        let name = "x".repeat(MAX_TAG_NAME_LENGTH + 1);
        assert!(validate_tag_name(&tags, &name, MAX_TAG_NAME_LENGTH).is_err());
        // Length is counted in characters, not bytes.
        let name = "é".repeat(MAX_TAG_NAME_LENGTH);
        assert!(validate_tag_name(&tags, &name, MAX_TAG_NAME_LENGTH).is_ok());
    }

    #[rstest]
    #[case("physics")]
    #[case(" MACHINE-LEARNING ")]
    fn test_validate_tag_name_conflict(tags: Vec<TagRef>, #[case] name: &str) {
        let err = validate_tag_name(&tags, name, MAX_TAG_NAME_LENGTH).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Conflict(_)));
    }
}
