use std::fmt::{Display, Formatter, Result as FmtResult};

/// A tag attached to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TagRef {
    pub id: u64,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    /// System-curated tags cannot be edited or deleted by normal users
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_predefined: bool,
    /// Id of the user who created a custom tag; `None` for predefined tags
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub created_by: Option<u64>,
    /// Number of resource associations, incremented once per association at upload time
    #[cfg_attr(feature = "serde", serde(default))]
    pub usage_count: u64,
}
impl TagRef {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            is_predefined: false,
            created_by: None,
            usage_count: 0,
        }
    }

    /// Create a system-curated tag.
    pub fn predefined(id: u64, name: impl Into<String>) -> Self {
        Self { is_predefined: true, ..Self::new(id, name) }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the tag as a custom tag owned by `user`.
    pub fn with_creator(mut self, user: u64) -> Self {
        self.created_by = Some(user);
        self
    }

    /// Returns `true` if `user` created this tag.
    pub fn is_owned_by(&self, user: u64) -> bool {
        self.created_by == Some(user)
    }

    pub fn with_usage_count(mut self, usage_count: u64) -> Self {
        self.usage_count = usage_count;
        self
    }
}
impl AsRef<str> for TagRef {
    fn as_ref(&self) -> &str {
        &self.name
    }
}
impl Display for TagRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name)
    }
}
