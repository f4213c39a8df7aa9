use std::fmt::{Display, Formatter, Result as FmtResult};

/// A category a resource has been filed under.
///
/// Category names are unique (case-sensitive) in storage, but every match
/// performed by the discovery core is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CategoryRef {
    pub id: u64,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    /// Optional emoji shown next to the category name (e.g. "📚")
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub icon: Option<String>,
}
impl CategoryRef {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            icon: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}
impl AsRef<str> for CategoryRef {
    fn as_ref(&self) -> &str {
        &self.name
    }
}
impl Display for CategoryRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.icon {
            Some(icon) => write!(f, "{icon} {}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
