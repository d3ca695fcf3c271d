use std::fmt;

/// Slug of a resource whose memberships carry ranks (a profile, a team)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceSlug(String);

impl ResourceSlug {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceSlug {
    fn from(slug: &str) -> Self {
        Self::new(slug)
    }
}
