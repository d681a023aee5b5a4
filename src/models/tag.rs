//! Role tags.
//!
//! A tag names the role a task requires. A resource may perform a task
//! only if its tag set contains the task's tag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role category used to match tasks to resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tag {
    /// Builds and maintains the product.
    WebDeveloper,
    /// Visual and interaction design.
    WebDesigner,
    /// Requirements, testing, client consulting.
    WebConsultant,
    /// Planning and coordination.
    ProjectManager,
    /// Domain-specific role.
    Custom(String),
}

impl Tag {
    /// Creates a custom tag.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::WebDeveloper => f.write_str("web_developer"),
            Tag::WebDesigner => f.write_str("web_designer"),
            Tag::WebConsultant => f.write_str("web_consultant"),
            Tag::ProjectManager => f.write_str("project_manager"),
            Tag::Custom(name) => f.write_str(name),
        }
    }
}
