//! Shared provider display metadata

use serde::{Deserialize, Serialize};

/// Display metadata common to every capability descriptor
///
/// `id` must be unique within its registry and is immutable once registered.
/// `name` and `description` are for the shell's provider listings only and
/// have no behavioral effect. `priority` is used exclusively as a tie-break
/// by the resolvers, never as a primary score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMeta {
    /// Unique provider id (e.g. "unicode", "opengraph")
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Tie-break weight, default 0
    #[serde(default)]
    pub priority: i32,
}

impl ProviderMeta {
    /// Create metadata with the given id; name defaults to the id
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            description: String::new(),
            priority: 0,
            id,
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the tie-break priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}
