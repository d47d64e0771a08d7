//! Scraped media metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata scraped for a media source
///
/// All fields are optional; a scraper fills in what it can find. The shell
/// merges this into the library entry for the imported media.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaMetadata {
    /// Display title
    pub title: Option<String>,
    /// Longer description or synopsis
    pub description: Option<String>,
    /// URL of a thumbnail image
    pub thumbnail_url: Option<String>,
    /// Media duration in seconds
    pub duration_secs: Option<f64>,
    /// Publication timestamp
    pub published_at: Option<DateTime<Utc>>,
    /// Free-form tags
    pub tags: Vec<String>,
}

impl MediaMetadata {
    /// Metadata consisting of a title only
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Whether the scraper found anything at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.thumbnail_url.is_none()
            && self.duration_secs.is_none()
            && self.published_at.is_none()
            && self.tags.is_empty()
    }
}
