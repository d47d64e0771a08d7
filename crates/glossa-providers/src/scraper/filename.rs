//! Filename scraper
//!
//! The local fallback: derives a presentable title from the file name when
//! nothing richer is available. Matches any local file, so more specific
//! scrapers outscore it on their formats.

use std::sync::Arc;

use futures::FutureExt;

use glossa_domain::error::Error;
use glossa_domain::value_objects::MediaMetadata;
use glossa_registry::{ScrapeFn, ScraperDescriptor, ScraperRegistration};

/// Turn "My_lesson.S01E02.final.mp4" into "My lesson S01E02 final"
pub fn title_from_path(path: &str) -> Option<String> {
    let name = path.rsplit(['/', '\\']).next()?;
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    let cleaned: String = stem
        .chars()
        .map(|c| if c == '_' || c == '.' { ' ' } else { c })
        .collect();
    let title = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    (!title.is_empty()).then_some(title)
}

/// Build the filename scraper registration
pub fn registration() -> ScraperRegistration {
    let descriptor = ScraperDescriptor::new("filename")
        .with_name("File name")
        .with_description("Title derived from the local file name")
        .for_local_files();
    let call: ScrapeFn = Arc::new(|request, _ctx| {
        async move {
            let path = request
                .source
                .local_path()
                .ok_or_else(|| Error::invalid_input("filename scraper needs a local file"))?;
            Ok(title_from_path(path).map(MediaMetadata::titled).unwrap_or_default())
        }
        .boxed()
    });
    ScraperRegistration::function(descriptor, call)
}
