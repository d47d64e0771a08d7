//! Subtitle file adapter
//!
//! Turns an srt/vtt file into a document with one timed segment per cue.
//! Scores higher than the plain-text adapter for subtitle sources because
//! it matches the format dimensions the generic adapter doesn't.

use std::sync::Arc;

use futures::FutureExt;

use glossa_domain::error::{Error, Result};
use glossa_domain::ports::ProviderContext;
use glossa_domain::value_objects::{Document, DocumentSegment, MediaSource};
use glossa_registry::{AdaptFn, AdapterDescriptor, AdapterRegistration};

use crate::subrip;

async fn adapt(source: MediaSource, ctx: ProviderContext) -> Result<Document> {
    let MediaSource::LocalFile { path, .. } = &source else {
        return Err(Error::invalid_input(
            "subtitle adapter reads local files only",
        ));
    };
    let bytes = ctx
        .storage
        .read(path)
        .await?
        .ok_or_else(|| Error::storage(format!("no content stored under '{path}'")))?;
    let text = String::from_utf8_lossy(&bytes);

    let cues = subrip::parse_cues(&text);
    if cues.is_empty() {
        return Err(Error::invalid_input(format!(
            "'{path}' contains no parseable cues"
        )));
    }

    let full_text: String = cues
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let segments = cues
        .into_iter()
        .map(|cue| DocumentSegment::timed(cue.text, cue.start_ms, cue.end_ms))
        .collect();

    let title = path
        .rsplit(['/', '\\'])
        .next()
        .and_then(|name| name.split('.').next())
        .unwrap_or("Subtitles")
        .to_string();

    let mut document = Document::new(title, segments);
    if let Some(language) = ctx.detector.detect(&full_text) {
        document = document.with_language(language);
    }
    Ok(document)
}

/// Build the subtitle-file adapter registration
pub fn registration() -> AdapterRegistration {
    let descriptor = AdapterDescriptor::new("subtitle-file")
        .with_name("Subtitle file")
        .with_description("Timed documents from SubRip and WebVTT files")
        .with_mime_type("application/x-subrip")
        .with_mime_type("text/vtt")
        .with_file_extension("srt")
        .with_file_extension("vtt")
        .for_local_files();
    let call: AdaptFn = Arc::new(|request, ctx| adapt(request.source, ctx).boxed());
    AdapterRegistration::function(descriptor, call)
}
