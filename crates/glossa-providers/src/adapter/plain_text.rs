//! Plain text adapter
//!
//! Turns pasted text or a local txt/md file into an untimed document, one
//! segment per paragraph.

use std::sync::Arc;

use futures::FutureExt;

use glossa_domain::error::{Error, Result};
use glossa_domain::ports::ProviderContext;
use glossa_domain::value_objects::{Document, DocumentSegment, MediaSource};
use glossa_registry::{AdaptFn, AdapterDescriptor, AdapterRegistration};

use crate::constants::MAX_TITLE_LEN;

async fn adapt(source: MediaSource, ctx: ProviderContext) -> Result<Document> {
    let (text, title_hint) = match &source {
        MediaSource::PastedText { text } => (text.clone(), None),
        MediaSource::LocalFile { path, .. } => {
            let bytes = ctx
                .storage
                .read(path)
                .await?
                .ok_or_else(|| Error::storage(format!("no content stored under '{path}'")))?;
            let text = String::from_utf8_lossy(&bytes).into_owned();
            (text, file_stem(path))
        }
        MediaSource::RemoteUrl { .. } => {
            return Err(Error::invalid_input("plain-text adapter cannot fetch URLs"));
        }
    };

    let segments: Vec<DocumentSegment> = text
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(DocumentSegment::text)
        .collect();

    let title = title_hint
        .or_else(|| title_from_content(&text))
        .unwrap_or_else(|| "Untitled".to_string());

    let mut document = Document::new(title, segments);
    if let Some(language) = ctx.detector.detect(&text) {
        document = document.with_language(language);
    }
    Ok(document)
}

fn file_stem(path: &str) -> Option<String> {
    let name = path.rsplit(['/', '\\']).next()?;
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    (!stem.is_empty()).then(|| stem.to_string())
}

fn title_from_content(text: &str) -> Option<String> {
    let line = text.lines().find(|l| !l.trim().is_empty())?.trim();
    let title: String = line.chars().take(MAX_TITLE_LEN).collect();
    Some(title)
}

/// Build the plain-text adapter registration
pub fn registration() -> AdapterRegistration {
    let descriptor = AdapterDescriptor::new("plain-text")
        .with_name("Plain text")
        .with_description("Paragraph-per-segment documents from text files and pasted input")
        .with_mime_type("text/plain")
        .with_mime_type("text/markdown")
        .with_file_extension("txt")
        .with_file_extension("md")
        .for_local_files()
        .for_pasted_text();
    let call: AdaptFn = Arc::new(|request, ctx| adapt(request.source, ctx).boxed());
    AdapterRegistration::function(descriptor, call)
}
