//! Embedded/sidecar track engine
//!
//! Extracts captions that already exist next to the media: for
//! `media/lesson.mp4` it looks up `media/lesson.ja.srt`, `media/lesson.srt`
//! and their vtt variants in storage. Local, free and offline, so the host
//! registers it before any cloud engine.

use std::sync::Arc;

use futures::FutureExt;

use glossa_domain::error::{Error, Result};
use glossa_domain::ports::{ProviderContext, SubtitleRequest};
use glossa_domain::value_objects::{InputKind, SubtitleTrack};
use glossa_registry::{EngineDescriptor, EngineRegistration, GenerateFn};

use crate::subrip;

const ENGINE_ID: &str = "embedded-tracks";

async fn sidecar_track(
    ctx: &ProviderContext,
    base: &str,
    language: Option<&str>,
) -> Result<Option<SubtitleTrack>> {
    for extension in ["srt", "vtt"] {
        let key = match language {
            Some(code) => format!("{base}.{code}.{extension}"),
            None => format!("{base}.{extension}"),
        };
        let Some(bytes) = ctx.storage.read(&key).await? else {
            continue;
        };
        let text = String::from_utf8_lossy(&bytes);
        let cues = subrip::parse_cues(&text);
        if cues.is_empty() {
            tracing::warn!(key, "sidecar file has no parseable cues");
            continue;
        }
        let language = match language {
            Some(code) => code.to_string(),
            None => ctx
                .detector
                .detect(&text)
                .unwrap_or_else(|| "und".to_string()),
        };
        return Ok(Some(SubtitleTrack::new(language, ENGINE_ID, cues)));
    }
    Ok(None)
}

async fn generate(request: SubtitleRequest, ctx: ProviderContext) -> Result<Vec<SubtitleTrack>> {
    let path = request
        .source
        .local_path()
        .ok_or_else(|| Error::invalid_input("embedded-track engine reads local media only"))?;
    let base = path.rsplit_once('.').map_or(path, |(base, _)| base);

    let mut tracks = Vec::new();
    for language in &request.languages {
        if let Some(track) = sidecar_track(&ctx, base, Some(language)).await? {
            tracks.push(track);
        }
    }
    if tracks.is_empty() {
        if let Some(track) = sidecar_track(&ctx, base, None).await? {
            tracks.push(track);
        }
    }
    Ok(tracks)
}

/// Build the embedded-track engine registration
pub fn registration() -> EngineRegistration {
    let descriptor = EngineDescriptor::new(ENGINE_ID)
        .with_name("Embedded tracks")
        .with_description("Sidecar subtitle files stored next to the media")
        .with_input_kinds([InputKind::Audio, InputKind::Video])
        .with_language("*");
    let call: GenerateFn = Arc::new(|request, ctx| generate(request, ctx).boxed());
    EngineRegistration::function(descriptor, call)
}
