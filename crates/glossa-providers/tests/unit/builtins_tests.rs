//! Resolution behavior of the builtin provider set

use std::sync::Arc;

use glossa_domain::ports::{AdaptRequest, ProviderContext, ScrapeRequest, TokenizeRequest};
use glossa_domain::value_objects::{InputKind, MediaSource};
use glossa_providers::{register_builtins, BuiltinOptions, HeuristicDetector, MemoryStorage};
use glossa_registry::{Describe, EngineQuery, RegistrySet, SourceQuery};

const SRT: &str = "1\n00:00:01,000 --> 00:00:02,000\nBonjour tout le monde.\n\n2\n00:00:03,000 --> 00:00:04,000\nComment allez-vous?\n";

fn fixture() -> (RegistrySet, ProviderContext) {
    let set = RegistrySet::new();
    register_builtins(&set, &BuiltinOptions::default()).unwrap();

    let storage = MemoryStorage::new()
        .with_blob("notes/lesson.txt", "La casa\n\nLa casa es azul.\nMe gusta.")
        .with_blob("media/lesson.fr.srt", SRT)
        .with_blob("media/podcast.srt", SRT)
        .with_blob("subs/intro.srt", SRT)
        .with_blob("lexicons/cjk", "日本語\n勉強\n");
    let ctx = ProviderContext::new(Arc::new(storage), Arc::new(HeuristicDetector::new()));
    (set, ctx)
}

#[tokio::test]
async fn wildcard_tokenizer_handles_unknown_language() {
    let (set, ctx) = fixture();
    let tokens = set
        .tokenizers
        .tokenize(TokenizeRequest::new("sv", "hej pa dig"), &ctx)
        .await
        .unwrap();
    assert_eq!(tokens.iter().filter(|t| t.word).count(), 3);
}

#[tokio::test]
async fn lexicon_tokenizer_wins_for_japanese() {
    let (set, ctx) = fixture();
    let resolved = set.tokenizers.resolve("ja").unwrap();
    assert_eq!(resolved.id(), "lexicon");

    let tokens = set
        .tokenizers
        .tokenize(TokenizeRequest::new("ja", "日本語を勉強する"), &ctx)
        .await
        .unwrap();
    assert!(tokens.iter().any(|t| t.text == "日本語"));
    assert!(tokens.iter().any(|t| t.text == "勉強"));
}

#[tokio::test]
async fn subtitle_file_adapter_outscores_plain_text_for_srt() {
    let (set, _ctx) = fixture();
    let query = SourceQuery::from_source(&MediaSource::local_file("subs/intro.srt"));
    assert_eq!(set.adapters.resolve(&query).unwrap().id(), "subtitle-file");
}

#[tokio::test]
async fn plain_text_adapter_takes_pasted_input() {
    let (set, ctx) = fixture();
    let document = set
        .adapters
        .adapt(
            AdaptRequest::new(MediaSource::pasted_text("Premiere ligne\n\nDeuxieme.")),
            &ctx,
        )
        .await
        .unwrap();
    assert_eq!(document.segments.len(), 2);
    assert_eq!(document.title, "Premiere ligne");
}

#[tokio::test]
async fn text_file_adapts_untimed_paragraphs() {
    let (set, ctx) = fixture();
    let document = set
        .adapters
        .adapt(
            AdaptRequest::new(MediaSource::local_file("notes/lesson.txt")),
            &ctx,
        )
        .await
        .unwrap();
    assert_eq!(document.title, "lesson");
    assert_eq!(document.segments.len(), 2);
    assert!(document.segments.iter().all(|s| s.start_ms.is_none()));
}

#[tokio::test]
async fn srt_file_adapts_with_timed_segments() {
    let (set, ctx) = fixture();
    let document = set
        .adapters
        .adapt(
            AdaptRequest::new(MediaSource::local_file("subs/intro.srt")),
            &ctx,
        )
        .await
        .unwrap();
    assert_eq!(document.segments.len(), 2);
    assert_eq!(document.segments[0].start_ms, Some(1000));
}

#[tokio::test]
async fn filename_scraper_titles_local_media() {
    let (set, ctx) = fixture();
    let metadata = set
        .scrapers
        .scrape(
            ScrapeRequest::new(MediaSource::local_file("media/Spanish_lesson.04.mp4")),
            &ctx,
        )
        .await
        .unwrap();
    assert_eq!(metadata.title.as_deref(), Some("Spanish lesson 04"));
}

#[tokio::test]
async fn embedded_engine_reads_language_sidecar() {
    let (set, ctx) = fixture();
    let request = glossa_domain::ports::SubtitleRequest::new(
        MediaSource::local_file("media/lesson.mp4"),
        vec!["fr".to_string()],
        InputKind::Video,
    );
    let query = EngineQuery::from_request(&request).with_local_preference();
    let tracks = set.subtitles.generate(request, &query, &ctx).await.unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].language, "fr");
    assert_eq!(tracks[0].cues.len(), 2);
}

#[tokio::test]
async fn embedded_engine_falls_back_to_unlabelled_sidecar() {
    let (set, ctx) = fixture();
    let request = glossa_domain::ports::SubtitleRequest::new(
        MediaSource::local_file("media/podcast.mp3"),
        vec!["de".to_string()],
        InputKind::Audio,
    );
    let query = EngineQuery::from_request(&request);
    let tracks = set.subtitles.generate(request, &query, &ctx).await.unwrap();
    assert_eq!(tracks.len(), 1);
    // Latin-script cues defeat the heuristic detector; language is unknown.
    assert_eq!(tracks[0].language, "und");
}

#[tokio::test]
async fn cloud_engine_is_absent_without_endpoint() {
    let (set, _ctx) = fixture();
    assert!(set.subtitles.list().iter().all(|d| d.id() != "cloud-captions"));
}

#[tokio::test]
async fn cloud_engine_registers_with_endpoint_and_loses_to_local_preference() {
    let set = RegistrySet::new();
    let options = BuiltinOptions {
        cloud_endpoint: Some("https://captions.example.org/v1/transcribe".to_string()),
        cloud_api_key: Some("key".to_string()),
        ..BuiltinOptions::default()
    };
    register_builtins(&set, &options).unwrap();

    let query = EngineQuery::new(InputKind::Video, vec!["en".to_string()]).with_local_preference();
    assert_eq!(set.subtitles.resolve(&query).unwrap().id(), "embedded-tracks");

    let cloudward = EngineQuery::new(InputKind::Url, vec!["en".to_string()]);
    // Only the cloud engine accepts URL input.
    assert_eq!(set.subtitles.resolve(&cloudward).unwrap().id(), "cloud-captions");
}
