//! Lazy instantiation and lifecycle behavior of constructor-style providers

use std::sync::atomic::Ordering;
use std::sync::Arc;

use glossa_domain::error::Error;
use glossa_domain::ports::SubtitleRequest;
use glossa_domain::value_objects::{InputKind, MediaSource};
use glossa_registry::{EngineDescriptor, EngineQuery, EngineRegistration, SubtitleRegistry};

use crate::common::{test_context, Counters, CountingEngine};

fn counting_registration(id: &str, counters: Arc<Counters>) -> EngineRegistration {
    let make = CountingEngine::factory(counters);
    EngineRegistration::factory(
        EngineDescriptor::new(id)
            .with_input_kinds([InputKind::Audio, InputKind::Video])
            .with_language("*"),
        move |_descriptor| Ok(make()),
    )
}

fn audio_request() -> SubtitleRequest {
    SubtitleRequest::new(
        MediaSource::local_file("media/lesson.mp3"),
        vec!["en".to_string()],
        InputKind::Audio,
    )
}

fn audio_query() -> EngineQuery {
    EngineQuery::new(InputKind::Audio, vec!["en".to_string()])
}

#[tokio::test]
async fn instance_is_constructed_once_and_reused() {
    let counters = Arc::new(Counters::default());
    let registry = SubtitleRegistry::new();
    registry
        .register(counting_registration("counting", Arc::clone(&counters)))
        .unwrap();

    let ctx = test_context();
    for _ in 0..3 {
        registry
            .generate(audio_request(), &audio_query(), &ctx)
            .await
            .unwrap();
    }
    assert_eq!(counters.constructions.load(Ordering::SeqCst), 1);
    assert_eq!(counters.initializations.load(Ordering::SeqCst), 1);
    assert_eq!(counters.generations.load(Ordering::SeqCst), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_use_constructs_exactly_one_instance() {
    let counters = Arc::new(Counters::default());
    let registry = Arc::new(SubtitleRegistry::new());
    registry
        .register(counting_registration("counting", Arc::clone(&counters)))
        .unwrap();

    let ctx = test_context();
    let mut handles = Vec::new();
    for _ in 0..8 {
        let registry = Arc::clone(&registry);
        let ctx = ctx.clone();
        handles.push(tokio::spawn(async move {
            registry.generate(audio_request(), &audio_query(), &ctx).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(counters.constructions.load(Ordering::SeqCst), 1);
    assert_eq!(counters.initializations.load(Ordering::SeqCst), 1);
    assert_eq!(counters.generations.load(Ordering::SeqCst), 8);
}

#[tokio::test]
async fn unregister_shuts_down_cached_instance() {
    let counters = Arc::new(Counters::default());
    let registry = SubtitleRegistry::new();
    registry
        .register(counting_registration("counting", Arc::clone(&counters)))
        .unwrap();

    let ctx = test_context();
    registry
        .generate(audio_request(), &audio_query(), &ctx)
        .await
        .unwrap();
    registry.unregister("counting").await.unwrap();

    assert_eq!(counters.shutdowns.load(Ordering::SeqCst), 1);
    assert!(registry.resolve(&audio_query()).is_none());
    assert!(registry.list().is_empty());
}

#[tokio::test]
async fn reregistration_gets_a_fresh_instance() {
    let counters = Arc::new(Counters::default());
    let registry = SubtitleRegistry::new();
    let ctx = test_context();

    registry
        .register(counting_registration("counting", Arc::clone(&counters)))
        .unwrap();
    registry
        .generate(audio_request(), &audio_query(), &ctx)
        .await
        .unwrap();
    registry.unregister("counting").await.unwrap();

    // Same id, same descriptor: behaves like a first-time registration.
    registry
        .register(counting_registration("counting", Arc::clone(&counters)))
        .unwrap();
    registry
        .generate(audio_request(), &audio_query(), &ctx)
        .await
        .unwrap();

    assert_eq!(counters.constructions.load(Ordering::SeqCst), 2);
    assert_eq!(counters.shutdowns.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn in_flight_invocation_survives_unregister() {
    let counters = Arc::new(Counters::default());
    let registry = Arc::new(SubtitleRegistry::new());
    let make = CountingEngine::factory_with(Arc::clone(&counters), true, 0);
    registry
        .register(EngineRegistration::factory(
            EngineDescriptor::new("holding")
                .with_input_kind(InputKind::Audio)
                .with_language("*"),
            move |_descriptor| Ok(make()),
        ))
        .unwrap();

    let ctx = test_context();
    let task = {
        let registry = Arc::clone(&registry);
        let ctx = ctx.clone();
        tokio::spawn(async move { registry.generate(audio_request(), &audio_query(), &ctx).await })
    };

    // Wait until the engine is inside generate, then pull the rug.
    counters.started.notified().await;
    registry.unregister("holding").await.unwrap();
    counters.release.notify_one();

    let tracks = task.await.unwrap().unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(counters.shutdowns.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn fresh_construction_after_unregister_fails_cleanly() {
    let counters = Arc::new(Counters::default());
    let registry = SubtitleRegistry::new();
    registry
        .register(counting_registration("counting", Arc::clone(&counters)))
        .unwrap();

    // Resolve first, then remove the definition before any instance exists.
    let handle = registry.resolve(&audio_query()).unwrap();
    registry.unregister("counting").await.unwrap();

    let ctx = test_context();
    let err = registry
        .invoke(&handle, audio_request(), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownProvider { id } if id == "counting"));
    assert_eq!(counters.constructions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_initialize_is_retried_on_next_use() {
    let counters = Arc::new(Counters::default());
    let registry = SubtitleRegistry::new();
    let make = CountingEngine::factory_with(Arc::clone(&counters), false, 2);
    registry
        .register(EngineRegistration::factory(
            EngineDescriptor::new("flaky")
                .with_input_kind(InputKind::Audio)
                .with_language("*"),
            move |_descriptor| Ok(make()),
        ))
        .unwrap();

    let ctx = test_context();
    let err = registry
        .generate(audio_request(), &audio_query(), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ProviderFailed { .. }));

    // The cell is left empty after the failure; the next call reconstructs.
    registry
        .generate(audio_request(), &audio_query(), &ctx)
        .await
        .unwrap();
    assert_eq!(counters.constructions.load(Ordering::SeqCst), 2);
    assert_eq!(counters.initializations.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn shutdown_tears_down_all_instances() {
    let counters = Arc::new(Counters::default());
    let registry = SubtitleRegistry::new();
    registry
        .register(counting_registration("one", Arc::clone(&counters)))
        .unwrap();
    registry
        .register(counting_registration("two", Arc::clone(&counters)))
        .unwrap();

    let ctx = test_context();
    registry
        .generate(audio_request(), &audio_query(), &ctx)
        .await
        .unwrap();
    registry.shutdown().await;

    // Only the invoked engine had a live instance to shut down.
    assert_eq!(counters.shutdowns.load(Ordering::SeqCst), 1);
    assert!(registry.list().is_empty());
}
