//! Plugin install/uninstall lifecycle against a bootstrapped context

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;

use glossa_domain::error::Result;
use glossa_domain::ports::{
    ProviderContext, ProviderLifecycle, SubtitleEngine, SubtitleRequest, TokenizeRequest,
};
use glossa_domain::value_objects::{InputKind, MediaSource, SubtitleTrack, Token};
use glossa_host::{AppConfig, AppContext};
use glossa_registry::{
    Describe, EngineDescriptor, EngineRegistration, TokenizeFn, TokenizerDescriptor,
    TokenizerRegistration,
};

struct TrackedEngine {
    shutdowns: Arc<AtomicUsize>,
}

#[async_trait]
impl ProviderLifecycle for TrackedEngine {
    async fn shutdown(&self) -> Result<()> {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl SubtitleEngine for TrackedEngine {
    async fn generate(
        &self,
        request: &SubtitleRequest,
        _ctx: &ProviderContext,
    ) -> Result<Vec<SubtitleTrack>> {
        let language = request
            .languages
            .first()
            .cloned()
            .unwrap_or_else(|| "en".to_string());
        Ok(vec![SubtitleTrack::new(language, "plugin-engine", Vec::new())])
    }
}

fn plugin_tokenizer(id: &str, language: &str) -> TokenizerRegistration {
    let descriptor = TokenizerDescriptor::new(id)
        .with_language(language)
        .with_priority(50);
    let call: TokenizeFn = Arc::new(|request, _ctx| {
        async move {
            Ok(request
                .text
                .split(' ')
                .filter(|w| !w.is_empty())
                .map(|w| Token::word(w, 0, w.len()))
                .collect())
        }
        .boxed()
    });
    TokenizerRegistration::function(descriptor, call)
}

fn plugin_engine(id: &str, shutdowns: Arc<AtomicUsize>) -> EngineRegistration {
    // Url input: no builtin engine claims it, so the plugin always wins the
    // hard filter for streaming sources.
    EngineRegistration::factory(
        EngineDescriptor::new(id)
            .with_input_kind(InputKind::Url)
            .with_language("ko"),
        move |_descriptor| {
            Ok(Arc::new(TrackedEngine {
                shutdowns: Arc::clone(&shutdowns),
            }))
        },
    )
}

fn stream_request() -> SubtitleRequest {
    SubtitleRequest::new(
        MediaSource::remote_url("https://drama.example.org/ep1"),
        vec!["ko".to_string()],
        InputKind::Url,
    )
}

#[tokio::test]
async fn uninstall_removes_all_plugin_registrations() {
    let ctx = AppContext::bootstrap(AppConfig::default()).unwrap();
    let host = ctx.plugin_host();

    let registrar = host.install("k-drama-pack").unwrap();
    registrar
        .register_tokenizer(plugin_tokenizer("kdrama-ko", "ko"))
        .unwrap();
    let shutdowns = Arc::new(AtomicUsize::new(0));
    registrar
        .register_engine(plugin_engine("kdrama-subs", Arc::clone(&shutdowns)))
        .unwrap();

    // The plugin's providers take part in resolution...
    assert_eq!(
        ctx.registries.tokenizers.resolve("ko").unwrap().id(),
        "kdrama-ko"
    );
    let request = stream_request();
    let query = ctx.engine_query(&request);
    let provider_ctx = ctx.provider_context();
    let tracks = ctx
        .registries
        .subtitles
        .generate(request, &query, &provider_ctx)
        .await
        .unwrap();
    assert_eq!(tracks[0].engine_id, "plugin-engine");

    // ...and are gone after uninstall, cached instance included.
    host.uninstall("k-drama-pack").await.unwrap();
    assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
    assert_ne!(
        ctx.registries.tokenizers.resolve("ko").map(|r| r.id().to_string()),
        Some("kdrama-ko".to_string())
    );
    assert!(ctx
        .registries
        .subtitles
        .list()
        .iter()
        .all(|d| d.id() != "kdrama-subs"));
}

#[tokio::test]
async fn uninstall_tolerates_self_unregistered_providers() {
    let ctx = AppContext::bootstrap(AppConfig::default()).unwrap();
    let host = ctx.plugin_host();

    let registrar = host.install("tidy").unwrap();
    registrar
        .register_tokenizer(plugin_tokenizer("tidy-ko", "ko"))
        .unwrap();
    registrar
        .register_tokenizer(plugin_tokenizer("tidy-vi", "vi"))
        .unwrap();
    registrar.unregister_tokenizer("tidy-ko").await.unwrap();

    host.uninstall("tidy").await.unwrap();
    assert!(ctx
        .registries
        .tokenizers
        .list()
        .iter()
        .all(|d| !d.id().starts_with("tidy-")));
}

#[tokio::test]
async fn duplicate_install_is_rejected() {
    let ctx = AppContext::bootstrap(AppConfig::default()).unwrap();
    let host = ctx.plugin_host();
    host.install("twice").unwrap();
    assert!(host.install("twice").is_err());
    assert_eq!(host.installed(), vec!["twice".to_string()]);
}

#[tokio::test]
async fn plugin_cannot_steal_builtin_id() {
    let ctx = AppContext::bootstrap(AppConfig::default()).unwrap();
    let host = ctx.plugin_host();
    let registrar = host.install("squatter").unwrap();
    let err = registrar
        .register_tokenizer(plugin_tokenizer("unicode", "en"))
        .unwrap_err();
    assert!(matches!(
        err,
        glossa_domain::Error::DuplicateProvider { id } if id == "unicode"
    ));

    // Uninstall must not remove the builtin the plugin failed to shadow.
    host.uninstall("squatter").await.unwrap();
    assert!(ctx
        .registries
        .tokenizers
        .list()
        .iter()
        .any(|d| d.id() == "unicode"));
}
