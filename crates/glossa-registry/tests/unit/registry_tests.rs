//! End-to-end registry behavior with real provider implementations

use std::sync::Arc;

use futures::FutureExt;

use glossa_domain::error::Error;
use glossa_domain::ports::{AdaptRequest, TokenizeRequest};
use glossa_domain::value_objects::{Document, DocumentSegment, MediaSource, Token};
use glossa_registry::{
    AdaptFn, AdapterDescriptor, AdapterRegistration, RegistrySet, TokenizeFn, TokenizerDescriptor,
    TokenizerRegistration, TokenizerRegistry,
};

use crate::common::test_context;

fn whitespace_tokenizer(id: &str, languages: &[&str], priority: i32) -> TokenizerRegistration {
    let descriptor = TokenizerDescriptor::new(id)
        .with_name("Whitespace")
        .with_languages(languages.iter().copied())
        .with_priority(priority);
    let call: TokenizeFn = Arc::new(|request, _ctx| {
        async move {
            let mut tokens = Vec::new();
            let mut offset = 0;
            for word in request.text.split_whitespace() {
                let start = request.text[offset..]
                    .find(word)
                    .map(|i| i + offset)
                    .unwrap_or(offset);
                tokens.push(Token::word(word, start, start + word.len()));
                offset = start + word.len();
            }
            Ok(tokens)
        }
        .boxed()
    });
    TokenizerRegistration::function(descriptor, call)
}

#[tokio::test]
async fn resolve_and_invoke_function_tokenizer() {
    let registry = TokenizerRegistry::new();
    registry
        .register(whitespace_tokenizer("ws", &["en"], 0))
        .unwrap();

    let ctx = test_context();
    let tokens = registry
        .tokenize(TokenizeRequest::new("en", "hello wide world"), &ctx)
        .await
        .unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].text, "wide");
    assert_eq!(tokens[1].start, 6);
}

#[tokio::test]
async fn empty_registry_reports_no_match() {
    let registry = TokenizerRegistry::new();
    assert!(registry.resolve("en").is_none());

    let ctx = test_context();
    let err = registry
        .tokenize(TokenizeRequest::new("en", "hola"), &ctx)
        .await
        .unwrap_err();
    assert!(err.is_no_match());
}

#[tokio::test]
async fn exact_language_beats_wildcard_with_huge_priority() {
    let registry = TokenizerRegistry::new();
    registry
        .register(whitespace_tokenizer("en", &["en"], 10))
        .unwrap();
    registry
        .register(whitespace_tokenizer("wild", &["*"], 1000))
        .unwrap();

    assert_eq!(registry.resolve("en").unwrap().id(), "en");
    assert_eq!(registry.resolve("fr").unwrap().id(), "wild");
}

#[tokio::test]
async fn duplicate_registration_leaves_first_intact() {
    let registry = TokenizerRegistry::new();
    registry
        .register(whitespace_tokenizer("ws", &["en"], 5))
        .unwrap();
    let err = registry
        .register(whitespace_tokenizer("ws", &["fr"], 9))
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateProvider { id } if id == "ws"));

    let descriptors = registry.list();
    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0].languages, ["en"]);
    assert_eq!(descriptors[0].meta.priority, 5);
}

#[tokio::test]
async fn resolved_function_handle_survives_unregister() {
    let registry = TokenizerRegistry::new();
    registry
        .register(whitespace_tokenizer("ws", &["en"], 0))
        .unwrap();

    let handle = registry.resolve("en").unwrap();
    registry.unregister("ws").await.unwrap();
    assert!(registry.resolve("en").is_none());

    // The by-value handle still invokes: no construction is needed.
    let ctx = test_context();
    let tokens = registry
        .invoke(&handle, TokenizeRequest::new("en", "still here"), &ctx)
        .await
        .unwrap();
    assert_eq!(tokens.len(), 2);
}

#[tokio::test]
async fn panicking_provider_is_reported_not_propagated() {
    let registry = TokenizerRegistry::new();
    let descriptor = TokenizerDescriptor::new("panicky").with_language("en");
    let call: TokenizeFn = Arc::new(|_request, _ctx| async { panic!("tokenizer bug") }.boxed());
    registry
        .register(TokenizerRegistration::function(descriptor, call))
        .unwrap();
    registry
        .register(whitespace_tokenizer("fallback", &["*"], 0))
        .unwrap();

    let ctx = test_context();
    let err = registry
        .tokenize(TokenizeRequest::new("en", "boom"), &ctx)
        .await
        .unwrap_err();
    match err {
        Error::ProviderFailed { id, .. } => assert_eq!(id, "panicky"),
        other => panic!("unexpected error: {other:?}"),
    }

    // The registry is still serviceable afterwards.
    let tokens = registry
        .tokenize(TokenizeRequest::new("fr", "toujours la"), &ctx)
        .await
        .unwrap();
    assert_eq!(tokens.len(), 2);
}

fn pasted_text_adapter(id: &str) -> AdapterRegistration {
    let descriptor = AdapterDescriptor::new(id).for_pasted_text();
    let call: AdaptFn = Arc::new(|request, _ctx| {
        async move {
            let text = match &request.source {
                MediaSource::PastedText { text } => text.clone(),
                _ => String::new(),
            };
            Ok(Document::new("pasted", vec![DocumentSegment::text(text)]))
        }
        .boxed()
    });
    AdapterRegistration::function(descriptor, call)
}

#[tokio::test]
async fn facade_exposes_register_and_unregister_only() {
    let set = RegistrySet::new();
    let points = set.extension_points();

    points.adapters.register(pasted_text_adapter("paste")).unwrap();

    // Registration through the facade is visible to host-side resolution.
    let ctx = test_context();
    let document = set
        .adapters
        .adapt(
            AdaptRequest::new(MediaSource::pasted_text("guten tag")),
            &ctx,
        )
        .await
        .unwrap();
    assert_eq!(document.full_text(), "guten tag");

    points.adapters.unregister("paste").await.unwrap();
    assert!(set.adapters.list().is_empty());
}

#[tokio::test]
async fn adapter_descriptor_rejects_malformed_url_pattern() {
    let err = AdapterDescriptor::new("bad")
        .with_url_pattern("(unclosed")
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { id, .. } if id == "bad"));
}
