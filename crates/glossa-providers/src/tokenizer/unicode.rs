//! Unicode word-boundary tokenizer
//!
//! The wildcard fallback: handles any whitespace-delimited language with
//! UAX #29 word segmentation. Registered stateless, since it carries no
//! data and needs no lifecycle.

use std::sync::Arc;

use futures::FutureExt;
use unicode_segmentation::UnicodeSegmentation;

use glossa_domain::value_objects::Token;
use glossa_registry::{TokenizeFn, TokenizerDescriptor, TokenizerRegistration};

/// Tokenize with `unicode-segmentation` word boundaries
pub fn tokenize(text: &str) -> Vec<Token> {
    text.split_word_bound_indices()
        .filter(|(_, segment)| !segment.trim().is_empty())
        .map(|(start, segment)| {
            let end = start + segment.len();
            if segment.chars().any(char::is_alphanumeric) {
                Token::word(segment, start, end)
            } else {
                Token::filler(segment, start, end)
            }
        })
        .collect()
}

/// Build the wildcard fallback registration
pub fn registration() -> TokenizerRegistration {
    let descriptor = TokenizerDescriptor::new("unicode")
        .with_name("Unicode words")
        .with_description("Word-boundary segmentation for any whitespace-delimited language")
        .with_language("*");
    let call: TokenizeFn =
        Arc::new(|request, _ctx| async move { Ok(tokenize(&request.text)) }.boxed());
    TokenizerRegistration::function(descriptor, call)
}
