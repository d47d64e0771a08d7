//! Lexicon-driven tokenizer for scriptio-continua languages
//!
//! Whitespace segmentation is useless for Japanese, Chinese and Thai; this
//! tokenizer greedily matches the longest known word from a lexicon loaded
//! out of storage. It is the builtin example of a stateful provider: the
//! lexicon loads once in `initialize` and the instance is cached by the
//! registry until unregistration.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use glossa_domain::error::Result;
use glossa_domain::ports::{ProviderContext, ProviderLifecycle, TokenizeRequest, Tokenizer};
use glossa_domain::value_objects::Token;
use glossa_registry::{TokenizerDescriptor, TokenizerRegistration};

use crate::constants::LEXICON_STORAGE_KEY;

#[derive(Default)]
struct Lexicon {
    words: HashSet<String>,
    /// Longest entry, in chars; bounds the greedy lookahead
    max_chars: usize,
}

impl Lexicon {
    fn from_lines(text: &str) -> Self {
        let mut lexicon = Self::default();
        for line in text.lines() {
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            lexicon.max_chars = lexicon.max_chars.max(word.chars().count());
            lexicon.words.insert(word.to_string());
        }
        lexicon
    }
}

/// Greedy longest-match tokenizer backed by a stored lexicon
pub struct LexiconTokenizer {
    storage_key: String,
    lexicon: RwLock<Lexicon>,
}

impl LexiconTokenizer {
    /// Create a tokenizer reading its lexicon from `storage_key`
    pub fn new(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
            lexicon: RwLock::new(Lexicon::default()),
        }
    }

    fn segment(&self, text: &str) -> Vec<Token> {
        let lexicon = self.lexicon.read();
        let positions: Vec<(usize, char)> = text.char_indices().collect();
        let byte_at = |i: usize| {
            positions
                .get(i)
                .map_or(text.len(), |(offset, _)| *offset)
        };

        let mut tokens = Vec::new();
        let mut i = 0;
        while i < positions.len() {
            let (start, c) = positions[i];
            if c.is_whitespace() {
                i += 1;
                continue;
            }
            let longest = (2..=lexicon.max_chars.min(positions.len() - i))
                .rev()
                .find(|&len| lexicon.words.contains(&text[start..byte_at(i + len)]));
            match longest {
                Some(len) => {
                    let end = byte_at(i + len);
                    tokens.push(Token::word(&text[start..end], start, end));
                    i += len;
                }
                None => {
                    let end = byte_at(i + 1);
                    if c.is_alphanumeric() {
                        tokens.push(Token::word(&text[start..end], start, end));
                    } else {
                        tokens.push(Token::filler(&text[start..end], start, end));
                    }
                    i += 1;
                }
            }
        }
        tokens
    }
}

#[async_trait]
impl ProviderLifecycle for LexiconTokenizer {
    async fn initialize(&self, ctx: &ProviderContext) -> Result<()> {
        match ctx.storage.read(&self.storage_key).await? {
            Some(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                let loaded = Lexicon::from_lines(&text);
                tracing::info!(
                    key = %self.storage_key,
                    words = loaded.words.len(),
                    "lexicon loaded"
                );
                *self.lexicon.write() = loaded;
            }
            None => {
                // Without a lexicon every character becomes its own token;
                // still better than one token per line.
                tracing::warn!(key = %self.storage_key, "lexicon missing, segmenting by character");
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Tokenizer for LexiconTokenizer {
    async fn tokenize(
        &self,
        request: &TokenizeRequest,
        _ctx: &ProviderContext,
    ) -> Result<Vec<Token>> {
        Ok(self.segment(&request.text))
    }
}

/// Build the stateful lexicon registration for ja/zh/th
pub fn registration() -> TokenizerRegistration {
    let descriptor = TokenizerDescriptor::new("lexicon")
        .with_name("Lexicon segmentation")
        .with_description("Greedy longest-match segmentation for languages written without spaces")
        .with_languages(["ja", "zh", "th"]);
    TokenizerRegistration::factory(descriptor, |_descriptor| {
        Ok(Arc::new(LexiconTokenizer::new(LEXICON_STORAGE_KEY)))
    })
}
