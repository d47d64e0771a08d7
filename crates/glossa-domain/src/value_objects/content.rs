//! Tokenized text and adapted documents

use serde::{Deserialize, Serialize};

/// A single token produced by a tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The token text as it appears in the input
    pub text: String,
    /// Byte offset of the token start in the input
    pub start: usize,
    /// Byte offset one past the token end in the input
    pub end: usize,
    /// Whether this token is a word (as opposed to punctuation or spacing)
    pub word: bool,
}

impl Token {
    /// Create a word token
    pub fn word(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            word: true,
        }
    }

    /// Create a non-word token (punctuation, whitespace run, symbol)
    pub fn filler(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            word: false,
        }
    }
}

/// One displayable unit of an adapted document
///
/// Timed segments come from subtitle-like sources; untimed segments from
/// plain text. Timing is in milliseconds from the start of the media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSegment {
    /// Segment text
    pub text: String,
    /// Start of the matching media span, if the source is timed
    pub start_ms: Option<u64>,
    /// End of the matching media span, if the source is timed
    pub end_ms: Option<u64>,
}

impl DocumentSegment {
    /// Create an untimed segment
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start_ms: None,
            end_ms: None,
        }
    }

    /// Create a timed segment
    pub fn timed(text: impl Into<String>, start_ms: u64, end_ms: u64) -> Self {
        Self {
            text: text.into(),
            start_ms: Some(start_ms),
            end_ms: Some(end_ms),
        }
    }
}

/// The result of adapting raw content into study material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Display title
    pub title: String,
    /// Detected or declared language of the content
    pub language: Option<String>,
    /// Ordered content segments
    pub segments: Vec<DocumentSegment>,
}

impl Document {
    /// Create a document from a title and segments
    pub fn new(title: impl Into<String>, segments: Vec<DocumentSegment>) -> Self {
        Self {
            title: title.into(),
            language: None,
            segments,
        }
    }

    /// Set the document language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Concatenated text of all segments, newline separated
    pub fn full_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
