//! Media source description
//!
//! A [`MediaSource`] captures what the user handed the application: a local
//! file, a remote URL or a chunk of pasted text. Resolution queries are
//! derived from it; providers receive it as part of their request payload.

use serde::{Deserialize, Serialize};

/// Kind of input a subtitle engine can consume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Audio-only media (podcast episode, audiobook chapter)
    Audio,
    /// Video media with an audio track
    Video,
    /// A remote URL that the engine fetches itself
    Url,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Url => "url",
        };
        f.write_str(s)
    }
}

/// The concrete input the user wants turned into learning material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaSource {
    /// A file on the local machine, addressed by its storage key
    LocalFile {
        /// Path or storage key of the file
        path: String,
        /// MIME type if the caller already knows it
        mime_type: Option<String>,
    },
    /// A remote resource
    RemoteUrl {
        /// Full URL
        url: String,
        /// MIME type if the caller already knows it
        mime_type: Option<String>,
    },
    /// Text pasted directly into the application
    PastedText {
        /// The pasted content
        text: String,
    },
}

impl MediaSource {
    /// Create a local-file source without a declared MIME type
    pub fn local_file(path: impl Into<String>) -> Self {
        Self::LocalFile {
            path: path.into(),
            mime_type: None,
        }
    }

    /// Create a remote-URL source without a declared MIME type
    pub fn remote_url(url: impl Into<String>) -> Self {
        Self::RemoteUrl {
            url: url.into(),
            mime_type: None,
        }
    }

    /// Create a pasted-text source
    pub fn pasted_text(text: impl Into<String>) -> Self {
        Self::PastedText { text: text.into() }
    }

    /// The MIME type declared by the caller, if any
    pub fn declared_mime_type(&self) -> Option<&str> {
        match self {
            Self::LocalFile { mime_type, .. } | Self::RemoteUrl { mime_type, .. } => {
                mime_type.as_deref()
            }
            Self::PastedText { .. } => None,
        }
    }

    /// Path of a local file source
    pub fn local_path(&self) -> Option<&str> {
        match self {
            Self::LocalFile { path, .. } => Some(path),
            _ => None,
        }
    }

    /// URL of a remote source
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::RemoteUrl { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Whether this source lives on the local machine
    pub fn is_local(&self) -> bool {
        matches!(self, Self::LocalFile { .. })
    }
}
