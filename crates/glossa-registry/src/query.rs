//! Resolution queries and their construction helpers
//!
//! A query is built once per resolution attempt from the caller's input and
//! never mutated. The helpers here derive the structured facts (extension,
//! MIME type, locality) that the resolvers score against.

use glossa_domain::ports::SubtitleRequest;
use glossa_domain::value_objects::{InputKind, MediaSource};

/// Facts about a media source, scored by the additive resolvers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceQuery {
    /// MIME type, declared or derived from the extension
    pub mime_type: Option<String>,
    /// Lowercased file extension without the dot
    pub file_extension: Option<String>,
    /// Full source URL for pattern matching
    pub source_url: Option<String>,
    /// Whether the source is a file on the local machine
    pub is_local_file: bool,
    /// Whether the source is pasted text
    pub is_pasted_text: bool,
}

impl SourceQuery {
    /// Derive a query from a media source
    pub fn from_source(source: &MediaSource) -> Self {
        match source {
            MediaSource::LocalFile { path, mime_type } => {
                let file_extension = file_extension(path);
                Self {
                    mime_type: mime_type.clone().or_else(|| derived_mime(&file_extension)),
                    file_extension,
                    source_url: None,
                    is_local_file: true,
                    is_pasted_text: false,
                }
            }
            MediaSource::RemoteUrl { url, mime_type } => {
                let file_extension = url_extension(url);
                Self {
                    mime_type: mime_type.clone().or_else(|| derived_mime(&file_extension)),
                    file_extension,
                    source_url: Some(url.clone()),
                    is_local_file: false,
                    is_pasted_text: false,
                }
            }
            MediaSource::PastedText { .. } => Self {
                is_pasted_text: true,
                ..Self::default()
            },
        }
    }

    /// Override the MIME type with an explicit hint
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Override the file extension with an explicit hint
    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = Some(extension.into().to_ascii_lowercase());
        self
    }
}

/// Criteria for selecting a subtitle engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineQuery {
    /// Kind of input the engine must accept
    pub input_kind: InputKind,
    /// Requested caption languages; empty means any
    pub languages: Vec<String>,
    /// Prefer engines running on this machine
    pub prefer_local: bool,
    /// Prefer cloud-hosted engines
    pub prefer_cloud: bool,
}

impl EngineQuery {
    /// Create a query with no local/cloud preference
    pub fn new(input_kind: InputKind, languages: Vec<String>) -> Self {
        Self {
            input_kind,
            languages,
            prefer_local: false,
            prefer_cloud: false,
        }
    }

    /// Derive a query from a subtitle request
    pub fn from_request(request: &SubtitleRequest) -> Self {
        Self::new(request.input_kind, request.languages.clone())
    }

    /// Prefer engines that run locally
    pub fn with_local_preference(mut self) -> Self {
        self.prefer_local = true;
        self
    }

    /// Prefer cloud-hosted engines
    pub fn with_cloud_preference(mut self) -> Self {
        self.prefer_cloud = true;
        self
    }
}

/// Lowercased extension of the last path component, without the dot
pub fn file_extension(path: &str) -> Option<String> {
    let name = path.rsplit(['/', '\\']).next()?;
    let (stem, extension) = name.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}

/// Extension of a URL's path, ignoring query string and fragment
pub fn url_extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    file_extension(path)
}

/// Well-known MIME type for a file extension
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    let mime = match extension.to_ascii_lowercase().as_str() {
        "txt" => "text/plain",
        "md" => "text/markdown",
        "html" | "htm" => "text/html",
        "srt" => "application/x-subrip",
        "vtt" => "text/vtt",
        "ass" | "ssa" => "text/x-ssa",
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "mp4" => "video/mp4",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "epub" => "application/epub+zip",
        "pdf" => "application/pdf",
        "json" => "application/json",
        _ => return None,
    };
    Some(mime)
}

fn derived_mime(extension: &Option<String>) -> Option<String> {
    extension
        .as_deref()
        .and_then(mime_for_extension)
        .map(str::to_string)
}
