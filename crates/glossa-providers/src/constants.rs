//! Constants shared by the builtin providers

/// Default timeout for metadata scraping requests, in seconds
pub const DEFAULT_SCRAPE_TIMEOUT_SECS: u64 = 20;

/// Timeout for cloud transcription requests, in seconds
pub const CLOUD_TRANSCRIBE_TIMEOUT_SECS: u64 = 120;

/// User agent sent by the HTTP-backed providers
pub const USER_AGENT: &str = concat!("glossa/", env!("CARGO_PKG_VERSION"));

/// Storage key of the segmentation lexicon for scriptio-continua languages
pub const LEXICON_STORAGE_KEY: &str = "lexicons/cjk";

/// Maximum bytes of a document title taken from content
pub const MAX_TITLE_LEN: usize = 80;
