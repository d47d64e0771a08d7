//! Builtin Providers - Glossa
//!
//! Concrete capability providers shipped with the application, plus the
//! in-memory storage backend and the heuristic language detector used when
//! the desktop shell hasn't attached richer services.
//!
//! Every provider here registers through the same registries as plugin
//! providers. The set deliberately exercises both implementation styles:
//!
//! - stateless: unicode tokenizer, plain-text and subtitle-file adapters,
//!   filename scraper, embedded-track engine
//! - stateful (factory + lifecycle): lexicon tokenizer, OpenGraph scraper,
//!   cloud caption engine

pub mod adapter;
pub mod builtins;
pub mod constants;
pub mod detect;
pub mod scraper;
pub mod storage;
pub mod subrip;
pub mod subtitle;
pub mod tokenizer;

pub use builtins::{register_builtins, BuiltinOptions};
pub use detect::HeuristicDetector;
pub use storage::MemoryStorage;
