//! Resolution strategies
//!
//! Two scoring families, deliberately kept apart:
//!
//! - additive multi-criteria scoring answers "which artifact most
//!   specifically matches this source" (content adapters, metadata
//!   scrapers);
//! - hard-filter-then-preference answers "which provider is even capable of
//!   doing this job" (subtitle engines).
//!
//! Tokenizers use a third, language-gated variant where an exact language
//! match always dominates a wildcard fallback regardless of priority.
//!
//! All selection functions are pure: they operate on a snapshot taken by
//! the store and return the winning registration by value.

use glossa_domain::lang;
use glossa_domain::value_objects::InputKind;

use crate::pattern::UrlPattern;
use crate::query::{EngineQuery, SourceQuery};
use crate::store::{Describe, Registration};

/// Weight of an exact MIME-type or file-extension match
pub const FORMAT_WEIGHT: u32 = 3;
/// Weight of a URL-pattern match
pub const URL_PATTERN_WEIGHT: u32 = 2;
/// Weight of each capability-flag match
pub const CAPABILITY_WEIGHT: u32 = 2;
/// Bonus granted to a provider declaring the requested language exactly
pub const EXACT_LANGUAGE_BONUS: i64 = 1000;
/// Bonus granted to a wildcard-only provider
///
/// The gap to [`EXACT_LANGUAGE_BONUS`] guarantees any exact-language
/// provider outranks any wildcard fallback, whatever their priorities.
pub const WILDCARD_LANGUAGE_BONUS: i64 = 100;

/// Format and capability predicates scored by the additive strategy
pub trait SourceAffinity {
    /// MIME types this provider accepts
    fn mime_types(&self) -> &[String];
    /// File extensions this provider accepts (lowercase, no dot)
    fn file_extensions(&self) -> &[String];
    /// URL patterns this provider claims
    fn url_patterns(&self) -> &[UrlPattern];
    /// Whether the provider can read local files
    fn handles_local_files(&self) -> bool;
    /// Whether the provider can fetch remote URLs
    fn handles_urls(&self) -> bool;
    /// Whether the provider accepts pasted text
    fn handles_pasted_text(&self) -> bool {
        false
    }
}

/// Language predicates scored by the language-gated strategy
pub trait LanguageAffinity {
    /// Language codes this provider supports; may include the wildcard
    fn language_codes(&self) -> &[String];
}

/// Capability predicates applied by the hard-filter strategy
pub trait EngineAffinity {
    /// Input kinds this engine accepts
    fn input_kinds(&self) -> &[InputKind];
    /// Languages this engine can produce; may include the wildcard
    fn language_codes(&self) -> &[String];
    /// Whether the engine calls out to a cloud service
    fn is_cloud_service(&self) -> bool;
}

/// Additive score of one descriptor against a source query
///
/// Dimensions are independent: a provider matching more of them outranks
/// one matching fewer, even when the fewer carry higher individual weights.
/// Zero means the provider is not a candidate at all.
pub fn source_score<D: SourceAffinity>(descriptor: &D, query: &SourceQuery) -> u32 {
    let mut score = 0;
    if let Some(mime) = &query.mime_type {
        if descriptor
            .mime_types()
            .iter()
            .any(|m| m.eq_ignore_ascii_case(mime))
        {
            score += FORMAT_WEIGHT;
        }
    }
    if let Some(extension) = &query.file_extension {
        if descriptor
            .file_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
        {
            score += FORMAT_WEIGHT;
        }
    }
    if let Some(url) = &query.source_url {
        if descriptor.url_patterns().iter().any(|p| p.is_match(url)) {
            score += URL_PATTERN_WEIGHT;
        }
    }
    if query.is_local_file && descriptor.handles_local_files() {
        score += CAPABILITY_WEIGHT;
    }
    if query.source_url.is_some() && descriptor.handles_urls() {
        score += CAPABILITY_WEIGHT;
    }
    if query.is_pasted_text && descriptor.handles_pasted_text() {
        score += CAPABILITY_WEIGHT;
    }
    score
}

/// Language-gated score of one descriptor
///
/// `None` means ineligible: the provider declares neither the requested
/// language nor the wildcard.
pub fn language_score<D: LanguageAffinity>(
    descriptor: &D,
    priority: i32,
    language: &str,
) -> Option<i64> {
    let mut wildcard = false;
    for code in descriptor.language_codes() {
        if lang::is_wildcard(code) {
            wildcard = true;
        } else if lang::matches(code, language) {
            return Some(i64::from(priority) + EXACT_LANGUAGE_BONUS);
        }
    }
    wildcard.then(|| i64::from(priority) + WILDCARD_LANGUAGE_BONUS)
}

/// Select the best registration by additive source scoring
///
/// Tie-break: higher priority, then first registered.
pub fn select_by_source<D, F, P>(
    snapshot: &[Registration<D, F, P>],
    query: &SourceQuery,
) -> Option<Registration<D, F, P>>
where
    D: Describe + SourceAffinity,
    F: Clone,
    P: ?Sized,
{
    let mut best: Option<(u32, i32, usize)> = None;
    for (index, registration) in snapshot.iter().enumerate() {
        let score = source_score(registration.descriptor(), query);
        if score == 0 {
            continue;
        }
        let priority = registration.descriptor().priority();
        let better = match best {
            None => true,
            Some((best_score, best_priority, _)) => {
                score > best_score || (score == best_score && priority > best_priority)
            }
        };
        if better {
            best = Some((score, priority, index));
        }
    }
    best.map(|(_, _, index)| snapshot[index].clone())
}

/// Select the best registration by language-gated scoring
///
/// Ties fall to the first registered, since the priority is already folded
/// into the score.
pub fn select_by_language<D, F, P>(
    snapshot: &[Registration<D, F, P>],
    language: &str,
) -> Option<Registration<D, F, P>>
where
    D: Describe + LanguageAffinity,
    F: Clone,
    P: ?Sized,
{
    let mut best: Option<(i64, usize)> = None;
    for (index, registration) in snapshot.iter().enumerate() {
        let descriptor = registration.descriptor();
        let Some(score) = language_score(descriptor, descriptor.priority(), language) else {
            continue;
        };
        if best.is_none_or(|(best_score, _)| score > best_score) {
            best = Some((score, index));
        }
    }
    best.map(|(_, index)| snapshot[index].clone())
}

/// Select a subtitle engine by hard filter, then preference
///
/// Engines failing the input-kind or language filter are excluded outright.
/// A local/cloud preference narrows the survivors only when at least one
/// engine satisfies it; it never empties the candidate set. The first
/// remaining candidate in registration order wins - engine selection is
/// capability driven, so priority is deliberately not consulted.
pub fn select_engine<D, F, P>(
    snapshot: &[Registration<D, F, P>],
    query: &EngineQuery,
) -> Option<Registration<D, F, P>>
where
    D: Describe + EngineAffinity,
    F: Clone,
    P: ?Sized,
{
    let survivors: Vec<usize> = snapshot
        .iter()
        .enumerate()
        .filter(|(_, registration)| engine_eligible(registration.descriptor(), query))
        .map(|(index, _)| index)
        .collect();

    if survivors.is_empty() {
        return None;
    }
    if query.prefer_local {
        if let Some(&index) = survivors
            .iter()
            .find(|&&i| !snapshot[i].descriptor().is_cloud_service())
        {
            return Some(snapshot[index].clone());
        }
    }
    if query.prefer_cloud {
        if let Some(&index) = survivors
            .iter()
            .find(|&&i| snapshot[i].descriptor().is_cloud_service())
        {
            return Some(snapshot[index].clone());
        }
    }
    Some(snapshot[survivors[0]].clone())
}

fn engine_eligible<D: EngineAffinity>(descriptor: &D, query: &EngineQuery) -> bool {
    if !descriptor.input_kinds().contains(&query.input_kind) {
        return false;
    }
    if query.languages.is_empty() {
        return true;
    }
    descriptor.language_codes().iter().any(|c| lang::is_wildcard(c))
        || query.languages.iter().any(|wanted| {
            descriptor
                .language_codes()
                .iter()
                .any(|declared| lang::matches(declared, wanted))
        })
}
