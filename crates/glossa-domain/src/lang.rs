//! Language code helpers
//!
//! Language codes are plain BCP-47-ish strings ("en", "pt-br"). Providers may
//! declare the wildcard [`WILDCARD`] to mean "any language"; wildcard-only
//! providers are treated as fallback of last resort by the resolvers.

/// Wildcard language code accepted by fallback providers
pub const WILDCARD: &str = "*";

/// Normalize a language code for comparison
///
/// Lowercases and trims; does not attempt full BCP-47 canonicalization.
pub fn normalize(code: &str) -> String {
    code.trim().to_ascii_lowercase()
}

/// Whether two language codes refer to the same language
///
/// Compares normalized forms; a region suffix on either side still matches
/// the bare primary tag ("pt-BR" matches "pt").
pub fn matches(declared: &str, requested: &str) -> bool {
    let declared = normalize(declared);
    let requested = normalize(requested);
    if declared == requested {
        return true;
    }
    primary_tag(&declared) == primary_tag(&requested)
}

/// Whether a declared code is the wildcard
pub fn is_wildcard(code: &str) -> bool {
    code.trim() == WILDCARD
}

fn primary_tag(code: &str) -> &str {
    code.split(['-', '_']).next().unwrap_or(code)
}
