//! Script-based language detection
//!
//! A cheap heuristic over Unicode script ranges: good enough to pick a
//! tokenizer for pasted text without shipping a classification model.
//! Latin-script text is left undetected, since the script alone cannot
//! distinguish its languages.

use glossa_domain::ports::LanguageDetector;

/// Detects the dominant language of a text by counting script membership
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicDetector;

impl HeuristicDetector {
    /// Create a detector
    pub fn new() -> Self {
        Self
    }
}

impl LanguageDetector for HeuristicDetector {
    fn detect(&self, text: &str) -> Option<String> {
        let mut kana = 0usize;
        let mut han = 0usize;
        let mut hangul = 0usize;
        let mut cyrillic = 0usize;
        let mut greek = 0usize;
        let mut arabic = 0usize;
        let mut hebrew = 0usize;
        let mut devanagari = 0usize;
        let mut thai = 0usize;
        let mut total = 0usize;

        for c in text.chars().filter(|c| c.is_alphabetic()) {
            total += 1;
            match c {
                '\u{3040}'..='\u{30FF}' => kana += 1,
                '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' => han += 1,
                '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}' => hangul += 1,
                '\u{0400}'..='\u{04FF}' => cyrillic += 1,
                '\u{0370}'..='\u{03FF}' => greek += 1,
                '\u{0600}'..='\u{06FF}' => arabic += 1,
                '\u{0590}'..='\u{05FF}' => hebrew += 1,
                '\u{0900}'..='\u{097F}' => devanagari += 1,
                '\u{0E00}'..='\u{0E7F}' => thai += 1,
                _ => {}
            }
        }
        if total == 0 {
            return None;
        }

        // Kana anywhere means Japanese even when Han characters dominate.
        if kana > 0 && (kana + han) * 3 >= total {
            return Some("ja".to_string());
        }

        let candidates = [
            ("zh", han),
            ("ko", hangul),
            ("ru", cyrillic),
            ("el", greek),
            ("ar", arabic),
            ("he", hebrew),
            ("hi", devanagari),
            ("th", thai),
        ];
        let (code, count) = candidates.into_iter().max_by_key(|(_, count)| *count)?;
        // Require the script to dominate; mixed or Latin text stays None.
        (count * 2 >= total).then(|| code.to_string())
    }
}
