//! Sentence splitting with abbreviation handling.
//!
//! Splits text on sentence terminators (`.`, `!`, `?`, optionally
//! followed by closing quotes/brackets and trailing spaces) while
//! suppressing splits directly after known abbreviations such as
//! "Mr" or "Dr". The `regex` crate has no lookbehind, so the
//! abbreviation guard is an explicit check on the text preceding
//! each terminator match.

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentence terminator: `.`, `!` or `?`, optional closing
/// quote/bracket characters, trailing spaces
static SENTENCE_TERMINATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[.!?]['")\]]* *"#).expect("valid sentence terminator pattern"));

/// Abbreviations that never end a sentence
const DEFAULT_ABBREVIATIONS: &[&str] = &["Mr", "Mrs", "Dr", "Prof", "Sr", "Jr"];

/// Splits a block of text into sentences.
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    abbreviations: Vec<String>,
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSplitter {
    /// Create a splitter with the default abbreviation set.
    pub fn new() -> Self {
        Self {
            abbreviations: DEFAULT_ABBREVIATIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Create a splitter with a custom abbreviation set.
    pub fn with_abbreviations(abbreviations: Vec<String>) -> Self {
        Self { abbreviations }
    }

    /// Split text into non-empty trimmed sentences.
    ///
    /// Terminator characters are consumed by the split and do not
    /// appear in the fragments. Whitespace-only fragments are
    /// discarded.
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for m in SENTENCE_TERMINATOR.find_iter(text) {
            if self.ends_with_abbreviation(&text[..m.start()]) {
                continue;
            }

            let fragment = text[start..m.start()].trim();
            if !fragment.is_empty() {
                sentences.push(fragment.to_string());
            }
            start = m.end();
        }

        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }

        sentences
    }

    /// True when `prefix` ends with a configured abbreviation on a
    /// word boundary ("Dr" matches, "Badr" does not).
    fn ends_with_abbreviation(&self, prefix: &str) -> bool {
        self.abbreviations.iter().any(|abbr| {
            prefix.ends_with(abbr.as_str())
                && prefix[..prefix.len() - abbr.len()]
                    .chars()
                    .next_back()
                    .map_or(true, |c| !c.is_alphanumeric())
        })
    }
}
