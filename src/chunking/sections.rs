//! Structural section detection.
//!
//! Scans raw text line by line and groups lines into titled sections.
//! A line is treated as a section header when it looks like a markdown
//! header, a capitalized phrase ending in a colon, a numbered list
//! item, or a capitalized line underlined with dashes or equals signs.

use crate::types::Section;
use once_cell::sync::Lazy;
use regex::Regex;

/// Markdown-style header: 1-6 `#` markers, whitespace, content
static MARKDOWN_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#{1,6}\s+.+$").expect("valid markdown header pattern"));

/// Capitalized phrase terminated by a colon
static COLON_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][^.!?]*:$").expect("valid colon header pattern"));

/// Numbered list item with no terminal punctuation
static NUMBERED_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s+[^.!?]+$").expect("valid numbered header pattern"));

/// Capitalized line eligible for underline emphasis
static UNDERLINE_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][^.!?]*$").expect("valid underline title pattern"));

/// A line consisting only of dash/equals underline characters
static UNDERLINE_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-=]+$").expect("valid underline rule pattern"));

/// Detects structural boundaries and groups lines into sections.
#[derive(Debug, Clone, Default)]
pub struct SectionSplitter;

impl SectionSplitter {
    pub fn new() -> Self {
        Self
    }

    /// Split text into titled sections.
    ///
    /// Leading text before the first header becomes a section with no
    /// title. A header immediately followed by end-of-input (or by
    /// another header) contributes no section of its own: sections are
    /// only closed once they have accumulated content, so title-only
    /// sections are dropped by construction.
    pub fn split(&self, text: &str) -> Vec<Section> {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut sections = Vec::new();
        let mut current = Section {
            title: None,
            content: Vec::new(),
        };

        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];
            let next = lines.get(i + 1).copied();

            if let Some(consumed) = Self::header_kind(line, next) {
                if !current.content.is_empty() {
                    sections.push(current);
                    current = Section {
                        title: None,
                        content: Vec::new(),
                    };
                }
                current.title = Some(line.to_string());
                // Underlined titles consume the rule line as well
                i += consumed;
            } else {
                current.content.push(line.to_string());
                i += 1;
            }
        }

        if !current.content.is_empty() {
            sections.push(current);
        }

        sections
    }

    /// Returns how many lines the header occupies (1, or 2 for an
    /// underlined title), or `None` when `line` is not a header.
    fn header_kind(line: &str, next: Option<&str>) -> Option<usize> {
        if MARKDOWN_HEADER.is_match(line)
            || COLON_HEADER.is_match(line)
            || NUMBERED_HEADER.is_match(line)
        {
            return Some(1);
        }

        if UNDERLINE_TITLE.is_match(line) {
            if let Some(next) = next {
                if UNDERLINE_RULE.is_match(next) {
                    return Some(2);
                }
            }
        }

        None
    }
}
