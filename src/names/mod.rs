//! Player name normalization.
//!
//! Published names come in two shapes, "First Last" on decklists and
//! "Last, First" on round results, often with accents dropped on one side.
//! Both normalizers fold a raw name into an ordered list of lowercase pieces:
//!
//! - [`normalize`] keeps punctuation inside pieces and is used for identity
//!   resolution against the decklist catalog.
//! - [`normalize_loose`] additionally splits on punctuation, so hyphenated
//!   surnames become separate pieces for fuzzy winner attribution.

use std::fmt;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// A name reduced to lowercase, diacritic-free word pieces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NormalizedName(Vec<String>);

impl NormalizedName {
    /// Word pieces in order.
    pub fn pieces(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// An empty name can never match anything.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Given name, by position.
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Surname, by position.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Canonical string form: pieces joined by single spaces.
    pub fn as_joined(&self) -> String {
        self.0.join(" ")
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_joined())
    }
}

/// Normalize a name for identity matching.
pub fn normalize(raw: &str) -> NormalizedName {
    normalize_with(raw, false)
}

/// Normalize a name for fuzzy piece matching; punctuation separates pieces.
pub fn normalize_loose(raw: &str) -> NormalizedName {
    normalize_with(raw, true)
}

fn normalize_with(raw: &str, strip_punctuation: bool) -> NormalizedName {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NormalizedName::default();
    }

    let folded: String = trimmed.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let reordered = reorder_comma_name(&folded);

    let lowered = reordered.to_lowercase();
    let cleaned: String = if strip_punctuation {
        lowered
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect()
    } else {
        lowered
    };

    NormalizedName(cleaned.split_whitespace().map(str::to_string).collect())
}

/// "Last, First" -> "First Last"; "Last, First, Middle" -> "First Middle Last".
fn reorder_comma_name(name: &str) -> String {
    if !name.contains(',') {
        return name.to_string();
    }

    let parts: Vec<&str> = name.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [last, first] => format!("{} {}", first, last),
        [last, rest @ ..] => format!("{} {}", rest.join(" "), last),
        [] => String::new(),
    }
}
