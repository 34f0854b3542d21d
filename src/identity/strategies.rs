//! Name matching strategies, from most to least precise.

use super::CatalogEntry;
use crate::names::NormalizedName;

/// One tier of the identity cascade.
pub trait MatchStrategy: Send + Sync {
    /// Strategy identifier for logging and diagnostics.
    fn name(&self) -> &'static str;

    /// Whether `name` (with its joined form) refers to the catalog entry.
    fn matches(&self, name: &NormalizedName, joined: &str, entry: &CatalogEntry) -> bool;
}

/// Full piece-sequence equality.
pub struct ExactMatch;

impl MatchStrategy for ExactMatch {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn matches(&self, name: &NormalizedName, _joined: &str, entry: &CatalogEntry) -> bool {
        *name == entry.name
    }
}

/// Same given name and surname; ignores middle names. Needs two pieces on both sides.
pub struct GivenAndSurnameMatch;

impl MatchStrategy for GivenAndSurnameMatch {
    fn name(&self) -> &'static str {
        "given_and_surname"
    }

    fn matches(&self, name: &NormalizedName, _joined: &str, entry: &CatalogEntry) -> bool {
        if name.len() < 2 || entry.name.len() < 2 {
            return false;
        }
        name.last() == entry.name.last() && name.first() == entry.name.first()
    }
}

/// One joined name contains the other.
pub struct SubstringMatch;

impl MatchStrategy for SubstringMatch {
    fn name(&self) -> &'static str {
        "substring"
    }

    fn matches(&self, _name: &NormalizedName, joined: &str, entry: &CatalogEntry) -> bool {
        entry.joined.contains(joined) || joined.contains(entry.joined.as_str())
    }
}
