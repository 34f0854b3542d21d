//! Player identity resolution.
//!
//! Resolves a raw player name from a round result to the archetype of the
//! matching decklist. Matching runs as an ordered cascade of strategies;
//! the first strategy with any hit in the catalog decides, so an exact
//! match is never shadowed by a looser one earlier in catalog order.

mod strategies;

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{DecklistEntry, UNKNOWN_ARCHETYPE};
use crate::names::{normalize, NormalizedName};

pub use strategies::{ExactMatch, GivenAndSurnameMatch, MatchStrategy, SubstringMatch};

/// A decklist reduced to what identity resolution needs.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub name: NormalizedName,
    /// Canonical string form of `name`, cached for substring checks
    pub joined: String,
    pub archetype: String,
}

/// Read-only snapshot of the decklist catalog.
#[derive(Debug, Clone, Default)]
pub struct ArchetypeCatalog {
    entries: Vec<CatalogEntry>,
}

impl ArchetypeCatalog {
    /// Build a catalog from decklists, keeping their order.
    pub fn from_decklists(decklists: &[DecklistEntry]) -> Self {
        let entries = decklists
            .iter()
            .filter_map(|deck| {
                let name = normalize(&deck.player);
                if name.is_empty() {
                    debug!("Skipping decklist with unusable player name: {:?}", deck.player);
                    return None;
                }
                Some(CatalogEntry {
                    joined: name.as_joined(),
                    name,
                    archetype: deck.archetype_label().to_string(),
                })
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Normalized player name -> archetype. Later entries overwrite earlier ones.
    pub fn player_archetypes(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|e| (e.joined.clone(), e.archetype.clone()))
            .collect()
    }
}

/// Outcome of resolving one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub archetype: String,
    /// Name of the strategy that matched, if any
    pub tier: Option<&'static str>,
}

impl Resolution {
    fn unknown() -> Self {
        Self {
            archetype: UNKNOWN_ARCHETYPE.to_string(),
            tier: None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.tier.is_some()
    }
}

/// Resolves player names against a catalog using a strategy cascade.
pub struct IdentityMatcher<'a> {
    catalog: &'a ArchetypeCatalog,
    strategies: Vec<Box<dyn MatchStrategy>>,
}

impl<'a> IdentityMatcher<'a> {
    /// Matcher with the standard cascade: exact, given+surname, substring.
    pub fn new(catalog: &'a ArchetypeCatalog) -> Self {
        Self::with_strategies(
            catalog,
            vec![
                Box::new(ExactMatch),
                Box::new(GivenAndSurnameMatch),
                Box::new(SubstringMatch),
            ],
        )
    }

    /// Matcher with a custom cascade, tried in the given order.
    pub fn with_strategies(
        catalog: &'a ArchetypeCatalog,
        strategies: Vec<Box<dyn MatchStrategy>>,
    ) -> Self {
        Self {
            catalog,
            strategies,
        }
    }

    pub fn catalog(&self) -> &ArchetypeCatalog {
        self.catalog
    }

    /// Resolve a raw name, reporting which tier matched.
    pub fn resolve(&self, raw_name: &str) -> Resolution {
        let name = normalize(raw_name);
        if name.is_empty() {
            return Resolution::unknown();
        }
        let joined = name.as_joined();

        for strategy in &self.strategies {
            let hit = self
                .catalog
                .entries()
                .iter()
                .find(|entry| strategy.matches(&name, &joined, entry));

            if let Some(entry) = hit {
                return Resolution {
                    archetype: entry.archetype.clone(),
                    tier: Some(strategy.name()),
                };
            }
        }

        debug!("No decklist match for player {:?}", raw_name);
        Resolution::unknown()
    }

    /// Resolve a raw name to an archetype label, "Unknown" if nothing matches.
    pub fn resolve_archetype(&self, raw_name: &str) -> String {
        self.resolve(raw_name).archetype
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(entries: &[(&str, &str)]) -> ArchetypeCatalog {
        let decks: Vec<DecklistEntry> = entries
            .iter()
            .enumerate()
            .map(|(i, (player, arch))| {
                DecklistEntry::new(*player, *arch, format!("https://example.com/{}", i))
            })
            .collect();
        ArchetypeCatalog::from_decklists(&decks)
    }

    #[test]
    fn test_exact_match_across_formats() {
        let cat = catalog(&[("Nam Dang", "Izzet Prowess")]);
        let matcher = IdentityMatcher::new(&cat);

        let res = matcher.resolve("Dang, Nam");
        assert_eq!(res.archetype, "Izzet Prowess");
        assert_eq!(res.tier, Some("exact"));
    }

    #[test]
    fn test_given_and_surname_match_with_middle_name() {
        let cat = catalog(&[("Mario Alejandro Flores", "Domain Ramp")]);
        let matcher = IdentityMatcher::new(&cat);

        let res = matcher.resolve("Flores, Mario");
        assert_eq!(res.archetype, "Domain Ramp");
        assert_eq!(res.tier, Some("given_and_surname"));
    }

    #[test]
    fn test_surname_alone_is_not_enough() {
        let cat = catalog(&[("Mario Flores", "Domain Ramp")]);
        let matcher = IdentityMatcher::new(&cat);

        assert_eq!(matcher.resolve_archetype("Luis Flores"), UNKNOWN_ARCHETYPE);
    }

    #[test]
    fn test_substring_fallback() {
        let cat = catalog(&[("Samuel Pardee", "Mono Red")]);
        let matcher = IdentityMatcher::new(&cat);

        let res = matcher.resolve("Pardee");
        assert_eq!(res.archetype, "Mono Red");
        assert_eq!(res.tier, Some("substring"));

        // The input may also absorb the catalog name
        let cat = catalog(&[("Pardee", "Mono Red")]);
        let matcher = IdentityMatcher::new(&cat);
        assert_eq!(matcher.resolve_archetype("Samuel Pardee Jr"), "Mono Red");
    }

    #[test]
    fn test_exact_preferred_over_earlier_substring() {
        // "john smithson" would substring-match "john smith" first in catalog order
        let cat = catalog(&[("John Smithson", "Control"), ("Smith, John", "Aggro")]);
        let matcher = IdentityMatcher::new(&cat);

        let res = matcher.resolve("John Smith");
        assert_eq!(res.archetype, "Aggro");
        assert_eq!(res.tier, Some("exact"));
    }

    #[test]
    fn test_first_catalog_hit_wins_within_tier() {
        let cat = catalog(&[("Alice Jones", "Aggro"), ("Alice Jones", "Control")]);
        let matcher = IdentityMatcher::new(&cat);
        assert_eq!(matcher.resolve_archetype("Jones, Alice"), "Aggro");
    }

    #[test]
    fn test_empty_name_is_unknown() {
        let cat = catalog(&[("Alice Jones", "Aggro")]);
        let matcher = IdentityMatcher::new(&cat);

        let res = matcher.resolve("   ");
        assert_eq!(res.archetype, UNKNOWN_ARCHETYPE);
        assert!(!res.is_known());
    }

    #[test]
    fn test_empty_catalog_player_never_matches() {
        let cat = catalog(&[("", "Aggro"), ("Bob Stone", "Control")]);
        assert_eq!(cat.len(), 1);

        let matcher = IdentityMatcher::new(&cat);
        assert_eq!(matcher.resolve_archetype("Someone Else"), UNKNOWN_ARCHETYPE);
    }

    #[test]
    fn test_long_archetype_label_becomes_unknown() {
        let long = "x".repeat(150);
        let cat = catalog(&[("Alice Jones", long.as_str())]);
        let matcher = IdentityMatcher::new(&cat);
        assert_eq!(matcher.resolve_archetype("Alice Jones"), UNKNOWN_ARCHETYPE);
    }

    #[test]
    fn test_player_archetypes_last_write_wins() {
        let cat = catalog(&[
            ("Alice Jones", "Aggro"),
            ("Bob Stone", "Control"),
            ("Jones, Alice", "Combo"),
        ]);
        let index = cat.player_archetypes();

        assert_eq!(index.len(), 2);
        assert_eq!(index["alice jones"], "Combo");
        assert_eq!(index["bob stone"], "Control");
    }

    #[test]
    fn test_custom_strategy_order() {
        let cat = catalog(&[("Samuel Pardee", "Mono Red")]);
        let matcher = IdentityMatcher::with_strategies(&cat, vec![Box::new(ExactMatch)]);
        assert_eq!(matcher.resolve_archetype("Pardee"), UNKNOWN_ARCHETYPE);
    }
}
