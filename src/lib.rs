//! # Metagame
//!
//! Metagame analysis for card-game tournaments: archetype representation,
//! archetype win rates and archetype-vs-archetype matchups, built from
//! scraped decklists and round results.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (decklists, match results, reports)
//! - **names**: Player name normalization
//! - **identity**: Resolving result-sheet names to decklist archetypes
//! - **attribution**: Deciding which player a free-text winner refers to
//! - **calculate**: Statistics aggregation
//! - **config**: Configuration loading and validation
//! - **storage**: JSON input and report output

pub mod attribution;
pub mod calculate;
pub mod config;
pub mod identity;
pub mod models;
pub mod names;
pub mod storage;

pub use models::*;

use std::collections::BTreeSet;

/// Highest round number a round list may name.
pub const MAX_ROUND: u32 = 1_000;

/// Parse a round list such as "1-3,8-10" or "4, 5".
///
/// Returns `None` when any part is malformed or names a round above [`MAX_ROUND`].
pub fn parse_round_set(s: &str) -> Option<BTreeSet<u32>> {
    let mut rounds = BTreeSet::new();

    for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let start: u32 = start.trim().parse().ok()?;
                let end: u32 = end.trim().parse().ok()?;
                if start > end || end > MAX_ROUND {
                    return None;
                }
                rounds.extend(start..=end);
            }
            None => {
                let round: u32 = part.parse().ok()?;
                if round > MAX_ROUND {
                    return None;
                }
                rounds.insert(round);
            }
        }
    }

    Some(rounds)
}
