//! Statistics calculation engine.
//!
//! Computes derived metrics from decklists and round results:
//! - Archetype representation
//! - Archetype match and game win rates
//! - Archetype-vs-archetype matchup summaries

mod aggregate;

pub use aggregate::{analyze, Aggregator, DirectionalStat};

/// Calculate win rate from wins/losses. Draws are not part of the denominator.
pub fn calculate_win_rate(wins: u32, losses: u32) -> f64 {
    calculate_share(wins, wins.saturating_add(losses))
}

/// `part / total`, 0.0 when `total` is zero.
pub fn calculate_share(part: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}
