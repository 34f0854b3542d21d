//! Derived statistics models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::MatchInfo;
use crate::calculate::{calculate_share, calculate_win_rate};

/// Per-archetype match and game record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeStat {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub games_won: u32,
    pub games_lost: u32,

    /// wins / (wins + losses)
    pub win_rate: f64,

    /// games_won / (games_won + games_lost)
    pub game_win_rate: f64,

    /// wins + losses; draws and mirrors don't count
    pub total_matches: u32,

    /// Every match this archetype took part in
    pub matches: Vec<MatchInfo>,
}

impl ArchetypeStat {
    /// Fill in the derived rate fields from the counters.
    pub fn finalize(&mut self) {
        self.total_matches = self.wins.saturating_add(self.losses);
        self.win_rate = calculate_win_rate(self.wins, self.losses);
        self.game_win_rate = calculate_win_rate(self.games_won, self.games_lost);
    }
}

/// Undirected archetype-vs-archetype summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupSummary {
    /// Orientation is fixed by the first directional entry seen for this pairing
    pub archetype1: String,
    pub archetype2: String,
    pub arch1_wins: u32,
    pub arch2_wins: u32,
    pub arch1_games: u32,
    pub arch2_games: u32,
    pub arch1_win_rate: f64,
    pub arch2_win_rate: f64,
    pub arch1_game_win_rate: f64,
    pub arch2_game_win_rate: f64,
    pub total_matches: u32,
}

impl MatchupSummary {
    /// Create an empty summary with the given orientation.
    pub fn new(archetype1: impl Into<String>, archetype2: impl Into<String>) -> Self {
        Self {
            archetype1: archetype1.into(),
            archetype2: archetype2.into(),
            arch1_wins: 0,
            arch2_wins: 0,
            arch1_games: 0,
            arch2_games: 0,
            arch1_win_rate: 0.0,
            arch2_win_rate: 0.0,
            arch1_game_win_rate: 0.0,
            arch2_game_win_rate: 0.0,
            total_matches: 0,
        }
    }

    /// Fill in the derived rate fields from the counters.
    pub fn finalize(&mut self) {
        self.arch1_win_rate = calculate_share(self.arch1_wins, self.total_matches);
        self.arch2_win_rate = calculate_share(self.arch2_wins, self.total_matches);
        let total_games = self.arch1_games.saturating_add(self.arch2_games);
        self.arch1_game_win_rate = calculate_share(self.arch1_games, total_games);
        self.arch2_game_win_rate = calculate_share(self.arch2_games, total_games);
    }

    /// True for a degenerate self-pairing ("A vs A").
    pub fn is_mirror(&self) -> bool {
        self.archetype1 == self.archetype2
    }
}

/// The full metagame report handed to dashboards and exporters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetagameReport {
    /// Players per archetype, from the decklist catalog
    pub archetype_counts: BTreeMap<String, u32>,

    /// Per-archetype statistics
    pub archetype_stats: BTreeMap<String, ArchetypeStat>,

    /// Keyed by canonical matchup key ("A vs B" with A <= B)
    pub matchup_stats: BTreeMap<String, MatchupSummary>,

    /// Distinct normalized player names in the catalog
    pub total_players: u32,

    /// All input match results, excluded rounds included
    pub total_matches: u32,
}

impl MetagameReport {
    /// Look up a matchup regardless of argument order.
    pub fn matchup(&self, a: &str, b: &str) -> Option<&MatchupSummary> {
        self.matchup_stats.get(&canonical_matchup_key(a, b))
    }

    /// Fraction of the field playing an archetype.
    pub fn meta_share(&self, archetype: &str) -> f64 {
        let count = self.archetype_counts.get(archetype).copied().unwrap_or(0);
        calculate_share(count, self.total_players)
    }

    /// Archetypes that played at least one decided match, best win rate first.
    pub fn sorted_by_win_rate(&self) -> Vec<(&str, &ArchetypeStat)> {
        let mut sorted: Vec<_> = self
            .archetype_stats
            .iter()
            .filter(|(_, s)| s.total_matches > 0)
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        sorted.sort_by(|a, b| b.1.win_rate.total_cmp(&a.1.win_rate));
        sorted
    }

    /// Archetypes by player count, most played first.
    pub fn sorted_by_count(&self) -> Vec<(&str, u32)> {
        let mut sorted: Vec<_> = self
            .archetype_counts
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}

/// Directional matchup key, e.g. "Aggro vs Control".
pub fn matchup_key(a: &str, b: &str) -> String {
    format!("{} vs {}", a, b)
}

/// Undirected matchup key: labels sorted lexicographically.
pub fn canonical_matchup_key(a: &str, b: &str) -> String {
    if a <= b {
        matchup_key(a, b)
    } else {
        matchup_key(b, a)
    }
}
