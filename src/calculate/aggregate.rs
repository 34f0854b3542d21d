//! Metagame aggregation over round results.
//!
//! Results are folded in input order. Orientation of each matchup summary is
//! taken from the first directional entry recorded for that pairing, so the
//! report depends on result order as well as content.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::identity::{ArchetypeCatalog, IdentityMatcher};
use crate::models::{
    canonical_matchup_key, ArchetypeStat, DecklistEntry, MatchInfo, MatchResult, MatchupSummary,
    MetagameReport, Outcome,
};

/// Counters for one direction of a matchup ("A vs B" from A's side).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectionalStat {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub matches: Vec<MatchInfo>,
}

impl DirectionalStat {
    /// Decided matches: wins + losses.
    pub fn decided(&self) -> u32 {
        self.wins.saturating_add(self.losses)
    }
}

/// Accumulates archetype and matchup statistics one result at a time.
pub struct Aggregator<'a> {
    matcher: &'a IdentityMatcher<'a>,
    config: &'a AnalysisConfig,
    archetypes: BTreeMap<String, ArchetypeStat>,
    /// Directional entries in first-seen order
    directional: Vec<(String, String, DirectionalStat)>,
    directional_index: HashMap<(String, String), usize>,
    results_seen: u32,
    skipped_incomplete: u32,
    skipped_excluded_round: u32,
}

impl<'a> Aggregator<'a> {
    pub fn new(matcher: &'a IdentityMatcher<'a>, config: &'a AnalysisConfig) -> Self {
        Self {
            matcher,
            config,
            archetypes: BTreeMap::new(),
            directional: Vec::new(),
            directional_index: HashMap::new(),
            results_seen: 0,
            skipped_incomplete: 0,
            skipped_excluded_round: 0,
        }
    }

    /// Fold one match result into the statistics.
    pub fn record(&mut self, result: &MatchResult) {
        self.results_seen = self.results_seen.saturating_add(1);

        if result.has_missing_player() {
            debug!("Skipping round {} result with missing player", result.round);
            self.skipped_incomplete += 1;
            return;
        }
        if self.config.is_excluded_round(result.round) {
            debug!(
                "Skipping round {} result {} vs {} (excluded round)",
                result.round, result.player1, result.player2
            );
            self.skipped_excluded_round += 1;
            return;
        }

        let player1 = result.player1.trim();
        let player2 = result.player2.trim();
        let arch1 = self.matcher.resolve_archetype(player1);
        let arch2 = self.matcher.resolve_archetype(player2);
        let is_mirror = arch1 == arch2;
        let (p1_wins, p2_wins) = (result.p1_wins, result.p2_wins);

        // Forward direction is created before the reverse one
        let forward = self.directional_slot(&arch1, &arch2);
        let reverse = self.directional_slot(&arch2, &arch1);

        match result.outcome() {
            Outcome::Player1 => {
                if !is_mirror {
                    bump(&mut self.archetype_mut(&arch1).wins, 1);
                    bump(&mut self.archetype_mut(&arch2).losses, 1);
                }
                bump(&mut self.directional[forward].2.wins, 1);
                bump(&mut self.directional[reverse].2.losses, 1);
            }
            Outcome::Player2 => {
                if !is_mirror {
                    bump(&mut self.archetype_mut(&arch2).wins, 1);
                    bump(&mut self.archetype_mut(&arch1).losses, 1);
                }
                bump(&mut self.directional[reverse].2.wins, 1);
                bump(&mut self.directional[forward].2.losses, 1);
            }
            Outcome::Draw => {
                bump(&mut self.archetype_mut(&arch1).draws, 1);
                bump(&mut self.archetype_mut(&arch2).draws, 1);
                bump(&mut self.directional[forward].2.draws, 1);
                bump(&mut self.directional[reverse].2.draws, 1);
            }
        }

        // Game counts are never excluded, mirrors included
        let stat = self.archetype_mut(&arch1);
        bump(&mut stat.games_won, p1_wins);
        bump(&mut stat.games_lost, p2_wins);
        let stat = self.archetype_mut(&arch2);
        bump(&mut stat.games_won, p2_wins);
        bump(&mut stat.games_lost, p1_wins);

        let dir = &mut self.directional[forward].2;
        bump(&mut dir.games_won, p1_wins);
        bump(&mut dir.games_lost, p2_wins);
        let dir = &mut self.directional[reverse].2;
        bump(&mut dir.games_won, p2_wins);
        bump(&mut dir.games_lost, p1_wins);

        let info = MatchInfo {
            round: result.round,
            player1: player1.to_string(),
            player2: player2.to_string(),
            archetype1: arch1.clone(),
            archetype2: arch2.clone(),
            p1_wins,
            p2_wins,
        };
        self.archetype_mut(&arch1).matches.push(info.clone());
        self.archetype_mut(&arch2).matches.push(info.clone());
        self.directional[forward].2.matches.push(info.clone());
        self.directional[reverse].2.matches.push(info);
    }

    /// Directional counters for "a vs b", if that direction was recorded.
    pub fn directional(&self, a: &str, b: &str) -> Option<&DirectionalStat> {
        self.directional_index
            .get(&(a.to_string(), b.to_string()))
            .map(|&i| &self.directional[i].2)
    }

    /// Archetype counters recorded so far (rates not yet derived).
    pub fn archetype(&self, name: &str) -> Option<&ArchetypeStat> {
        self.archetypes.get(name)
    }

    /// Derive rates, canonicalize matchups and build the report.
    pub fn finish(self) -> MetagameReport {
        let matcher = self.matcher;
        let catalog = matcher.catalog();
        let matchup_stats = self.canonical_matchups();

        let mut archetype_stats = self.archetypes;
        for stat in archetype_stats.values_mut() {
            stat.finalize();
        }

        let player_archetypes = catalog.player_archetypes();
        let mut archetype_counts: BTreeMap<String, u32> = BTreeMap::new();
        for archetype in player_archetypes.values() {
            bump(archetype_counts.entry(archetype.clone()).or_default(), 1);
        }

        info!(
            "Aggregated {} results ({} excluded round, {} incomplete) into {} archetypes and {} matchups",
            self.results_seen,
            self.skipped_excluded_round,
            self.skipped_incomplete,
            archetype_stats.len(),
            matchup_stats.len()
        );

        MetagameReport {
            archetype_counts,
            archetype_stats,
            matchup_stats,
            total_players: player_archetypes.len() as u32,
            total_matches: self.results_seen,
        }
    }

    /// Fold directional entries into undirected summaries.
    ///
    /// Each match is counted once: only the entry that fixed a summary's
    /// orientation contributes, and its reverse twin is skipped rather than
    /// added into the other side.
    fn canonical_matchups(&self) -> BTreeMap<String, MatchupSummary> {
        let mut summaries: BTreeMap<String, MatchupSummary> = BTreeMap::new();

        for (a, b, stat) in &self.directional {
            let decided = stat.decided();
            if decided == 0 {
                continue;
            }
            if a == b && !self.config.report_mirror_matchups {
                continue;
            }

            let summary = summaries
                .entry(canonical_matchup_key(a, b))
                .or_insert_with(|| MatchupSummary::new(a.as_str(), b.as_str()));

            // Every match updates both directions symmetrically, so the reverse
            // entry is the mirror image of the one that fixed orientation.
            if *a != summary.archetype1 {
                debug_assert_eq!(stat.wins, summary.arch2_wins);
                continue;
            }

            bump(&mut summary.arch1_wins, stat.wins);
            bump(&mut summary.arch1_games, stat.games_won);
            bump(&mut summary.arch2_wins, stat.losses);
            bump(&mut summary.arch2_games, stat.games_lost);
            bump(&mut summary.total_matches, decided);
        }

        for summary in summaries.values_mut() {
            summary.finalize();
        }
        summaries
    }

    fn archetype_mut(&mut self, name: &str) -> &mut ArchetypeStat {
        self.archetypes.entry(name.to_string()).or_default()
    }

    fn directional_slot(&mut self, a: &str, b: &str) -> usize {
        let key = (a.to_string(), b.to_string());
        if let Some(&i) = self.directional_index.get(&key) {
            return i;
        }
        let i = self.directional.len();
        self.directional
            .push((a.to_string(), b.to_string(), DirectionalStat::default()));
        self.directional_index.insert(key, i);
        i
    }
}

/// Counters saturate instead of overflowing on absurd game counts.
fn bump(counter: &mut u32, by: u32) {
    *counter = counter.saturating_add(by);
}

/// Build a metagame report from decklists and round results.
pub fn analyze(
    decklists: &[DecklistEntry],
    results: &[MatchResult],
    config: &AnalysisConfig,
) -> MetagameReport {
    let catalog = ArchetypeCatalog::from_decklists(decklists);
    let matcher = IdentityMatcher::new(&catalog);
    let mut aggregator = Aggregator::new(&matcher, config);

    for result in results {
        aggregator.record(result);
    }

    aggregator.finish()
}
