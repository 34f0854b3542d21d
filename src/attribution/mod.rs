//! Winner attribution.
//!
//! Round results are sometimes published as free text ("Garcia-Romo, Andy won
//! 2-1-0") where the winner's spelling need not match either listed player.
//! Attribution decides which of the two players the text refers to.

mod result_line;

use std::cmp::Ordering;
use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::models::Confidence;
use crate::names::{normalize, normalize_loose, NormalizedName};

pub use result_line::{resolve_result_line, AttributedResult, ResultLine};

/// Which candidate a winner name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribution {
    Player1,
    Player2,
    Undetermined,
}

/// Score how well a candidate's pieces account for the winner's pieces.
///
/// Distinct shared pieces count once each. Unequal piece pairs where one
/// contains the other ("sam" / "samuel") add to the score, capped at the
/// number of winner pieces.
pub fn piece_score(winner: &NormalizedName, candidate: &NormalizedName) -> usize {
    if winner.is_empty() || candidate.is_empty() {
        return 0;
    }

    let winner_set: BTreeSet<&str> = winner.pieces().iter().map(String::as_str).collect();
    let candidate_set: BTreeSet<&str> = candidate.pieces().iter().map(String::as_str).collect();
    let exact = winner_set.intersection(&candidate_set).count();

    let mut partial = 0;
    for w in winner.pieces() {
        for c in candidate.pieces() {
            if w != c && (w.contains(c.as_str()) || c.contains(w.as_str())) {
                partial += 1;
            }
        }
    }

    exact + partial.min(winner.len())
}

/// Decide which player a free-text winner name refers to, by piece scoring.
///
/// A higher score wins outright. Equal nonzero scores fall back to the share
/// of the candidate's own pieces that were matched; anything still tied is
/// undetermined.
pub fn attribute_winner(winner: &str, player1: &str, player2: &str) -> Attribution {
    let winner = normalize_loose(winner);
    let p1 = normalize_loose(player1);
    let p2 = normalize_loose(player2);

    let s1 = piece_score(&winner, &p1);
    let s2 = piece_score(&winner, &p2);

    match s1.cmp(&s2) {
        Ordering::Greater => Attribution::Player1,
        Ordering::Less => Attribution::Player2,
        Ordering::Equal if s1 == 0 => Attribution::Undetermined,
        Ordering::Equal => {
            // s1 / len1 vs s2 / len2 without going through floats
            let lhs = s1 * p2.len().max(1);
            let rhs = s2 * p1.len().max(1);
            match lhs.cmp(&rhs) {
                Ordering::Greater => Attribution::Player1,
                Ordering::Less => Attribution::Player2,
                Ordering::Equal => Attribution::Undetermined,
            }
        }
    }
}

/// Loose direct comparison of two names.
///
/// True on equality, when one joined name contains the other, or when the
/// surnames agree and one given name equals or contains the other.
pub fn names_match(a: &str, b: &str) -> bool {
    let n1 = normalize(a);
    let n2 = normalize(b);
    if n1.is_empty() || n2.is_empty() {
        return false;
    }

    let j1 = n1.as_joined();
    let j2 = n2.as_joined();
    if j1 == j2 || j1.contains(&j2) || j2.contains(&j1) {
        return true;
    }

    match (n1.first(), n1.last(), n2.first(), n2.last()) {
        (Some(f1), Some(l1), Some(f2), Some(l2)) if l1 == l2 => {
            f1.contains(f2) || f2.contains(f1)
        }
        _ => false,
    }
}

/// One way of deciding a winner; returns `Undetermined` for "no opinion".
pub trait WinnerStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Confidence attached to a decision made by this strategy.
    fn confidence(&self) -> Confidence;

    fn decide(&self, winner: &str, player1: &str, player2: &str) -> Attribution;
}

/// Direct name comparison, player 1 checked first.
pub struct DirectNameMatch;

impl WinnerStrategy for DirectNameMatch {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn confidence(&self) -> Confidence {
        Confidence::High
    }

    fn decide(&self, winner: &str, player1: &str, player2: &str) -> Attribution {
        if names_match(winner, player1) {
            Attribution::Player1
        } else if names_match(winner, player2) {
            Attribution::Player2
        } else {
            Attribution::Undetermined
        }
    }
}

/// Piece-overlap scoring, see [`attribute_winner`].
pub struct PieceScoreMatch;

impl WinnerStrategy for PieceScoreMatch {
    fn name(&self) -> &'static str {
        "piece_score"
    }

    fn confidence(&self) -> Confidence {
        Confidence::Medium
    }

    fn decide(&self, winner: &str, player1: &str, player2: &str) -> Attribution {
        attribute_winner(winner, player1, player2)
    }
}

/// A final winner decision. `attribution` is never `Undetermined`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinnerDecision {
    pub attribution: Attribution,
    pub confidence: Confidence,
    /// Strategy that decided; `None` when falling back to player 1
    pub strategy: Option<&'static str>,
}

/// Runs winner strategies in order; first decisive one wins.
pub struct WinnerResolver {
    strategies: Vec<Box<dyn WinnerStrategy>>,
}

impl Default for WinnerResolver {
    fn default() -> Self {
        Self::new(vec![Box::new(DirectNameMatch), Box::new(PieceScoreMatch)])
    }
}

impl WinnerResolver {
    pub fn new(strategies: Vec<Box<dyn WinnerStrategy>>) -> Self {
        Self { strategies }
    }

    /// Decide the winner, defaulting to player 1 with low confidence.
    pub fn resolve(&self, winner: &str, player1: &str, player2: &str) -> WinnerDecision {
        for strategy in &self.strategies {
            let attribution = strategy.decide(winner, player1, player2);
            if attribution != Attribution::Undetermined {
                debug!(
                    "Attributed {:?} to {:?} via {}",
                    winner,
                    attribution,
                    strategy.name()
                );
                return WinnerDecision {
                    attribution,
                    confidence: strategy.confidence(),
                    strategy: Some(strategy.name()),
                };
            }
        }

        warn!(
            "Could not match winner {:?} to {:?} or {:?}; defaulting to player 1",
            winner, player1, player2
        );
        WinnerDecision {
            attribution: Attribution::Player1,
            confidence: Confidence::Low,
            strategy: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_score_exact_pieces() {
        let w = normalize_loose("Garcia-Romo, Andy");
        assert_eq!(piece_score(&w, &normalize_loose("Andy Garcia-Romo")), 3);
        assert_eq!(piece_score(&w, &normalize_loose("Smith, Bob")), 0);
    }

    #[test]
    fn test_piece_score_substring_pieces() {
        let w = normalize_loose("Sam Pardee");
        // "pardee" exact, "sam" within "samuel"
        assert_eq!(piece_score(&w, &normalize_loose("Samuel Pardee")), 2);
    }

    #[test]
    fn test_piece_score_duplicate_pieces_count_once() {
        let w = normalize_loose("Lee Lee");
        assert_eq!(piece_score(&w, &normalize_loose("Lee Smith")), 1);
    }

    #[test]
    fn test_piece_score_partial_capped_at_winner_len() {
        // "a" is inside every candidate piece: 3 partial pairs, capped at 1
        let w = normalize_loose("a");
        assert_eq!(piece_score(&w, &normalize_loose("ab ac ad")), 1);
    }

    #[test]
    fn test_piece_score_empty() {
        let empty = normalize_loose("");
        assert_eq!(piece_score(&empty, &normalize_loose("Bob")), 0);
        assert_eq!(piece_score(&normalize_loose("Bob"), &empty), 0);
    }

    #[test]
    fn test_attribute_winner_hyphenated_surname() {
        assert_eq!(
            attribute_winner("Garcia-Romo, Andy", "Garcia-Romo, Andy", "Smith, Bob"),
            Attribution::Player1
        );
        assert_eq!(
            attribute_winner("Garcia Romo, Andy", "Smith, Bob", "Garcia-Romo, Andy"),
            Attribution::Player2
        );
    }

    #[test]
    fn test_attribute_winner_ratio_tie_break() {
        // Both score 2; the shorter name is fully accounted for
        assert_eq!(
            attribute_winner(
                "Mario Flores",
                "Flores Silva, Mario Alejandro",
                "Flores, Mario"
            ),
            Attribution::Player2
        );
    }

    #[test]
    fn test_attribute_winner_undetermined() {
        assert_eq!(
            attribute_winner("Nobody Here", "Smith, Bob", "Jones, Al"),
            Attribution::Undetermined
        );
        // Same score, same length
        assert_eq!(
            attribute_winner("John", "John Smith", "John Jones"),
            Attribution::Undetermined
        );
        assert_eq!(attribute_winner("", "A B", "C D"), Attribution::Undetermined);
    }

    #[test]
    fn test_names_match() {
        assert!(names_match("Dang, Nam", "Nam Dang"));
        assert!(names_match("Pardee", "Samuel Pardee"));
        assert!(names_match("Sam Pardee", "Samuel Pardee"));
        assert!(!names_match("Sam Pardee", "Nam Dang"));
        assert!(!names_match("", "Nam Dang"));
    }

    #[test]
    fn test_resolver_prefers_direct_match() {
        let resolver = WinnerResolver::default();
        let decision = resolver.resolve("Dang, Nam", "Pardee, Samuel", "Nam Dang");

        assert_eq!(decision.attribution, Attribution::Player2);
        assert_eq!(decision.confidence, Confidence::High);
        assert_eq!(decision.strategy, Some("direct"));
    }

    #[test]
    fn test_resolver_falls_back_to_piece_score() {
        let resolver = WinnerResolver::default();
        // Hyphen vs space defeats the direct comparison
        let decision = resolver.resolve("Romo, Andy Garcia", "Smith, Bob", "Garcia-Romo, Andy");

        assert_eq!(decision.attribution, Attribution::Player2);
        assert_eq!(decision.confidence, Confidence::Medium);
        assert_eq!(decision.strategy, Some("piece_score"));
    }

    #[test]
    fn test_resolver_defaults_to_player1() {
        let resolver = WinnerResolver::default();
        let decision = resolver.resolve("Nobody", "Smith, Bob", "Jones, Al");

        assert_eq!(decision.attribution, Attribution::Player1);
        assert_eq!(decision.confidence, Confidence::Low);
        assert!(decision.strategy.is_none());
    }
}
