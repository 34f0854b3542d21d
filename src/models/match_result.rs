//! Match result model — one pairing in one round.

use serde::{Deserialize, Serialize};

/// Who took the match, decided by game wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Player1,
    Player2,
    Draw,
}

/// A single match between two players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Round number
    #[serde(default)]
    pub round: u32,

    /// Player 1 name, raw; blank when the sheet left it out
    #[serde(default)]
    pub player1: String,

    /// Player 2 name, raw
    #[serde(default)]
    pub player2: String,

    /// Games won by player 1
    #[serde(default)]
    pub p1_wins: u32,

    /// Games won by player 2
    #[serde(default)]
    pub p2_wins: u32,
}

impl MatchResult {
    pub fn new(
        round: u32,
        player1: impl Into<String>,
        player2: impl Into<String>,
        p1_wins: u32,
        p2_wins: u32,
    ) -> Self {
        Self {
            round,
            player1: player1.into(),
            player2: player2.into(),
            p1_wins,
            p2_wins,
        }
    }

    /// Outcome of the match. Equal game wins is a draw.
    pub fn outcome(&self) -> Outcome {
        use std::cmp::Ordering;
        match self.p1_wins.cmp(&self.p2_wins) {
            Ordering::Greater => Outcome::Player1,
            Ordering::Less => Outcome::Player2,
            Ordering::Equal => Outcome::Draw,
        }
    }

    /// True if either player name is blank.
    pub fn has_missing_player(&self) -> bool {
        self.player1.trim().is_empty() || self.player2.trim().is_empty()
    }
}

/// Audit record of a match as seen by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchInfo {
    pub round: u32,
    pub player1: String,
    pub player2: String,
    pub archetype1: String,
    pub archetype2: String,
    pub p1_wins: u32,
    pub p2_wins: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome() {
        assert_eq!(MatchResult::new(4, "A", "B", 2, 1).outcome(), Outcome::Player1);
        assert_eq!(MatchResult::new(4, "A", "B", 0, 2).outcome(), Outcome::Player2);
        assert_eq!(MatchResult::new(4, "A", "B", 1, 1).outcome(), Outcome::Draw);
        assert_eq!(MatchResult::new(4, "A", "B", 0, 0).outcome(), Outcome::Draw);
    }

    #[test]
    fn test_missing_player() {
        assert!(MatchResult::new(4, "", "B", 2, 0).has_missing_player());
        assert!(MatchResult::new(4, "A", "  ", 2, 0).has_missing_player());
        assert!(!MatchResult::new(4, "A", "B", 2, 0).has_missing_player());
    }

    #[test]
    fn test_deserialize_ignores_game_fields_and_defaults_wins() {
        let json = r#"{"round": 5, "player1": "Dang, Nam", "player2": "Pardee, Samuel",
                       "p1_games": 2, "p2_games": 0, "p1_wins": 2}"#;
        let result: MatchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.round, 5);
        assert_eq!(result.p1_wins, 2);
        assert_eq!(result.p2_wins, 0);
    }

    #[test]
    fn test_deserialize_missing_player_is_blank() {
        let result: MatchResult =
            serde_json::from_str(r#"{"round": 5, "player1": "Alice", "p1_wins": 2}"#).unwrap();
        assert!(result.player2.is_empty());
        assert!(result.has_missing_player());

        let result: MatchResult = serde_json::from_str(r#"{"player1": "A", "player2": "B"}"#).unwrap();
        assert_eq!(result.round, 0);
    }
}
