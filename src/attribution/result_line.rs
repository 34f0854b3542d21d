//! Free-text round result lines.
//!
//! Two shapes are published: `"<name> won W-L-D"` and `"W-L-D Draw"`.

use std::sync::OnceLock;

use regex::Regex;

use super::{Attribution, WinnerResolver};
use crate::models::{Confidence, MatchResult};

fn won_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([\w\s,.-]+?)\s+won\s+(\d+)-(\d+)-(\d+)").unwrap())
}

fn draw_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d+)-(\d+)-(\d+)\s+Draw").unwrap())
}

/// A parsed result line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultLine {
    Won {
        winner: String,
        winner_games: u32,
        loser_games: u32,
        draws: u32,
    },
    Draw {
        p1_games: u32,
        p2_games: u32,
        draws: u32,
    },
}

impl ResultLine {
    /// Parse a result line; `None` if it has neither shape.
    pub fn parse(text: &str) -> Option<Self> {
        if let Some(caps) = won_re().captures(text) {
            return Some(ResultLine::Won {
                winner: caps[1].trim().to_string(),
                winner_games: caps[2].parse().ok()?,
                loser_games: caps[3].parse().ok()?,
                draws: caps[4].parse().ok()?,
            });
        }

        let caps = draw_re().captures(text)?;
        Some(ResultLine::Draw {
            p1_games: caps[1].parse().ok()?,
            p2_games: caps[2].parse().ok()?,
            draws: caps[3].parse().ok()?,
        })
    }
}

/// A match result built from free text, with attribution confidence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributedResult {
    pub result: MatchResult,
    pub confidence: Confidence,
}

/// Turn a result line for a known pairing into a [`MatchResult`].
pub fn resolve_result_line(
    resolver: &WinnerResolver,
    round: u32,
    player1: &str,
    player2: &str,
    text: &str,
) -> Option<AttributedResult> {
    match ResultLine::parse(text)? {
        ResultLine::Won {
            winner,
            winner_games,
            loser_games,
            ..
        } => {
            let decision = resolver.resolve(&winner, player1, player2);
            let (p1_wins, p2_wins) = match decision.attribution {
                Attribution::Player2 => (loser_games, winner_games),
                _ => (winner_games, loser_games),
            };
            Some(AttributedResult {
                result: MatchResult::new(round, player1, player2, p1_wins, p2_wins),
                confidence: decision.confidence,
            })
        }
        ResultLine::Draw {
            p1_games, p2_games, ..
        } => Some(AttributedResult {
            result: MatchResult::new(round, player1, player2, p1_games, p2_games),
            confidence: Confidence::High,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_won() {
        assert_eq!(
            ResultLine::parse("Garcia-Romo, Andy won 2-1-0"),
            Some(ResultLine::Won {
                winner: "Garcia-Romo, Andy".to_string(),
                winner_games: 2,
                loser_games: 1,
                draws: 0,
            })
        );
    }

    #[test]
    fn test_parse_draw() {
        assert_eq!(
            ResultLine::parse("1-1-1 draw"),
            Some(ResultLine::Draw {
                p1_games: 1,
                p2_games: 1,
                draws: 1,
            })
        );
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(ResultLine::parse("Bye"), None);
        assert_eq!(ResultLine::parse(""), None);
    }

    #[test]
    fn test_resolve_winner_as_player2() {
        let resolver = WinnerResolver::default();
        let attributed =
            resolve_result_line(&resolver, 4, "Pardee, Samuel", "Dang, Nam", "Dang, Nam won 2-0-0")
                .unwrap();

        assert_eq!(attributed.result, MatchResult::new(4, "Pardee, Samuel", "Dang, Nam", 0, 2));
        assert_eq!(attributed.confidence, Confidence::High);
    }

    #[test]
    fn test_resolve_draw() {
        let resolver = WinnerResolver::default();
        let attributed =
            resolve_result_line(&resolver, 6, "Pardee, Samuel", "Dang, Nam", "1-1-0 Draw")
                .unwrap();

        assert_eq!(attributed.result.p1_wins, 1);
        assert_eq!(attributed.result.p2_wins, 1);
    }

    #[test]
    fn test_resolve_unmatched_winner_defaults_to_player1() {
        let resolver = WinnerResolver::default();
        let attributed =
            resolve_result_line(&resolver, 7, "Smith, Bob", "Jones, Al", "Nobody won 2-1-0")
                .unwrap();

        assert_eq!(attributed.result.p1_wins, 2);
        assert_eq!(attributed.result.p2_wins, 1);
        assert!(attributed.confidence.needs_review());
    }
}
