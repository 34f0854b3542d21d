//! Confidence levels for winner attribution decisions.

use serde::{Deserialize, Serialize};

/// How sure we are that a free-text winner was attributed to the right player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Winner name matched a player name directly
    High,
    /// Winner resolved by name-piece scoring
    #[default]
    Medium,
    /// No strategy decided; fell back to player 1
    Low,
}

impl Confidence {
    /// Returns true if this decision should be surfaced for manual review.
    pub fn needs_review(&self) -> bool {
        matches!(self, Confidence::Low)
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_needs_review() {
        assert!(!Confidence::High.needs_review());
        assert!(!Confidence::Medium.needs_review());
        assert!(Confidence::Low.needs_review());
    }

    #[test]
    fn test_confidence_serialization() {
        let json = serde_json::to_string(&Confidence::Low).unwrap();
        assert_eq!(json, "\"low\"");
        assert_eq!(Confidence::High.to_string(), "high");
    }
}
