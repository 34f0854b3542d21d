//! Decklist model.

use serde::{Deserialize, Serialize};

use super::DecklistId;

/// Label used whenever a player's archetype can't be determined.
pub const UNKNOWN_ARCHETYPE: &str = "Unknown";

/// Archetype labels longer than this are treated as scrape noise.
pub const MAX_ARCHETYPE_LEN: usize = 100;

/// A card line in a decklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEntry {
    pub count: u32,
    pub name: String,
}

/// A player's registered decklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecklistEntry {
    /// Player name as published (may be "Last, First")
    pub player: String,

    /// Archetype label (opaque)
    #[serde(default = "default_archetype")]
    pub archetype: String,

    /// Page the decklist was taken from
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub main_deck: Vec<CardEntry>,

    #[serde(default)]
    pub sideboard: Vec<CardEntry>,
}

fn default_archetype() -> String {
    UNKNOWN_ARCHETYPE.to_string()
}

impl DecklistEntry {
    /// Create a decklist with empty card lists.
    pub fn new(
        player: impl Into<String>,
        archetype: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            player: player.into(),
            archetype: archetype.into(),
            url: url.into(),
            main_deck: Vec::new(),
            sideboard: Vec::new(),
        }
    }

    /// Identity of this decklist, derived from source URL and raw player string.
    pub fn id(&self) -> DecklistId {
        DecklistId::new(&self.url, &self.player)
    }

    /// Archetype label with the "Unknown" fallback applied.
    pub fn archetype_label(&self) -> &str {
        let label = self.archetype.trim();
        if label.is_empty() || label.chars().count() > MAX_ARCHETYPE_LEN {
            UNKNOWN_ARCHETYPE
        } else {
            label
        }
    }
}
