//! Decklist identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Short content hash of a decklist's source page and raw player string.
///
/// Two entries with the same `(url, player)` are the same registration, even
/// when they were scraped twice with different archetype labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecklistId(String);

impl DecklistId {
    const HEX_LEN: usize = 16;

    pub fn new(url: &str, player: &str) -> Self {
        let digest = Sha256::new()
            .chain_update(url.as_bytes())
            .chain_update([0u8])
            .chain_update(player.as_bytes())
            .finalize();
        let mut id = hex::encode(digest);
        id.truncate(Self::HEX_LEN);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DecklistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
