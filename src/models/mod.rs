//! Core data models for the metagame analyzer.

mod confidence;
mod decklist;
mod ids;
mod match_result;
mod stats;

pub use confidence::*;
pub use decklist::*;
pub use ids::*;
pub use match_result::*;
pub use stats::*;
