//! Difficulty levels as search-depth distributions.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::{instrument, trace};

/// Maximum useful search depth: nine plies covers every remaining move.
pub const UNBOUNDED_DEPTH: u8 = 9;

/// How hard the computer tries.
///
/// Each level draws a search depth per move from a fixed range. The
/// caller supplies the random source, so a seeded generator makes every
/// game reproducible.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Looks one or two plies ahead: takes wins, often misses threats.
    Easy,
    /// Looks two to four plies ahead.
    Medium,
    /// Full-depth search. Never loses.
    #[default]
    Hard,
}

impl Difficulty {
    /// Depths this level samples from.
    pub fn depth_range(self) -> RangeInclusive<u8> {
        match self {
            Difficulty::Easy => 1..=2,
            Difficulty::Medium => 2..=4,
            Difficulty::Hard => UNBOUNDED_DEPTH..=UNBOUNDED_DEPTH,
        }
    }

    /// Draws the depth bound for one move.
    #[instrument(skip(rng))]
    pub fn sample_depth<R: Rng>(self, rng: &mut R) -> u8 {
        let depth = rng.gen_range(self.depth_range());
        trace!(depth, "Sampled search depth");
        depth
    }
}
