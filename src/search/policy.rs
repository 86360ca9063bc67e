//! Move selection policies.
//!
//! Policies pick one entry from an enumerated move list:
//! - `BestMove`: first entry with the most captures
//! - `WorstMove`: first entry with the fewest captures
//! - `RandomMove`: uniform over all entries
//! - `Opportunistic`: best move if it captures anything, else random
//!
//! `MoveStrategy` names a policy in configuration.

use serde::{Deserialize, Serialize};

use super::moves::MoveOutcome;
use crate::core::MatchRng;

/// Policy for choosing a move from an enumerated list.
///
/// Returns `None` only for an empty list.
pub trait MovePolicy: Send + Sync {
    fn select(&self, moves: &[MoveOutcome], rng: &mut MatchRng) -> Option<MoveOutcome>;
}

/// Maximal captures; the earliest entry wins ties.
#[derive(Clone, Copy, Debug, Default)]
pub struct BestMove;

impl MovePolicy for BestMove {
    fn select(&self, moves: &[MoveOutcome], _rng: &mut MatchRng) -> Option<MoveOutcome> {
        let mut best: Option<MoveOutcome> = None;
        for &candidate in moves {
            if best.map_or(true, |b| candidate.captures > b.captures) {
                best = Some(candidate);
            }
        }
        best
    }
}

/// Minimal captures; the earliest entry wins ties.
#[derive(Clone, Copy, Debug, Default)]
pub struct WorstMove;

impl MovePolicy for WorstMove {
    fn select(&self, moves: &[MoveOutcome], _rng: &mut MatchRng) -> Option<MoveOutcome> {
        let mut worst: Option<MoveOutcome> = None;
        for &candidate in moves {
            if worst.map_or(true, |w| candidate.captures < w.captures) {
                worst = Some(candidate);
            }
        }
        worst
    }
}

/// Uniformly random entry.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomMove;

impl MovePolicy for RandomMove {
    fn select(&self, moves: &[MoveOutcome], rng: &mut MatchRng) -> Option<MoveOutcome> {
        rng.choose(moves).copied()
    }
}

/// Computer opponent: take a capture when one exists, otherwise play at
/// random.
#[derive(Clone, Copy, Debug, Default)]
pub struct Opportunistic;

impl MovePolicy for Opportunistic {
    fn select(&self, moves: &[MoveOutcome], rng: &mut MatchRng) -> Option<MoveOutcome> {
        match BestMove.select(moves, rng) {
            Some(best) if best.captures > 0 => Some(best),
            _ => RandomMove.select(moves, rng),
        }
    }
}

/// Configurable policy name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveStrategy {
    Best,
    Worst,
    Random,
    Opportunistic,
}

impl MoveStrategy {
    /// The policy this strategy names.
    #[must_use]
    pub fn policy(self) -> &'static dyn MovePolicy {
        match self {
            MoveStrategy::Best => &BestMove,
            MoveStrategy::Worst => &WorstMove,
            MoveStrategy::Random => &RandomMove,
            MoveStrategy::Opportunistic => &Opportunistic,
        }
    }

    /// Select with the named policy.
    pub fn select(self, moves: &[MoveOutcome], rng: &mut MatchRng) -> Option<MoveOutcome> {
        self.policy().select(moves, rng)
    }
}
