//! One-ply move search.
//!
//! ## Key Types
//!
//! - `MoveOutcome`: A candidate placement and its capture count
//! - `MovePolicy`: Picks one candidate (best, worst, random, opportunistic)
//! - `MoveStrategy`: Configurable policy name
//!
//! [`choose_move`] ties the two halves together for the timeout
//! supervisor and the computer opponent.

pub mod moves;
pub mod policy;

pub use moves::{enumerate_moves, legal_moves, simulate, MoveOutcome};
pub use policy::{BestMove, MovePolicy, MoveStrategy, Opportunistic, RandomMove, WorstMove};

use tracing::warn;

use crate::core::{Color, EngineError, MatchState, Placement};
use crate::rules::RulesEngine;

/// Pick a placement for `color` with `strategy`.
///
/// Random choices draw from the match RNG. Returns `Ok(None)` when the
/// side has no legal move.
pub fn choose_move<R: RulesEngine + ?Sized>(
    rules: &R,
    state: &mut MatchState,
    color: Color,
    strategy: MoveStrategy,
) -> Result<Option<Placement>, EngineError> {
    let moves = legal_moves(rules.catalog(), state, color)?;
    let chosen = strategy.select(&moves, &mut state.rng);
    if chosen.is_none() {
        warn!(%color, "no legal move");
    }
    Ok(chosen.map(|m| m.placement))
}
