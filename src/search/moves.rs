//! Move enumeration by one-ply simulation.
//!
//! Every candidate placement is played on a scratch copy of the board and
//! scored by the number of cards it would capture. The live state is never
//! touched.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos};
use crate::cards::{CardCatalog, CardId, CardKind, PlacedCard};
use crate::combat::{self, CombatOutcome};
use crate::core::{Color, EngineError, MatchState, Placement, RangeMode};

/// A candidate placement and the captures it would make.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// The placement tried.
    pub placement: Placement,
    /// Cards it would capture.
    pub captures: u8,
}

/// Range modes to try for a card kind. Magic tries ranged first.
fn range_modes(kind: CardKind) -> &'static [RangeMode] {
    match kind {
        CardKind::Magic => &[RangeMode::Ranged, RangeMode::Adjacent],
        _ => &[RangeMode::Adjacent],
    }
}

/// Simulate a placement on a copy of `board`.
pub fn simulate(
    board: &Board,
    catalog: &CardCatalog,
    color: Color,
    placement: &Placement,
) -> Result<CombatOutcome, EngineError> {
    let mut scratch = board.clone();
    scratch.place(placement.pos, PlacedCard::new(placement.card_id, color));
    combat::resolve(&scratch, catalog, placement.pos, placement.range)
}

/// Enumerate every legal placement for `color` using cards from
/// `available`.
///
/// Cards not in the side's remaining deck are skipped. Order is card (as
/// given), then row, then column, then range mode, which fixes the
/// tie-breaking of the selection policies.
pub fn enumerate_moves(
    catalog: &CardCatalog,
    state: &MatchState,
    color: Color,
    available: &[CardId],
) -> Result<Vec<MoveOutcome>, EngineError> {
    let side = state.side(color);
    let empty: Vec<Pos> = state.board.empty_cells().collect();
    let mut moves = Vec::new();

    for &card_id in available.iter().filter(|id| side.has_card(**id)) {
        let card = catalog.require(card_id)?;
        for &pos in &empty {
            for &range in range_modes(card.kind) {
                let placement = Placement::new(card_id, pos).with_range(range);
                let outcome = simulate(&state.board, catalog, color, &placement)?;
                moves.push(MoveOutcome {
                    placement,
                    captures: outcome.capture_count(),
                });
            }
        }
    }

    Ok(moves)
}

/// Enumerate every legal placement from the side's whole remaining deck.
pub fn legal_moves(
    catalog: &CardCatalog,
    state: &MatchState,
    color: Color,
) -> Result<Vec<MoveOutcome>, EngineError> {
    enumerate_moves(catalog, state, color, &state.side(color).remaining_deck)
}
