//! The card-placement rules.
//!
//! A turn runs in a fixed order: validate, place, combat, area buff,
//! decay, advance the turn counter. Validation happens before any
//! mutation, so an `IllegalMove` always leaves the state untouched. The
//! remaining steps run on a working copy that replaces the state only when
//! the whole turn succeeded.

use tracing::{debug, info};

use super::engine::{EndReason, MatchResult, RulesEngine, TurnReport};
use crate::board::{Cell, Pos};
use crate::cards::{CardCatalog, PlacedCard};
use crate::combat;
use crate::core::{
    Color, EngineError, IllegalMove, MatchConfig, MatchState, Placement, PlacementRecord,
};

/// Rules for one match: configuration plus the card catalog.
#[derive(Clone, Debug)]
pub struct TriadRules {
    config: MatchConfig,
    catalog: CardCatalog,
}

impl TriadRules {
    /// Create rules from a configuration and catalog.
    #[must_use]
    pub fn new(config: MatchConfig, catalog: CardCatalog) -> Self {
        Self { config, catalog }
    }

    /// Steps 2 to 6 of a turn, on a state that will be discarded if any
    /// of them fails.
    fn play(
        &self,
        state: &mut MatchState,
        color: Color,
        placement: Placement,
        automatic: bool,
    ) -> Result<TurnReport, EngineError> {
        let card = self.catalog.require(placement.card_id)?;

        let side = &mut state.sides[color];
        let before = side.remaining_deck.len();
        side.remove_card(placement.card_id);
        if side.remaining_deck.len() >= before {
            return Err(EngineError::invariant(format!(
                "{} did not leave {color}'s deck",
                placement.card_id
            )));
        }
        side.score += 1;
        state
            .board
            .place(placement.pos, PlacedCard::new(placement.card_id, color));

        let outcome = combat::resolve(&state.board, &self.catalog, placement.pos, placement.range)?;
        combat::apply(&mut state.board, &mut state.sides, &outcome)?;

        let buffed = if card.area_ability.is_some() {
            combat::apply_area_buff(&mut state.board, &self.catalog, placement.pos, &self.config)?
        } else {
            Default::default()
        };

        combat::decay(&mut state.board);

        let turn = state.turn_number;
        state.turn_number += 1;
        state.history.push_back(PlacementRecord {
            color,
            placement,
            turn,
            captures: outcome.capture_count(),
            automatic,
        });

        let scores = state.scores();
        debug!(
            turn,
            %color,
            card = %placement.card_id,
            pos = %placement.pos,
            captures = outcome.capture_count(),
            red = scores[Color::Red],
            blue = scores[Color::Blue],
            "placement"
        );

        Ok(TurnReport {
            color,
            placement,
            turn,
            captured: outcome.captured,
            attacked: outcome.attacked,
            buffed,
            scores,
        })
    }
}

impl RulesEngine for TriadRules {
    fn config(&self) -> &MatchConfig {
        &self.config
    }

    fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    fn validate(
        &self,
        state: &MatchState,
        color: Color,
        placement: &Placement,
    ) -> Result<(), IllegalMove> {
        let Pos { row, col } = placement.pos;
        if !placement.pos.in_bounds() {
            return Err(IllegalMove::OutOfBounds { row, col });
        }
        match state.board.get(placement.pos) {
            Cell::Empty => {}
            Cell::Void => return Err(IllegalMove::CellVoid(placement.pos)),
            Cell::Occupied(_) => return Err(IllegalMove::CellOccupied(placement.pos)),
        }
        if !state.side(color).has_card(placement.card_id) {
            return Err(IllegalMove::CardNotInDeck(placement.card_id));
        }
        Ok(())
    }

    fn execute(
        &self,
        state: &mut MatchState,
        color: Color,
        placement: Placement,
        automatic: bool,
    ) -> Result<TurnReport, EngineError> {
        self.validate(state, color, &placement)?;

        let mut next = state.clone();
        let report = self.play(&mut next, color, placement, automatic)?;
        *state = next;
        Ok(report)
    }

    fn match_result(&self, state: &MatchState) -> Option<MatchResult> {
        if state.score_total() >= self.config.contestable_cells() || state.board.is_full() {
            Some(MatchResult::by_score(state.scores(), EndReason::BoardFilled))
        } else {
            None
        }
    }

    fn forfeit(&self, state: &mut MatchState, stalling: Color) -> Result<MatchResult, EngineError> {
        let total = state.score_total();
        let contestable = self.config.contestable_cells();
        let awarded = contestable.checked_sub(total).ok_or_else(|| {
            EngineError::invariant(format!("score total {total} exceeds {contestable} cells"))
        })?;

        state.sides[stalling.opponent()].score += awarded;

        info!(%stalling, awarded, "match forfeited");
        Ok(MatchResult::forfeited(state.scores(), stalling))
    }
}
