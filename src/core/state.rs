//! Match state: board, sides and turn progression.
//!
//! ## Side
//!
//! Per-side data: score, remaining and starting deck, cumulative timeouts
//! and recorded turn durations.
//!
//! ## MatchState
//!
//! Everything that changes during a match. The card catalog and the match
//! configuration are fixed for the match and live in the rules engine.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::PlacementRecord;
use super::error::EngineError;
use super::player::{Color, ColorMap};
use super::rng::MatchRng;
use crate::board::Board;
use crate::cards::CardId;

/// One competing side of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Side {
    /// Owning color.
    pub color: Color,

    /// Cells currently owned (plus any forfeiture award).
    pub score: u32,

    /// Cards not yet placed, in starting-deck order.
    pub remaining_deck: Vec<CardId>,

    /// Starting deck, fixed for the match.
    pub full_deck: Vec<CardId>,

    /// Cumulative turn timeouts. Never reset during a match.
    pub timeouts: u32,

    /// Seconds taken by each completed turn of this side.
    pub turn_times: Vec<u64>,
}

impl Side {
    /// Create a side holding the given starting deck.
    #[must_use]
    pub fn new(color: Color, deck: Vec<CardId>) -> Self {
        Self {
            color,
            score: 0,
            remaining_deck: deck.clone(),
            full_deck: deck,
            timeouts: 0,
            turn_times: Vec::new(),
        }
    }

    /// Check whether a card is still available to this side.
    #[must_use]
    pub fn has_card(&self, card_id: CardId) -> bool {
        self.remaining_deck.contains(&card_id)
    }

    /// Remove a card from the remaining deck.
    ///
    /// Returns true if the card was found and removed.
    pub fn remove_card(&mut self, card_id: CardId) -> bool {
        if let Some(pos) = self.remaining_deck.iter().position(|&c| c == card_id) {
            self.remaining_deck.remove(pos);
            true
        } else {
            false
        }
    }
}

/// Mutable state of one match.
///
/// Cloning is cheap: the board is a fixed array and the history is an
/// `im::Vector`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchState {
    /// The 4×4 board.
    pub board: Board,

    /// Both sides.
    pub sides: ColorMap<Side>,

    /// Successful placements so far, by either side.
    pub turn_number: u32,

    /// Coin flip made at creation: red places first.
    pub red_first: bool,

    /// Deterministic RNG.
    pub rng: MatchRng,

    /// Placement history.
    pub history: Vector<PlacementRecord>,
}

impl MatchState {
    /// Create a state from an initialized board and both sides.
    #[must_use]
    pub fn new(board: Board, sides: ColorMap<Side>, red_first: bool, rng: MatchRng) -> Self {
        Self {
            board,
            sides,
            turn_number: 0,
            red_first,
            rng,
            history: Vector::new(),
        }
    }

    /// The side that places on even turn numbers.
    #[must_use]
    pub fn first_mover(&self) -> Color {
        if self.red_first {
            Color::Red
        } else {
            Color::Blue
        }
    }

    /// The side whose placement is expected next.
    #[must_use]
    pub fn active_color(&self) -> Color {
        if self.turn_number % 2 == 0 {
            self.first_mover()
        } else {
            self.first_mover().opponent()
        }
    }

    /// Get a side.
    #[must_use]
    pub fn side(&self, color: Color) -> &Side {
        &self.sides[color]
    }

    /// Both scores.
    #[must_use]
    pub fn scores(&self) -> ColorMap<u32> {
        ColorMap::new(|c| self.sides[c].score)
    }

    /// Sum of both scores.
    #[must_use]
    pub fn score_total(&self) -> u32 {
        self.sides.iter().map(|(_, side)| side.score).sum()
    }

    /// Encode the state as a compact binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a snapshot produced by [`MatchState::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
