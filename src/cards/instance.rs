//! Placed cards - board-resident card state.
//!
//! `PlacedCard` is a card at a specific cell during a match. It tracks the
//! owning color (which changes on capture), active buffs and how many
//! turns it has been on the board.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::CardId;
use crate::core::player::Color;

/// A card on the board.
///
/// Each entry in `turns_buffed` is one active buff holding its remaining
/// turns. The number of entries is added to the card's defending value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedCard {
    /// Reference to the card definition.
    pub card_id: CardId,

    /// Current owner. Flips on capture.
    pub color: Color,

    /// Remaining turns of each active buff.
    #[serde(default)]
    pub turns_buffed: SmallVec<[u8; 4]>,

    /// Turns survived on the board.
    #[serde(default)]
    pub turns_on_board: u32,
}

impl PlacedCard {
    /// Create a freshly placed card with no buffs.
    #[must_use]
    pub fn new(card_id: CardId, color: Color) -> Self {
        Self {
            card_id,
            color,
            turns_buffed: SmallVec::new(),
            turns_on_board: 0,
        }
    }

    /// Number of active buffs.
    #[must_use]
    pub fn buff_count(&self) -> i32 {
        self.turns_buffed.len() as i32
    }

    /// Add a buff lasting `turns` turns.
    pub fn add_buff(&mut self, turns: u8) {
        self.turns_buffed.push(turns);
    }

    /// Advance one turn: count down every buff and drop the ones that
    /// reached zero.
    pub fn tick(&mut self) {
        for remaining in self.turns_buffed.iter_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        self.turns_buffed.retain(|remaining| *remaining > 0);
        self.turns_on_board += 1;
    }
}
