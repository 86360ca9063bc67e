//! Placement representation.
//!
//! A turn consists of exactly one placement: a card from the acting side's
//! remaining deck, a target cell and, for magic cards, the range mode of
//! its attack.

use serde::{Deserialize, Serialize};

use super::player::Color;
use crate::board::Pos;
use crate::cards::CardId;

/// Whether a magic attack reaches adjacent cells or cells two steps away.
///
/// Ranged cards always attack at distance 2 and melee cards at distance 1;
/// the mode only changes the reach of magic cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeMode {
    /// Compare against distance-1 neighbors.
    #[default]
    Adjacent,
    /// Compare against distance-2 neighbors.
    Ranged,
}

impl RangeMode {
    /// Build from the wire flag `isMagicAttackRanged`.
    #[must_use]
    pub const fn from_ranged_flag(ranged: bool) -> Self {
        if ranged {
            RangeMode::Ranged
        } else {
            RangeMode::Adjacent
        }
    }

    /// True for `Ranged`.
    #[must_use]
    pub const fn is_ranged(self) -> bool {
        matches!(self, RangeMode::Ranged)
    }
}

/// A single card placement.
///
/// ## Example
///
/// ```
/// use rust_triad::board::Pos;
/// use rust_triad::cards::CardId;
/// use rust_triad::core::{Placement, RangeMode};
///
/// let placement = Placement::new(CardId::new(3), Pos::new(1, 2)).ranged();
/// assert_eq!(placement.range, RangeMode::Ranged);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Card to place.
    pub card_id: CardId,

    /// Target cell.
    pub pos: Pos,

    /// Range mode for magic cards.
    pub range: RangeMode,
}

impl Placement {
    /// Create an adjacent-range placement.
    #[must_use]
    pub fn new(card_id: CardId, pos: Pos) -> Self {
        Self {
            card_id,
            pos,
            range: RangeMode::Adjacent,
        }
    }

    /// Switch to the ranged mode (builder pattern).
    #[must_use]
    pub fn ranged(mut self) -> Self {
        self.range = RangeMode::Ranged;
        self
    }

    /// Set an explicit range mode.
    #[must_use]
    pub fn with_range(mut self, range: RangeMode) -> Self {
        self.range = range;
        self
    }
}

/// A recorded placement for match history and replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// The side that placed the card.
    pub color: Color,

    /// The placement taken.
    pub placement: Placement,

    /// Turn number at which the placement was made (0-based).
    pub turn: u32,

    /// Number of cards captured by the placement.
    pub captures: u8,

    /// True when the timeout supervisor or the computer played the turn.
    pub automatic: bool,
}
