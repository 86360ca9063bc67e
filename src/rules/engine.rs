//! Rules engine trait and match outcomes.
//!
//! Implementations define:
//! - Which placements are legal
//! - How a placement modifies state
//! - When and how a match ends
//!
//! The session, the timeout supervisor and move search all drive a match
//! through this trait.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Direction, Pos};
use crate::cards::CardCatalog;
use crate::combat::Capture;
use crate::core::{Color, ColorMap, EngineError, IllegalMove, MatchConfig, MatchState, Placement};

/// Why a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Every contestable cell holds a card.
    BoardFilled,
    /// A side reached the timeout limit (or could not be auto-played).
    Forfeit {
        /// The side that stalled.
        stalling: Color,
    },
    /// A side left the match.
    Disconnected(Color),
    /// An internal fault stopped the match.
    Aborted,
}

/// Result of a completed match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Winning side; `None` for a draw or an abandoned match.
    pub winner: Option<Color>,

    /// Final scores.
    pub scores: ColorMap<u32>,

    /// How the match ended.
    pub reason: EndReason,
}

impl MatchResult {
    /// Build a result where the higher score wins.
    #[must_use]
    pub fn by_score(scores: ColorMap<u32>, reason: EndReason) -> Self {
        let red = scores[Color::Red];
        let blue = scores[Color::Blue];
        let winner = match red.cmp(&blue) {
            std::cmp::Ordering::Greater => Some(Color::Red),
            std::cmp::Ordering::Less => Some(Color::Blue),
            std::cmp::Ordering::Equal => None,
        };
        Self {
            winner,
            scores,
            reason,
        }
    }

    /// Build a forfeit result: the side that did not stall wins whatever
    /// the scores say.
    #[must_use]
    pub fn forfeited(scores: ColorMap<u32>, stalling: Color) -> Self {
        Self {
            winner: Some(stalling.opponent()),
            scores,
            reason: EndReason::Forfeit { stalling },
        }
    }

    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, color: Color) -> bool {
        self.winner == Some(color)
    }

    /// True for a finished match without a winner.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
            && !matches!(self.reason, EndReason::Disconnected(_) | EndReason::Aborted)
    }
}

/// What one successful placement did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// The side that placed.
    pub color: Color,

    /// The placement executed.
    pub placement: Placement,

    /// Turn number of the placement (0-based).
    pub turn: u32,

    /// Captured cards, in combat order.
    pub captured: SmallVec<[Capture; 4]>,

    /// Directions in which an opposing card was compared.
    pub attacked: SmallVec<[Direction; 4]>,

    /// Cells that received an area buff.
    pub buffed: SmallVec<[Pos; 8]>,

    /// Scores after the turn.
    pub scores: ColorMap<u32>,
}

impl TurnReport {
    /// Directions of the captured cards.
    #[must_use]
    pub fn captured_directions(&self) -> SmallVec<[Direction; 4]> {
        self.captured.iter().map(|c| c.direction).collect()
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `validate`: must not mutate; every rejection is an `IllegalMove`
/// - `execute`: must be deterministic given the state and its RNG
/// - `match_result`: `None` while the match continues
pub trait RulesEngine {
    /// Get the match configuration.
    fn config(&self) -> &MatchConfig;

    /// Get the card catalog.
    fn catalog(&self) -> &CardCatalog;

    /// Check a placement for `color` without touching the state.
    ///
    /// Turn ownership is the caller's concern.
    fn validate(
        &self,
        state: &MatchState,
        color: Color,
        placement: &Placement,
    ) -> Result<(), IllegalMove>;

    /// Validate and execute a placement.
    ///
    /// `automatic` marks turns played by the timeout supervisor or the
    /// computer opponent in the history. On any error `state` is left
    /// exactly as it was.
    fn execute(
        &self,
        state: &mut MatchState,
        color: Color,
        placement: Placement,
        automatic: bool,
    ) -> Result<TurnReport, EngineError>;

    /// Check if the match is over.
    fn match_result(&self, state: &MatchState) -> Option<MatchResult>;

    /// End the match because `stalling` ran out of timeouts. The other
    /// side receives the uncontested cells and wins.
    fn forfeit(&self, state: &mut MatchState, stalling: Color) -> Result<MatchResult, EngineError>;

    // === Convenience Methods ===

    /// Execute a placement submitted by a player.
    fn take_turn(
        &self,
        state: &mut MatchState,
        color: Color,
        placement: Placement,
    ) -> Result<TurnReport, EngineError> {
        self.execute(state, color, placement, false)
    }

    /// Check if the match has ended.
    fn is_over(&self, state: &MatchState) -> bool {
        self.match_result(state).is_some()
    }
}
