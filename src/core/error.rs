//! Engine error taxonomy.
//!
//! - `IllegalMove`: a rejected request. Nothing was mutated and the caller
//!   decides how to surface it.
//! - `EngineError::InvariantViolation`: a logic fault. The current turn is
//!   abandoned; the session should log it and may terminate the match.
//!
//! "No legal move" is not an error: move search returns `None`.

use thiserror::Error;

use super::player::Color;
use crate::board::Pos;
use crate::cards::CardId;

/// A placement request that the rules refuse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IllegalMove {
    /// The side tried to act while it is the other side's turn.
    #[error("it is not {0}'s turn")]
    OutOfTurn(Color),

    /// The target cell lies outside the board.
    #[error("cell ({row}, {col}) is off the board")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The target cell already holds a card.
    #[error("cell {0} is occupied")]
    CellOccupied(Pos),

    /// The target cell is void.
    #[error("cell {0} is void")]
    CellVoid(Pos),

    /// The card is not in the acting side's remaining deck.
    #[error("{0} is not in the remaining deck")]
    CardNotInDeck(CardId),

    /// The match has already ended.
    #[error("the match is over")]
    MatchOver,
}

/// Errors raised by the match engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Recoverable validation failure.
    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),

    /// Internal consistency fault; abort the current operation.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The same card id appears twice in the match catalog.
    #[error("{0} is registered twice")]
    DuplicateCard(CardId),

    /// The match cannot be created from the supplied setup.
    #[error("invalid match setup: {0}")]
    InvalidSetup(String),

    /// Snapshot encoding or decoding failed.
    #[error("snapshot codec: {0}")]
    Codec(#[from] bincode::Error),
}

impl EngineError {
    /// Shorthand for an invariant violation.
    pub fn invariant(message: impl Into<String>) -> Self {
        EngineError::InvariantViolation(message.into())
    }

    /// True for recoverable validation failures.
    #[must_use]
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, EngineError::IllegalMove(_))
    }

    /// True for internal consistency faults.
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, EngineError::InvariantViolation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_move_converts() {
        let err: EngineError = IllegalMove::OutOfTurn(Color::Blue).into();
        assert!(err.is_illegal_move());
        assert_eq!(err.to_string(), "illegal move: it is not blue's turn");
    }

    #[test]
    fn test_invariant_message() {
        let err = EngineError::invariant("deck did not shrink");
        assert!(!err.is_illegal_move());
        assert!(err.is_invariant_violation());
        assert_eq!(err.to_string(), "invariant violated: deck did not shrink");
    }
}
