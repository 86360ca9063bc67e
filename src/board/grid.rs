//! The 4×4 board grid.
//!
//! A cell is empty, void, or holds a `PlacedCard`. Void cells are laid out
//! once at match start and never change afterwards.

use serde::{Deserialize, Serialize};

use super::position::Pos;
use super::BOARD_SIZE;
use crate::cards::PlacedCard;
use crate::core::error::EngineError;
use crate::core::player::Color;
use crate::core::rng::MatchRng;

/// Contents of one board cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    /// Permanently unoccupiable.
    Void,
    Occupied(PlacedCard),
}

impl Cell {
    /// The placed card, if any.
    #[must_use]
    pub fn card(&self) -> Option<&PlacedCard> {
        match self {
            Cell::Occupied(card) => Some(card),
            _ => None,
        }
    }

    /// The placed card, mutably.
    pub fn card_mut(&mut self) -> Option<&mut PlacedCard> {
        match self {
            Cell::Occupied(card) => Some(card),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, Cell::Void)
    }
}

/// The match board.
///
/// Copying the board is a plain array clone, which move search relies on
/// for its scratch simulations.
///
/// ## Example
///
/// ```
/// use rust_triad::board::{Board, Pos};
/// use rust_triad::cards::{CardId, PlacedCard};
/// use rust_triad::core::Color;
///
/// let mut board = Board::new();
/// board.set_void(Pos::new(0, 0));
/// board.place(Pos::new(1, 1), PlacedCard::new(CardId::new(1), Color::Red));
///
/// assert!(board.get(Pos::new(0, 0)).is_void());
/// assert_eq!(board.occupied_count(), 1);
/// assert_eq!(board.empty_cells().count(), 14);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cell. Panics if `pos` is off the board.
    #[must_use]
    pub fn get(&self, pos: Pos) -> &Cell {
        &self.cells[pos.row][pos.col]
    }

    /// Get a cell mutably. Panics if `pos` is off the board.
    pub fn get_mut(&mut self, pos: Pos) -> &mut Cell {
        &mut self.cells[pos.row][pos.col]
    }

    /// The card at `pos`, if the position is on the board and occupied.
    #[must_use]
    pub fn card_at(&self, pos: Pos) -> Option<&PlacedCard> {
        if !pos.in_bounds() {
            return None;
        }
        self.get(pos).card()
    }

    /// The card at `pos`, mutably.
    pub fn card_at_mut(&mut self, pos: Pos) -> Option<&mut PlacedCard> {
        if !pos.in_bounds() {
            return None;
        }
        self.get_mut(pos).card_mut()
    }

    /// Mark a cell void.
    pub fn set_void(&mut self, pos: Pos) {
        *self.get_mut(pos) = Cell::Void;
    }

    /// Put a card on a cell, replacing whatever was there.
    pub fn place(&mut self, pos: Pos, card: PlacedCard) {
        *self.get_mut(pos) = Cell::Occupied(card);
    }

    /// Iterate over every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Pos, &Cell)> {
        Pos::all().map(move |pos| (pos, self.get(pos)))
    }

    /// Iterate over occupied cells, row by row.
    pub fn occupied(&self) -> impl Iterator<Item = (Pos, &PlacedCard)> {
        self.cells()
            .filter_map(|(pos, cell)| cell.card().map(|card| (pos, card)))
    }

    /// Iterate mutably over every placed card.
    pub fn occupied_mut(&mut self) -> impl Iterator<Item = &mut PlacedCard> {
        self.cells
            .iter_mut()
            .flat_map(|row| row.iter_mut())
            .filter_map(Cell::card_mut)
    }

    /// Empty cells, row by row.
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(pos, _)| pos)
    }

    /// Number of cells holding a card.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    /// Number of void cells.
    #[must_use]
    pub fn void_count(&self) -> usize {
        self.cells().filter(|(_, cell)| cell.is_void()).count()
    }

    /// Number of cards owned by `color`.
    #[must_use]
    pub fn count_owned(&self, color: Color) -> usize {
        self.occupied().filter(|(_, card)| card.color == color).count()
    }

    /// True once no empty cell remains.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.empty_cells().next().is_none()
    }

    /// Lay out `count` void cells at uniformly random empty positions.
    ///
    /// A draw that lands on an already void cell is retried.
    pub fn place_voids(&mut self, rng: &mut MatchRng, count: usize) -> Result<Vec<Pos>, EngineError> {
        let available = self.empty_cells().count();
        if count > available {
            return Err(EngineError::InvalidSetup(format!(
                "cannot place {count} void cells on {available} empty cells"
            )));
        }

        let mut placed = Vec::with_capacity(count);
        while placed.len() < count {
            let pos = Pos::new(rng.gen_index(BOARD_SIZE), rng.gen_index(BOARD_SIZE));
            if self.get(pos).is_empty() {
                self.set_void(pos);
                placed.push(pos);
            }
        }
        Ok(placed)
    }
}
