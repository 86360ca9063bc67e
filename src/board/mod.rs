//! Board system: grid, cells, positions and directions.
//!
//! ## Key Types
//!
//! - `Board`: Fixed 4×4 grid of cells
//! - `Cell`: Empty, void, or a placed card
//! - `Pos`: `(row, col)` coordinate
//! - `Direction`: Attack direction, in combat order

pub mod grid;
pub mod position;

pub use grid::{Board, Cell};
pub use position::{Direction, Pos};

/// Side length of the square board.
pub const BOARD_SIZE: usize = 4;
