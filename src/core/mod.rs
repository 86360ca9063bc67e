//! Core engine types: sides, state, placements, RNG, configuration, errors.
//!
//! This module contains the building blocks every other module works on.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use player::{Color, ColorMap};
pub use rng::{MatchRng, MatchRngState};
pub use config::MatchConfig;
pub use action::{Placement, PlacementRecord, RangeMode};
pub use state::{MatchState, Side};
pub use error::{EngineError, IllegalMove};
