//! # rust-triad
//!
//! A match engine for a Triple-Triad-style card game: two sides take turns
//! placing hero cards on a 4×4 board, and a placed card captures adjacent
//! (or, for ranged and magic cards, distant) opposing cards whose facing
//! value it beats.
//!
//! ## Design Principles
//!
//! 1. **One combat routine**: combat resolution is a pure function over a
//!    board. Move search runs it on scratch copies; live turns apply its
//!    outcome.
//!
//! 2. **Validate before mutating**: an illegal placement never changes the
//!    match.
//!
//! 3. **Explicit timers**: turn timeouts are a state machine with an
//!    injected clock and tokens, so stale timers are harmless and tests
//!    need no real time.
//!
//! ## Architecture
//!
//! - **Deterministic RNG**: first mover, void cells and random moves all
//!   draw from one seeded ChaCha8 stream stored in the state.
//!
//! - **Snapshots**: `MatchState` serializes with serde; `to_bytes` uses
//!   bincode.
//!
//! - **Serialized sessions**: every input to a live match runs under one
//!   lock per match.
//!
//! ## Modules
//!
//! - `core`: Colors, sides, state, placements, RNG, configuration, errors
//! - `cards`: Card attributes, definitions, placed cards, catalog
//! - `board`: The grid, cells, positions and directions
//! - `combat`: Duel resolution, captures, area buffs and decay
//! - `rules`: `RulesEngine` trait, `TriadRules` and `MatchBuilder`
//! - `search`: One-ply move enumeration and selection policies
//! - `timer`: Clocks and the timeout supervisor
//! - `session`: Live sessions, match store, observers and timer driver

pub mod core;
pub mod cards;
pub mod board;
pub mod combat;
pub mod rules;
pub mod search;
pub mod timer;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Color, ColorMap,
    MatchRng, MatchRngState,
    MatchConfig,
    Placement, PlacementRecord, RangeMode,
    MatchState, Side,
    EngineError, IllegalMove,
};

pub use crate::cards::{
    AreaAbility, AttackValues, Card, CardCatalog, CardId, CardKind, Element, PlacedCard,
    Resistance,
};

pub use crate::board::{Board, Cell, Direction, Pos, BOARD_SIZE};

pub use crate::combat::{Capture, CombatOutcome};

pub use crate::rules::{EndReason, MatchBuilder, MatchResult, RulesEngine, TriadRules, TurnReport};

pub use crate::search::{choose_move, MoveOutcome, MovePolicy, MoveStrategy};

pub use crate::timer::{Clock, ManualClock, SystemClock, TimeoutOutcome, TimeoutSupervisor, TimerToken};

pub use crate::session::{
    MatchId, MatchKind, MatchObserver, MatchSession, MatchStore, NullObserver,
    PlacementEvent, RecordingObserver, TimeoutDriver,
};
