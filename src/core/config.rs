//! Match configuration.
//!
//! `MatchConfig` carries the tunable rules of a match: timer delay,
//! timeout escalation, AI strategies and buff durations. The board
//! dimensions are fixed (see `board::BOARD_SIZE`).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::BOARD_SIZE;
use crate::search::MoveStrategy;

/// Match configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Delay before a stalled turn is played automatically (default: 60s).
    pub turn_timeout: Duration,

    /// Cumulative timeouts that forfeit the match (default: 3).
    /// Timeouts below this count are auto-played.
    pub max_timeouts: u32,

    /// Strategy used to auto-play a timed-out turn (default: worst move).
    pub timeout_strategy: MoveStrategy,

    /// Strategy used by the computer opponent (default: opportunistic).
    pub computer_strategy: MoveStrategy,

    /// Buff duration granted by a regular area ability.
    pub buff_turns: u8,

    /// Buff duration granted when the placed card has an epic set.
    pub epic_buff_turns: u8,

    /// Number of void cells placed at match start.
    pub void_cells: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            turn_timeout: Duration::from_secs(60),
            max_timeouts: 3,
            timeout_strategy: MoveStrategy::Worst,
            computer_strategy: MoveStrategy::Opportunistic,
            buff_turns: 3,
            epic_buff_turns: 5,
            void_cells: 2,
        }
    }
}

impl MatchConfig {
    /// Number of cells that can hold a card.
    ///
    /// The match ends when the two scores sum to this value.
    #[must_use]
    pub fn contestable_cells(&self) -> u32 {
        (BOARD_SIZE * BOARD_SIZE - self.void_cells) as u32
    }

    /// Buff duration for a card with or without an epic set.
    #[must_use]
    pub fn buff_duration(&self, has_epic_set: bool) -> u8 {
        if has_epic_set {
            self.epic_buff_turns
        } else {
            self.buff_turns
        }
    }

    /// Set a custom turn timeout.
    #[must_use]
    pub fn with_turn_timeout(mut self, timeout: Duration) -> Self {
        self.turn_timeout = timeout;
        self
    }

    /// Set a custom forfeiture threshold.
    #[must_use]
    pub fn with_max_timeouts(mut self, max: u32) -> Self {
        self.max_timeouts = max;
        self
    }

    /// Set the strategy used for timed-out turns.
    #[must_use]
    pub fn with_timeout_strategy(mut self, strategy: MoveStrategy) -> Self {
        self.timeout_strategy = strategy;
        self
    }

    /// Set the strategy used by the computer opponent.
    #[must_use]
    pub fn with_computer_strategy(mut self, strategy: MoveStrategy) -> Self {
        self.computer_strategy = strategy;
        self
    }
}
