//! Turn timeout supervision.
//!
//! The supervisor holds at most one armed timer. Arming hands out a fresh
//! [`TimerToken`]; only the token of the currently armed timer can expire
//! it, so a timer that was cancelled or replaced is ignored as stale.
//!
//! ## Escalation
//!
//! On expiry the stalling side's cumulative timeout count goes up by one.
//! Below `max_timeouts` the turn is auto-played with the configured
//! strategy and the timer re-armed for the next side. At the limit, or if
//! no legal move exists, the match is forfeited.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::{Color, EngineError, MatchConfig, MatchState};
use crate::rules::{MatchResult, RulesEngine, TurnReport};
use crate::search::{choose_move, MoveStrategy};

/// Identifies one arming of the timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

impl TimerToken {
    /// Get the raw generation number.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// The currently armed timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmedTimer {
    /// Token an expiry must present to act on this timer.
    pub token: TimerToken,
    /// Side expected to move before the deadline.
    pub stalling: Color,
    /// Clock time at which the timer fires.
    pub deadline: Duration,
}

/// What an expiry did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimeoutOutcome {
    /// The token was not the armed one; nothing changed.
    Stale,

    /// The stalling side's turn was played for it.
    AutoPlayed {
        stalling: Color,
        report: TurnReport,
        /// Cumulative timeouts of the stalling side, this one included.
        timeouts: u32,
        /// Set when the auto-played turn ended the match.
        result: Option<MatchResult>,
    },

    /// The stalling side forfeited.
    Forfeited {
        stalling: Color,
        /// Points given to the other side.
        awarded: u32,
        result: MatchResult,
    },
}

/// Timeout state machine for one match.
#[derive(Clone, Debug)]
pub struct TimeoutSupervisor {
    delay: Duration,
    max_timeouts: u32,
    strategy: MoveStrategy,
    armed: Option<ArmedTimer>,
    next_generation: u64,
}

impl TimeoutSupervisor {
    /// Create a supervisor with nothing armed.
    #[must_use]
    pub fn new(delay: Duration, max_timeouts: u32, strategy: MoveStrategy) -> Self {
        Self {
            delay,
            max_timeouts,
            strategy,
            armed: None,
            next_generation: 0,
        }
    }

    /// Create a supervisor from match configuration.
    #[must_use]
    pub fn from_config(config: &MatchConfig) -> Self {
        Self::new(config.turn_timeout, config.max_timeouts, config.timeout_strategy)
    }

    /// The armed timer, if any.
    #[must_use]
    pub fn armed(&self) -> Option<&ArmedTimer> {
        self.armed.as_ref()
    }

    /// Arm the timer for `stalling`, replacing any armed timer.
    pub fn arm(&mut self, stalling: Color, now: Duration) -> TimerToken {
        let token = TimerToken(self.next_generation);
        self.next_generation += 1;
        self.armed = Some(ArmedTimer {
            token,
            stalling,
            deadline: now + self.delay,
        });
        token
    }

    /// Disarm the timer. Returns the timer that was armed.
    pub fn cancel(&mut self) -> Option<ArmedTimer> {
        self.armed.take()
    }

    /// Token of the armed timer if its deadline has passed.
    #[must_use]
    pub fn due(&self, now: Duration) -> Option<TimerToken> {
        self.armed
            .filter(|timer| now >= timer.deadline)
            .map(|timer| timer.token)
    }

    /// Fire the timer identified by `token`.
    ///
    /// The deadline is not checked here; callers decide when a timer is
    /// due (see [`TimeoutSupervisor::due`]). `now` is used to re-arm.
    pub fn expire<R: RulesEngine + ?Sized>(
        &mut self,
        token: TimerToken,
        now: Duration,
        rules: &R,
        state: &mut MatchState,
    ) -> Result<TimeoutOutcome, EngineError> {
        let timer = match self.armed {
            Some(timer) if timer.token == token => timer,
            _ => {
                warn!(generation = token.generation(), "stale timer ignored");
                return Ok(TimeoutOutcome::Stale);
            }
        };
        self.armed = None;

        let stalling = timer.stalling;
        let active = state.active_color();
        if stalling != active {
            return Err(EngineError::invariant(format!(
                "timer armed for {stalling} but {active} is to move"
            )));
        }

        let side = &mut state.sides[stalling];
        side.timeouts += 1;
        let timeouts = side.timeouts;
        info!(%stalling, timeouts, max = self.max_timeouts, "turn timed out");

        if timeouts >= self.max_timeouts {
            return Self::forfeit(rules, state, stalling);
        }

        let Some(placement) = choose_move(rules, state, stalling, self.strategy)? else {
            return Self::forfeit(rules, state, stalling);
        };
        let report = rules.execute(state, stalling, placement, true)?;
        let result = rules.match_result(state);
        if result.is_none() {
            self.arm(state.active_color(), now);
        }

        Ok(TimeoutOutcome::AutoPlayed {
            stalling,
            report,
            timeouts,
            result,
        })
    }

    fn forfeit<R: RulesEngine + ?Sized>(
        rules: &R,
        state: &mut MatchState,
        stalling: Color,
    ) -> Result<TimeoutOutcome, EngineError> {
        let before = state.side(stalling.opponent()).score;
        let result = rules.forfeit(state, stalling)?;
        let awarded = state.side(stalling.opponent()).score - before;
        Ok(TimeoutOutcome::Forfeited {
            stalling,
            awarded,
            result,
        })
    }
}
