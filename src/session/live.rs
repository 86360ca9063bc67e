//! A single live match.
//!
//! Every input to a match (player placements, timer expiry, disconnects)
//! runs under one mutex, so a placement and a timer expiry can never
//! interleave. A placement cancels the armed timer before releasing the
//! lock; an expiry that was already waiting then finds its token stale.
//!
//! ## Match kinds
//!
//! - `Versus`: two players. After each placement the timer is armed for
//!   the side to move. The first placement of the match is not timed.
//! - `Computer`: one player against the computer. The computer replies
//!   immediately within the same call and nothing is timed.
//!
//! Any error other than an `IllegalMove` ends the match with
//! `EndReason::Aborted`. A turn that failed is not applied to the state.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::events::{MatchId, MatchObserver, PlacementEvent};
use crate::core::{Color, EngineError, IllegalMove, MatchState, Placement};
use crate::rules::{EndReason, MatchResult, RulesEngine, TriadRules, TurnReport};
use crate::search::choose_move;
use crate::timer::{ArmedTimer, Clock, TimeoutOutcome, TimeoutSupervisor, TimerToken};

/// Who plays the two sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    /// Two players with turn timers.
    Versus,
    /// A player against the computer, which plays `computer`.
    Computer { computer: Color },
}

impl MatchKind {
    /// The computer-controlled side, if any.
    #[must_use]
    pub fn computer(self) -> Option<Color> {
        match self {
            MatchKind::Versus => None,
            MatchKind::Computer { computer } => Some(computer),
        }
    }
}

struct SessionInner {
    state: MatchState,
    rules: TriadRules,
    supervisor: TimeoutSupervisor,
    result: Option<MatchResult>,
    last_turn_at: Duration,
}

/// A live match: state, rules and timer behind one lock.
pub struct MatchSession {
    id: MatchId,
    kind: MatchKind,
    inner: Mutex<SessionInner>,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn MatchObserver>,
}

impl std::fmt::Debug for MatchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchSession")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl MatchSession {
    /// Start a match.
    ///
    /// In a computer match where the computer moves first, its opening
    /// placement is played before this returns.
    pub fn start(
        id: MatchId,
        kind: MatchKind,
        rules: TriadRules,
        state: MatchState,
        clock: Arc<dyn Clock>,
        observer: Arc<dyn MatchObserver>,
    ) -> Result<Self, EngineError> {
        let supervisor = TimeoutSupervisor::from_config(rules.config());
        let session = Self {
            id,
            kind,
            inner: Mutex::new(SessionInner {
                state,
                rules,
                supervisor,
                result: None,
                last_turn_at: clock.now(),
            }),
            clock,
            observer,
        };

        {
            let mut inner = session.lock()?;
            info!(
                match_id = %id,
                ?kind,
                first = %inner.state.first_mover(),
                "match started"
            );
            session.computer_reply(&mut inner)?;
        }

        Ok(session)
    }

    #[must_use]
    pub fn id(&self) -> MatchId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> MatchKind {
        self.kind
    }

    /// Submit a placement for `color`.
    ///
    /// Rejections (`IllegalMove`) leave the match untouched. In a computer
    /// match the computer's reply is played before this returns; the
    /// returned report covers only the submitted placement. If the reply
    /// fails, the placement still stands and the match is aborted.
    pub fn submit(&self, color: Color, placement: Placement) -> Result<TurnReport, EngineError> {
        let mut guard = self.lock()?;
        let inner = &mut *guard;

        if inner.result.is_some() {
            warn!(match_id = %self.id, %color, "placement after match end");
            return Err(IllegalMove::MatchOver.into());
        }
        if color != inner.state.active_color() || self.kind.computer() == Some(color) {
            warn!(match_id = %self.id, %color, "placement out of turn");
            return Err(IllegalMove::OutOfTurn(color).into());
        }

        let report = match inner.rules.take_turn(&mut inner.state, color, placement) {
            Ok(report) => report,
            Err(err) => {
                if err.is_illegal_move() {
                    warn!(match_id = %self.id, %color, error = %err, "placement rejected");
                } else {
                    self.abort(inner, &err);
                }
                return Err(err);
            }
        };

        inner.supervisor.cancel();
        if let Err(err) = self.after_turn(inner, &report, false) {
            self.abort(inner, &err);
            return Err(err);
        }

        if inner.result.is_none() {
            match self.kind {
                MatchKind::Versus => {
                    let next = inner.state.active_color();
                    inner.supervisor.arm(next, self.clock.now());
                }
                MatchKind::Computer { .. } => {
                    if let Err(err) = self.computer_reply(inner) {
                        self.abort(inner, &err);
                    }
                }
            }
        }

        Ok(report)
    }

    /// Fire the armed timer if its deadline has passed.
    pub fn poll_timeout(&self) -> Result<Option<TimeoutOutcome>, EngineError> {
        let mut guard = self.lock()?;
        let now = self.clock.now();
        let due = guard.supervisor.due(now);
        match due {
            Some(token) => self.expire(&mut guard, token, now).map(Some),
            None => Ok(None),
        }
    }

    /// Fire a specific timer, regardless of its deadline.
    ///
    /// Tokens of cancelled or replaced timers yield `TimeoutOutcome::Stale`.
    pub fn fire_timer(&self, token: TimerToken) -> Result<TimeoutOutcome, EngineError> {
        let mut guard = self.lock()?;
        let now = self.clock.now();
        self.expire(&mut guard, token, now)
    }

    /// End the match because `color` left.
    ///
    /// There is no winner. The other side is notified through the
    /// observer.
    pub fn disconnect(&self, color: Color) -> Result<MatchResult, EngineError> {
        let mut guard = self.lock()?;
        if guard.result.is_some() {
            return Err(IllegalMove::MatchOver.into());
        }

        let result = MatchResult {
            winner: None,
            scores: guard.state.scores(),
            reason: EndReason::Disconnected(color),
        };
        self.finish(&mut guard, result.clone());
        Ok(result)
    }

    /// The result, once the match has ended.
    pub fn result(&self) -> Result<Option<MatchResult>, EngineError> {
        Ok(self.lock()?.result.clone())
    }

    /// True once the match has ended.
    pub fn is_over(&self) -> Result<bool, EngineError> {
        Ok(self.lock()?.result.is_some())
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> Result<MatchState, EngineError> {
        Ok(self.lock()?.state.clone())
    }

    /// The side expected to move next.
    pub fn active_color(&self) -> Result<Color, EngineError> {
        Ok(self.lock()?.state.active_color())
    }

    /// The armed timer, if any.
    pub fn armed_timer(&self) -> Result<Option<ArmedTimer>, EngineError> {
        Ok(self.lock()?.supervisor.armed().copied())
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionInner>, EngineError> {
        self.inner
            .lock()
            .map_err(|_| EngineError::invariant(format!("{} session lock poisoned", self.id)))
    }

    fn expire(
        &self,
        inner: &mut SessionInner,
        token: TimerToken,
        now: Duration,
    ) -> Result<TimeoutOutcome, EngineError> {
        if inner.result.is_some() {
            return Ok(TimeoutOutcome::Stale);
        }

        let outcome = match inner
            .supervisor
            .expire(token, now, &inner.rules, &mut inner.state)
        {
            Ok(outcome) => outcome,
            Err(err) => {
                self.abort(inner, &err);
                return Err(err);
            }
        };

        match &outcome {
            TimeoutOutcome::Stale => {}
            TimeoutOutcome::AutoPlayed { report, .. } => {
                if let Err(err) = self.after_turn(inner, report, true) {
                    self.abort(inner, &err);
                    return Err(err);
                }
            }
            TimeoutOutcome::Forfeited { result, .. } => {
                self.finish(inner, result.clone());
            }
        }
        Ok(outcome)
    }

    /// Play the computer's turns while it is the side to move.
    fn computer_reply(&self, inner: &mut SessionInner) -> Result<(), EngineError> {
        let Some(computer) = self.kind.computer() else {
            return Ok(());
        };

        while inner.result.is_none() && inner.state.active_color() == computer {
            let strategy = inner.rules.config().computer_strategy;
            match choose_move(&inner.rules, &mut inner.state, computer, strategy)? {
                Some(placement) => {
                    let report = inner.rules.execute(&mut inner.state, computer, placement, true)?;
                    self.after_turn(inner, &report, true)?;
                }
                None => {
                    let result = inner.rules.forfeit(&mut inner.state, computer)?;
                    self.finish(inner, result);
                }
            }
        }
        Ok(())
    }

    /// Bookkeeping shared by every executed turn: turn time, notification
    /// and end-of-match detection.
    fn after_turn(
        &self,
        inner: &mut SessionInner,
        report: &TurnReport,
        automatic: bool,
    ) -> Result<(), EngineError> {
        let now = self.clock.now();
        let elapsed = now.saturating_sub(inner.last_turn_at);
        inner.state.sides[report.color].turn_times.push(elapsed.as_secs());
        inner.last_turn_at = now;

        let card = inner.rules.catalog().require(report.placement.card_id)?;
        let event = PlacementEvent {
            card_id: report.placement.card_id,
            color: report.color,
            captured: report.captured_directions(),
            attacked: report.attacked.clone(),
            range: report.placement.range,
            element: card.element,
            automatic,
        };
        self.observer.on_placement(self.id, &event);

        if let Some(result) = inner.rules.match_result(&inner.state) {
            self.finish(inner, result);
        }
        Ok(())
    }

    /// End the match after an internal fault. Rejections are not faults.
    fn abort(&self, inner: &mut SessionInner, err: &EngineError) {
        if err.is_illegal_move() || inner.result.is_some() {
            return;
        }
        error!(match_id = %self.id, error = %err, "match aborted");
        let result = MatchResult {
            winner: None,
            scores: inner.state.scores(),
            reason: EndReason::Aborted,
        };
        self.finish(inner, result);
    }

    fn finish(&self, inner: &mut SessionInner, result: MatchResult) {
        inner.supervisor.cancel();
        info!(
            match_id = %self.id,
            winner = ?result.winner,
            reason = ?result.reason,
            red = result.scores[Color::Red],
            blue = result.scores[Color::Blue],
            "match over"
        );
        self.observer.on_match_over(self.id, &result);
        inner.result = Some(result);
    }
}
