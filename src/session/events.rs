//! Match notifications.
//!
//! A `MatchObserver` is the outbound edge of a session: the transport
//! layer implements it to push placements and results to both players.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Direction;
use crate::cards::{CardId, Element};
use crate::core::{Color, RangeMode};
use crate::rules::MatchResult;

/// Identifies a match within a `MatchStore`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(pub u64);

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Match({})", self.0)
    }
}

/// A placement as broadcast to both players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementEvent {
    /// The card placed.
    pub card_id: CardId,
    /// The side that placed it.
    pub color: Color,
    /// Directions of captured cards.
    pub captured: SmallVec<[Direction; 4]>,
    /// Directions in which an opposing card was compared.
    pub attacked: SmallVec<[Direction; 4]>,
    /// Range mode the card attacked with.
    pub range: RangeMode,
    /// Element of the placed card.
    pub element: Element,
    /// Played by the timeout supervisor or the computer.
    pub automatic: bool,
}

/// Receiver of match notifications.
pub trait MatchObserver: Send + Sync {
    /// A card was placed.
    fn on_placement(&self, match_id: MatchId, event: &PlacementEvent);

    /// The match ended.
    fn on_match_over(&self, match_id: MatchId, result: &MatchResult);
}

/// Observer that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl MatchObserver for NullObserver {
    fn on_placement(&self, _match_id: MatchId, _event: &PlacementEvent) {}

    fn on_match_over(&self, _match_id: MatchId, _result: &MatchResult) {}
}

/// A notification captured by `RecordingObserver`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Observed {
    Placement(MatchId, PlacementEvent),
    MatchOver(MatchId, MatchResult),
}

/// Observer that records every notification in order.
///
/// ```
/// use rust_triad::session::{MatchObserver, RecordingObserver};
///
/// let observer = RecordingObserver::new();
/// assert!(observer.is_empty());
/// let events = observer.take_events();
/// assert!(events.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct RecordingObserver {
    log: Mutex<Vec<Observed>>,
}

impl RecordingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain and return all recorded notifications.
    pub fn take_events(&self) -> Vec<Observed> {
        let mut log = self.log.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *log)
    }

    /// Recorded placements, without draining.
    #[must_use]
    pub fn placements(&self) -> Vec<PlacementEvent> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter_map(|observed| match observed {
                Observed::Placement(_, event) => Some(event.clone()),
                Observed::MatchOver(..) => None,
            })
            .collect()
    }

    /// Recorded results, without draining.
    #[must_use]
    pub fn results(&self) -> Vec<MatchResult> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter_map(|observed| match observed {
                Observed::MatchOver(_, result) => Some(result.clone()),
                Observed::Placement(..) => None,
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record(&self, observed: Observed) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(observed);
    }
}

impl MatchObserver for RecordingObserver {
    fn on_placement(&self, match_id: MatchId, event: &PlacementEvent) {
        self.record(Observed::Placement(match_id, event.clone()));
    }

    fn on_match_over(&self, match_id: MatchId, result: &MatchResult) {
        self.record(Observed::MatchOver(match_id, result.clone()));
    }
}
