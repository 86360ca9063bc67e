//! Live session tests.
//!
//! Sessions run on a `ManualClock` so timer behavior is driven by the test.

mod common;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use common::{fixed_match, match_missing_blue_cards, mixed_deck};
use rust_triad::board::Pos;
use rust_triad::cards::CardId;
use rust_triad::core::{Color, EngineError, IllegalMove, Placement};
use rust_triad::rules::{EndReason, MatchBuilder, RulesEngine};
use rust_triad::search::{legal_moves, MoveStrategy};
use rust_triad::session::{
    MatchId, MatchKind, MatchSession, MatchStore, Observed, RecordingObserver, TimeoutDriver,
};
use rust_triad::timer::{Clock, ManualClock, TimeoutOutcome};

const MINUTE: Duration = Duration::from_secs(60);

struct Harness {
    clock: Arc<ManualClock>,
    observer: Arc<RecordingObserver>,
    session: MatchSession,
}

fn versus(first: Color) -> Harness {
    let (rules, state) = fixed_match(first, 3, 3);
    let clock = Arc::new(ManualClock::new());
    let observer = Arc::new(RecordingObserver::new());
    let session = MatchSession::start(
        MatchId(1),
        MatchKind::Versus,
        rules,
        state,
        clock.clone(),
        observer.clone(),
    )
    .unwrap();
    Harness {
        clock,
        observer,
        session,
    }
}

fn illegal(err: EngineError) -> IllegalMove {
    match err {
        EngineError::IllegalMove(m) => m,
        other => panic!("expected illegal move, got {other}"),
    }
}

/// Placements out of turn are rejected without touching the match.
#[test]
fn test_out_of_turn_rejected() {
    let h = versus(Color::Red);
    let before = h.session.snapshot().unwrap().to_bytes().unwrap();

    let err = h
        .session
        .submit(Color::Blue, Placement::new(CardId::new(101), Pos::new(1, 1)))
        .unwrap_err();

    assert_eq!(illegal(err), IllegalMove::OutOfTurn(Color::Blue));
    assert_eq!(h.session.snapshot().unwrap().to_bytes().unwrap(), before);
    assert!(h.observer.is_empty());
}

/// The first placement is untimed; every later turn is timed.
#[test]
fn test_timer_armed_after_each_placement() {
    let h = versus(Color::Red);
    assert!(h.session.armed_timer().unwrap().is_none());

    h.clock.advance(Duration::from_secs(5));
    h.session
        .submit(Color::Red, Placement::new(CardId::new(1), Pos::new(1, 1)))
        .unwrap();

    let armed = h.session.armed_timer().unwrap().unwrap();
    assert_eq!(armed.stalling, Color::Blue);
    assert_eq!(armed.deadline, Duration::from_secs(5) + MINUTE);

    let placements = h.observer.placements();
    assert_eq!(placements.len(), 1);
    assert_eq!(placements[0].color, Color::Red);
    assert!(!placements[0].automatic);

    let state = h.session.snapshot().unwrap();
    assert_eq!(state.side(Color::Red).turn_times, vec![5]);
}

/// A stalled turn is auto-played once the deadline passes.
#[test]
fn test_poll_timeout_auto_plays() {
    let h = versus(Color::Red);
    h.session
        .submit(Color::Red, Placement::new(CardId::new(1), Pos::new(1, 1)))
        .unwrap();

    h.clock.advance(MINUTE - Duration::from_secs(1));
    assert!(h.session.poll_timeout().unwrap().is_none());

    h.clock.advance(Duration::from_secs(1));
    let outcome = h.session.poll_timeout().unwrap().unwrap();

    assert!(matches!(outcome, TimeoutOutcome::AutoPlayed { stalling: Color::Blue, timeouts: 1, .. }));
    assert_eq!(h.session.active_color().unwrap(), Color::Red);
    assert_eq!(h.session.armed_timer().unwrap().unwrap().stalling, Color::Red);

    let placements = h.observer.placements();
    assert_eq!(placements.len(), 2);
    assert!(placements[1].automatic);

    let state = h.session.snapshot().unwrap();
    assert_eq!(state.side(Color::Blue).turn_times, vec![60]);
}

/// A placement that beats the timer makes the old token stale.
#[test]
fn test_placement_cancels_timer() {
    let h = versus(Color::Red);
    h.session
        .submit(Color::Red, Placement::new(CardId::new(1), Pos::new(1, 1)))
        .unwrap();
    let token = h.session.armed_timer().unwrap().unwrap().token;

    h.session
        .submit(Color::Blue, Placement::new(CardId::new(101), Pos::new(2, 2)))
        .unwrap();

    assert_eq!(h.session.fire_timer(token).unwrap(), TimeoutOutcome::Stale);
    assert_eq!(h.session.snapshot().unwrap().side(Color::Blue).timeouts, 0);
}

/// Three stalls forfeit the match and notify the observer.
#[test]
fn test_three_stalls_forfeit_session() {
    let h = versus(Color::Red);
    let red_cards = [1, 2, 3];
    let cells = [Pos::new(0, 1), Pos::new(0, 3), Pos::new(2, 0)];

    for (card, pos) in red_cards.into_iter().zip(cells) {
        if h.session.is_over().unwrap() {
            break;
        }
        h.session
            .submit(Color::Red, Placement::new(CardId::new(card), pos))
            .unwrap_or_else(|err| panic!("red move {card} at {pos}: {err}"));
        h.clock.advance(MINUTE);
        h.session.poll_timeout().unwrap().unwrap();
    }

    let result = h.session.result().unwrap().unwrap();
    assert_eq!(result.reason, EndReason::Forfeit { stalling: Color::Blue });
    assert_eq!(result.scores[Color::Red] + result.scores[Color::Blue], 14);
    assert_eq!(h.observer.results(), vec![result]);
    assert!(h.session.armed_timer().unwrap().is_none());

    let err = h
        .session
        .submit(Color::Red, Placement::new(CardId::new(4), Pos::new(3, 1)))
        .unwrap_err();
    assert_eq!(illegal(err), IllegalMove::MatchOver);
}

/// Disconnecting ends the match without a winner.
#[test]
fn test_disconnect() {
    let h = versus(Color::Blue);
    h.session
        .submit(Color::Blue, Placement::new(CardId::new(101), Pos::new(1, 1)))
        .unwrap();

    let result = h.session.disconnect(Color::Red).unwrap();

    assert_eq!(result.winner, None);
    assert_eq!(result.reason, EndReason::Disconnected(Color::Red));
    assert!(h.session.armed_timer().unwrap().is_none());
    assert!(matches!(h.observer.take_events().last(), Some(Observed::MatchOver(MatchId(1), _))));
    assert!(h.session.disconnect(Color::Blue).is_err());
}

/// The computer opens when it moves first and answers every placement.
#[test]
fn test_computer_match_plays_to_the_end() {
    let (rules, state) = MatchBuilder::new(mixed_deck(1), mixed_deck(101))
        .first_mover(Color::Blue)
        .build(8)
        .unwrap();
    let catalog = rules.catalog().clone();
    let clock: Arc<dyn Clock> = Arc::new(ManualClock::new());
    let observer = Arc::new(RecordingObserver::new());
    let session = MatchSession::start(
        MatchId(7),
        MatchKind::Computer { computer: Color::Blue },
        rules,
        state,
        clock,
        observer.clone(),
    )
    .unwrap();

    assert_eq!(observer.placements().len(), 1);
    assert_eq!(session.active_color().unwrap(), Color::Red);

    while !session.is_over().unwrap() {
        let state = session.snapshot().unwrap();
        let moves = legal_moves(&catalog, &state, Color::Red).unwrap();
        session.submit(Color::Red, moves[0].placement).unwrap();
        assert!(session.armed_timer().unwrap().is_none());
    }

    let result = session.result().unwrap().unwrap();
    assert_eq!(result.reason, EndReason::BoardFilled);
    assert_eq!(observer.placements().len(), 14);
    assert_eq!(observer.placements().iter().filter(|p| p.automatic).count(), 7);
}

/// The human cannot place for the computer's side.
#[test]
fn test_computer_side_is_not_playable() {
    let (rules, state) = fixed_match(Color::Red, 3, 3);
    let session = MatchSession::start(
        MatchId(2),
        MatchKind::Computer { computer: Color::Red },
        rules,
        state,
        Arc::new(ManualClock::new()),
        Arc::new(RecordingObserver::new()),
    )
    .unwrap();

    // The computer already opened, so red is no longer to move either way.
    let err = session
        .submit(Color::Red, Placement::new(CardId::new(2), Pos::new(2, 2)))
        .unwrap_err();
    assert_eq!(illegal(err), IllegalMove::OutOfTurn(Color::Red));
}

/// An internal fault during a placement aborts the match and leaves the
/// state as it was.
#[test]
fn test_faulted_placement_aborts_match() {
    let (rules, state) = match_missing_blue_cards();
    let before = state.to_bytes().unwrap();
    let observer = Arc::new(RecordingObserver::new());
    let session = MatchSession::start(
        MatchId(3),
        MatchKind::Versus,
        rules,
        state,
        Arc::new(ManualClock::new()),
        observer.clone(),
    )
    .unwrap();

    let err = session
        .submit(Color::Red, Placement::new(CardId::new(1), Pos::new(1, 1)))
        .unwrap_err();
    assert!(err.is_invariant_violation(), "{err}");

    let result = session.result().unwrap().unwrap();
    assert_eq!(result.reason, EndReason::Aborted);
    assert_eq!(result.winner, None);
    assert!(!result.is_draw());
    assert_eq!(observer.results(), vec![result]);
    assert_eq!(session.snapshot().unwrap().to_bytes().unwrap(), before);

    let err = session
        .submit(Color::Red, Placement::new(CardId::new(2), Pos::new(2, 2)))
        .unwrap_err();
    assert_eq!(illegal(err), IllegalMove::MatchOver);
}

/// A failed computer reply does not undo the player's accepted placement.
#[test]
fn test_failed_computer_reply_keeps_player_move() {
    let (rules, state) = match_missing_blue_cards();
    let observer = Arc::new(RecordingObserver::new());
    let session = MatchSession::start(
        MatchId(4),
        MatchKind::Computer { computer: Color::Blue },
        rules,
        state,
        Arc::new(ManualClock::new()),
        observer.clone(),
    )
    .unwrap();

    // (3, 0) has no blue neighbor, so red's own turn resolves cleanly.
    let placement = Placement::new(CardId::new(1), Pos::new(3, 0));
    let report = session.submit(Color::Red, placement).unwrap();
    assert_eq!(report.placement, placement);

    let result = session.result().unwrap().unwrap();
    assert_eq!(result.reason, EndReason::Aborted);
    let state = session.snapshot().unwrap();
    assert_eq!(state.side(Color::Red).score, 1);
    assert!(!state.side(Color::Red).has_card(CardId::new(1)));
    assert_eq!(observer.placements().len(), 1);
}

/// The store hands out ids, drops finished matches and handles disconnects.
#[test]
fn test_store_lifecycle() {
    let store = MatchStore::new();
    let clock = Arc::new(ManualClock::new());
    let observer = Arc::new(RecordingObserver::new());

    let (rules_a, state_a) = fixed_match(Color::Red, 3, 3);
    let (rules_b, state_b) = fixed_match(Color::Red, 3, 3);
    let a = store
        .create(MatchKind::Versus, rules_a, state_a, clock.clone(), observer.clone())
        .unwrap();
    let b = store
        .create(MatchKind::Versus, rules_b, state_b, clock.clone(), observer.clone())
        .unwrap();
    assert_ne!(a.id(), b.id());
    assert_eq!(store.len(), 2);

    let result = store.disconnect(b.id(), Color::Blue).unwrap().unwrap();
    assert_eq!(result.reason, EndReason::Disconnected(Color::Blue));
    assert!(store.get(b.id()).is_none());
    assert!(store.disconnect(b.id(), Color::Red).is_none());

    // After one real move both sides only stall; blue reaches the limit first.
    a.submit(Color::Red, Placement::new(CardId::new(1), Pos::new(1, 1))).unwrap();
    for _ in 0..6 {
        clock.advance(MINUTE);
        store.poll_timeouts();
    }

    assert!(store.get(a.id()).is_none());
    assert!(store.is_empty());
    let a_result = a.result().unwrap().unwrap();
    assert!(matches!(a_result.reason, EndReason::Forfeit { .. }));
}

/// The driver thread fires due timers on its own.
#[test]
fn test_driver_fires_timers() {
    let store = Arc::new(MatchStore::new());
    let clock = Arc::new(ManualClock::new());
    let (rules, state) = fixed_match(Color::Red, 3, 3);
    let session = store
        .create(MatchKind::Versus, rules, state, clock.clone(), Arc::new(RecordingObserver::new()))
        .unwrap();
    session
        .submit(Color::Red, Placement::new(CardId::new(1), Pos::new(1, 1)))
        .unwrap();
    clock.advance(MINUTE);

    let driver = TimeoutDriver::spawn(Arc::clone(&store), Duration::from_millis(1)).unwrap();
    let started = Instant::now();
    while session.snapshot().unwrap().side(Color::Blue).timeouts == 0 {
        assert!(started.elapsed() < Duration::from_secs(5), "driver never fired");
        thread::sleep(Duration::from_millis(2));
    }
    driver.shutdown();

    let state = session.snapshot().unwrap();
    assert_eq!(state.turn_number, 2);
    assert_eq!(state.active_color(), Color::Red);
}

/// Timeout strategy comes from the match configuration.
#[test]
fn test_default_timeout_strategy_is_worst() {
    let (rules, _) = fixed_match(Color::Red, 3, 3);
    assert_eq!(rules.config().timeout_strategy, MoveStrategy::Worst);
}
