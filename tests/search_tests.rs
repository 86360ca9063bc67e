//! Move search tests.

mod common;

use common::{card, fixed_match, fixed_match_with, mixed_deck};
use rust_triad::board::Pos;
use rust_triad::cards::{CardId, CardKind, Element};
use rust_triad::core::{Color, MatchConfig, MatchRng, Placement, RangeMode};
use rust_triad::rules::{MatchBuilder, RulesEngine};
use rust_triad::search::{
    choose_move, enumerate_moves, legal_moves, BestMove, MovePolicy, MoveStrategy, WorstMove,
};

/// Every enumerated move is legal for the side.
#[test]
fn test_enumerated_moves_are_legal() {
    let (rules, mut state) = MatchBuilder::new(mixed_deck(1), mixed_deck(101)).build(3).unwrap();
    for _ in 0..5 {
        let color = state.active_color();
        for m in legal_moves(rules.catalog(), &state, color).unwrap() {
            assert!(rules.validate(&state, color, &m.placement).is_ok(), "{:?}", m.placement);
        }
        let placement = choose_move(&rules, &mut state, color, MoveStrategy::Random)
            .unwrap()
            .unwrap();
        rules.take_turn(&mut state, color, placement).unwrap();
    }
}

/// Enumeration never changes the board or the scores.
#[test]
fn test_enumeration_is_pure() {
    let (rules, mut state) = fixed_match(Color::Red, 5, 2);
    rules
        .take_turn(&mut state, Color::Red, Placement::new(CardId::new(1), Pos::new(1, 1)))
        .unwrap();
    let before = state.to_bytes().unwrap();

    let moves = legal_moves(rules.catalog(), &state, Color::Blue).unwrap();

    assert!(!moves.is_empty());
    assert_eq!(state.to_bytes().unwrap(), before);
}

/// Best and worst pick the earliest maximal/minimal entries.
#[test]
fn test_tie_breaking_is_deterministic() {
    let (rules, mut state) = fixed_match(Color::Blue, 1, 5);
    rules
        .take_turn(&mut state, Color::Blue, Placement::new(CardId::new(101), Pos::new(3, 0)))
        .unwrap();
    rules
        .take_turn(&mut state, Color::Red, Placement::new(CardId::new(1), Pos::new(1, 1)))
        .unwrap();

    let moves = legal_moves(rules.catalog(), &state, Color::Blue).unwrap();
    let mut rng = MatchRng::new(0);
    let best = BestMove.select(&moves, &mut rng).unwrap();
    let worst = WorstMove.select(&moves, &mut rng).unwrap();

    // (0, 1) is the first cell, in row order, next to the red card.
    assert_eq!(best.placement, Placement::new(CardId::new(102), Pos::new(0, 1)));
    assert_eq!(best.captures, 1);
    assert_eq!(worst.placement, Placement::new(CardId::new(102), Pos::new(0, 2)));
    assert_eq!(worst.captures, 0);

    let again = BestMove.select(&moves, &mut MatchRng::new(99)).unwrap();
    assert_eq!(again, best);
}

/// Magic cards are tried in ranged mode first.
#[test]
fn test_magic_tries_ranged_first() {
    let mut red = vec![card(1, Element::Fire, CardKind::Magic, [3; 4])];
    red.extend((2..8).map(|id| card(id, Element::Fire, CardKind::Melee, [3; 4])));
    let (rules, state) = fixed_match_with(Color::Red, red, mixed_deck(101), MatchConfig::default());

    let moves = enumerate_moves(rules.catalog(), &state, Color::Red, &[CardId::new(1)]).unwrap();

    assert_eq!(moves.len(), 28);
    assert_eq!(moves[0].placement.range, RangeMode::Ranged);
    assert_eq!(moves[1].placement.range, RangeMode::Adjacent);
    assert_eq!(moves[0].placement.pos, moves[1].placement.pos);
}

/// The opportunistic computer takes a capture when one exists.
#[test]
fn test_opportunistic_takes_capture() {
    let (rules, mut state) = fixed_match(Color::Red, 1, 9);
    rules
        .take_turn(&mut state, Color::Red, Placement::new(CardId::new(1), Pos::new(2, 2)))
        .unwrap();

    let placement = choose_move(&rules, &mut state, Color::Blue, MoveStrategy::Opportunistic)
        .unwrap()
        .unwrap();
    let report = rules.take_turn(&mut state, Color::Blue, placement).unwrap();

    assert_eq!(report.captured.len(), 1);
}

/// A side with an empty deck has no legal move.
#[test]
fn test_no_legal_move_is_none() {
    let (rules, mut state) = fixed_match(Color::Red, 3, 3);
    state.sides[Color::Red].remaining_deck.clear();

    let chosen = choose_move(&rules, &mut state, Color::Red, MoveStrategy::Worst).unwrap();
    assert!(chosen.is_none());
}
