//! Shared fixtures for integration tests.

#![allow(dead_code)]

use rust_triad::board::Pos;
use rust_triad::cards::{AttackValues, Card, CardCatalog, CardId, CardKind, Element};
use rust_triad::core::{Color, MatchConfig, MatchState, Placement};
use rust_triad::rules::{MatchBuilder, RulesEngine, TriadRules};

/// Card with explicit top/right/bottom/left values.
pub fn card(id: u32, element: Element, kind: CardKind, attack: [u8; 4]) -> Card {
    let [top, right, bottom, left] = attack;
    Card::new(CardId::new(id), format!("hero {id}"), element, kind)
        .with_attack(AttackValues::new(top, right, bottom, left))
}

/// Seven identical earth melee cards with ids `base..base + 7`.
pub fn plain_deck(base: u32, value: u8) -> Vec<Card> {
    (base..base + 7)
        .map(|id| card(id, Element::Earth, CardKind::Melee, [value; 4]))
        .collect()
}

/// Mixed deck covering every kind and a few elements.
pub fn mixed_deck(base: u32) -> Vec<Card> {
    let elements = [
        Element::Fire,
        Element::Ice,
        Element::Wind,
        Element::Earth,
        Element::Lightning,
        Element::Water,
        Element::Dark,
    ];
    let kinds = [CardKind::Melee, CardKind::Ranged, CardKind::Magic];
    (0..7u32)
        .map(|i| {
            let v = (i as u8 * 3) % 9 + 1;
            card(
                base + i,
                elements[i as usize],
                kinds[i as usize % 3],
                [v, 9 - v, (v + 4) % 9 + 1, (v + 2) % 9],
            )
        })
        .collect()
}

/// Versus match between two plain decks with voids at (0,0) and (3,3).
pub fn fixed_match(first: Color, red_value: u8, blue_value: u8) -> (TriadRules, MatchState) {
    fixed_match_with(first, plain_deck(1, red_value), plain_deck(101, blue_value), MatchConfig::default())
}

pub fn fixed_match_with(
    first: Color,
    red: Vec<Card>,
    blue: Vec<Card>,
    config: MatchConfig,
) -> (TriadRules, MatchState) {
    MatchBuilder::new(red, blue)
        .config(config)
        .first_mover(first)
        .voids(vec![Pos::new(0, 0), Pos::new(3, 3)])
        .build(7)
        .unwrap()
}

/// Occupied cell count of a state.
pub fn occupied(state: &MatchState) -> u32 {
    state.board.occupied_count() as u32
}

/// Blue has played card 101 at (1, 2) and red is to move, but the returned
/// rules only know red's cards. Red placing next to (1, 2) hits the
/// missing card during combat.
pub fn match_missing_blue_cards() -> (TriadRules, MatchState) {
    let (rules, mut state) = fixed_match(Color::Blue, 3, 3);
    rules
        .take_turn(&mut state, Color::Blue, Placement::new(CardId::new(101), Pos::new(1, 2)))
        .unwrap();

    let catalog = CardCatalog::from_decks(&plain_deck(1, 3), &[]).unwrap();
    (TriadRules::new(rules.config().clone(), catalog), state)
}
