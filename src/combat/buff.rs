//! Area buffs and per-turn decay.

use smallvec::SmallVec;
use tracing::debug;

use crate::board::{Board, Pos};
use crate::cards::CardCatalog;
use crate::core::{EngineError, MatchConfig};

/// Apply the area ability of the card at `pos`, if it has one.
///
/// Every surrounding card (orthogonal and diagonal) of the same color and
/// the same element gets one more buff entry. Entries stack. The duration
/// is `epic_buff_turns` for a card with an epic set and `buff_turns`
/// otherwise. Returns the buffed cells.
pub fn apply_area_buff(
    board: &mut Board,
    catalog: &CardCatalog,
    pos: Pos,
    config: &MatchConfig,
) -> Result<SmallVec<[Pos; 8]>, EngineError> {
    let placed = board
        .card_at(pos)
        .ok_or_else(|| EngineError::invariant(format!("no card to buff from at {pos}")))?;
    let color = placed.color;
    let card = catalog.require(placed.card_id)?;

    let mut buffed = SmallVec::new();
    let Some(ability) = card.area_ability else {
        return Ok(buffed);
    };

    for neighbor in pos.surrounding() {
        let Some(target) = board.card_at(neighbor) else {
            continue;
        };
        if target.color == color && catalog.require(target.card_id)?.element == card.element {
            buffed.push(neighbor);
        }
    }

    let duration = config.buff_duration(card.has_epic_set);
    for &neighbor in &buffed {
        if let Some(target) = board.card_at_mut(neighbor) {
            target.add_buff(duration);
        }
    }

    debug!(%pos, %ability, count = buffed.len(), duration, "area buff");
    Ok(buffed)
}

/// Advance every card on the board by one turn.
///
/// Runs once per successful placement, after captures and buffs.
pub fn decay(board: &mut Board) {
    for card in board.occupied_mut() {
        card.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{AreaAbility, Card, CardId, CardKind, Element, PlacedCard};
    use crate::core::Color;

    fn catalog() -> CardCatalog {
        let mut catalog = CardCatalog::new();
        let cards = [
            Card::new(CardId::new(1), "caster", Element::Fire, CardKind::Magic)
                .with_area_ability(AreaAbility::Blaze),
            Card::new(CardId::new(2), "ally", Element::Fire, CardKind::Melee),
            Card::new(CardId::new(3), "other", Element::Water, CardKind::Melee),
            Card::new(CardId::new(4), "epic", Element::Fire, CardKind::Melee)
                .with_area_ability(AreaAbility::Blaze)
                .with_epic_set(),
            Card::new(CardId::new(5), "plain", Element::Fire, CardKind::Melee),
        ];
        for card in cards {
            catalog.register(card).unwrap();
        }
        catalog
    }

    #[test]
    fn test_buff_reaches_diagonal_same_element_allies() {
        let catalog = catalog();
        let mut board = Board::new();
        board.place(Pos::new(0, 0), PlacedCard::new(CardId::new(2), Color::Red));
        board.place(Pos::new(1, 0), PlacedCard::new(CardId::new(3), Color::Red));
        board.place(Pos::new(2, 2), PlacedCard::new(CardId::new(5), Color::Blue));
        board.place(Pos::new(1, 1), PlacedCard::new(CardId::new(1), Color::Red));

        let buffed =
            apply_area_buff(&mut board, &catalog, Pos::new(1, 1), &MatchConfig::default()).unwrap();

        assert_eq!(buffed.as_slice(), &[Pos::new(0, 0)]);
        assert_eq!(board.card_at(Pos::new(0, 0)).unwrap().turns_buffed.as_slice(), &[3]);
        assert_eq!(board.card_at(Pos::new(1, 0)).unwrap().buff_count(), 0);
        assert_eq!(board.card_at(Pos::new(2, 2)).unwrap().buff_count(), 0);
    }

    #[test]
    fn test_epic_set_lasts_longer_and_stacks() {
        let catalog = catalog();
        let mut board = Board::new();
        let mut ally = PlacedCard::new(CardId::new(2), Color::Blue);
        ally.add_buff(1);
        board.place(Pos::new(3, 3), ally);
        board.place(Pos::new(2, 3), PlacedCard::new(CardId::new(4), Color::Blue));

        apply_area_buff(&mut board, &catalog, Pos::new(2, 3), &MatchConfig::default()).unwrap();

        assert_eq!(board.card_at(Pos::new(3, 3)).unwrap().turns_buffed.as_slice(), &[1, 5]);
    }

    #[test]
    fn test_no_ability_no_buff() {
        let catalog = catalog();
        let mut board = Board::new();
        board.place(Pos::new(0, 0), PlacedCard::new(CardId::new(2), Color::Red));
        board.place(Pos::new(0, 1), PlacedCard::new(CardId::new(5), Color::Red));

        let buffed =
            apply_area_buff(&mut board, &catalog, Pos::new(0, 1), &MatchConfig::default()).unwrap();
        assert!(buffed.is_empty());
    }

    #[test]
    fn test_decay_ticks_every_card() {
        let mut board = Board::new();
        let mut card = PlacedCard::new(CardId::new(2), Color::Red);
        card.add_buff(1);
        board.place(Pos::new(0, 0), card);
        board.place(Pos::new(3, 3), PlacedCard::new(CardId::new(3), Color::Blue));

        decay(&mut board);

        let first = board.card_at(Pos::new(0, 0)).unwrap();
        assert_eq!(first.buff_count(), 0);
        assert_eq!(first.turns_on_board, 1);
        assert_eq!(board.card_at(Pos::new(3, 3)).unwrap().turns_on_board, 1);
    }
}
