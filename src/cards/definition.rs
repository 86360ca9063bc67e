//! Card definitions - static card data.
//!
//! `Card` holds the immutable stats of a hero card: its four directional
//! attack values, element, attack kind and special abilities. These never
//! change during a match.
//!
//! Board-resident state (owner, buffs, turns on board) is stored
//! separately in `PlacedCard`.

use serde::{Deserialize, Serialize};

use super::attributes::{AreaAbility, CardKind, Element, Resistance};
use crate::board::Direction;

/// Unique identifier for a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Attack values on the four sides of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackValues {
    pub top: u8,
    pub right: u8,
    pub bottom: u8,
    pub left: u8,
}

impl AttackValues {
    /// Create from top, right, bottom, left.
    #[must_use]
    pub const fn new(top: u8, right: u8, bottom: u8, left: u8) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same value on every side.
    #[must_use]
    pub const fn uniform(value: u8) -> Self {
        Self::new(value, value, value, value)
    }

    /// Attack value on the side facing `direction`.
    #[must_use]
    pub const fn facing(&self, direction: Direction) -> u8 {
        match direction {
            Direction::Top => self.top,
            Direction::Right => self.right,
            Direction::Bottom => self.bottom,
            Direction::Left => self.left,
        }
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use rust_triad::board::Direction;
/// use rust_triad::cards::{AttackValues, Card, CardId, CardKind, Element, Resistance};
///
/// let knight = Card::new(CardId::new(1), "Knight", Element::Earth, CardKind::Melee)
///     .with_attack(AttackValues::new(5, 3, 2, 4))
///     .with_resistance(Resistance::Sturdy);
///
/// assert_eq!(knight.attack.facing(Direction::Top), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier for this card.
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    /// Directional attack values.
    pub attack: AttackValues,

    /// Element used by the strength cycle.
    pub element: Element,

    /// Attack kind.
    pub kind: CardKind,

    /// Resistance ability (specialAbility1).
    #[serde(default)]
    pub resistance: Resistance,

    /// Area buff ability (specialAbility2); `None` if the card has none.
    #[serde(default)]
    pub area_ability: Option<AreaAbility>,

    /// Full epic gear set; lengthens area buffs.
    #[serde(default)]
    pub has_epic_set: bool,
}

impl Card {
    /// Create a card with zero attack values and no abilities.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, element: Element, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            attack: AttackValues::default(),
            element,
            kind,
            resistance: Resistance::None,
            area_ability: None,
            has_epic_set: false,
        }
    }

    /// Set attack values (builder pattern).
    #[must_use]
    pub fn with_attack(mut self, attack: AttackValues) -> Self {
        self.attack = attack;
        self
    }

    /// Set the resistance ability (builder pattern).
    #[must_use]
    pub fn with_resistance(mut self, resistance: Resistance) -> Self {
        self.resistance = resistance;
        self
    }

    /// Set the area ability (builder pattern).
    #[must_use]
    pub fn with_area_ability(mut self, ability: AreaAbility) -> Self {
        self.area_ability = Some(ability);
        self
    }

    /// Mark the card as wearing an epic set (builder pattern).
    #[must_use]
    pub fn with_epic_set(mut self) -> Self {
        self.has_epic_set = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_attack_facing() {
        let attack = AttackValues::new(1, 2, 3, 4);
        assert_eq!(attack.facing(Direction::Top), 1);
        assert_eq!(attack.facing(Direction::Right), 2);
        assert_eq!(attack.facing(Direction::Bottom), 3);
        assert_eq!(attack.facing(Direction::Left), 4);
    }

    #[test]
    fn test_card_builder() {
        let card = Card::new(CardId::new(7), "Pyromancer", Element::Fire, CardKind::Magic)
            .with_attack(AttackValues::uniform(4))
            .with_resistance(Resistance::MagicResist)
            .with_area_ability(AreaAbility::Blaze)
            .with_epic_set();

        assert_eq!(card.attack, AttackValues::new(4, 4, 4, 4));
        assert_eq!(card.resistance, Resistance::MagicResist);
        assert_eq!(card.area_ability, Some(AreaAbility::Blaze));
        assert!(card.has_epic_set);
    }

    #[test]
    fn test_card_json_defaults() {
        let json = r#"{
            "id": 3,
            "name": "Scout",
            "attack": {"top": 2, "right": 3, "bottom": 1, "left": 5},
            "element": "wind",
            "kind": "ranged"
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();

        assert_eq!(card.id, CardId::new(3));
        assert_eq!(card.kind, CardKind::Ranged);
        assert_eq!(card.resistance, Resistance::None);
        assert_eq!(card.area_ability, None);
        assert!(!card.has_epic_set);
    }
}
