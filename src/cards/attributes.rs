//! Card attributes: element, attack kind and special abilities.
//!
//! Every attribute parses from and prints to the lowercase strings used by
//! the card metadata service (`"fire"`, `"magic-resist"`, `"blaze"`, ...).
//!
//! ## Elemental cycle
//!
//! `fire > ice > wind > earth > lightning > water > fire`, plus the pair
//! `dark`/`light` where each beats the other.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when an attribute string is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseAttributeError {
    kind: &'static str,
    value: String,
}

impl ParseAttributeError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Generates `as_str`, `Display` and `FromStr` from one name table.
macro_rules! named_attribute {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Metadata name of this value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseAttributeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($ty::$variant),)+
                    other => Err(ParseAttributeError::new($kind, other)),
                }
            }
        }
    };
}

/// Card element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Ice,
    Wind,
    Earth,
    Lightning,
    Water,
    Dark,
    Light,
}

named_attribute!(Element, "element", {
    Fire => "fire",
    Ice => "ice",
    Wind => "wind",
    Earth => "earth",
    Lightning => "lightning",
    Water => "water",
    Dark => "dark",
    Light => "light",
});

impl Element {
    /// All elements.
    pub const ALL: [Element; 8] = [
        Element::Fire,
        Element::Ice,
        Element::Wind,
        Element::Earth,
        Element::Lightning,
        Element::Water,
        Element::Dark,
        Element::Light,
    ];

    /// Check whether this element is stronger than `other`.
    ///
    /// Dark and light beat each other.
    #[must_use]
    pub const fn beats(self, other: Element) -> bool {
        use Element::*;
        matches!(
            (self, other),
            (Fire, Ice)
                | (Ice, Wind)
                | (Wind, Earth)
                | (Earth, Lightning)
                | (Lightning, Water)
                | (Water, Fire)
                | (Dark, Light)
                | (Light, Dark)
        )
    }
}

/// Attack kind of a card. Decides reach and which resistance applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Melee,
    Ranged,
    Magic,
}

named_attribute!(CardKind, "card type", {
    Melee => "melee",
    Ranged => "ranged",
    Magic => "magic",
});

/// First special ability: a resistance against attack kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resistance {
    #[default]
    None,
    /// +1 against melee and ranged opponents.
    Sturdy,
    /// +2 against magic opponents.
    MagicResist,
}

named_attribute!(Resistance, "resistance", {
    None => "none",
    Sturdy => "sturdy",
    MagicResist => "magic-resist",
});

impl Resistance {
    /// Value bonus this resistance grants against an opposing attack kind.
    #[must_use]
    pub const fn bonus_against(self, opposing: CardKind) -> i32 {
        match (self, opposing) {
            (Resistance::Sturdy, CardKind::Melee | CardKind::Ranged) => 1,
            (Resistance::MagicResist, CardKind::Magic) => 2,
            _ => 0,
        }
    }
}

/// Second special ability: an area buff, one per element.
///
/// Granted when all of a hero's gear shares an element; the buff reaches
/// same-colored neighbors of the card's own element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaAbility {
    Earthquake,
    Tornado,
    Blaze,
    Blizzard,
    Thunderstorm,
    Downpour,
    Abyss,
    Aura,
}

named_attribute!(AreaAbility, "area ability", {
    Earthquake => "earthquake",
    Tornado => "tornado",
    Blaze => "blaze",
    Blizzard => "blizzard",
    Thunderstorm => "thunderstorm",
    Downpour => "downpour",
    Abyss => "abyss",
    Aura => "aura",
});

impl AreaAbility {
    /// The element whose gear set grants this ability.
    #[must_use]
    pub const fn element(self) -> Element {
        match self {
            AreaAbility::Earthquake => Element::Earth,
            AreaAbility::Tornado => Element::Wind,
            AreaAbility::Blaze => Element::Fire,
            AreaAbility::Blizzard => Element::Ice,
            AreaAbility::Thunderstorm => Element::Lightning,
            AreaAbility::Downpour => Element::Water,
            AreaAbility::Abyss => Element::Dark,
            AreaAbility::Aura => Element::Light,
        }
    }

    /// Parse the metadata field, where `"none"` means no ability.
    pub fn parse_optional(s: &str) -> Result<Option<Self>, ParseAttributeError> {
        if s == "none" {
            Ok(None)
        } else {
            s.parse().map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_each_beats_next() {
        let cycle = [
            Element::Fire,
            Element::Ice,
            Element::Wind,
            Element::Earth,
            Element::Lightning,
            Element::Water,
        ];
        for (i, &e) in cycle.iter().enumerate() {
            let next = cycle[(i + 1) % cycle.len()];
            assert!(e.beats(next), "{e} should beat {next}");
            assert!(!next.beats(e), "{next} should not beat {e}");
        }
    }

    #[test]
    fn test_dark_light_symmetric() {
        assert!(Element::Dark.beats(Element::Light));
        assert!(Element::Light.beats(Element::Dark));
        assert!(!Element::Dark.beats(Element::Fire));
        assert!(!Element::Fire.beats(Element::Light));
    }

    #[test]
    fn test_no_element_beats_itself() {
        for e in Element::ALL {
            assert!(!e.beats(e));
        }
    }

    #[test]
    fn test_resistance_bonus() {
        assert_eq!(Resistance::Sturdy.bonus_against(CardKind::Melee), 1);
        assert_eq!(Resistance::Sturdy.bonus_against(CardKind::Ranged), 1);
        assert_eq!(Resistance::Sturdy.bonus_against(CardKind::Magic), 0);
        assert_eq!(Resistance::MagicResist.bonus_against(CardKind::Magic), 2);
        assert_eq!(Resistance::MagicResist.bonus_against(CardKind::Melee), 0);
        assert_eq!(Resistance::None.bonus_against(CardKind::Magic), 0);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("lightning".parse::<Element>(), Ok(Element::Lightning));
        assert_eq!("magic-resist".parse::<Resistance>(), Ok(Resistance::MagicResist));
        assert_eq!(CardKind::Ranged.to_string(), "ranged");
        assert_eq!(AreaAbility::parse_optional("none"), Ok(None));
        assert_eq!(AreaAbility::parse_optional("blaze"), Ok(Some(AreaAbility::Blaze)));

        let err = "plasma".parse::<Element>().unwrap_err();
        assert_eq!(err.to_string(), "unknown element `plasma`");
    }

    #[test]
    fn test_ability_elements_are_distinct() {
        let abilities = [
            AreaAbility::Earthquake,
            AreaAbility::Tornado,
            AreaAbility::Blaze,
            AreaAbility::Blizzard,
            AreaAbility::Thunderstorm,
            AreaAbility::Downpour,
            AreaAbility::Abyss,
            AreaAbility::Aura,
        ];
        for e in Element::ALL {
            assert_eq!(abilities.iter().filter(|a| a.element() == e).count(), 1);
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Resistance::MagicResist).unwrap(), "\"magic-resist\"");
        assert_eq!(serde_json::to_string(&AreaAbility::Blaze).unwrap(), "\"blaze\"");
    }
}
