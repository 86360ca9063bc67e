//! Match setup.

use tracing::info;

use super::triad::TriadRules;
use crate::board::{Board, Pos};
use crate::cards::{Card, CardCatalog};
use crate::core::{Color, ColorMap, EngineError, MatchConfig, MatchRng, MatchState, Side};

/// Builder for creating rules and the initial state of a match.
///
/// The first mover and the void cells are drawn from the seeded RNG
/// unless fixed explicitly.
///
/// ## Example
///
/// ```
/// use rust_triad::cards::{AttackValues, Card, CardId, CardKind, Element};
/// use rust_triad::core::Color;
/// use rust_triad::rules::{MatchBuilder, RulesEngine};
///
/// let deck = |base: u32| -> Vec<Card> {
///     (base..base + 7)
///         .map(|id| {
///             Card::new(CardId::new(id), format!("hero {id}"), Element::Fire, CardKind::Melee)
///                 .with_attack(AttackValues::uniform(3))
///         })
///         .collect()
/// };
///
/// let (rules, state) = MatchBuilder::new(deck(1), deck(101))
///     .first_mover(Color::Blue)
///     .build(42)
///     .unwrap();
///
/// assert_eq!(state.active_color(), Color::Blue);
/// assert_eq!(state.board.void_count(), 2);
/// assert!(rules.match_result(&state).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct MatchBuilder {
    decks: ColorMap<Vec<Card>>,
    config: MatchConfig,
    first_mover: Option<Color>,
    voids: Option<Vec<Pos>>,
}

impl MatchBuilder {
    /// Start a match between two starting decks.
    #[must_use]
    pub fn new(red: Vec<Card>, blue: Vec<Card>) -> Self {
        let mut decks = ColorMap::new(|_| Vec::new());
        decks[Color::Red] = red;
        decks[Color::Blue] = blue;
        Self {
            decks,
            config: MatchConfig::default(),
            first_mover: None,
            voids: None,
        }
    }

    /// Use a custom configuration.
    #[must_use]
    pub fn config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Fix the first mover instead of flipping a coin.
    #[must_use]
    pub fn first_mover(mut self, color: Color) -> Self {
        self.first_mover = Some(color);
        self
    }

    /// Fix the void cells instead of placing them randomly.
    ///
    /// Overrides `MatchConfig::void_cells` with the number of cells given.
    #[must_use]
    pub fn voids(mut self, voids: Vec<Pos>) -> Self {
        self.voids = Some(voids);
        self
    }

    /// Build the rules and initial state.
    pub fn build(self, seed: u64) -> Result<(TriadRules, MatchState), EngineError> {
        let Self {
            decks,
            mut config,
            first_mover,
            voids,
        } = self;

        let catalog = CardCatalog::from_decks(&decks[Color::Red], &decks[Color::Blue])?;
        let mut rng = MatchRng::new(seed);

        let red_first = match first_mover {
            Some(color) => color == Color::Red,
            None => rng.coin_flip(),
        };

        let mut board = Board::new();
        match voids {
            Some(voids) => {
                for &pos in &voids {
                    if !pos.in_bounds() {
                        return Err(EngineError::InvalidSetup(format!("void cell {pos} is off the board")));
                    }
                    if board.get(pos).is_void() {
                        return Err(EngineError::InvalidSetup(format!("void cell {pos} listed twice")));
                    }
                    board.set_void(pos);
                }
                config.void_cells = voids.len();
            }
            None => {
                board.place_voids(&mut rng, config.void_cells)?;
            }
        }

        // The first mover places ceil(cells / 2) cards, the other side floor.
        let contestable = config.contestable_cells() as usize;
        for (color, deck) in decks.iter() {
            let goes_first = (color == Color::Red) == red_first;
            let needed = if goes_first {
                contestable.div_ceil(2)
            } else {
                contestable / 2
            };
            if deck.len() < needed {
                return Err(EngineError::InvalidSetup(format!(
                    "{color} deck holds {} cards, needs {needed}",
                    deck.len()
                )));
            }
        }

        let sides = ColorMap::new(|color| {
            Side::new(color, decks[color].iter().map(|card| card.id).collect())
        });
        let state = MatchState::new(board, sides, red_first, rng);

        info!(seed, first = %state.first_mover(), "match created");
        Ok((TriadRules::new(config, catalog), state))
    }
}
