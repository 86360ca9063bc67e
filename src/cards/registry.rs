//! Card catalog for definition lookup.
//!
//! The `CardCatalog` holds every card either side brought to the match
//! and is read-only once the match starts.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId};
use crate::core::EngineError;

/// Catalog of card definitions for one match.
///
/// ## Example
///
/// ```
/// use rust_triad::cards::{Card, CardCatalog, CardId, CardKind, Element};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(Card::new(CardId::new(1), "Knight", Element::Earth, CardKind::Melee)).unwrap();
///
/// assert_eq!(catalog.get(CardId::new(1)).unwrap().name, "Knight");
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, Card>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the match catalog from both starting decks.
    pub fn from_decks(red: &[Card], blue: &[Card]) -> Result<Self, EngineError> {
        let mut catalog = Self::new();
        for card in red.iter().chain(blue) {
            catalog.register(card.clone())?;
        }
        Ok(catalog)
    }

    /// Register a card definition.
    ///
    /// Fails if a card with the same ID already exists.
    pub fn register(&mut self, card: Card) -> Result<(), EngineError> {
        if self.cards.contains_key(&card.id) {
            return Err(EngineError::DuplicateCard(card.id));
        }
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Get a card that must be present.
    ///
    /// A missing card means the board or a deck references something the
    /// catalog was never given, which is an invariant violation.
    pub fn require(&self, id: CardId) -> Result<&Card, EngineError> {
        self.cards
            .get(&id)
            .ok_or_else(|| EngineError::invariant(format!("{id} missing from catalog")))
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }
}
