//! Card system: attributes, definitions, placed cards and catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `Card`: Static card data (attack values, element, kind, abilities)
//! - `PlacedCard`: Board-resident state (owner, buffs, turns on board)
//! - `CardCatalog`: Card definition lookup for one match

pub mod attributes;
pub mod definition;
pub mod instance;
pub mod registry;

pub use attributes::{AreaAbility, CardKind, Element, ParseAttributeError, Resistance};
pub use definition::{AttackValues, Card, CardId};
pub use instance::PlacedCard;
pub use registry::CardCatalog;
