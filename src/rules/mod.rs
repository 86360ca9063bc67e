//! Turn state machine.
//!
//! `RulesEngine` defines:
//! - Which placements are legal
//! - How a placement modifies state
//! - When the match ends and who won
//!
//! `TriadRules` is the card-placement implementation and `MatchBuilder`
//! creates it together with the initial `MatchState`.

pub mod builder;
pub mod engine;
pub mod triad;

pub use builder::MatchBuilder;
pub use engine::{EndReason, MatchResult, RulesEngine, TurnReport};
pub use triad::TriadRules;
