//! Combat: duel resolution, capture application, area buffs and decay.
//!
//! Resolution is pure over the board it is given; only [`apply`],
//! [`apply_area_buff`] and [`decay`] mutate.

pub mod buff;
pub mod resolver;

pub use buff::{apply_area_buff, decay};
pub use resolver::{apply, duel_values, reach, resolve, Capture, CombatOutcome};
