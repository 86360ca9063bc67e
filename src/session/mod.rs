//! Live match hosting.
//!
//! ## Key Types
//!
//! - `MatchSession`: One match with its state, rules and timer behind a lock
//! - `MatchStore`: Registry of live sessions, owned by the hosting service
//! - `TimeoutDriver`: Background thread that fires due timers
//! - `MatchObserver`: Outbound notifications (placements, results)

pub mod driver;
pub mod events;
pub mod live;
pub mod store;

pub use driver::TimeoutDriver;
pub use events::{MatchId, MatchObserver, NullObserver, Observed, PlacementEvent, RecordingObserver};
pub use live::{MatchKind, MatchSession};
pub use store::MatchStore;
