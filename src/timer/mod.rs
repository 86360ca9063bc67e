//! Turn timers: clock abstraction and the timeout supervisor.

pub mod clock;
pub mod supervisor;

pub use clock::{Clock, ManualClock, SystemClock};
pub use supervisor::{ArmedTimer, TimeoutOutcome, TimeoutSupervisor, TimerToken};
