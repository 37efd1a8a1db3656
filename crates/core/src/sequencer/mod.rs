//! Timed reveal sequencing.
//!
//! Every mode keeps its `(offset, action)` steps on one [`TimerGroup`] so
//! that disposing the sequencer cancels everything it scheduled.

pub mod burst;
pub mod staged;
pub mod timer;
pub mod typewriter;

pub use burst::BurstLoop;
pub use staged::{LokiFlag, StagedReveal};
pub use timer::{TimerGroup, TimerId};
pub use typewriter::Typewriter;
