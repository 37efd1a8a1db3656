pub mod config;
pub mod deck;
pub mod error;
pub mod media;
pub mod model;
pub mod scenes;
pub mod scroll;
pub mod sequencer;
pub mod sink;
pub mod tracker;

pub use config::DeckConfig;
pub use deck::{Deck, DeckSnapshot};
pub use error::DeckError;
pub use sink::EffectSink;

/// Milliseconds on the host's monotonic clock.
pub type Millis = u64;
