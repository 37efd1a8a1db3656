pub mod effects;
pub mod theme;
pub mod types;

pub use effects::{
    AudioCue, Cannon, CannonVolley, ConfettiBurst, Effect, Emitter, ParticleShape,
};
pub use theme::PaletteToken;
pub use types::{Point, Rect, Viewport};
