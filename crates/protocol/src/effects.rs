use serde::{Deserialize, Serialize};

use crate::theme::PaletteToken;
use crate::types::Point;

/// A single, stateless side-effect instruction.
///
/// The core emits effects as sequencers fire. Hosts consume them in
/// order and forget them: nothing is returned to the core, and each
/// effect carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// One confetti burst made of one or more emitters.
    Confetti(ConfettiBurst),

    /// Side cannons that keep firing for `duration_ms` on the host's
    /// animation frames.
    Cannons(CannonVolley),

    /// Start an audio clip.
    PlayAudio(AudioCue),

    /// Stop (and release) an audio clip previously started.
    StopAudio { path: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleShape {
    Square,
    Circle,
}

/// A point source of particles. `origin` is in viewport fractions
/// (`0..1` on both axes; values outside spawn off-screen).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Emitter {
    pub origin: Point,
    pub particle_count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfettiBurst {
    pub emitters: Vec<Emitter>,
    /// Decayed intensity of this burst; equals each emitter's particle count.
    pub intensity: f64,
    pub palette: PaletteToken,
    pub shapes: Vec<ParticleShape>,
    pub start_velocity: f64,
    /// Spread in degrees.
    pub spread: f64,
    /// Particle lifetime in renderer frames.
    pub ticks: u32,
}

/// One side cannon of a volley.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cannon {
    pub origin: Point,
    /// Launch angle in degrees (90 = straight up).
    pub angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CannonVolley {
    pub cannons: Vec<Cannon>,
    pub particles_per_frame: u32,
    pub spread: f64,
    pub scalar: f64,
    pub palette: PaletteToken,
    pub shape: ParticleShape,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioCue {
    pub path: String,
    pub volume: f32,
    pub looped: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_are_tagged_on_the_wire() {
        let effect = Effect::StopAudio {
            path: "/audio/a.mp3".into(),
        };
        let json = serde_json::to_string(&effect).unwrap_or_default();
        assert_eq!(json, r#"{"type":"stop_audio","path":"/audio/a.mp3"}"#);
    }

    #[test]
    fn confetti_serializes_palette_token() {
        let effect = Effect::Confetti(ConfettiBurst {
            emitters: vec![Emitter {
                origin: Point::new(0.2, 0.1),
                particle_count: 50.0,
            }],
            intensity: 50.0,
            palette: PaletteToken::Celebration,
            shapes: vec![ParticleShape::Square],
            start_velocity: 30.0,
            spread: 360.0,
            ticks: 100,
        });
        let json = serde_json::to_string(&effect).unwrap_or_default();
        assert!(json.contains(r#""type":"confetti""#));
        assert!(json.contains(r#""palette":"Celebration""#));
        assert!(json.contains(r#""shapes":["square"]"#));
    }
}
