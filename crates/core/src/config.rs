use serde::{Deserialize, Serialize};

use crate::Millis;
use crate::error::DeckError;

/// Upper bound on the bursts one celebration may schedule.
pub const MAX_BURST_TICKS: Millis = 10_000;

/// Lines typed by the intro overlay.
pub const INTRO_LINES: &[&str] = &[
    "So... this is what I've been trying to do for the last 6 days.",
    "I hope you didn't feel bad for me not replying or spending time with you.",
    "I'm sorry if you felt left out...",
    "But I was never bored of you, Baby.",
    "I was just building this universe for you.",
];

/// Full deck configuration. Every section falls back to the values the
/// page ships with, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub timing: Timing,
    pub tracking: Tracking,
    pub intro_lines: Vec<String>,
    /// Seed for burst origin jitter.
    pub seed: u64,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            timing: Timing::default(),
            tracking: Tracking::default(),
            intro_lines: INTRO_LINES.iter().map(|l| (*l).to_string()).collect(),
            seed: 0x5EED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub char_interval_ms: Millis,
    pub line_hold_ms: Millis,
    pub final_pause_ms: Millis,
    pub confirm_at_ms: Millis,
    pub glorious_at_ms: Millis,
    pub cannon_duration_ms: Millis,
    pub burst_cadence_ms: Millis,
    pub burst_duration_ms: Millis,
    pub burst_base_intensity: f64,
    pub error_reset_ms: Millis,
    pub scroll_duration_ms: Millis,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            char_interval_ms: 50,
            line_hold_ms: 2500,
            final_pause_ms: 1000,
            confirm_at_ms: 5500,
            glorious_at_ms: 7000,
            cannon_duration_ms: 3000,
            burst_cadence_ms: 250,
            burst_duration_ms: 8000,
            burst_base_intensity: 50.0,
            error_reset_ms: 1500,
            scroll_duration_ms: 600,
        }
    }
}

/// Geometry of the visibility band used by the section tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tracking {
    /// Fraction of the viewport height excluded at the top and at the bottom.
    pub band_margin: f64,
    /// Minimum fraction of a panel that must sit inside the band.
    pub threshold: f64,
}

impl Default for Tracking {
    fn default() -> Self {
        Self {
            band_margin: 0.2,
            threshold: 0.2,
        }
    }
}

impl DeckConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(data: &str) -> Result<Self, DeckError> {
        let config: DeckConfig = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DeckError> {
        let t = &self.timing;
        if t.char_interval_ms == 0 {
            return Err(DeckError::InvalidConfig(
                "char_interval_ms must be positive".into(),
            ));
        }
        if t.burst_cadence_ms == 0 {
            return Err(DeckError::InvalidConfig(
                "burst_cadence_ms must be positive".into(),
            ));
        }
        if t.burst_duration_ms.div_ceil(t.burst_cadence_ms) > MAX_BURST_TICKS {
            return Err(DeckError::InvalidConfig(format!(
                "burst_duration_ms / burst_cadence_ms exceeds {MAX_BURST_TICKS} bursts"
            )));
        }
        if t.confirm_at_ms > t.glorious_at_ms {
            return Err(DeckError::InvalidConfig(
                "confirm_at_ms must not come after glorious_at_ms".into(),
            ));
        }
        if !t.burst_base_intensity.is_finite() || t.burst_base_intensity < 0.0 {
            return Err(DeckError::InvalidConfig(
                "burst_base_intensity must be a non-negative number".into(),
            ));
        }
        let k = &self.tracking;
        if !(0.0..=1.0).contains(&k.threshold) {
            return Err(DeckError::InvalidConfig(format!(
                "threshold {} outside 0..=1",
                k.threshold
            )));
        }
        if !(0.0..0.5).contains(&k.band_margin) {
            return Err(DeckError::InvalidConfig(format!(
                "band_margin {} leaves no visible band",
                k.band_margin
            )));
        }
        Ok(())
    }
}
