use heartscroll_protocol::{ConfettiBurst, Effect, Emitter, PaletteToken, ParticleShape, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Millis;
use crate::config::Timing;
use crate::sequencer::timer::TimerGroup;
use crate::sink::EffectSink;

/// Confetti fired at a fixed cadence for a fixed duration, fading linearly.
///
/// All ticks are scheduled at mount; one burst fires per tick at offsets
/// `0, cadence, 2 * cadence, ...` strictly below the duration.
#[derive(Debug)]
pub struct BurstLoop {
    timers: TimerGroup<Millis>,
    duration: Millis,
    base_intensity: f64,
    rng: StdRng,
    fired: u32,
}

impl BurstLoop {
    pub fn mount(now: Millis, timing: &Timing, seed: u64) -> Self {
        let mut timers = TimerGroup::new(now);
        let cadence = timing.burst_cadence_ms.max(1);
        let mut offset: Millis = 0;
        while offset < timing.burst_duration_ms {
            timers.schedule(offset, offset);
            let Some(next) = offset.checked_add(cadence) else {
                break;
            };
            offset = next;
        }
        Self {
            timers,
            duration: timing.burst_duration_ms,
            base_intensity: timing.burst_base_intensity,
            rng: StdRng::seed_from_u64(seed),
            fired: 0,
        }
    }

    pub fn advance_to(&mut self, now: Millis, sink: &mut dyn EffectSink) {
        while let Some((_, offset)) = self.timers.pop_due(now) {
            let remaining = self.duration.saturating_sub(offset) as f64;
            let intensity = self.base_intensity * (remaining / self.duration as f64);
            let burst = self.burst(intensity);
            self.fired += 1;
            sink.emit(Effect::Confetti(burst));
        }
        self.timers.settle(now);
    }

    /// Cancel every remaining tick.
    pub fn dispose(&mut self) {
        self.timers.dispose();
    }

    pub fn is_finished(&self) -> bool {
        self.timers.is_idle()
    }

    /// Bursts emitted so far.
    pub fn fired(&self) -> u32 {
        self.fired
    }

    fn burst(&mut self, intensity: f64) -> ConfettiBurst {
        let left = Point::new(
            self.rng.gen_range(0.1..0.3),
            self.rng.gen_range(0.0..1.0) - 0.2,
        );
        let right = Point::new(
            self.rng.gen_range(0.7..0.9),
            self.rng.gen_range(0.0..1.0) - 0.2,
        );
        ConfettiBurst {
            emitters: vec![
                Emitter {
                    origin: left,
                    particle_count: intensity,
                },
                Emitter {
                    origin: right,
                    particle_count: intensity,
                },
            ],
            intensity,
            palette: PaletteToken::Celebration,
            shapes: vec![ParticleShape::Square, ParticleShape::Circle],
            start_velocity: 30.0,
            spread: 360.0,
            ticks: 100,
        }
    }
}
