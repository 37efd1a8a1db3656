//! Effects turned into glyphs that fly across the terminal.
//!
//! Positions are viewport fractions, the same space emitters use; the
//! renderer maps them onto cells.

use heartscroll_core::Millis;
use heartscroll_protocol::{CannonVolley, ConfettiBurst, Effect, PaletteToken, ParticleShape};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::style::Color;

/// Downward acceleration, in viewport heights per second squared.
const GRAVITY: f64 = 0.9;
/// Canvas confetti runs at roughly 60 fps.
const FRAME_MS: Millis = 16;
/// Confetti particles per terminal glyph.
const PARTICLES_PER_GLYPH: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Particle {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    glyph: char,
    color: Color,
    born: Millis,
    ttl: Millis,
}

impl Particle {
    fn position(&self, now: Millis) -> (f64, f64) {
        let t = now.saturating_sub(self.born) as f64 / 1000.0;
        (
            self.x + self.vx * t,
            self.y + self.vy * t + 0.5 * GRAVITY * t * t,
        )
    }

    fn alive(&self, now: Millis) -> bool {
        now.saturating_sub(self.born) < self.ttl
    }
}

#[derive(Debug)]
struct ActiveVolley {
    volley: CannonVolley,
    until: Millis,
    last_frame: Millis,
}

#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    volleys: Vec<ActiveVolley>,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            volleys: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Take one effect from the deck. Audio effects are ignored.
    pub fn spawn(&mut self, effect: &Effect, now: Millis) {
        match effect {
            Effect::Confetti(burst) => self.burst(burst, now),
            Effect::Cannons(volley) => self.volleys.push(ActiveVolley {
                volley: volley.clone(),
                until: now + volley.duration_ms,
                last_frame: now,
            }),
            Effect::PlayAudio(_) | Effect::StopAudio { .. } => {}
        }
    }

    /// Fire running cannons up to `now` and drop dead particles.
    pub fn advance(&mut self, now: Millis) {
        let mut volleys = std::mem::take(&mut self.volleys);
        for active in &mut volleys {
            let end = now.min(active.until);
            while active.last_frame + FRAME_MS <= end {
                active.last_frame += FRAME_MS;
                self.cannon_frame(&active.volley, active.last_frame);
            }
        }
        volleys.retain(|v| v.last_frame + FRAME_MS <= v.until);
        self.volleys = volleys;
        self.particles.retain(|p| p.alive(now));
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.volleys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Visible particles as `(x, y, glyph, color)` in viewport fractions.
    pub fn visible(&self, now: Millis) -> impl Iterator<Item = (f64, f64, char, Color)> + '_ {
        self.particles.iter().filter_map(move |p| {
            let (x, y) = p.position(now);
            ((0.0..1.0).contains(&x) && (0.0..1.0).contains(&y)).then_some((x, y, p.glyph, p.color))
        })
    }

    fn burst(&mut self, burst: &ConfettiBurst, now: Millis) {
        let colors = palette(burst.palette);
        let ttl = Millis::from(burst.ticks) * FRAME_MS;
        for emitter in &burst.emitters {
            let glyphs = (emitter.particle_count / PARTICLES_PER_GLYPH).ceil() as usize;
            for _ in 0..glyphs {
                let angle = 90.0 + self.rng.gen_range(-0.5..0.5) * burst.spread;
                let speed = burst.start_velocity / 60.0 * self.rng.gen_range(0.4..1.0);
                let shape = pick(&mut self.rng, &burst.shapes).unwrap_or(ParticleShape::Square);
                let color = pick(&mut self.rng, &colors).unwrap_or(Color::White);
                self.particles.push(launch(
                    (emitter.origin.x, emitter.origin.y),
                    angle,
                    speed,
                    shape,
                    color,
                    now,
                    ttl,
                ));
            }
        }
    }

    fn cannon_frame(&mut self, volley: &CannonVolley, at: Millis) {
        let colors = palette(volley.palette);
        for cannon in &volley.cannons {
            for _ in 0..volley.particles_per_frame {
                let angle = cannon.angle + self.rng.gen_range(-0.5..0.5) * volley.spread;
                let speed = 0.8 * volley.scalar * self.rng.gen_range(0.6..1.0);
                let color = pick(&mut self.rng, &colors).unwrap_or(Color::Yellow);
                self.particles.push(launch(
                    (cannon.origin.x, cannon.origin.y),
                    angle,
                    speed,
                    volley.shape,
                    color,
                    at,
                    2000,
                ));
            }
        }
    }
}

fn launch(
    origin: (f64, f64),
    angle_deg: f64,
    speed: f64,
    shape: ParticleShape,
    color: Color,
    born: Millis,
    ttl: Millis,
) -> Particle {
    let angle = angle_deg.to_radians();
    Particle {
        x: origin.0,
        y: origin.1,
        vx: angle.cos() * speed,
        // Screen y grows downward; 90 degrees is straight up.
        vy: -angle.sin() * speed,
        glyph: glyph(shape),
        color,
        born,
        ttl,
    }
}

fn pick<T: Copy>(rng: &mut StdRng, items: &[T]) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    Some(items[rng.gen_range(0..items.len())])
}

fn glyph(shape: ParticleShape) -> char {
    match shape {
        ParticleShape::Square => '■',
        ParticleShape::Circle => '●',
    }
}

fn palette(token: PaletteToken) -> Vec<Color> {
    token.colors().iter().copied().filter_map(hex_color).collect()
}

/// Parse `#rrggbb`.
pub fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use heartscroll_protocol::{Cannon, Emitter, Point};

    use super::*;

    fn burst(intensity: f64) -> Effect {
        Effect::Confetti(ConfettiBurst {
            emitters: vec![
                Emitter {
                    origin: Point::new(0.2, 0.3),
                    particle_count: intensity,
                },
                Emitter {
                    origin: Point::new(0.8, 0.3),
                    particle_count: intensity,
                },
            ],
            intensity,
            palette: PaletteToken::Celebration,
            shapes: vec![ParticleShape::Square, ParticleShape::Circle],
            start_velocity: 30.0,
            spread: 360.0,
            ticks: 100,
        })
    }

    #[test]
    fn parses_palette_colors() {
        assert_eq!(hex_color("#ffa500"), Some(Color::Rgb(255, 165, 0)));
        assert_eq!(hex_color("#C9A86A"), Some(Color::Rgb(0xC9, 0xA8, 0x6A)));
        assert_eq!(hex_color("ffa500"), None);
        assert_eq!(hex_color("#fff"), None);
        assert_eq!(palette(PaletteToken::SacredGold).len(), 3);
    }

    #[test]
    fn fading_bursts_spawn_fewer_glyphs() {
        let mut field = ParticleField::new(1);
        field.spawn(&burst(50.0), 0);
        let full = field.len();
        assert_eq!(full, 20);

        let mut field = ParticleField::new(1);
        field.spawn(&burst(10.0), 0);
        assert_eq!(field.len(), 4);
    }

    #[test]
    fn confetti_expires_after_its_ticks() {
        let mut field = ParticleField::new(1);
        field.spawn(&burst(50.0), 0);
        field.advance(100 * FRAME_MS - 1);
        assert!(!field.is_empty());
        field.advance(100 * FRAME_MS);
        assert!(field.is_empty());
    }

    #[test]
    fn cannons_keep_firing_for_their_duration() {
        let volley = Effect::Cannons(CannonVolley {
            cannons: vec![
                Cannon {
                    origin: Point::new(0.0, 0.5),
                    angle: 60.0,
                },
                Cannon {
                    origin: Point::new(1.0, 0.5),
                    angle: 120.0,
                },
            ],
            particles_per_frame: 2,
            spread: 55.0,
            scalar: 1.2,
            palette: PaletteToken::SacredGold,
            shape: ParticleShape::Square,
            duration_ms: 160,
        });
        let mut field = ParticleField::new(1);
        field.spawn(&volley, 0);
        field.advance(80);
        assert_eq!(field.len(), 5 * 2 * 2);
        field.advance(1000);
        assert_eq!(field.len(), 10 * 2 * 2);
        field.advance(5000);
        assert!(field.is_empty());
    }

    #[test]
    fn audio_effects_draw_nothing() {
        let mut field = ParticleField::new(1);
        field.spawn(&Effect::StopAudio { path: "/a.mp3".into() }, 0);
        assert!(field.is_empty());
    }
}
