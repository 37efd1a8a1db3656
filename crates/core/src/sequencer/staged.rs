use std::fmt::Debug;

use heartscroll_protocol::{Cannon, CannonVolley, Effect, PaletteToken, ParticleShape, Point};
use log::debug;
use serde::Serialize;

use crate::Millis;
use crate::config::Timing;
use crate::sequencer::timer::TimerGroup;
use crate::sink::EffectSink;

/// Flags of the Loki finale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LokiFlag {
    /// "Sacred timeline confirmed": the variant image is revealed.
    Confirmed,
    /// "For all time. Always.": the gold finale.
    Glorious,
}

#[derive(Debug, Clone)]
struct Stage<F> {
    flag: F,
    offset: Millis,
    effect: Option<Effect>,
    set: bool,
}

/// Boolean flags that switch on at fixed offsets after activation, with an
/// optional effect fired when a flag switches on.
///
/// Every activation starts from scratch: flags reset and the previous
/// activation's timers are cancelled.
#[derive(Debug)]
pub struct StagedReveal<F> {
    stages: Vec<Stage<F>>,
    timers: Option<TimerGroup<usize>>,
}

impl<F: Copy + Eq + Debug> StagedReveal<F> {
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            timers: None,
        }
    }

    /// Add a flag that turns on `offset` ms after activation.
    pub fn stage(mut self, flag: F, offset: Millis, effect: Option<Effect>) -> Self {
        self.stages.push(Stage {
            flag,
            offset,
            effect,
            set: false,
        });
        self
    }

    pub fn activate(&mut self, now: Millis) {
        self.reset_flags();
        let mut timers = TimerGroup::new(now);
        for (i, stage) in self.stages.iter().enumerate() {
            timers.schedule(stage.offset, i);
        }
        debug!("staged reveal activated at {now}ms ({} stages)", self.stages.len());
        // Dropping the previous group cancels its timers.
        self.timers = Some(timers);
    }

    pub fn deactivate(&mut self) {
        if let Some(mut timers) = self.timers.take() {
            timers.dispose();
        }
        self.reset_flags();
    }

    pub fn is_active(&self) -> bool {
        self.timers.is_some()
    }

    pub fn advance_to(&mut self, now: Millis, sink: &mut dyn EffectSink) {
        let Some(timers) = &mut self.timers else {
            return;
        };
        while let Some((_, i)) = timers.pop_due(now) {
            let stage = &mut self.stages[i];
            stage.set = true;
            debug!("stage {:?} on", stage.flag);
            if let Some(effect) = &stage.effect {
                sink.emit(effect.clone());
            }
        }
        timers.settle(now);
    }

    /// Whether `flag` is on. Unknown flags are off.
    pub fn flag(&self, flag: F) -> bool {
        self.stages.iter().any(|s| s.flag == flag && s.set)
    }

    fn reset_flags(&mut self) {
        for stage in &mut self.stages {
            stage.set = false;
        }
    }
}

impl<F: Copy + Eq + Debug> Default for StagedReveal<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Gold side cannons fired when the Loki finale turns glorious.
pub fn loki_cannons(timing: &Timing) -> CannonVolley {
    CannonVolley {
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
        duration_ms: timing.cannon_duration_ms,
    }
}

impl StagedReveal<LokiFlag> {
    pub fn loki(timing: &Timing) -> Self {
        Self::new()
            .stage(LokiFlag::Confirmed, timing.confirm_at_ms, None)
            .stage(
                LokiFlag::Glorious,
                timing.glorious_at_ms,
                Some(Effect::Cannons(loki_cannons(timing))),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cannon_count(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, Effect::Cannons(_)))
            .count()
    }

    #[test]
    fn flags_switch_on_at_offsets() {
        let mut loki = StagedReveal::loki(&Timing::default());
        let mut effects = Vec::new();
        loki.activate(0);

        loki.advance_to(5000, &mut effects);
        assert!(!loki.flag(LokiFlag::Confirmed));
        loki.advance_to(5500, &mut effects);
        assert!(loki.flag(LokiFlag::Confirmed));
        assert!(!loki.flag(LokiFlag::Glorious));

        loki.advance_to(6999, &mut effects);
        assert_eq!(cannon_count(&effects), 0);
        loki.advance_to(7000, &mut effects);
        assert!(loki.flag(LokiFlag::Glorious));
        assert_eq!(cannon_count(&effects), 1);

        loki.advance_to(60_000, &mut effects);
        assert_eq!(cannon_count(&effects), 1);
    }

    #[test]
    fn reactivation_resets_and_restarts() {
        let mut loki = StagedReveal::loki(&Timing::default());
        let mut effects = Vec::new();
        loki.activate(0);
        loki.advance_to(6000, &mut effects);
        assert!(loki.flag(LokiFlag::Confirmed));

        loki.deactivate();
        assert!(!loki.flag(LokiFlag::Confirmed));
        loki.activate(10_000);
        assert!(!loki.flag(LokiFlag::Confirmed));
        assert!(!loki.flag(LokiFlag::Glorious));

        // The first activation's glorious timer (t=7000) is gone.
        loki.advance_to(15_000, &mut effects);
        assert_eq!(cannon_count(&effects), 0);
        assert!(!loki.flag(LokiFlag::Confirmed));

        loki.advance_to(17_000, &mut effects);
        assert_eq!(cannon_count(&effects), 1);
    }

    #[test]
    fn activate_while_active_restarts_without_duplicates() {
        let mut loki = StagedReveal::loki(&Timing::default());
        let mut effects = Vec::new();
        loki.activate(0);
        loki.advance_to(6000, &mut effects);
        loki.activate(6000);
        assert!(!loki.flag(LokiFlag::Confirmed));
        loki.advance_to(13_000, &mut effects);
        assert_eq!(cannon_count(&effects), 1);
    }

    #[test]
    fn deactivated_scene_emits_nothing() {
        let mut loki = StagedReveal::loki(&Timing::default());
        let mut effects = Vec::new();
        loki.activate(0);
        loki.advance_to(3000, &mut effects);
        loki.deactivate();
        loki.advance_to(7000 + 7000, &mut effects);
        assert!(effects.is_empty());
        assert!(!loki.is_active());
    }

    #[test]
    fn cannons_use_gold_palette() {
        let volley = loki_cannons(&Timing::default());
        assert_eq!(volley.palette, PaletteToken::SacredGold);
        assert_eq!(volley.cannons.len(), 2);
        assert_eq!(volley.duration_ms, 3000);
    }
}
