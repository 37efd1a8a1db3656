use heartscroll_protocol::{AudioCue, Effect};
use log::info;

use crate::Millis;
use crate::config::Timing;
use crate::media::{FINAL_PHOTO, MediaSlot, SUCCESS_SONG};
use crate::sequencer::BurstLoop;
use crate::sink::EffectSink;

/// "She said yes" screen: looping song, fading confetti, polaroid.
#[derive(Debug)]
pub struct SuccessOverlay {
    burst: BurstLoop,
    pub photo: MediaSlot,
    pub song: MediaSlot,
}

impl SuccessOverlay {
    pub fn mount(now: Millis, timing: &Timing, seed: u64, sink: &mut dyn EffectSink) -> Self {
        sink.emit(Effect::PlayAudio(AudioCue {
            path: SUCCESS_SONG.path.to_string(),
            volume: 0.6,
            looped: true,
        }));
        Self {
            burst: BurstLoop::mount(now, timing, seed),
            photo: MediaSlot::new(FINAL_PHOTO),
            song: MediaSlot::new(SUCCESS_SONG),
        }
    }

    pub fn advance_to(&mut self, now: Millis, sink: &mut dyn EffectSink) {
        self.burst.advance_to(now, sink);
    }

    pub fn unmount(mut self, sink: &mut dyn EffectSink) {
        self.burst.dispose();
        sink.emit(Effect::StopAudio {
            path: SUCCESS_SONG.path.to_string(),
        });
    }

    pub fn bursts_fired(&self) -> u32 {
        self.burst.fired()
    }
}

/// The proposal panel.
#[derive(Debug, Default)]
pub struct FinaleScene {
    success: Option<SuccessOverlay>,
}

impl FinaleScene {
    /// Both buttons say yes. Mounting twice is a no-op.
    pub fn accept(&mut self, now: Millis, timing: &Timing, seed: u64, sink: &mut dyn EffectSink) {
        if self.success.is_some() {
            return;
        }
        info!("proposal accepted");
        self.success = Some(SuccessOverlay::mount(now, timing, seed, sink));
    }

    pub fn advance_to(&mut self, now: Millis, sink: &mut dyn EffectSink) {
        if let Some(overlay) = &mut self.success {
            overlay.advance_to(now, sink);
        }
    }

    pub fn dismiss(&mut self, sink: &mut dyn EffectSink) {
        if let Some(overlay) = self.success.take() {
            overlay.unmount(sink);
        }
    }

    pub fn success(&self) -> Option<&SuccessOverlay> {
        self.success.as_ref()
    }

    pub fn success_mut(&mut self) -> Option<&mut SuccessOverlay> {
        self.success.as_mut()
    }
}
