//! The whole page: intro overlay, tracked panels, per-panel scenes.
//!
//! Hosts drive a [`Deck`] with their clock and measurements:
//!
//! 1. forward clicks as deck operations,
//! 2. call [`Deck::tick`] once per frame with the current layout,
//! 3. render the [`DeckSnapshot`] and the emitted effects.

use log::{debug, info};
use serde::Serialize;

use crate::Millis;
use crate::config::DeckConfig;
use crate::error::DeckError;
use crate::media::{FINAL_PHOTO, MediaSlot, SUCCESS_SONG, VARIANT_PHOTO};
use crate::model::{NavItem, SECTIONS, SectionId};
use crate::scenes::{
    CheeseScene, CheeseView, FaithScene, FinaleScene, GalleryScene, IntroOverlay, MarcusScene,
    NerdScene, SceneKind, VideoCard,
};
use crate::scroll::{ScrollRequest, SmoothScroll};
use crate::sequencer::LokiFlag;
use crate::sink::{Discard, EffectSink};
use crate::tracker::{AnchorSource, Tracker};

#[derive(Debug)]
pub struct Deck {
    config: DeckConfig,
    now: Millis,
    tracker: Tracker,
    scroll: Option<SmoothScroll>,
    intro: Option<IntroOverlay>,
    cheese: CheeseScene,
    faith: FaithScene,
    nerd: NerdScene,
    marcus: MarcusScene,
    gallery: GalleryScene,
    finale: FinaleScene,
    variant_photo: MediaSlot,
    disposed: bool,
}

impl Deck {
    /// Build and mount a deck at `now`. The intro starts typing immediately.
    pub fn new(config: DeckConfig, now: Millis) -> Result<Self, DeckError> {
        config.validate()?;
        let mut tracker = Tracker::new(config.tracking, SECTIONS[0].id);
        tracker.observe(&SECTIONS);
        Ok(Self {
            now,
            tracker,
            scroll: None,
            intro: Some(IntroOverlay::mount(&config, now)),
            cheese: CheeseScene::new(now, config.timing.error_reset_ms),
            faith: FaithScene::new(),
            nerd: NerdScene::new(&config.timing),
            marcus: MarcusScene::default(),
            gallery: GalleryScene::new(),
            finale: FinaleScene::default(),
            variant_photo: MediaSlot::new(VARIANT_PHOTO),
            disposed: false,
            config,
        })
    }

    /// Advance every mounted sequencer to `now` and re-evaluate which panel
    /// is in view.
    pub fn tick(&mut self, now: Millis, layout: &dyn AnchorSource, sink: &mut dyn EffectSink) {
        if self.disposed {
            return;
        }
        self.now = self.now.max(now);
        let now = self.now;

        if let Some(intro) = &mut self.intro {
            intro.advance_to(now);
            if !intro.is_visible() {
                debug!("intro overlay dismissed");
                self.intro = None;
            }
        }

        self.tracker.on_layout(layout);

        self.cheese.advance_to(now);
        self.nerd.advance_to(now, sink);
        self.finale.advance_to(now, sink);

        if self.scroll.is_some_and(|s| s.is_done(now)) {
            self.scroll = None;
        }
    }

    /// Start a smooth scroll towards `id`. `None` (and no scroll) when the
    /// panel is not mounted.
    pub fn navigate_to(&mut self, id: SectionId, layout: &dyn AnchorSource) -> Option<ScrollRequest> {
        if self.disposed {
            return None;
        }
        let request = self.tracker.navigate_to(id, layout)?;
        debug!("navigate to {id} at y={:.0}", request.target_y);
        self.scroll = Some(SmoothScroll::new(
            layout.scroll_y(),
            request,
            self.now,
            self.config.timing.scroll_duration_ms,
        ));
        Some(request)
    }

    /// Scroll offset the host should apply now, while a navigation runs.
    pub fn scroll_position(&self, now: Millis) -> Option<f64> {
        self.scroll.map(|s| s.position_at(now))
    }

    /// User scrolled by hand: stop any running navigation.
    pub fn cancel_scroll(&mut self) {
        self.scroll = None;
    }

    pub fn skip_intro(&mut self) {
        if let Some(mut intro) = self.intro.take() {
            intro.skip();
            info!("intro skipped");
        }
    }

    pub fn next_scene(&mut self) {
        self.nerd.next(self.now);
    }

    pub fn prev_scene(&mut self) {
        self.nerd.prev(self.now);
    }

    pub fn select_scene(&mut self, kind: SceneKind) {
        self.nerd.select_kind(kind, self.now);
    }

    pub fn vibe_check(&mut self) -> &'static str {
        self.marcus.vibe_check()
    }

    pub fn accept_proposal(&mut self, sink: &mut dyn EffectSink) {
        if self.disposed {
            return;
        }
        self.finale
            .accept(self.now, &self.config.timing, self.config.seed, sink);
    }

    pub fn dismiss_success(&mut self, sink: &mut dyn EffectSink) {
        self.finale.dismiss(sink);
    }

    /// A media element finished loading. Unknown paths are ignored.
    pub fn media_loaded(&mut self, path: &str) {
        if let Some(slot) = self.media_slot_mut(path) {
            slot.on_loaded();
        } else if let Some(card) = self.gallery.card_by_src_mut(path) {
            card.media.on_loaded();
        }
    }

    /// A media element failed to load. Unknown paths are ignored.
    pub fn media_error(&mut self, path: &str) {
        if let Some(slot) = self.media_slot_mut(path) {
            slot.on_error();
        } else if let Some(card) = self.gallery.card_by_src_mut(path) {
            card.media.on_error();
            card.playing = false;
        }
    }

    /// The browser refused to start playback. Unknown paths are ignored.
    pub fn autoplay_blocked(&mut self, path: &str) {
        if let Some(slot) = self.media_slot_mut(path) {
            slot.on_autoplay_blocked();
        } else if let Some(card) = self.gallery.card_by_src_mut(path) {
            card.autoplay_blocked();
        }
    }

    fn media_slot_mut(&mut self, path: &str) -> Option<&mut MediaSlot> {
        if path == VARIANT_PHOTO.path {
            return Some(&mut self.variant_photo);
        }
        let overlay = self.finale.success_mut()?;
        if path == FINAL_PHOTO.path {
            Some(&mut overlay.photo)
        } else if path == SUCCESS_SONG.path {
            Some(&mut overlay.song)
        } else {
            None
        }
    }

    pub fn cheese_mut(&mut self) -> &mut CheeseScene {
        &mut self.cheese
    }

    pub fn faith_mut(&mut self) -> &mut FaithScene {
        &mut self.faith
    }

    pub fn gallery_mut(&mut self) -> &mut GalleryScene {
        &mut self.gallery
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut Tracker {
        &mut self.tracker
    }

    pub fn active_section(&self) -> SectionId {
        self.tracker.active()
    }

    pub fn intro_visible(&self) -> bool {
        self.intro.is_some()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn snapshot(&self) -> DeckSnapshot {
        DeckSnapshot {
            now: self.now,
            active: self.tracker.active(),
            nav: self.tracker.nav_items(),
            intro: self.intro.as_ref().map(|i| IntroSnapshot {
                text: i.text().to_string(),
                line: i.line_index(),
            }),
            scrolling: self.scroll.is_some(),
            cheese: CheeseSnapshot {
                view: self.cheese.view(),
                show_deal: self.cheese.show_deal(),
                deal_accepted: self.cheese.deal_accepted(),
                error: self.cheese.error(),
            },
            faith_revealed: (0..FaithScene::CARDS)
                .map(|i| self.faith.is_revealed(i))
                .collect(),
            scene: self.nerd.current(),
            loki_confirmed: self.nerd.flag(LokiFlag::Confirmed),
            loki_glorious: self.nerd.flag(LokiFlag::Glorious),
            variant_photo: self.variant_photo.clone(),
            quote: self.marcus.quote(),
            gallery: self.gallery.cards.clone(),
            success: self.finale.success().map(|s| SuccessSnapshot {
                photo: s.photo.clone(),
                song: s.song.clone(),
                bursts_fired: s.bursts_fired(),
            }),
        }
    }

    /// Tear down: cancel every timer, stop audio, release observation.
    /// Idempotent.
    pub fn dispose(&mut self, sink: &mut dyn EffectSink) {
        if self.disposed {
            return;
        }
        if let Some(mut intro) = self.intro.take() {
            intro.dispose();
        }
        self.cheese.dispose();
        self.nerd.dispose();
        self.finale.dismiss(sink);
        self.tracker.disconnect();
        self.scroll = None;
        self.disposed = true;
        debug!("deck disposed");
    }
}

impl Drop for Deck {
    fn drop(&mut self) {
        self.dispose(&mut Discard);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IntroSnapshot {
    pub text: String,
    pub line: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheeseSnapshot {
    pub view: CheeseView,
    pub show_deal: bool,
    pub deal_accepted: bool,
    pub error: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessSnapshot {
    pub photo: MediaSlot,
    pub song: MediaSlot,
    pub bursts_fired: u32,
}

/// Everything a host needs to draw one frame.
#[derive(Debug, Clone, Serialize)]
pub struct DeckSnapshot {
    pub now: Millis,
    pub active: SectionId,
    pub nav: Vec<NavItem>,
    pub intro: Option<IntroSnapshot>,
    pub scrolling: bool,
    pub cheese: CheeseSnapshot,
    pub faith_revealed: Vec<bool>,
    pub scene: SceneKind,
    pub loki_confirmed: bool,
    pub loki_glorious: bool,
    pub variant_photo: MediaSlot,
    pub quote: Option<&'static str>,
    pub gallery: Vec<VideoCard>,
    pub success: Option<SuccessSnapshot>,
}
