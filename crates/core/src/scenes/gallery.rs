use serde::Serialize;

use crate::media::{MediaAsset, MediaKind, MediaSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GalleryItem {
    pub title: &'static str,
    pub text: &'static str,
    pub src: &'static str,
    /// Width over height, as `(w, h)`.
    pub aspect: (u8, u8),
}

pub const GALLERY_ITEMS: [GalleryItem; 7] = [
    GalleryItem {
        title: "MY TREAT",
        text: "The moment when I say 'Get anything you want'...",
        src: "/videos/shopping-cart.mp4",
        aspect: (3, 4),
    },
    GalleryItem {
        title: "OUR DANCE MOVES",
        text: "100% accurate.",
        src: "/videos/stickman.mp4",
        aspect: (3, 4),
    },
    GalleryItem {
        title: "THE STARE",
        text: "I literally get lost looking at you.",
        src: "/videos/lego-batman.mp4",
        aspect: (1, 1),
    },
    GalleryItem {
        title: "MY HEART",
        text: "Actual footage of my chest.",
        src: "/videos/jerry-heartbeat.mp4",
        aspect: (1, 1),
    },
    GalleryItem {
        title: "MY HERO",
        text: "You really are my MJ.",
        src: "/videos/spiderman.mp4",
        aspect: (9, 16),
    },
    GalleryItem {
        title: "OBSESSED",
        text: "Just another angle of me.",
        src: "/videos/oggy.mp4",
        aspect: (4, 3),
    },
    GalleryItem {
        title: "LUCKY ENOUGH",
        text: "Say what can make me feel...",
        src: "/videos/lucky-enough.mp4",
        aspect: (3, 4),
    },
];

/// Player state of one gallery clip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoCard {
    pub item: GalleryItem,
    pub playing: bool,
    pub muted: bool,
    /// Playback position in percent.
    pub progress: f64,
    pub media: MediaSlot,
    #[serde(skip)]
    duration: f64,
}

impl VideoCard {
    pub fn new(item: GalleryItem) -> Self {
        Self {
            item,
            playing: false,
            muted: false,
            progress: 0.0,
            media: MediaSlot::new(MediaAsset {
                kind: MediaKind::Video,
                path: item.src,
            }),
            duration: 0.0,
        }
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Playback position report from the host. Ignored until the duration
    /// is known.
    pub fn time_update(&mut self, current: f64, duration: f64) {
        if duration > 0.0 {
            self.duration = duration;
            self.progress = current / duration * 100.0;
        }
    }

    /// Seek to `percent`; returns the new position in seconds for the host.
    pub fn seek(&mut self, percent: f64) -> Option<f64> {
        let percent = percent.clamp(0.0, 100.0);
        self.progress = percent;
        (self.duration > 0.0).then(|| self.duration / 100.0 * percent)
    }

    pub fn ended(&mut self) {
        self.playing = false;
    }

    /// `play()` was refused by the browser.
    pub fn autoplay_blocked(&mut self) {
        self.playing = false;
        self.media.on_autoplay_blocked();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryScene {
    pub cards: Vec<VideoCard>,
}

impl GalleryScene {
    pub fn new() -> Self {
        Self {
            cards: GALLERY_ITEMS.iter().copied().map(VideoCard::new).collect(),
        }
    }

    pub fn card_mut(&mut self, index: usize) -> Option<&mut VideoCard> {
        self.cards.get_mut(index)
    }

    pub fn card_by_src_mut(&mut self, src: &str) -> Option<&mut VideoCard> {
        self.cards.iter_mut().find(|c| c.item.src == src)
    }
}

impl Default for GalleryScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaStatus;

    #[test]
    fn progress_and_seek() {
        let mut card = VideoCard::new(GALLERY_ITEMS[0]);
        assert_eq!(card.seek(50.0), None);

        card.time_update(3.0, 12.0);
        assert!((card.progress - 25.0).abs() < 1e-9);
        assert_eq!(card.seek(50.0), Some(6.0));
        assert!((card.progress - 50.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_duration_is_ignored() {
        let mut card = VideoCard::new(GALLERY_ITEMS[1]);
        card.time_update(3.0, 0.0);
        assert_eq!(card.progress, 0.0);
    }

    #[test]
    fn play_toggle_and_end() {
        let mut card = VideoCard::new(GALLERY_ITEMS[2]);
        card.toggle_play();
        assert!(card.playing);
        card.ended();
        assert!(!card.playing);
        card.toggle_mute();
        assert!(card.muted);
    }

    #[test]
    fn blocked_play_reverts() {
        let mut gallery = GalleryScene::new();
        let Some(card) = gallery.card_by_src_mut("/videos/oggy.mp4") else {
            unreachable!("oggy is in the gallery");
        };
        card.toggle_play();
        card.autoplay_blocked();
        assert!(!card.playing);
        assert_eq!(card.media.status, MediaStatus::Blocked);
    }
}
