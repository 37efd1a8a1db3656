//! Media assets and their graceful-degradation states.
//!
//! Loading is the host's job; the core only records what happened and picks
//! the fallback. Nothing here returns an error.

use log::warn;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MediaAsset {
    pub kind: MediaKind,
    pub path: &'static str,
}

pub const FINAL_PHOTO: MediaAsset = MediaAsset {
    kind: MediaKind::Image,
    path: "/images/us-final.jpg",
};

pub const VARIANT_PHOTO: MediaAsset = MediaAsset {
    kind: MediaKind::Image,
    path: "/images/nichole-variant.png",
};

pub const SUCCESS_SONG: MediaAsset = MediaAsset {
    kind: MediaKind::Audio,
    path: "/audio/success-song.mp3",
};

/// What the host should show in place of a failed asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fallback {
    /// Replace the element with placeholder text.
    Placeholder { text: String },
    /// Hide the element.
    Hidden,
    /// Carry on without sound.
    Silent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MediaStatus {
    Pending,
    Loaded,
    Failed { fallback: Fallback },
    /// Playback refused until the user interacts with the page.
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaSlot {
    pub asset: MediaAsset,
    pub status: MediaStatus,
}

impl MediaSlot {
    pub fn new(asset: MediaAsset) -> Self {
        Self {
            asset,
            status: MediaStatus::Pending,
        }
    }

    pub fn on_loaded(&mut self) {
        self.status = MediaStatus::Loaded;
    }

    pub fn on_error(&mut self) {
        warn!("failed to load {}", self.asset.path);
        let fallback = match self.asset.kind {
            MediaKind::Image => Fallback::Placeholder {
                text: format!("Add {}", self.asset.path),
            },
            MediaKind::Video => Fallback::Hidden,
            MediaKind::Audio => Fallback::Silent,
        };
        self.status = MediaStatus::Failed { fallback };
    }

    pub fn on_autoplay_blocked(&mut self) {
        warn!("autoplay blocked for {} (interaction needed)", self.asset.path);
        self.status = MediaStatus::Blocked;
    }

    pub fn fallback(&self) -> Option<&Fallback> {
        match &self.status {
            MediaStatus::Failed { fallback } => Some(fallback),
            _ => None,
        }
    }
}
