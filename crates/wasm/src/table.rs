//! Handle table of live decks and the JSON shapes exchanged with the page.
//!
//! Everything here is plain Rust so it can be tested natively; `lib.rs`
//! only converts errors into `JsError`.

use heartscroll_core::model::SectionId;
use heartscroll_core::scenes::{DealAnswer, SceneKind, VideoCard};
use heartscroll_core::tracker::MeasuredLayout;
use heartscroll_core::{Deck, DeckConfig, DeckError, Millis};
use heartscroll_protocol::Effect;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid deck handle: {0}")]
    InvalidHandle(usize),
    #[error("invalid video card: {0}")]
    InvalidCard(usize),
    #[error("unknown deal answer: {0}")]
    UnknownAnswer(String),
}

/// What one frame hands back to the page.
#[derive(Debug, Serialize)]
pub struct FrameOutput {
    pub effects: Vec<Effect>,
    /// Scroll offset to apply while a dot-navigation scroll is running.
    pub scroll_y: Option<f64>,
}

/// Host timestamps arrive as `performance.now()` doubles.
pub fn to_millis(now_ms: f64) -> Millis {
    if now_ms.is_finite() && now_ms > 0.0 {
        now_ms as Millis
    } else {
        0
    }
}

pub fn parse_answer(answer: &str) -> Result<DealAnswer, BridgeError> {
    match answer {
        "a" => Ok(DealAnswer::Yes),
        "b" => Ok(DealAnswer::NoChoice),
        "c" => Ok(DealAnswer::Knife),
        "d" => Ok(DealAnswer::SeeB),
        other => Err(BridgeError::UnknownAnswer(other.to_string())),
    }
}

#[derive(Debug, Default)]
pub struct DeckTable {
    decks: Vec<Option<Deck>>,
}

impl DeckTable {
    pub fn create(&mut self, config_json: &str, now: Millis) -> Result<usize, BridgeError> {
        let config = if config_json.trim().is_empty() {
            DeckConfig::default()
        } else {
            DeckConfig::from_json(config_json)?
        };
        let deck = Deck::new(config, now)?;
        // Reuse a freed slot before growing.
        if let Some(idx) = self.decks.iter().position(Option::is_none) {
            self.decks[idx] = Some(deck);
            return Ok(idx);
        }
        self.decks.push(Some(deck));
        Ok(self.decks.len() - 1)
    }

    /// Dispose and drop a deck, returning its final effects.
    pub fn destroy(&mut self, handle: usize) -> Result<Vec<Effect>, BridgeError> {
        let mut deck = self
            .decks
            .get_mut(handle)
            .and_then(Option::take)
            .ok_or(BridgeError::InvalidHandle(handle))?;
        let mut effects = Vec::new();
        deck.dispose(&mut effects);
        Ok(effects)
    }

    pub fn deck_mut(&mut self, handle: usize) -> Result<&mut Deck, BridgeError> {
        self.decks
            .get_mut(handle)
            .and_then(Option::as_mut)
            .ok_or(BridgeError::InvalidHandle(handle))
    }

    pub fn live(&self) -> usize {
        self.decks.iter().filter(|d| d.is_some()).count()
    }

    pub fn tick(
        &mut self,
        handle: usize,
        now: Millis,
        layout_json: &str,
    ) -> Result<FrameOutput, BridgeError> {
        let layout: MeasuredLayout = serde_json::from_str(layout_json)?;
        let deck = self.deck_mut(handle)?;
        let mut effects = Vec::new();
        deck.tick(now, &layout, &mut effects);
        Ok(FrameOutput {
            effects,
            scroll_y: deck.scroll_position(now),
        })
    }

    pub fn navigate_to(
        &mut self,
        handle: usize,
        section: &str,
        layout_json: &str,
    ) -> Result<Option<f64>, BridgeError> {
        let id: SectionId = section.parse()?;
        let layout: MeasuredLayout = serde_json::from_str(layout_json)?;
        let deck = self.deck_mut(handle)?;
        Ok(deck.navigate_to(id, &layout).map(|r| r.target_y))
    }

    pub fn select_scene(&mut self, handle: usize, scene: &str) -> Result<(), BridgeError> {
        let kind: SceneKind = scene.parse()?;
        self.deck_mut(handle)?.select_scene(kind);
        Ok(())
    }

    pub fn accept_proposal(&mut self, handle: usize) -> Result<Vec<Effect>, BridgeError> {
        let mut effects = Vec::new();
        self.deck_mut(handle)?.accept_proposal(&mut effects);
        Ok(effects)
    }

    pub fn video(&mut self, handle: usize, card: usize) -> Result<&mut VideoCard, BridgeError> {
        self.deck_mut(handle)?
            .gallery_mut()
            .card_mut(card)
            .ok_or(BridgeError::InvalidCard(card))
    }
}
