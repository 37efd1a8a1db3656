//! Terminal-side state: the deck, the page it is laid out on, and the
//! particles its effects left behind.

use crossterm::event::KeyCode;
use heartscroll_core::model::SectionId;
use heartscroll_core::scenes::{CheeseView, DealAnswer, FaithScene};
use heartscroll_core::tracker::{AnchorSource, StackedPage};
use heartscroll_core::{Deck, DeckSnapshot, Millis};
use heartscroll_protocol::Effect;
use log::{debug, info};

use crate::particles::ParticleField;

/// Rows moved per arrow key.
const SCROLL_STEP: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App {
    deck: Deck,
    page: StackedPage,
    field: ParticleField,
}

impl App {
    /// One page row per terminal row; every panel fills the viewport.
    pub fn new(deck: Deck, seed: u64, width: u16, height: u16) -> Self {
        Self {
            deck,
            page: StackedPage::uniform(f64::from(width), f64::from(height)),
            field: ParticleField::new(seed),
        }
    }

    pub fn page(&self) -> &StackedPage {
        &self.page
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn snapshot(&self) -> DeckSnapshot {
        self.deck.snapshot()
    }

    /// Rebuild the page for a new terminal size, keeping the reader on the
    /// same relative spot.
    pub fn resize(&mut self, width: u16, height: u16) {
        let old_height = self.page.viewport_height().max(1.0);
        let height = f64::from(height);
        let scroll = self.page.scroll_y() / old_height * height;
        self.page = StackedPage::uniform(f64::from(width), height);
        self.page.set_scroll(scroll);
        self.deck.cancel_scroll();
    }

    /// Advance the deck one frame and collect its effects.
    pub fn frame(&mut self, now: Millis) {
        if let Some(y) = self.deck.scroll_position(now) {
            self.page.set_scroll(y);
        }
        let mut effects = Vec::new();
        self.deck.tick(now, &self.page, &mut effects);
        self.absorb(&effects, now);
        self.field.advance(now);
    }

    pub fn handle_key(&mut self, code: KeyCode, now: Millis) -> Control {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Control::Quit,
            KeyCode::Up => self.scroll_by(-SCROLL_STEP),
            KeyCode::Down => self.scroll_by(SCROLL_STEP),
            KeyCode::PageUp => self.scroll_by(-self.page.viewport_height()),
            KeyCode::PageDown => self.scroll_by(self.page.viewport_height()),
            KeyCode::Char(c @ '1'..='7') => {
                let idx = c as usize - '1' as usize;
                let id = SectionId::ALL[idx];
                if self.deck.navigate_to(id, &self.page).is_none() {
                    debug!("no panel to scroll to for {id}");
                }
            }
            KeyCode::Char('s') => self.deck.skip_intro(),
            KeyCode::Left => self.deck.prev_scene(),
            KeyCode::Right => self.deck.next_scene(),
            KeyCode::Char('v') => {
                self.deck.vibe_check();
            }
            KeyCode::Char('y') => {
                let mut effects = Vec::new();
                self.deck.accept_proposal(&mut effects);
                self.absorb(&effects, now);
            }
            KeyCode::Char('x') => {
                let mut effects = Vec::new();
                self.deck.dismiss_success(&mut effects);
                self.absorb(&effects, now);
            }
            KeyCode::Char('c') => {
                let cheese = self.deck.cheese_mut();
                let view = match cheese.view() {
                    CheeseView::Cheese => CheeseView::Vanuatu,
                    CheeseView::Vanuatu => CheeseView::Cheese,
                };
                cheese.set_view(view);
            }
            KeyCode::Char('d') => {
                let cheese = self.deck.cheese_mut();
                if cheese.show_deal() {
                    cheese.close_deal();
                } else {
                    cheese.open_deal();
                }
            }
            KeyCode::Char(c @ ('a' | 'b' | 'n' | 'k')) => {
                let cheese = self.deck.cheese_mut();
                if cheese.show_deal() {
                    cheese.answer(match c {
                        'a' => DealAnswer::Yes,
                        'b' => DealAnswer::SeeB,
                        'n' => DealAnswer::NoChoice,
                        _ => DealAnswer::Knife,
                    });
                }
            }
            KeyCode::Char('f') => {
                let faith = self.deck.faith_mut();
                for card in 0..FaithScene::CARDS {
                    faith.toggle(card);
                }
            }
            _ => {}
        }
        Control::Continue
    }

    /// Tear the deck down before leaving the terminal.
    pub fn shutdown(&mut self, now: Millis) {
        let mut effects = Vec::new();
        self.deck.dispose(&mut effects);
        self.absorb(&effects, now);
    }

    fn scroll_by(&mut self, dy: f64) {
        self.deck.cancel_scroll();
        self.page.scroll_by(dy);
    }

    fn absorb(&mut self, effects: &[Effect], now: Millis) {
        for effect in effects {
            match effect {
                Effect::PlayAudio(cue) => info!("would play {} (volume {})", cue.path, cue.volume),
                Effect::StopAudio { path } => info!("would stop {path}"),
                Effect::Confetti(_) | Effect::Cannons(_) => {}
            }
            self.field.spawn(effect, now);
        }
        if !effects.is_empty() {
            debug!("{} effect(s), {} particle(s) live", effects.len(), self.field.len());
        }
    }
}
