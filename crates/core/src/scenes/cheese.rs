use serde::Serialize;

use crate::Millis;
use crate::sequencer::TimerGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheeseView {
    Cheese,
    Vanuatu,
}

/// Answers offered by the Vanuatu deal. Only `Yes` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealAnswer {
    Yes,
    NoChoice,
    Knife,
    SeeB,
}

#[derive(Debug, Clone, Copy)]
struct ClearError;

/// The moon-cheese panel with its Vanuatu deal dialog.
#[derive(Debug)]
pub struct CheeseScene {
    view: CheeseView,
    show_deal: bool,
    deal_accepted: bool,
    error: bool,
    error_reset: Millis,
    timers: TimerGroup<ClearError>,
}

impl CheeseScene {
    pub fn new(now: Millis, error_reset: Millis) -> Self {
        Self {
            view: CheeseView::Cheese,
            show_deal: false,
            deal_accepted: false,
            error: false,
            error_reset,
            timers: TimerGroup::new(now),
        }
    }

    pub fn set_view(&mut self, view: CheeseView) {
        self.view = view;
    }

    pub fn open_deal(&mut self) {
        self.show_deal = true;
    }

    pub fn close_deal(&mut self) {
        self.show_deal = false;
    }

    /// Answer the deal. A wrong answer shows the error for a while.
    pub fn answer(&mut self, answer: DealAnswer) {
        if answer == DealAnswer::Yes {
            self.deal_accepted = true;
            self.error = false;
            return;
        }
        self.error = true;
        self.timers.schedule(self.error_reset, ClearError);
    }

    pub fn advance_to(&mut self, now: Millis) {
        for (_, ClearError) in self.timers.drain_until(now) {
            self.error = false;
        }
    }

    pub fn dispose(&mut self) {
        self.timers.dispose();
    }

    pub fn view(&self) -> CheeseView {
        self.view
    }

    pub fn show_deal(&self) -> bool {
        self.show_deal
    }

    pub fn deal_accepted(&self) -> bool {
        self.deal_accepted
    }

    pub fn error(&self) -> bool {
        self.error
    }
}
