use std::fmt;

use crate::model::panel::SectionId;

/// Handle returned by [`NavigationState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(SectionId)>;

/// Single-writer cell holding the active section.
///
/// Only the tracker writes (the setter is crate-private); everyone else
/// reads through [`active`](Self::active) or subscribes.
pub struct NavigationState {
    active: SectionId,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl NavigationState {
    pub fn new(initial: SectionId) -> Self {
        Self {
            active: initial,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn active(&self) -> SectionId {
        self.active
    }

    /// Register a listener called with the new value on every change.
    pub fn subscribe(&mut self, listener: impl FnMut(SectionId) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn set(&mut self, id: SectionId) {
        if self.active == id {
            return;
        }
        self.active = id;
        for (_, listener) in &mut self.listeners {
            listener(id);
        }
    }

    pub(crate) fn clear_listeners(&mut self) {
        self.listeners.clear();
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(SectionId::Cheese)
    }
}

impl fmt::Debug for NavigationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationState")
            .field("active", &self.active)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
