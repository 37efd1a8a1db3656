/// Blurred cards that unblur on hover or tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaithScene {
    revealed: Vec<bool>,
}

impl FaithScene {
    pub const CARDS: usize = 2;

    pub fn new() -> Self {
        Self {
            revealed: vec![false; Self::CARDS],
        }
    }

    pub fn hover(&mut self, card: usize, inside: bool) {
        if let Some(r) = self.revealed.get_mut(card) {
            *r = inside;
        }
    }

    pub fn toggle(&mut self, card: usize) {
        if let Some(r) = self.revealed.get_mut(card) {
            *r = !*r;
        }
    }

    pub fn is_revealed(&self, card: usize) -> bool {
        self.revealed.get(card).copied().unwrap_or(false)
    }
}

impl Default for FaithScene {
    fn default() -> Self {
        Self::new()
    }
}
