pub const VIBE_QUOTES: &[&str] = &[
    "Your eyes. Like shiny buttons. Mildly irritating how cute.",
    "You're like rigatoni pasta. Twisty. Interesting. Don't make me commit a home invasion.",
    "Your vibe? Extra. Like me. Quite irritated I didn't notice sooner.",
    "I love your drama, baby. Robert help, I'm falling.",
    "This distance? It's pissing me off. In a good way.",
    "You are mildly irritating me with how beautiful you are.",
    "Stop looking at me like that. I am Marcus.",
];

/// Vibe-check button cycling through quotes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarcusScene {
    index: Option<usize>,
}

impl MarcusScene {
    pub fn vibe_check(&mut self) -> &'static str {
        let next = self.index.map_or(0, |i| (i + 1) % VIBE_QUOTES.len());
        self.index = Some(next);
        VIBE_QUOTES[next]
    }

    pub fn quote(&self) -> Option<&'static str> {
        self.index.map(|i| VIBE_QUOTES[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_and_wraps() {
        let mut s = MarcusScene::default();
        assert!(s.quote().is_none());
        let first = s.vibe_check();
        assert_eq!(first, VIBE_QUOTES[0]);
        for _ in 1..VIBE_QUOTES.len() {
            s.vibe_check();
        }
        assert_eq!(s.quote(), Some(VIBE_QUOTES[6]));
        assert_eq!(s.vibe_check(), VIBE_QUOTES[0]);
    }
}
