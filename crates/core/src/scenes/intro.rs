use crate::Millis;
use crate::config::DeckConfig;
use crate::sequencer::Typewriter;

/// Full-screen typing intro shown on top of the page until it completes
/// or is skipped.
#[derive(Debug)]
pub struct IntroOverlay {
    typewriter: Typewriter,
}

impl IntroOverlay {
    pub fn mount(config: &DeckConfig, now: Millis) -> Self {
        let mut typewriter = Typewriter::new(config.intro_lines.clone(), &config.timing);
        typewriter.start(now);
        Self { typewriter }
    }

    pub fn advance_to(&mut self, now: Millis) {
        self.typewriter.advance_to(now);
    }

    pub fn skip(&mut self) {
        self.typewriter.skip();
    }

    pub fn dispose(&mut self) {
        self.typewriter.dispose();
    }

    pub fn is_visible(&self) -> bool {
        !self.typewriter.is_complete()
    }

    pub fn text(&self) -> &str {
        self.typewriter.text()
    }

    pub fn line_index(&self) -> usize {
        self.typewriter.line_index()
    }
}
