use serde::{Deserialize, Serialize};

/// Named color sets the core hands to the particle renderer.
///
/// Renderers may resolve a token to their own colors; `colors()` gives the
/// hex values the page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaletteToken {
    /// Red, orange, white and pink of the success overlay.
    Celebration,
    /// Gold and white of the Loki finale.
    SacredGold,
}

impl PaletteToken {
    pub fn colors(self) -> &'static [&'static str] {
        match self {
            PaletteToken::Celebration => &["#ff0000", "#ffa500", "#ffffff", "#ffc0cb"],
            PaletteToken::SacredGold => &["#C9A86A", "#FFD700", "#ffffff"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celebration_has_four_colors() {
        let colors = PaletteToken::Celebration.colors();
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[0], "#ff0000");
    }
}
