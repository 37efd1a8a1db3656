use std::str::FromStr;

use log::debug;
use serde::Serialize;

use crate::Millis;
use crate::config::Timing;
use crate::error::DeckError;
use crate::sequencer::{LokiFlag, StagedReveal};
use crate::sink::EffectSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    Art,
    Lotr,
    Hunger,
    Loki,
}

impl SceneKind {
    pub const ALL: [SceneKind; 4] = [
        SceneKind::Art,
        SceneKind::Lotr,
        SceneKind::Hunger,
        SceneKind::Loki,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SceneKind::Art => "The Creative Spark",
            SceneKind::Lotr => "The Elven Realm",
            SceneKind::Hunger => "The Revolution",
            SceneKind::Loki => "The Timeline",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            SceneKind::Art => "art",
            SceneKind::Lotr => "lotr",
            SceneKind::Hunger => "hunger",
            SceneKind::Loki => "loki",
        }
    }
}

impl FromStr for SceneKind {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SceneKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| DeckError::UnknownScene(s.to_string()))
    }
}

/// The scene on stage. Only the Loki scene carries a sequencer.
#[derive(Debug)]
pub enum Stage {
    Static(SceneKind),
    Loki(StagedReveal<LokiFlag>),
}

impl Stage {
    pub fn kind(&self) -> SceneKind {
        match self {
            Stage::Static(kind) => *kind,
            Stage::Loki(_) => SceneKind::Loki,
        }
    }
}

/// Carousel of movie scenes on the "Movies and stuff" panel.
#[derive(Debug)]
pub struct NerdScene {
    index: usize,
    stage: Stage,
    timing: Timing,
}

impl NerdScene {
    pub fn new(timing: &Timing) -> Self {
        Self {
            index: 0,
            stage: Stage::Static(SceneKind::ALL[0]),
            timing: timing.clone(),
        }
    }

    pub fn next(&mut self, now: Millis) {
        self.select((self.index + 1) % SceneKind::ALL.len(), now);
    }

    pub fn prev(&mut self, now: Millis) {
        let n = SceneKind::ALL.len();
        self.select((self.index + n - 1) % n, now);
    }

    /// Put scene `index` on stage. Out-of-range indices and the scene
    /// already on stage are ignored.
    ///
    /// Entering Loki starts its reveal from zero.
    pub fn select(&mut self, index: usize, now: Millis) {
        if index == self.index {
            return;
        }
        let Some(&kind) = SceneKind::ALL.get(index) else {
            return;
        };
        if let Stage::Loki(reveal) = &mut self.stage {
            reveal.deactivate();
        }
        self.index = index;
        self.stage = match kind {
            SceneKind::Loki => {
                let mut reveal = StagedReveal::loki(&self.timing);
                reveal.activate(now);
                Stage::Loki(reveal)
            }
            other => Stage::Static(other),
        };
        debug!("nerd scene -> {}", kind.label());
    }

    pub fn select_kind(&mut self, kind: SceneKind, now: Millis) {
        if let Some(i) = SceneKind::ALL.iter().position(|k| *k == kind) {
            self.select(i, now);
        }
    }

    pub fn advance_to(&mut self, now: Millis, sink: &mut dyn EffectSink) {
        if let Stage::Loki(reveal) = &mut self.stage {
            reveal.advance_to(now, sink);
        }
    }

    pub fn dispose(&mut self) {
        if let Stage::Loki(reveal) = &mut self.stage {
            reveal.deactivate();
        }
    }

    pub fn current(&self) -> SceneKind {
        self.stage.kind()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// A Loki flag; always off for other scenes.
    pub fn flag(&self, flag: LokiFlag) -> bool {
        match &self.stage {
            Stage::Loki(reveal) => reveal.flag(flag),
            Stage::Static(_) => false,
        }
    }
}
