use heartscroll_protocol::{Rect, Viewport};
use serde::{Deserialize, Serialize};

use crate::model::SectionId;

/// Where the tracker reads panel geometry from.
///
/// Rects are viewport-relative. `None` means the panel is not mounted yet.
pub trait AnchorSource {
    fn scroll_y(&self) -> f64;
    fn viewport_height(&self) -> f64;
    fn anchor_rect(&self, id: SectionId) -> Option<Rect>;
}

/// A measured anchor as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub id: SectionId,
    pub rect: Rect,
}

/// A snapshot of host measurements (what a browser reports from
/// `getBoundingClientRect()` and `window.scrollY`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuredLayout {
    pub viewport: Viewport,
    #[serde(default)]
    pub anchors: Vec<Anchor>,
}

impl AnchorSource for MeasuredLayout {
    fn scroll_y(&self) -> f64 {
        self.viewport.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.viewport.height
    }

    fn anchor_rect(&self, id: SectionId) -> Option<Rect> {
        self.anchors.iter().find(|a| a.id == id).map(|a| a.rect)
    }
}

/// Panels stacked top to bottom in document order, with a scroll offset.
///
/// Used by hosts that lay the page out themselves (the terminal presenter)
/// and by tests.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedPage {
    panels: Vec<(SectionId, f64)>,
    width: f64,
    viewport_height: f64,
    scroll_y: f64,
}

impl StackedPage {
    pub fn new(panels: Vec<(SectionId, f64)>, width: f64, viewport_height: f64) -> Self {
        Self {
            panels,
            width,
            viewport_height,
            scroll_y: 0.0,
        }
    }

    /// Every section exactly one viewport tall.
    pub fn uniform(width: f64, viewport_height: f64) -> Self {
        Self::new(
            SectionId::ALL
                .into_iter()
                .map(|id| (id, viewport_height))
                .collect(),
            width,
            viewport_height,
        )
    }

    pub fn total_height(&self) -> f64 {
        self.panels.iter().map(|(_, h)| h).sum()
    }

    pub fn max_scroll(&self) -> f64 {
        (self.total_height() - self.viewport_height).max(0.0)
    }

    /// Set the scroll offset, clamped to the scrollable range.
    pub fn set_scroll(&mut self, y: f64) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    pub fn scroll_by(&mut self, dy: f64) {
        self.set_scroll(self.scroll_y + dy);
    }

    pub fn resize(&mut self, width: f64, viewport_height: f64) {
        self.width = width;
        self.viewport_height = viewport_height;
        self.set_scroll(self.scroll_y);
    }

    /// Document offset of a panel's top edge.
    pub fn doc_top(&self, id: SectionId) -> Option<f64> {
        let mut top = 0.0;
        for (pid, h) in &self.panels {
            if *pid == id {
                return Some(top);
            }
            top += h;
        }
        None
    }

    /// Snapshot as host measurements.
    pub fn measure(&self) -> MeasuredLayout {
        MeasuredLayout {
            viewport: Viewport::new(self.scroll_y, self.width, self.viewport_height),
            anchors: self
                .panels
                .iter()
                .filter_map(|(id, _)| self.anchor_rect(*id).map(|rect| Anchor { id: *id, rect }))
                .collect(),
        }
    }
}

impl AnchorSource for StackedPage {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn anchor_rect(&self, id: SectionId) -> Option<Rect> {
        let top = self.doc_top(id)?;
        let h = self
            .panels
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(_, h)| *h)?;
        Some(Rect::new(0.0, top - self.scroll_y, self.width, h))
    }
}
