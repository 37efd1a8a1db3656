//! Viewport section tracking.
//!
//! The tracker behaves like a browser intersection observer rooted at the
//! viewport with a vertical margin: a panel qualifies once enough of it sits
//! inside the central band, and every qualifying entry of a batch sets the
//! active section in turn. Under fast scroll several panels can qualify in
//! one batch; the last one in panel order wins.

pub mod layout;

use heartscroll_protocol::Rect;
use log::debug;

use crate::config::Tracking;
use crate::model::{NavItem, NavigationState, Panel, SectionId};
use crate::scroll::ScrollRequest;

pub use layout::{Anchor, AnchorSource, MeasuredLayout, StackedPage};

/// One observation result for one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub id: SectionId,
    /// Fraction of the panel's height inside the band.
    pub ratio: f64,
    pub qualifies: bool,
}

#[derive(Debug)]
struct Observed {
    panel: Panel,
    /// `None` until the panel has been measured once.
    qualifying: Option<bool>,
}

#[derive(Debug)]
pub struct Tracker {
    observed: Vec<Observed>,
    tracking: Tracking,
    nav: NavigationState,
}

impl Tracker {
    pub fn new(tracking: Tracking, initial: SectionId) -> Self {
        Self {
            observed: Vec::new(),
            tracking,
            nav: NavigationState::new(initial),
        }
    }

    /// Start observing `panels`. Replaces any previous observation; the next
    /// [`on_layout`](Self::on_layout) reports an entry for every mounted panel.
    pub fn observe(&mut self, panels: &[Panel]) {
        self.observed = panels
            .iter()
            .map(|&panel| Observed {
                panel,
                qualifying: None,
            })
            .collect();
    }

    pub fn is_observing(&self) -> bool {
        !self.observed.is_empty()
    }

    /// Release observation and every subscriber.
    pub fn disconnect(&mut self) {
        self.observed.clear();
        self.nav.clear_listeners();
    }

    pub fn active(&self) -> SectionId {
        self.nav.active()
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    /// Subscribe/unsubscribe access; writes stay inside the tracker.
    pub fn navigation_mut(&mut self) -> &mut NavigationState {
        &mut self.nav
    }

    /// Recompute intersections and apply the resulting entries.
    ///
    /// Returns the batch of entries, in panel order, for panels whose
    /// qualifying state changed since the previous call.
    pub fn on_layout(&mut self, source: &dyn AnchorSource) -> Vec<IntersectionEntry> {
        let height = source.viewport_height();
        let band_top = height * self.tracking.band_margin;
        let band_bottom = height * (1.0 - self.tracking.band_margin);
        let threshold = self.tracking.threshold;

        let mut entries = Vec::new();
        for observed in &mut self.observed {
            let Some(rect) = source.anchor_rect(observed.panel.id) else {
                continue;
            };
            let (ratio, qualifies) = intersect(&rect, band_top, band_bottom, threshold);
            if observed.qualifying == Some(qualifies) {
                continue;
            }
            observed.qualifying = Some(qualifies);
            entries.push(IntersectionEntry {
                id: observed.panel.id,
                ratio,
                qualifies,
            });
        }

        for entry in entries.iter().filter(|e| e.qualifies) {
            if self.nav.active() != entry.id {
                debug!("active section -> {} (ratio {:.2})", entry.id, entry.ratio);
            }
            self.nav.set(entry.id);
        }
        entries
    }

    /// Where to scroll to bring `id` to the top of the viewport.
    ///
    /// `None` when the panel has no anchor yet.
    pub fn navigate_to(&self, id: SectionId, source: &dyn AnchorSource) -> Option<ScrollRequest> {
        let Some(rect) = source.anchor_rect(id) else {
            debug!("navigate_to({id}): anchor not mounted");
            return None;
        };
        Some(ScrollRequest {
            target_y: source.scroll_y() + rect.top(),
        })
    }

    /// Dot navigation entries in display order.
    pub fn nav_items(&self) -> Vec<NavItem> {
        let active = self.nav.active();
        self.observed
            .iter()
            .map(|o| NavItem {
                id: o.panel.id,
                label: o.panel.label,
                active: o.panel.id == active,
            })
            .collect()
    }
}

fn intersect(rect: &Rect, band_top: f64, band_bottom: f64, threshold: f64) -> (f64, bool) {
    if rect.h <= 0.0 {
        return (0.0, false);
    }
    let overlap = rect.vertical_overlap(band_top, band_bottom);
    let ratio = overlap / rect.h;
    (ratio, overlap > 0.0 && ratio >= threshold)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::model::SECTIONS;

    const VH: f64 = 1000.0;

    fn tracker() -> Tracker {
        let mut t = Tracker::new(Tracking::default(), SectionId::Cheese);
        t.observe(&SECTIONS);
        t
    }

    #[test]
    fn initial_batch_reports_every_panel() {
        let mut t = tracker();
        let page = StackedPage::uniform(500.0, VH);
        let entries = t.on_layout(&page);
        assert_eq!(entries.len(), 7);
        assert_eq!(entries.iter().filter(|e| e.qualifies).count(), 1);
        assert_eq!(t.active(), SectionId::Cheese);
    }

    #[test]
    fn unchanged_layout_produces_no_entries() {
        let mut t = tracker();
        let page = StackedPage::uniform(500.0, VH);
        t.on_layout(&page);
        assert!(t.on_layout(&page).is_empty());
    }

    #[test]
    fn threshold_is_inclusive() {
        // Band is [200, 800]. A 1000px panel with exactly 200px inside the
        // band sits at the 0.2 threshold.
        let rect = Rect::new(0.0, 600.0, 10.0, 1000.0);
        let (ratio, qualifies) = intersect(&rect, 200.0, 800.0, 0.2);
        assert!((ratio - 0.2).abs() < 1e-12);
        assert!(qualifies);

        let rect = Rect::new(0.0, 601.0, 10.0, 1000.0);
        assert!(!intersect(&rect, 200.0, 800.0, 0.2).1);
    }

    #[test]
    fn zero_height_anchor_never_qualifies() {
        let rect = Rect::new(0.0, 500.0, 10.0, 0.0);
        assert_eq!(intersect(&rect, 200.0, 800.0, 0.0), (0.0, false));
    }

    #[test]
    fn scrolling_moves_active_section() {
        let mut t = tracker();
        let mut page = StackedPage::uniform(500.0, VH);
        t.on_layout(&page);

        page.set_scroll(3.0 * VH);
        t.on_layout(&page);
        assert_eq!(t.active(), SectionId::Nerd);

        page.set_scroll(VH);
        t.on_layout(&page);
        assert_eq!(t.active(), SectionId::Paramedic);
    }

    #[test]
    fn last_qualifying_entry_wins() {
        let mut t = tracker();
        // Short panels: two of them sit inside the band at once.
        let page = StackedPage::new(
            vec![
                (SectionId::Cheese, 300.0),
                (SectionId::Paramedic, 300.0),
                (SectionId::Faith, 300.0),
            ],
            500.0,
            VH,
        );
        let entries = t.on_layout(&page);
        let qualifying: Vec<_> = entries
            .iter()
            .filter(|e| e.qualifies)
            .map(|e| e.id)
            .collect();
        assert_eq!(
            qualifying,
            vec![SectionId::Cheese, SectionId::Paramedic, SectionId::Faith]
        );
        assert_eq!(t.active(), SectionId::Faith);
    }

    #[test]
    fn active_is_always_an_observed_id() {
        let mut t = tracker();
        let mut page = StackedPage::uniform(500.0, VH);
        for step in 0..200 {
            page.set_scroll(f64::from(step) * 37.0);
            t.on_layout(&page);
            assert!(SECTIONS.iter().any(|p| p.id == t.active()));
        }
    }

    #[test]
    fn navigate_to_computes_document_offset() {
        let t = tracker();
        let mut page = StackedPage::uniform(500.0, VH);
        page.set_scroll(250.0);
        let req = t.navigate_to(SectionId::Marcus, &page);
        assert_eq!(req, Some(ScrollRequest { target_y: 4.0 * VH }));
    }

    #[test]
    fn navigate_to_unmounted_is_noop() {
        let t = tracker();
        let page = StackedPage::new(vec![(SectionId::Cheese, VH)], 500.0, VH);
        assert!(t.navigate_to(SectionId::Finale, &page).is_none());
    }

    #[test]
    fn navigation_settles_on_target() {
        let mut t = tracker();
        let mut page = StackedPage::uniform(500.0, VH);
        t.on_layout(&page);
        for id in [SectionId::Finale, SectionId::Faith, SectionId::Gallery] {
            let Some(req) = t.navigate_to(id, &page) else {
                unreachable!("all panels are mounted");
            };
            page.set_scroll(req.target_y);
            t.on_layout(&page);
            assert_eq!(t.active(), id);
        }
    }

    #[test]
    fn disconnect_stops_updates_and_listeners() {
        let calls = Rc::new(RefCell::new(0));
        let mut t = tracker();
        let c = Rc::clone(&calls);
        t.navigation_mut().subscribe(move |_| *c.borrow_mut() += 1);

        let mut page = StackedPage::uniform(500.0, VH);
        t.on_layout(&page);
        t.disconnect();
        assert!(!t.is_observing());

        page.set_scroll(5.0 * VH);
        assert!(t.on_layout(&page).is_empty());
        assert_eq!(t.active(), SectionId::Cheese);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn nav_items_mark_active() {
        let mut t = tracker();
        let mut page = StackedPage::uniform(500.0, VH);
        page.set_scroll(2.0 * VH);
        t.on_layout(&page);
        let items = t.nav_items();
        assert_eq!(items.len(), 7);
        let active: Vec<_> = items.iter().filter(|i| i.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, SectionId::Faith);
        assert_eq!(items[3].label, "Movies and stuff");
    }
}
