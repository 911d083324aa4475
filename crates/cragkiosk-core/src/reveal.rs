//! One-way reveal of page sections as they scroll into view.

use std::cell::RefCell;
use std::rc::Rc;

use crate::surface::{ViewSurface, state};

struct RevealEntry {
    target: String,
    revealed: bool,
}

/// Tracks annotated sections and reveals each once it enters the viewport.
///
/// Membership is fixed after startup; the revealed flag only ever moves
/// from false to true. The actual transition animation is the stylesheet's
/// business, triggered by the `revealed` class appearing.
pub struct RevealTracker {
    surface: Rc<dyn ViewSurface>,
    offset: f64,
    entries: RefCell<Vec<RevealEntry>>,
}

impl RevealTracker {
    pub fn new(surface: Rc<dyn ViewSurface>, offset: f64) -> Rc<Self> {
        Rc::new(Self {
            surface,
            offset,
            entries: RefCell::new(Vec::new()),
        })
    }

    /// Register an element at startup.
    pub fn track(&self, target: &str) {
        self.entries.borrow_mut().push(RevealEntry {
            target: target.to_string(),
            revealed: false,
        });
    }

    pub fn is_revealed(&self, target: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|entry| entry.target == target && entry.revealed)
    }

    /// Evaluate every unrevealed entry against the current viewport.
    ///
    /// Called on every scroll event and once at startup. Elements the
    /// surface cannot locate are skipped.
    pub fn on_scroll(&self) {
        let viewport_height = self.surface.viewport_height();
        let threshold = viewport_height - self.offset;

        for entry in self.entries.borrow_mut().iter_mut() {
            if entry.revealed {
                continue;
            }
            let Some(top) = self.surface.element_top(&entry.target) else {
                continue;
            };
            if top < threshold {
                entry.revealed = true;
                self.surface.set_class(&entry.target, state::REVEALED, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::RecordingSurface;

    #[test]
    fn test_element_in_viewport_is_revealed() {
        let surface = RecordingSurface::new();
        surface.height.set(800.0);
        let tracker = RevealTracker::new(surface.clone(), 150.0);
        tracker.track("section-walls");
        surface.set_top("section-walls", 600.0);

        tracker.on_scroll();
        assert!(tracker.is_revealed("section-walls"));
        assert!(surface.class_on("section-walls", "revealed"));
    }

    #[test]
    fn test_element_below_threshold_stays_hidden() {
        let surface = RecordingSurface::new();
        surface.height.set(800.0);
        let tracker = RevealTracker::new(surface.clone(), 150.0);
        tracker.track("section-walls");
        // 800 - 150 = 650; a top of 700 is still below the threshold line.
        surface.set_top("section-walls", 700.0);

        tracker.on_scroll();
        assert!(!tracker.is_revealed("section-walls"));
    }

    #[test]
    fn test_reveal_is_monotonic() {
        let surface = RecordingSurface::new();
        surface.height.set(800.0);
        let tracker = RevealTracker::new(surface.clone(), 150.0);
        tracker.track("section-walls");

        surface.set_top("section-walls", 100.0);
        tracker.on_scroll();
        assert!(tracker.is_revealed("section-walls"));

        // Scrolled back up: the element is far below the viewport again,
        // but the revealed flag never reverts.
        surface.set_top("section-walls", 2000.0);
        tracker.on_scroll();
        assert!(tracker.is_revealed("section-walls"));
        assert!(surface.class_on("section-walls", "revealed"));
    }

    #[test]
    fn test_missing_element_is_skipped() {
        let surface = RecordingSurface::new();
        let tracker = RevealTracker::new(surface.clone(), 150.0);
        tracker.track("section-ghost");

        // No top registered for the target; must not reveal or panic.
        tracker.on_scroll();
        assert!(!tracker.is_revealed("section-ghost"));
    }

    #[test]
    fn test_entries_reveal_independently() {
        let surface = RecordingSurface::new();
        surface.height.set(800.0);
        let tracker = RevealTracker::new(surface.clone(), 150.0);
        tracker.track("section-a");
        tracker.track("section-b");

        surface.set_top("section-a", 100.0);
        surface.set_top("section-b", 900.0);
        tracker.on_scroll();

        assert!(tracker.is_revealed("section-a"));
        assert!(!tracker.is_revealed("section-b"));

        surface.set_top("section-b", 400.0);
        tracker.on_scroll();
        assert!(tracker.is_revealed("section-b"));
    }
}
