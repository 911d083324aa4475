//! Named modal overlays: open/close, backdrop clicks, Escape.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::surface::{ViewSurface, state};

/// Tracks every registered modal overlay by identifier.
///
/// The UI convention opens one modal at a time, but the tracker itself does
/// not enforce it; any subset may be flagged open. Closing a modal releases
/// the scroll lock unconditionally, even when another modal is still open
/// (see DESIGN.md).
pub struct ModalTracker {
    surface: Rc<dyn ViewSurface>,
    modals: RefCell<Vec<(String, bool)>>,
}

impl ModalTracker {
    pub fn new(surface: Rc<dyn ViewSurface>) -> Rc<Self> {
        Rc::new(Self {
            surface,
            modals: RefCell::new(Vec::new()),
        })
    }

    /// Register a modal at startup.
    pub fn register(&self, id: &str) {
        self.modals.borrow_mut().push((id.to_string(), false));
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.modals
            .borrow()
            .iter()
            .any(|(modal_id, open)| modal_id == id && *open)
    }

    pub fn any_open(&self) -> bool {
        self.modals.borrow().iter().any(|(_, open)| *open)
    }

    /// Open the modal with the given id and lock page scroll.
    ///
    /// Unknown ids are a silent no-op.
    pub fn open(&self, id: &str) {
        let mut modals = self.modals.borrow_mut();
        let Some(entry) = modals.iter_mut().find(|(modal_id, _)| modal_id == id) else {
            debug!("Unknown modal '{id}', ignoring open request");
            return;
        };

        entry.1 = true;
        self.surface.set_class(id, state::OPEN, true);
        self.surface.set_scroll_lock(true);
    }

    /// Close the modal with the given id.
    ///
    /// Releases the scroll lock without checking whether another modal is
    /// still open. Already-closed (or unknown) ids are a no-op.
    pub fn close(&self, id: &str) {
        let mut modals = self.modals.borrow_mut();
        let Some(entry) = modals
            .iter_mut()
            .find(|(modal_id, open)| modal_id == id && *open)
        else {
            return;
        };

        entry.1 = false;
        self.surface.set_class(id, state::OPEN, false);
        self.surface.set_scroll_lock(false);
    }

    /// Close every tracked modal.
    pub fn close_all(&self) {
        let ids: Vec<String> = self
            .modals
            .borrow()
            .iter()
            .map(|(id, _)| id.clone())
            .collect();
        for id in ids {
            self.close(&id);
        }
    }

    /// A press landed on the modal overlay.
    ///
    /// Only a press on the backdrop itself (not a descendant of the dialog
    /// card) closes the modal.
    pub fn backdrop_pressed(&self, id: &str, on_backdrop: bool) {
        if on_backdrop {
            self.close(id);
        }
    }

    /// A global Escape keypress closes all modals, open or not.
    pub fn escape_pressed(&self) {
        self.close_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::RecordingSurface;

    fn sample_tracker(surface: &Rc<RecordingSurface>) -> Rc<ModalTracker> {
        let tracker = ModalTracker::new(surface.clone());
        tracker.register("modal-daypass");
        tracker.register("modal-login");
        tracker
    }

    #[test]
    fn test_open_marks_modal_and_locks_scroll() {
        let surface = RecordingSurface::new();
        let tracker = sample_tracker(&surface);

        tracker.open("modal-daypass");
        assert!(tracker.is_open("modal-daypass"));
        assert!(surface.class_on("modal-daypass", "open"));
        assert!(surface.scroll_locked.get());
    }

    #[test]
    fn test_open_unknown_id_is_noop() {
        let surface = RecordingSurface::new();
        let tracker = sample_tracker(&surface);

        tracker.open("modal-ghost");
        assert!(!tracker.any_open());
        assert!(!surface.scroll_locked.get());
    }

    #[test]
    fn test_close_releases_scroll_even_with_another_modal_open() {
        let surface = RecordingSurface::new();
        let tracker = sample_tracker(&surface);

        tracker.open("modal-daypass");
        tracker.open("modal-login");
        tracker.close("modal-login");

        // modal-daypass is still open, yet the lock is gone.
        assert!(tracker.is_open("modal-daypass"));
        assert!(!surface.scroll_locked.get());
    }

    #[test]
    fn test_backdrop_press_closes_only_on_backdrop_itself() {
        let surface = RecordingSurface::new();
        let tracker = sample_tracker(&surface);

        tracker.open("modal-daypass");
        tracker.backdrop_pressed("modal-daypass", false);
        assert!(tracker.is_open("modal-daypass"));

        tracker.backdrop_pressed("modal-daypass", true);
        assert!(!tracker.is_open("modal-daypass"));
    }

    #[test]
    fn test_escape_closes_all_open_modals() {
        let surface = RecordingSurface::new();
        let tracker = sample_tracker(&surface);

        tracker.open("modal-daypass");
        tracker.open("modal-login");

        tracker.escape_pressed();
        assert!(!tracker.is_open("modal-daypass"));
        assert!(!tracker.is_open("modal-login"));
        assert!(!tracker.any_open());
    }

    #[test]
    fn test_escape_with_nothing_open_changes_nothing() {
        let surface = RecordingSurface::new();
        let tracker = sample_tracker(&surface);

        tracker.escape_pressed();
        assert!(!tracker.any_open());
        assert!(!surface.scroll_locked.get());
    }

    #[test]
    fn test_close_is_idempotent() {
        let surface = RecordingSurface::new();
        let tracker = sample_tracker(&surface);

        tracker.open("modal-login");
        tracker.close("modal-login");
        tracker.close("modal-login");
        assert!(!tracker.is_open("modal-login"));
    }
}
