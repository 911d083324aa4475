//! Transient notice toasts.
//!
//! Toasts stack at the bottom of the window and auto-dismiss after the
//! configured delay: the fade-out class triggers the stylesheet's opacity
//! transition, then the widget is removed once the transition completes.

use std::rc::Rc;
use std::time::Duration;

use gtk4::glib;
use gtk4::prelude::*;
use gtk4::{Align, Label, Orientation};
use tracing::debug;

use crate::styles::class;

/// Delay between the fade-out class going on and the toast's removal,
/// matching the stylesheet's opacity transition.
const FADE_OUT_MS: u64 = 250;

#[derive(Debug, Clone, Copy)]
pub enum NoticeKind {
    Success,
    Info,
}

impl NoticeKind {
    fn css_class(self) -> &'static str {
        match self {
            NoticeKind::Success => class::NOTICE_SUCCESS,
            NoticeKind::Info => class::NOTICE_INFO,
        }
    }
}

/// Owns the overlay area notices render into.
pub struct ToastHost {
    host: gtk4::Box,
    timeout_ms: u32,
}

impl ToastHost {
    pub fn new(timeout_ms: u32) -> Rc<Self> {
        let host = gtk4::Box::new(Orientation::Vertical, 0);
        host.add_css_class(class::NOTICE_AREA);
        host.set_halign(Align::Center);
        host.set_valign(Align::End);
        // Notices are purely informational; let clicks pass through.
        host.set_can_target(false);

        Rc::new(Self { host, timeout_ms })
    }

    /// The overlay child to add to the window overlay.
    pub fn widget(&self) -> &gtk4::Box {
        &self.host
    }

    /// Show a notice and schedule its auto-dismiss.
    pub fn show(&self, message: &str, kind: NoticeKind) {
        let toast = gtk4::Box::new(Orientation::Horizontal, 8);
        toast.add_css_class(class::NOTICE);
        toast.add_css_class(kind.css_class());

        let label = Label::new(Some(message));
        label.set_wrap(true);
        toast.append(&label);

        self.host.append(&toast);
        debug!("Notice shown: {message}");

        let host = self.host.clone();
        glib::timeout_add_local_once(
            Duration::from_millis(self.timeout_ms as u64),
            move || {
                toast.add_css_class(class::FADE_OUT);

                let host = host.clone();
                let toast = toast.clone();
                glib::timeout_add_local_once(Duration::from_millis(FADE_OUT_MS), move || {
                    if toast.parent().is_some() {
                        host.remove(&toast);
                    }
                });
            },
        );
    }
}
