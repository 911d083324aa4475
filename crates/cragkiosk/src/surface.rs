//! GTK implementation of the core's view surface.
//!
//! The kiosk registers named widgets here once at startup; the core's
//! state objects then address them by name only. A name with no
//! registration is a silent no-op: the feature simply isn't present on
//! the current markup.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{ApplicationWindow, Label, ScrolledWindow};
use tracing::debug;

use cragkiosk_core::ViewSurface;
use cragkiosk_core::surface::state;
use cragkiosk_core::theme::ThemeMode;

use crate::styles::field;

/// The editable widget behind a registered form field.
pub enum FieldControl {
    Entry(gtk4::Entry),
    Multiline(gtk4::TextView),
}

impl FieldControl {
    pub fn widget(&self) -> gtk4::Widget {
        match self {
            FieldControl::Entry(entry) => entry.clone().upcast(),
            FieldControl::Multiline(view) => view.clone().upcast(),
        }
    }

    pub fn clear(&self) {
        match self {
            FieldControl::Entry(entry) => entry.set_text(""),
            FieldControl::Multiline(view) => view.buffer().set_text(""),
        }
    }
}

struct FieldEntry {
    control: FieldControl,
    /// Row container the error label is appended to.
    holder: gtk4::Box,
    /// Error label, created once on first failure and re-used after.
    error_label: RefCell<Option<Label>>,
}

/// Maps core state onto the GTK widget tree.
pub struct KioskSurface {
    window: ApplicationWindow,
    scroller: ScrolledWindow,
    /// A name can map to several widgets: nav links render both in the
    /// inline row and in the hamburger panel.
    widgets: RefCell<HashMap<String, Vec<gtk4::Widget>>>,
    /// Targets whose `open` class also drives widget visibility.
    collapsibles: RefCell<HashSet<String>>,
    fields: RefCell<HashMap<String, FieldEntry>>,
    scroll_locked: Cell<bool>,
    locked_at: Cell<f64>,
}

impl KioskSurface {
    pub fn new(window: ApplicationWindow, scroller: ScrolledWindow) -> Rc<Self> {
        let surface = Rc::new(Self {
            window,
            scroller: scroller.clone(),
            widgets: RefCell::new(HashMap::new()),
            collapsibles: RefCell::new(HashSet::new()),
            fields: RefCell::new(HashMap::new()),
            scroll_locked: Cell::new(false),
            locked_at: Cell::new(0.0),
        });

        // Enforce the scroll lock by snapping the adjustment back to the
        // value it had when the lock was engaged.
        let adjustment = scroller.vadjustment();
        let surface_weak = Rc::downgrade(&surface);
        adjustment.connect_value_changed(move |adj| {
            let Some(surface) = surface_weak.upgrade() else {
                return;
            };
            if surface.scroll_locked.get() {
                let locked_at = surface.locked_at.get();
                if (adj.value() - locked_at).abs() > f64::EPSILON {
                    adj.set_value(locked_at);
                }
            }
        });

        surface
    }

    /// Register a named widget.
    pub fn register(&self, name: &str, widget: &impl IsA<gtk4::Widget>) {
        self.widgets
            .borrow_mut()
            .entry(name.to_string())
            .or_default()
            .push(widget.clone().upcast());
    }

    /// Register a named widget whose `open` class also drives visibility.
    ///
    /// GTK cannot hide widgets from CSS alone, so panels that the core
    /// opens and closes (menu, dropdowns, modals, sidebar) start hidden
    /// and are shown whenever the `open` class goes on.
    pub fn register_collapsible(&self, name: &str, widget: &impl IsA<gtk4::Widget>) {
        widget.as_ref().set_visible(false);
        self.collapsibles.borrow_mut().insert(name.to_string());
        self.register(name, widget);
    }

    /// Register a form field: its editable control and the row container
    /// its error label renders into.
    pub fn register_field(&self, name: &str, control: FieldControl, holder: &gtk4::Box) {
        self.fields.borrow_mut().insert(
            name.to_string(),
            FieldEntry {
                control,
                holder: holder.clone(),
                error_label: RefCell::new(None),
            },
        );
    }
}

impl ViewSurface for KioskSurface {
    fn set_class(&self, target: &str, class: &str, on: bool) {
        let widgets = self.widgets.borrow();
        let Some(instances) = widgets.get(target) else {
            debug!("No element '{target}' registered, skipping class '{class}'");
            return;
        };

        let collapsible =
            class == state::OPEN && self.collapsibles.borrow().contains(target);

        for widget in instances {
            if on {
                widget.add_css_class(class);
            } else {
                widget.remove_css_class(class);
            }
            if collapsible {
                widget.set_visible(on);
            }
        }
    }

    fn set_root_theme(&self, mode: ThemeMode) {
        self.window.remove_css_class(ThemeMode::Light.root_class());
        self.window.remove_css_class(ThemeMode::Dark.root_class());
        self.window.add_css_class(mode.root_class());
    }

    fn set_glyph(&self, target: &str, icon_name: &str) {
        let widgets = self.widgets.borrow();
        let Some(instances) = widgets.get(target) else {
            debug!("No element '{target}' registered, skipping glyph");
            return;
        };
        for widget in instances {
            match widget.downcast_ref::<gtk4::Image>() {
                Some(image) => image.set_icon_name(Some(icon_name)),
                None => debug!("Element '{target}' is not an image, skipping glyph"),
            }
        }
    }

    fn set_scroll_lock(&self, locked: bool) {
        if locked && !self.scroll_locked.get() {
            self.locked_at.set(self.scroller.vadjustment().value());
        }
        self.scroll_locked.set(locked);
    }

    fn set_field_error(&self, field_name: &str, message: Option<&str>) {
        let fields = self.fields.borrow();
        let Some(entry) = fields.get(field_name) else {
            debug!("No field '{field_name}' registered, skipping error");
            return;
        };

        match message {
            Some(text) => {
                entry.control.widget().add_css_class(field::ERROR);

                let mut slot = entry.error_label.borrow_mut();
                let label = slot.get_or_insert_with(|| {
                    let label = Label::new(None);
                    label.add_css_class(field::ERROR_LABEL);
                    label.set_xalign(0.0);
                    label.set_wrap(true);
                    label
                });
                label.set_label(text);
                if label.parent().is_none() {
                    entry.holder.append(label);
                }
            }
            None => {
                entry.control.widget().remove_css_class(field::ERROR);
                if let Some(label) = entry.error_label.borrow().as_ref()
                    && label.parent().is_some()
                {
                    entry.holder.remove(label);
                }
            }
        }
    }

    fn reset_field(&self, field_name: &str) {
        let fields = self.fields.borrow();
        let Some(entry) = fields.get(field_name) else {
            return;
        };
        entry.control.clear();
    }

    fn element_top(&self, target: &str) -> Option<f64> {
        let widgets = self.widgets.borrow();
        let widget = widgets.get(target)?.first()?;
        let bounds = widget.compute_bounds(&self.scroller)?;
        Some(bounds.y() as f64)
    }

    fn viewport_width(&self) -> f64 {
        let width = self.window.width();
        if width > 0 {
            width as f64
        } else {
            self.window.default_width() as f64
        }
    }

    fn viewport_height(&self) -> f64 {
        let height = self.scroller.height();
        if height > 0 {
            height as f64
        } else {
            self.window.default_height() as f64
        }
    }

    fn scroll_offset(&self) -> f64 {
        self.scroller.vadjustment().value()
    }
}
