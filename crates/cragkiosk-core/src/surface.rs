//! Rendering seam between the view-state objects and the widget tree.
//!
//! Coordinating objects never touch widgets directly. They address elements
//! by registered name through [`ViewSurface`] and express every presentation
//! change as a class toggle, glyph swap, or scroll-lock request. The shell
//! decides how those map onto real widgets; tests substitute a recording
//! implementation.
//!
//! A name the surface does not know is always a silent no-op: a missing
//! element means "feature not present on this page", never an error.

use crate::theme::ThemeMode;

/// CSS state classes toggled through the surface.
///
/// The shell's stylesheet keys off these; the shell may additionally map
/// some of them onto widget visibility (e.g. `open` on a collapsed panel).
pub mod state {
    /// An overlay (menu panel, dropdown, modal, sidebar) is open.
    pub const OPEN: &str = "open";
    /// The nav/sidebar link matching the current location.
    pub const ACTIVE: &str = "active";
    /// A reveal section that has entered the viewport.
    pub const REVEALED: &str = "revealed";
    /// The nav bar's elevated shadow while the page is scrolled.
    pub const ELEVATED: &str = "elevated";
}

/// Registered element names shared between the core and the shell.
pub mod target {
    pub const NAVBAR: &str = "navbar";
    pub const NAV_MENU: &str = "nav-menu";
    pub const NAV_TOGGLE: &str = "nav-toggle";
    pub const THEME_ICON: &str = "theme-icon";
    pub const SIDEBAR: &str = "sidebar";
    pub const FILTER_PANEL: &str = "filter-panel";
}

/// Capabilities the view-state objects need from the execution environment.
pub trait ViewSurface {
    /// Toggle a CSS class on the named element.
    fn set_class(&self, target: &str, class: &str, on: bool);

    /// Mirror the theme mode onto the window root for stylesheet consumption.
    fn set_root_theme(&self, mode: ThemeMode);

    /// Swap the icon glyph shown by the named element.
    fn set_glyph(&self, target: &str, icon_name: &str);

    /// Engage or release the page scroll lock.
    fn set_scroll_lock(&self, locked: bool);

    /// Render (`Some`) or clear (`None`) the error attached to a form field.
    fn set_field_error(&self, field: &str, message: Option<&str>);

    /// Reset a form field to its empty value.
    fn reset_field(&self, field: &str);

    /// Top edge of the named element relative to the viewport, if present.
    fn element_top(&self, target: &str) -> Option<f64>;

    /// Current window width in logical pixels.
    fn viewport_width(&self) -> f64;

    /// Height of the scrollable viewport in logical pixels.
    fn viewport_height(&self) -> f64;

    /// Current vertical scroll offset of the page.
    fn scroll_offset(&self) -> f64;
}
