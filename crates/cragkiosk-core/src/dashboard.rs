//! Dashboard sidebar and filter-panel state.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::DashboardConfig;
use crate::surface::{ViewSurface, state, target};

/// A link in the dashboard sidebar.
#[derive(Debug, Clone)]
pub struct SidebarLink {
    pub slug: String,
    pub href: String,
}

impl SidebarLink {
    pub fn new(slug: &str, href: &str) -> Self {
        Self {
            slug: slug.to_string(),
            href: href.to_string(),
        }
    }

    pub fn link_target(&self) -> String {
        format!("sidebar-link-{}", self.slug)
    }
}

/// Two independent open/closed flags for the dashboard's overlay panels.
///
/// Unlike the nav menu, neither panel locks scroll, and active-link
/// highlighting here has no home-page fallback: an empty segment matches
/// nothing.
pub struct DashboardPanels {
    surface: Rc<dyn ViewSurface>,
    links: Vec<SidebarLink>,
    collapse_breakpoint: f64,
    sidebar_open: Cell<bool>,
    filter_open: Cell<bool>,
}

impl DashboardPanels {
    pub fn new(
        surface: Rc<dyn ViewSurface>,
        links: Vec<SidebarLink>,
        dashboard: &DashboardConfig,
    ) -> Rc<Self> {
        Rc::new(Self {
            surface,
            links,
            collapse_breakpoint: dashboard.collapse_breakpoint as f64,
            sidebar_open: Cell::new(false),
            filter_open: Cell::new(false),
        })
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open.get()
    }

    pub fn filter_open(&self) -> bool {
        self.filter_open.get()
    }

    pub fn toggle_sidebar(&self) {
        let open = !self.sidebar_open.get();
        self.sidebar_open.set(open);
        self.surface.set_class(target::SIDEBAR, state::OPEN, open);
    }

    pub fn toggle_filter(&self) {
        let open = !self.filter_open.get();
        self.filter_open.set(open);
        self.surface.set_class(target::FILTER_PANEL, state::OPEN, open);
    }

    /// A press landed on the page; close overlaid panels it missed.
    ///
    /// Only applies when the window is narrow enough for the panels to
    /// overlay content. "Inside" includes each panel's toggle control.
    pub fn outside_click(&self, inside_sidebar: bool, inside_filter: bool) {
        if self.surface.viewport_width() > self.collapse_breakpoint {
            return;
        }
        if self.sidebar_open.get() && !inside_sidebar {
            self.sidebar_open.set(false);
            self.surface.set_class(target::SIDEBAR, state::OPEN, false);
        }
        if self.filter_open.get() && !inside_filter {
            self.filter_open.set(false);
            self.surface.set_class(target::FILTER_PANEL, state::OPEN, false);
        }
    }

    /// Re-evaluate sidebar active-link highlighting.
    ///
    /// Exact final-segment match only; an empty segment de-marks everything.
    pub fn highlight_active(&self, path: &str) {
        let segment = path.rsplit('/').next().unwrap_or(path);

        for link in &self.links {
            let href_segment = link.href.rsplit('/').next().unwrap_or(&link.href);
            let is_active = !segment.is_empty() && href_segment == segment;
            self.surface
                .set_class(&link.link_target(), state::ACTIVE, is_active);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::RecordingSurface;

    fn sample_panels(surface: &Rc<RecordingSurface>) -> Rc<DashboardPanels> {
        DashboardPanels::new(
            surface.clone(),
            vec![
                SidebarLink::new("overview", "dashboard"),
                SidebarLink::new("routes", "routes"),
                SidebarLink::new("visits", "visits"),
            ],
            &crate::config::DashboardConfig::default(),
        )
    }

    #[test]
    fn test_panels_toggle_independently() {
        let surface = RecordingSurface::new();
        let panels = sample_panels(&surface);

        panels.toggle_sidebar();
        assert!(panels.sidebar_open());
        assert!(!panels.filter_open());
        assert!(surface.class_on("sidebar", "open"));

        panels.toggle_filter();
        assert!(panels.sidebar_open());
        assert!(panels.filter_open());

        panels.toggle_sidebar();
        assert!(!panels.sidebar_open());
        assert!(panels.filter_open());
    }

    #[test]
    fn test_outside_click_closes_both_when_narrow() {
        let surface = RecordingSurface::new();
        surface.width.set(700.0);
        let panels = sample_panels(&surface);

        panels.toggle_sidebar();
        panels.toggle_filter();
        panels.outside_click(false, false);

        assert!(!panels.sidebar_open());
        assert!(!panels.filter_open());
    }

    #[test]
    fn test_outside_click_ignored_when_wide() {
        let surface = RecordingSurface::new();
        surface.width.set(1200.0);
        let panels = sample_panels(&surface);

        panels.toggle_sidebar();
        panels.outside_click(false, false);
        assert!(panels.sidebar_open());
    }

    #[test]
    fn test_outside_click_spares_the_panel_hit() {
        let surface = RecordingSurface::new();
        surface.width.set(700.0);
        let panels = sample_panels(&surface);

        panels.toggle_sidebar();
        panels.toggle_filter();
        panels.outside_click(true, false);

        assert!(panels.sidebar_open());
        assert!(!panels.filter_open());
    }

    #[test]
    fn test_highlight_active_exact_match() {
        let surface = RecordingSurface::new();
        let panels = sample_panels(&surface);

        panels.highlight_active("/routes");
        assert!(surface.class_on("sidebar-link-routes", "active"));
        assert!(!surface.class_on("sidebar-link-overview", "active"));
    }

    #[test]
    fn test_highlight_active_has_no_home_fallback() {
        let surface = RecordingSurface::new();
        let panels = sample_panels(&surface);

        panels.highlight_active("/routes");
        panels.highlight_active("/");
        assert!(!surface.class_on("sidebar-link-routes", "active"));
        assert!(!surface.class_on("sidebar-link-overview", "active"));
        assert!(!surface.class_on("sidebar-link-visits", "active"));
    }
}
