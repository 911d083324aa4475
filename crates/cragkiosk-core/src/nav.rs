//! Navigation menu state: hamburger panel, dropdowns, active link, shadow.
//!
//! The menu itself is a two-state machine (closed/open) with an independent
//! open flag per dropdown item. Dropdown-as-click behavior only applies at
//! or below the mobile breakpoint; at wider widths the shell's native
//! popovers handle dropdowns and link activation is never intercepted.

use std::cell::Cell;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::debug;

use crate::config::NavConfig;
use crate::surface::{ViewSurface, state, target};

/// A link in the navigation menu.
#[derive(Debug, Clone)]
pub struct NavLink {
    /// Stable identifier, also used to derive surface target names.
    pub slug: String,
    /// Path segment the link navigates to (e.g. "index", "pricing").
    pub href: String,
    /// Whether this link is a dropdown parent rather than a plain link.
    pub has_dropdown: bool,
}

impl NavLink {
    pub fn new(slug: &str, href: &str) -> Self {
        Self {
            slug: slug.to_string(),
            href: href.to_string(),
            has_dropdown: false,
        }
    }

    pub fn with_dropdown(slug: &str, href: &str) -> Self {
        Self {
            slug: slug.to_string(),
            href: href.to_string(),
            has_dropdown: true,
        }
    }

    /// Surface target name of the link element.
    pub fn link_target(&self) -> String {
        format!("nav-link-{}", self.slug)
    }

    /// Surface target name of the dropdown panel under this link.
    pub fn dropdown_target(&self) -> String {
        format!("nav-dropdown-{}", self.slug)
    }
}

/// What the shell should do with an activated link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    /// Follow the link's href.
    Navigate,
    /// The click was consumed to toggle the link's dropdown.
    DropdownToggled,
}

/// Owns the hamburger menu, dropdown, shadow, and active-link state.
pub struct NavMenu {
    surface: Rc<dyn ViewSurface>,
    links: Vec<NavLink>,
    open: Cell<bool>,
    dropdowns: RefCell<BTreeMap<String, bool>>,
    mobile_breakpoint: f64,
    shadow_threshold: f64,
    home_page: String,
}

impl NavMenu {
    /// Create the menu and apply the initial shadow state.
    pub fn new(surface: Rc<dyn ViewSurface>, links: Vec<NavLink>, nav: &NavConfig) -> Rc<Self> {
        let dropdowns = links
            .iter()
            .filter(|link| link.has_dropdown)
            .map(|link| (link.slug.clone(), false))
            .collect();

        let menu = Rc::new(Self {
            surface,
            links,
            open: Cell::new(false),
            dropdowns: RefCell::new(dropdowns),
            mobile_breakpoint: nav.mobile_breakpoint as f64,
            shadow_threshold: nav.shadow_threshold,
            home_page: nav.home_page.clone(),
        });
        menu.on_scroll();
        menu
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn dropdown_open(&self, slug: &str) -> bool {
        self.dropdowns.borrow().get(slug).copied().unwrap_or(false)
    }

    /// Whether the window is currently in narrow (hamburger) mode.
    pub fn is_mobile(&self) -> bool {
        self.surface.viewport_width() <= self.mobile_breakpoint
    }

    pub fn toggle_menu(&self) {
        if self.open.get() {
            self.close_menu();
        } else {
            self.open_menu();
        }
    }

    /// Open the menu panel and lock page scroll behind it.
    pub fn open_menu(&self) {
        self.open.set(true);
        self.surface.set_class(target::NAV_MENU, state::OPEN, true);
        self.surface.set_class(target::NAV_TOGGLE, state::OPEN, true);
        self.surface.set_scroll_lock(true);
    }

    /// Close the menu, release the scroll lock, and fold every dropdown.
    ///
    /// A closed menu never has an open dropdown.
    pub fn close_menu(&self) {
        self.open.set(false);
        self.surface.set_class(target::NAV_MENU, state::OPEN, false);
        self.surface.set_class(target::NAV_TOGGLE, state::OPEN, false);
        self.surface.set_scroll_lock(false);

        let mut dropdowns = self.dropdowns.borrow_mut();
        for (slug, open) in dropdowns.iter_mut() {
            if *open {
                *open = false;
                let dropdown_target = format!("nav-dropdown-{slug}");
                self.surface.set_class(&dropdown_target, state::OPEN, false);
            }
        }
    }

    /// Handle a click on the named link.
    ///
    /// Dropdown parents consume the click in narrow mode; everything else
    /// closes the menu and navigates.
    pub fn link_activated(&self, slug: &str) -> LinkAction {
        let Some(link) = self.links.iter().find(|link| link.slug == slug) else {
            debug!("Unknown nav link '{slug}', ignoring");
            return LinkAction::Navigate;
        };

        if link.has_dropdown && self.is_mobile() {
            let now_open = !self.dropdown_open(slug);
            self.dropdowns.borrow_mut().insert(slug.to_string(), now_open);
            self.surface
                .set_class(&link.dropdown_target(), state::OPEN, now_open);
            return LinkAction::DropdownToggled;
        }

        self.close_menu();
        LinkAction::Navigate
    }

    /// Handle a click somewhere on the page.
    ///
    /// Closes the menu unless the press landed inside the menu panel or on
    /// the toggle control itself.
    pub fn outside_click(&self, inside_menu: bool, inside_toggle: bool) {
        if self.open.get() && !inside_menu && !inside_toggle {
            self.close_menu();
        }
    }

    /// Recompute the nav bar shadow from the current scroll offset.
    pub fn on_scroll(&self) {
        let elevated = self.surface.scroll_offset() > self.shadow_threshold;
        self.surface.set_class(target::NAVBAR, state::ELEVATED, elevated);
    }

    /// Re-evaluate active-link highlighting for the given location path.
    ///
    /// The final path segment decides the match; an empty segment counts as
    /// the home page. Non-matching links are explicitly de-marked so the
    /// evaluation is idempotent.
    pub fn highlight_active(&self, path: &str) {
        let segment = final_segment(path);
        let segment = if segment.is_empty() {
            self.home_page.as_str()
        } else {
            segment
        };

        for link in &self.links {
            let href_segment = final_segment(&link.href);
            let is_active = href_segment == segment
                || (href_segment == self.home_page && segment == self.home_page);
            self.surface
                .set_class(&link.link_target(), state::ACTIVE, is_active);
        }
    }
}

/// Final segment of a path, without any leading directories.
fn final_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::RecordingSurface;

    fn sample_links() -> Vec<NavLink> {
        vec![
            NavLink::new("home", "index"),
            NavLink::with_dropdown("activities", "activities"),
            NavLink::new("pricing", "pricing"),
            NavLink::new("contact", "contact"),
        ]
    }

    fn sample_menu(surface: &Rc<RecordingSurface>) -> Rc<NavMenu> {
        NavMenu::new(
            surface.clone(),
            sample_links(),
            &crate::config::NavConfig::default(),
        )
    }

    #[test]
    fn test_open_menu_locks_scroll() {
        let surface = RecordingSurface::new();
        let menu = sample_menu(&surface);

        menu.toggle_menu();
        assert!(menu.is_open());
        assert!(surface.scroll_locked.get());
        assert!(surface.class_on("nav-menu", "open"));
    }

    #[test]
    fn test_close_menu_releases_scroll_and_folds_dropdowns() {
        let surface = RecordingSurface::new();
        surface.width.set(800.0);
        let menu = sample_menu(&surface);

        menu.open_menu();
        menu.link_activated("activities");
        assert!(menu.dropdown_open("activities"));

        menu.close_menu();
        assert!(!menu.is_open());
        assert!(!surface.scroll_locked.get());
        assert!(!menu.dropdown_open("activities"));
        assert!(!surface.class_on("nav-dropdown-activities", "open"));
    }

    #[test]
    fn test_plain_link_click_closes_menu_and_navigates() {
        let surface = RecordingSurface::new();
        let menu = sample_menu(&surface);

        menu.open_menu();
        let action = menu.link_activated("pricing");
        assert_eq!(action, LinkAction::Navigate);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_dropdown_parent_click_on_mobile_toggles_dropdown() {
        let surface = RecordingSurface::new();
        surface.width.set(800.0);
        let menu = sample_menu(&surface);
        menu.open_menu();

        let action = menu.link_activated("activities");
        assert_eq!(action, LinkAction::DropdownToggled);
        assert!(menu.dropdown_open("activities"));
        // The menu itself stays open.
        assert!(menu.is_open());

        let action = menu.link_activated("activities");
        assert_eq!(action, LinkAction::DropdownToggled);
        assert!(!menu.dropdown_open("activities"));
    }

    #[test]
    fn test_dropdown_parent_click_on_desktop_navigates() {
        let surface = RecordingSurface::new();
        surface.width.set(1200.0);
        let menu = sample_menu(&surface);

        let action = menu.link_activated("activities");
        assert_eq!(action, LinkAction::Navigate);
        assert!(!menu.dropdown_open("activities"));
    }

    #[test]
    fn test_outside_click_closes_menu() {
        let surface = RecordingSurface::new();
        let menu = sample_menu(&surface);
        menu.open_menu();

        menu.outside_click(true, false);
        assert!(menu.is_open());

        menu.outside_click(false, true);
        assert!(menu.is_open());

        menu.outside_click(false, false);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_shadow_elevates_past_threshold() {
        let surface = RecordingSurface::new();
        let menu = sample_menu(&surface);

        assert!(!surface.class_on("navbar", "elevated"));

        surface.scroll.set(51.0);
        menu.on_scroll();
        assert!(surface.class_on("navbar", "elevated"));

        surface.scroll.set(50.0);
        menu.on_scroll();
        assert!(!surface.class_on("navbar", "elevated"));
    }

    #[test]
    fn test_highlight_active_marks_exactly_one_link() {
        let surface = RecordingSurface::new();
        let menu = sample_menu(&surface);

        menu.highlight_active("/pricing");
        assert!(surface.class_on("nav-link-pricing", "active"));
        assert!(!surface.class_on("nav-link-home", "active"));
        assert!(!surface.class_on("nav-link-contact", "active"));
    }

    #[test]
    fn test_highlight_active_is_idempotent() {
        let surface = RecordingSurface::new();
        let menu = sample_menu(&surface);

        menu.highlight_active("/contact");
        menu.highlight_active("/contact");
        assert!(surface.class_on("nav-link-contact", "active"));
        assert!(!surface.class_on("nav-link-pricing", "active"));
    }

    #[test]
    fn test_highlight_active_empty_path_matches_home() {
        let surface = RecordingSurface::new();
        let menu = sample_menu(&surface);

        menu.highlight_active("/");
        assert!(surface.class_on("nav-link-home", "active"));

        menu.highlight_active("/index");
        assert!(surface.class_on("nav-link-home", "active"));
    }

    #[test]
    fn test_highlight_active_demarks_previous_link() {
        let surface = RecordingSurface::new();
        let menu = sample_menu(&surface);

        menu.highlight_active("/pricing");
        menu.highlight_active("/contact");
        assert!(!surface.class_on("nav-link-pricing", "active"));
        assert!(surface.class_on("nav-link-contact", "active"));
    }
}
