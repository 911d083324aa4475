//! Top navigation bar and hamburger menu panel.
//!
//! The bar carries the brand, the inline links row (desktop widths), the
//! theme toggle, and the hamburger button (narrow widths). The hamburger
//! panel repeats the links vertically with click-toggled dropdowns; at
//! desktop widths dropdown children live in a native popover next to the
//! parent link, so the parent link itself still navigates.

use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Align, Button, Image, Label, MenuButton, Orientation, Popover};

use cragkiosk_core::Config;
use cragkiosk_core::nav::{LinkAction, NavLink, NavMenu};
use cragkiosk_core::surface::target;
use cragkiosk_core::theme::{ThemeManager, ThemeMode};

use crate::styles::class;
use crate::surface::KioskSurface;

/// Callback the bar invokes with an href once a link actually navigates.
pub type NavigateFn = Rc<dyn Fn(&str)>;

/// One top-level navigation entry, with optional dropdown children.
pub struct NavEntry {
    pub slug: &'static str,
    pub href: &'static str,
    pub title: &'static str,
    pub children: Vec<NavEntry>,
}

impl NavEntry {
    pub fn leaf(slug: &'static str, href: &'static str, title: &'static str) -> Self {
        Self {
            slug,
            href,
            title,
            children: Vec::new(),
        }
    }

    pub fn parent(
        slug: &'static str,
        href: &'static str,
        title: &'static str,
        children: Vec<NavEntry>,
    ) -> Self {
        Self {
            slug,
            href,
            title,
            children,
        }
    }

    /// Flatten entries into the core's link list; children become plain
    /// links so activation and highlighting route through the coordinator.
    pub fn core_links(entries: &[NavEntry]) -> Vec<NavLink> {
        let mut links = Vec::new();
        for entry in entries {
            if entry.children.is_empty() {
                links.push(NavLink::new(entry.slug, entry.href));
            } else {
                links.push(NavLink::with_dropdown(entry.slug, entry.href));
                for child in &entry.children {
                    links.push(NavLink::new(child.slug, child.href));
                }
            }
        }
        links
    }
}

/// Handle to the built navigation bar.
pub struct Navbar {
    /// Bar plus the hamburger panel below it.
    pub root: gtk4::Box,
    /// The hamburger panel, for outside-click region checks.
    pub menu_panel: gtk4::Box,
    /// The hamburger button, for outside-click region checks.
    pub toggle_button: Button,
    inline_links: gtk4::Box,
    nav: Rc<NavMenu>,
}

impl Navbar {
    /// Switch between the inline row (desktop) and the hamburger (narrow).
    pub fn set_mobile(&self, mobile: bool) {
        self.inline_links.set_visible(!mobile);
        self.toggle_button.set_visible(mobile);
        if !mobile {
            self.nav.close_menu();
        }
    }
}

/// Build the navigation bar and panel and wire them to the coordinator.
pub fn build(
    surface: &Rc<KioskSurface>,
    nav: &Rc<NavMenu>,
    entries: &[NavEntry],
    config: &Config,
    theme: &Rc<ThemeManager>,
    on_navigate: NavigateFn,
    on_theme_toggled: Rc<dyn Fn(ThemeMode)>,
) -> Navbar {
    let bar = gtk4::Box::new(Orientation::Horizontal, 8);
    bar.add_css_class(class::NAVBAR);
    surface.register(target::NAVBAR, &bar);

    let brand = Label::new(Some(&config.window.title));
    brand.add_css_class(class::NAV_BRAND);
    bar.append(&brand);

    // Inline links row, hidden below the mobile breakpoint.
    let inline_links = gtk4::Box::new(Orientation::Horizontal, 4);
    inline_links.add_css_class(class::NAV_LINKS);
    inline_links.set_hexpand(true);
    inline_links.set_halign(Align::End);

    for entry in entries {
        inline_links.append(&link_button(surface, nav, entry, &on_navigate));

        if !entry.children.is_empty() {
            // Children live in a native popover next to the parent link,
            // which itself keeps navigating.
            let dropdown = MenuButton::new();
            dropdown.set_icon_name("pan-down-symbolic");
            dropdown.add_css_class(class::NAV_LINK);

            let content = gtk4::Box::new(Orientation::Vertical, 2);
            let popover = Popover::new();
            popover.set_child(Some(&content));

            for child in &entry.children {
                let button = link_button(surface, nav, child, &on_navigate);
                let popover_for_child = popover.clone();
                button.connect_clicked(move |_| popover_for_child.popdown());
                content.append(&button);
            }

            dropdown.set_popover(Some(&popover));
            inline_links.append(&dropdown);
        }
    }
    bar.append(&inline_links);

    // Theme toggle: the manager swaps the glyph through the surface.
    let theme_button = Button::new();
    theme_button.add_css_class(class::THEME_TOGGLE);
    let theme_icon = Image::from_icon_name(theme.current().toggle_icon());
    surface.register(target::THEME_ICON, &theme_icon);
    theme_button.set_child(Some(&theme_icon));

    let theme_for_toggle = theme.clone();
    theme_button.connect_clicked(move |_| {
        let mode = theme_for_toggle.toggle();
        on_theme_toggled(mode);
    });
    bar.append(&theme_button);

    // Hamburger toggle, shown below the mobile breakpoint.
    let toggle_button = Button::new();
    toggle_button.add_css_class(class::NAV_TOGGLE);
    toggle_button.set_child(Some(&Image::from_icon_name("open-menu-symbolic")));
    surface.register(target::NAV_TOGGLE, &toggle_button);

    let nav_for_toggle = nav.clone();
    toggle_button.connect_clicked(move |_| nav_for_toggle.toggle_menu());
    bar.append(&toggle_button);

    // Hamburger panel: vertical links with click-toggled dropdowns.
    let menu_panel = gtk4::Box::new(Orientation::Vertical, 2);
    menu_panel.add_css_class(class::NAV_MENU);
    surface.register_collapsible(target::NAV_MENU, &menu_panel);

    for entry in entries {
        let button = link_button(surface, nav, entry, &on_navigate);
        button.set_halign(Align::Fill);
        menu_panel.append(&button);

        if !entry.children.is_empty() {
            let dropdown = gtk4::Box::new(Orientation::Vertical, 2);
            dropdown.add_css_class(class::NAV_DROPDOWN);
            let dropdown_target = NavLink::with_dropdown(entry.slug, entry.href).dropdown_target();
            surface.register_collapsible(&dropdown_target, &dropdown);

            for child in &entry.children {
                let button = link_button(surface, nav, child, &on_navigate);
                button.set_halign(Align::Fill);
                dropdown.append(&button);
            }
            menu_panel.append(&dropdown);
        }
    }

    let root = gtk4::Box::new(Orientation::Vertical, 0);
    root.append(&bar);
    root.append(&menu_panel);

    Navbar {
        root,
        menu_panel,
        toggle_button,
        inline_links,
        nav: nav.clone(),
    }
}

/// Build one link button routed through the coordinator.
fn link_button(
    surface: &Rc<KioskSurface>,
    nav: &Rc<NavMenu>,
    entry: &NavEntry,
    on_navigate: &NavigateFn,
) -> Button {
    let button = Button::with_label(entry.title);
    button.add_css_class(class::NAV_LINK);

    let link = NavLink::new(entry.slug, entry.href);
    surface.register(&link.link_target(), &button);

    let nav = nav.clone();
    let on_navigate = on_navigate.clone();
    let slug = entry.slug.to_string();
    let href = entry.href.to_string();
    button.connect_clicked(move |_| {
        if nav.link_activated(&slug) == LinkAction::Navigate {
            on_navigate(&href);
        }
    });

    button
}
