//! Member dashboard: sidebar sections, wall filter, and the route list.

use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Align, Button, Label, Orientation, Stack, StackTransitionType};
use tracing::warn;

use cragkiosk_core::Config;
use cragkiosk_core::catalog::{self, Route};
use cragkiosk_core::dashboard::{DashboardPanels, SidebarLink};
use cragkiosk_core::surface::{state, target};

use crate::styles::{class, color};
use crate::surface::KioskSurface;

use super::{page_root, page_title};

/// Handle to the built dashboard page and its panel widgets.
pub struct DashboardPage {
    pub root: gtk4::Box,
    /// For outside-click region checks.
    pub sidebar: gtk4::Box,
    pub sidebar_toggle: Button,
    pub filter_panel: gtk4::Box,
    pub filter_toggle: Button,
}

/// Sidebar sections; hrefs double as inner stack page names.
pub fn sidebar_links() -> Vec<SidebarLink> {
    vec![
        SidebarLink::new("overview", "overview"),
        SidebarLink::new("routes", "routes"),
        SidebarLink::new("today", "today"),
    ]
}

/// Build the dashboard page and wire its panels to the coordinator.
pub fn build(
    surface: &Rc<KioskSurface>,
    panels: &Rc<DashboardPanels>,
    config: &Config,
) -> DashboardPage {
    let page = page_root();

    let routes = match catalog::load_default() {
        Ok(routes) => routes,
        Err(e) => {
            warn!("Could not load the route catalog: {e}");
            Vec::new()
        }
    };

    // Toolbar: panel toggles plus the page heading.
    let toolbar = gtk4::Box::new(Orientation::Horizontal, 8);

    let sidebar_toggle = Button::with_label("Sections");
    sidebar_toggle.add_css_class(crate::styles::button::GHOST);
    let panels_for_sidebar = panels.clone();
    sidebar_toggle.connect_clicked(move |_| panels_for_sidebar.toggle_sidebar());
    toolbar.append(&sidebar_toggle);

    let filter_toggle = Button::with_label("Filter walls");
    filter_toggle.add_css_class(crate::styles::button::GHOST);
    let panels_for_filter = panels.clone();
    filter_toggle.connect_clicked(move |_| panels_for_filter.toggle_filter());
    toolbar.append(&filter_toggle);

    let heading = page_title("Member dashboard");
    heading.set_hexpand(true);
    heading.set_halign(Align::End);
    toolbar.append(&heading);

    page.append(&toolbar);

    // Wall filter panel, closed until its toggle opens it.
    let route_list = gtk4::Box::new(Orientation::Vertical, 4);
    let filter_panel = build_filter_panel(&routes, &route_list);
    surface.register_collapsible(target::FILTER_PANEL, &filter_panel);
    page.append(&filter_panel);

    // Sidebar plus the section stack.
    let content = gtk4::Box::new(Orientation::Horizontal, 16);
    content.add_css_class(class::SECTION);

    let inner = Stack::new();
    inner.set_transition_type(StackTransitionType::Crossfade);
    inner.set_hexpand(true);
    inner.set_vexpand(true);

    inner.add_named(&overview_section(config, &routes), Some("overview"));
    inner.add_named(&routes_section(&route_list, &routes), Some("routes"));
    inner.add_named(&today_section(config), Some("today"));

    let sidebar = gtk4::Box::new(Orientation::Vertical, 4);
    sidebar.add_css_class(class::SIDEBAR);
    surface.register_collapsible(target::SIDEBAR, &sidebar);

    for link in sidebar_links() {
        let button = Button::with_label(&title_for(&link.slug));
        button.add_css_class(class::SIDEBAR_LINK);
        surface.register(&link.link_target(), &button);

        let panels = panels.clone();
        let inner = inner.clone();
        let href = link.href.clone();
        button.connect_clicked(move |_| {
            inner.set_visible_child_name(&href);
            panels.highlight_active(&format!("/{href}"));
        });
        sidebar.append(&button);
    }

    content.append(&sidebar);
    content.append(&inner);
    page.append(&content);

    // The sidebar starts open; the coordinator owns the flag.
    panels.toggle_sidebar();
    panels.highlight_active("/overview");

    DashboardPage {
        root: page,
        sidebar,
        sidebar_toggle,
        filter_panel,
        filter_toggle,
    }
}

fn title_for(slug: &str) -> String {
    match slug {
        "overview" => "Overview".to_string(),
        "routes" => "Current routes".to_string(),
        "today" => "Today".to_string(),
        other => other.to_string(),
    }
}

fn overview_section(config: &Config, routes: &[Route]) -> gtk4::Box {
    let card = gtk4::Box::new(Orientation::Vertical, 6);
    card.add_css_class(class::CARD);

    let walls = catalog::walls(routes);
    let summary = Label::new(Some(&format!(
        "{} routes across {} walls are currently set.",
        routes.len(),
        walls.len()
    )));
    summary.set_xalign(0.0);
    summary.set_wrap(true);
    card.append(&summary);

    let hours = Label::new(Some(&format!("Open today: {}", config.hours.today())));
    hours.add_css_class(color::MUTED);
    hours.set_xalign(0.0);
    card.append(&hours);

    card
}

fn routes_section(route_list: &gtk4::Box, routes: &[Route]) -> gtk4::Box {
    let card = gtk4::Box::new(Orientation::Vertical, 4);
    card.add_css_class(class::CARD);

    fill_route_list(route_list, routes, None);
    card.append(route_list);

    card
}

fn today_section(config: &Config) -> gtk4::Box {
    let card = gtk4::Box::new(Orientation::Vertical, 6);
    card.add_css_class(class::CARD);

    for line in [
        format!("Hours: {}", config.hours.today()),
        "17:00 - Technique class (slab)".to_string(),
        "19:00 - Youth squad training".to_string(),
    ] {
        let row = Label::new(Some(&line));
        row.add_css_class(class::CARD_ROW);
        row.set_xalign(0.0);
        card.append(&row);
    }

    card
}

/// Build the wall filter chips; clicking one re-fills the route list.
fn build_filter_panel(routes: &[Route], route_list: &gtk4::Box) -> gtk4::Box {
    let panel = gtk4::Box::new(Orientation::Horizontal, 8);
    panel.add_css_class(class::FILTER_PANEL);

    let routes = routes.to_vec();
    let chips: Rc<RefCell<Vec<Button>>> = Rc::new(RefCell::new(Vec::new()));

    let mut options: Vec<Option<String>> = vec![None];
    options.extend(catalog::walls(&routes).into_iter().map(Some));

    for wall in options {
        let label = wall.as_deref().unwrap_or("All walls");
        let chip = Button::with_label(label);
        chip.add_css_class(class::FILTER_CHIP);
        if wall.is_none() {
            chip.add_css_class(state::ACTIVE);
        }

        let routes = routes.clone();
        let route_list = route_list.clone();
        let chips_for_click = chips.clone();
        chip.connect_clicked(move |chip| {
            for other in chips_for_click.borrow().iter() {
                other.remove_css_class(state::ACTIVE);
            }
            chip.add_css_class(state::ACTIVE);
            fill_route_list(&route_list, &routes, wall.as_deref());
        });

        chips.borrow_mut().push(chip.clone());
        panel.append(&chip);
    }

    panel
}

/// Replace the route list contents with the rows matching the wall.
fn fill_route_list(route_list: &gtk4::Box, routes: &[Route], wall: Option<&str>) {
    while let Some(child) = route_list.first_child() {
        route_list.remove(&child);
    }

    let filtered = catalog::filter_by_wall(routes, wall);
    if filtered.is_empty() {
        let empty = Label::new(Some("No routes set on this wall right now."));
        empty.add_css_class(color::MUTED);
        empty.set_xalign(0.0);
        route_list.append(&empty);
        return;
    }

    for route in filtered {
        let row = Label::new(Some(&format!(
            "{}  ·  {}  ·  {}  (set by {})",
            route.grade, route.name, route.wall, route.setter
        )));
        row.add_css_class(class::CARD_ROW);
        row.set_xalign(0.0);
        route_list.append(&row);
    }
}
