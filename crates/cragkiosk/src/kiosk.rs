//! Kiosk window assembly: pages, nav, overlays, and event wiring.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{
    Application, ApplicationWindow, EventControllerKey, GestureClick, Orientation, PickFlags,
    PolicyType, PropagationPhase, ScrolledWindow, Stack, StackTransitionType, gdk, glib,
};
use tracing::{debug, info, warn};

use cragkiosk_core::dashboard::DashboardPanels;
use cragkiosk_core::modal::ModalTracker;
use cragkiosk_core::nav::NavMenu;
use cragkiosk_core::reveal::RevealTracker;
use cragkiosk_core::{Config, Preferences, ThemeManager, ThemeMode, ThemePalette};

use crate::navbar::{self, NavEntry};
use crate::pages;
use crate::styles::class;
use crate::surface::KioskSurface;
use crate::toast::ToastHost;
use crate::{css, modal_host};

/// Build the kiosk window: construct the pages, create the core state
/// objects, and wire every GTK event to them.
pub fn build_window(app: &Application, config: &Config) -> ApplicationWindow {
    let window = ApplicationWindow::builder()
        .application(app)
        .title(config.window.title.as_str())
        .default_width(config.window.width as i32)
        .default_height(config.window.height as i32)
        .build();
    window.add_css_class(class::KIOSK_WINDOW);

    let scroller = ScrolledWindow::new();
    scroller.set_hscrollbar_policy(PolicyType::Never);
    scroller.set_vscrollbar_policy(PolicyType::Automatic);
    scroller.set_hexpand(true);
    scroller.set_vexpand(true);

    let surface = KioskSurface::new(window.clone(), scroller.clone());

    // Core state objects, one of each per window.
    let theme = ThemeManager::new(surface.clone(), Preferences::load());
    let entries = pages::nav_entries();
    let nav = NavMenu::new(surface.clone(), NavEntry::core_links(&entries), &config.nav);
    let reveal = RevealTracker::new(surface.clone(), config.reveal.offset);
    let modals = ModalTracker::new(surface.clone());
    let panels = DashboardPanels::new(
        surface.clone(),
        pages::dashboard::sidebar_links(),
        &config.dashboard,
    );
    let toast = ToastHost::new(config.notices.timeout_ms);

    // Content stack; page names are the nav hrefs.
    let stack = Stack::new();
    stack.set_transition_type(StackTransitionType::Crossfade);
    stack.set_vexpand(true);

    let (contact_page, _contact_form) = pages::contact::build(&surface, &toast);
    let dash = pages::dashboard::build(&surface, &panels, config);

    stack.add_named(
        &pages::home::build(&surface, &reveal, &toast, config),
        Some("index"),
    );
    stack.add_named(&pages::activities::overview(), Some("activities"));
    stack.add_named(
        &pages::activities::detail(
            "Bouldering",
            "Three halls of boulders from friendly slab to a 45° spray cave.",
            &[
                "Grades 4a to 8a, color-coded by hold set",
                "Two walls re-set every Monday",
                "Crash-pad-free: thick matting everywhere",
            ],
        ),
        Some("bouldering"),
    );
    stack.add_named(
        &pages::activities::detail(
            "Ropes",
            "Lead and top-rope lines up to 14 meters, belay checks at the desk.",
            &[
                "Twelve lead lines, eight top-rope stations",
                "Belay certification courses every weekend",
                "Auto-belays on the training tower",
            ],
        ),
        Some("ropes"),
    );
    stack.add_named(
        &pages::activities::detail(
            "Training",
            "A mezzanine for everything that isn't climbing but makes you climb harder.",
            &[
                "Moonboard 2024 set and adjustable campus rungs",
                "Open conditioning corner with rings and hangboards",
                "Coached strength sessions on Tuesdays",
            ],
        ),
        Some("training"),
    );
    stack.add_named(&pages::pricing::build(&modals), Some("pricing"));
    stack.add_named(&contact_page, Some("contact"));
    stack.add_named(&dash.root, Some("dashboard"));

    scroller.set_child(Some(&stack));

    // Everything that happens when a link actually navigates.
    let navigate: navbar::NavigateFn = {
        let stack = stack.clone();
        let nav = nav.clone();
        let scroller = scroller.clone();
        let reveal = reveal.clone();
        Rc::new(move |href: &str| {
            stack.set_visible_child_name(href);
            scroller.vadjustment().set_value(0.0);
            nav.highlight_active(&format!("/{href}"));
            nav.on_scroll();
            reveal.on_scroll();
            debug!("Navigated to '{href}'");
        })
    };

    // Toggling the theme regenerates the stylesheet for the new mode.
    let on_theme_toggled: Rc<dyn Fn(ThemeMode)> = {
        let config = config.clone();
        Rc::new(move |mode| load_css(&config, mode))
    };

    let navbar = Rc::new(navbar::build(
        &surface,
        &nav,
        &entries,
        config,
        &theme,
        navigate.clone(),
        on_theme_toggled,
    ));

    // Window layout: navbar above the scrolling content, overlays on top.
    let main = gtk4::Box::new(Orientation::Vertical, 0);
    main.append(&navbar.root);
    main.append(&scroller);

    let overlay = gtk4::Overlay::new();
    overlay.set_child(Some(&main));
    let modal_overlays = modal_host::build(&surface, &modals, &toast);
    for modal in &modal_overlays.overlays {
        overlay.add_overlay(modal);
    }
    overlay.add_overlay(toast.widget());
    window.set_child(Some(&overlay));

    // Scroll drives the nav shadow and the reveal set.
    {
        let nav = nav.clone();
        let reveal = reveal.clone();
        scroller.vadjustment().connect_value_changed(move |_| {
            nav.on_scroll();
            reveal.on_scroll();
        });
    }

    // A global Escape closes all modals.
    {
        let modals = modals.clone();
        let key_controller = EventControllerKey::new();
        key_controller.connect_key_pressed(move |_, keyval, _, _| {
            if keyval == gdk::Key::Escape {
                modals.escape_pressed();
                glib::Propagation::Stop
            } else {
                glib::Propagation::Proceed
            }
        });
        window.add_controller(key_controller);
    }

    // Clicks anywhere on the window close the menu and panels they missed.
    // Capture phase, and never claimed, so normal handling continues.
    {
        let nav = nav.clone();
        let panels = panels.clone();
        let menu_panel = navbar.menu_panel.clone();
        let toggle_button = navbar.toggle_button.clone();
        let sidebar = dash.sidebar.clone();
        let sidebar_toggle = dash.sidebar_toggle.clone();
        let filter_panel = dash.filter_panel.clone();
        let filter_toggle = dash.filter_toggle.clone();

        let gesture = GestureClick::new();
        gesture.set_button(1);
        gesture.set_propagation_phase(PropagationPhase::Capture);
        gesture.connect_pressed(move |gesture, _n_press, x, y| {
            let Some(root) = gesture.widget() else {
                return;
            };
            let Some(target) = root.pick(x, y, PickFlags::DEFAULT) else {
                return;
            };

            nav.outside_click(
                press_inside(&target, &menu_panel),
                press_inside(&target, &toggle_button),
            );
            panels.outside_click(
                press_inside(&target, &sidebar) || press_inside(&target, &sidebar_toggle),
                press_inside(&target, &filter_panel) || press_inside(&target, &filter_toggle),
            );
        });
        window.add_controller(gesture);
    }

    // Collapse the inline links behind the hamburger at narrow widths.
    {
        let navbar_for_resize = navbar.clone();
        let breakpoint = config.nav.mobile_breakpoint as i32;
        window.connect_default_width_notify(move |window| {
            let width = if window.width() > 0 {
                window.width()
            } else {
                window.default_width()
            };
            navbar_for_resize.set_mobile(width <= breakpoint);
        });
        navbar.set_mobile(config.window.width <= config.nav.mobile_breakpoint);
    }

    // First paint: active link, shadow, and the initial reveal pass.
    // Geometry queries only mean something once the window is mapped.
    {
        let nav = nav.clone();
        let reveal = reveal.clone();
        let home = config.nav.home_page.clone();
        window.connect_map(move |_| {
            nav.highlight_active(&format!("/{home}"));
            nav.on_scroll();
            reveal.on_scroll();
        });
    }

    stack.set_visible_child_name(&config.nav.home_page);

    info!(
        "Kiosk window created: {}x{}, theme {}",
        config.window.width,
        config.window.height,
        theme.current().as_str()
    );

    window
}

/// Walk up from the press target to decide whether it landed inside the
/// given region widget.
fn press_inside(target: &gtk4::Widget, region: &impl IsA<gtk4::Widget>) -> bool {
    let region: &gtk4::Widget = region.upcast_ref();
    let mut current = Some(target.clone());
    while let Some(widget) = current {
        if widget == *region {
            return true;
        }
        current = widget.parent();
    }
    false
}

// Thread-local storage for the active CSS providers so reloads can replace
// them instead of stacking.
thread_local! {
    static THEME_CSS_PROVIDER: RefCell<Option<gtk4::CssProvider>> = const { RefCell::new(None) };
    static USER_CSS_PROVIDER: RefCell<Option<gtk4::CssProvider>> = const { RefCell::new(None) };
}

/// Priority for user CSS - above the generated styles so overrides work.
const USER_CSS_PRIORITY: u32 = gtk4::STYLE_PROVIDER_PRIORITY_USER + 100;

/// Load and apply the generated stylesheet for the given theme mode.
pub fn load_css(config: &Config, mode: ThemeMode) {
    let provider = gtk4::CssProvider::new();

    let palette = ThemePalette::from_config(&config.theme, mode);
    let css = format!(
        "{}\n{}\n{}",
        palette.css_vars_block(),
        css::utility_css(),
        css::kiosk_css()
    );
    provider.load_from_string(&css);

    let Some(display) = gdk::Display::default() else {
        warn!("No default display available, CSS styling not applied");
        return;
    };

    // Replace the previous generated provider so repeated theme toggles
    // don't stack stale variable blocks.
    THEME_CSS_PROVIDER.with(|cell| {
        if let Some(old_provider) = cell.borrow_mut().take() {
            gtk4::style_context_remove_provider_for_display(&display, &old_provider);
        }
    });

    gtk4::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk4::STYLE_PROVIDER_PRIORITY_USER,
    );
    THEME_CSS_PROVIDER.with(|cell| {
        *cell.borrow_mut() = Some(provider);
    });

    debug!("CSS loaded and applied (mode={})", mode.as_str());

    load_user_css(&display);
}

/// Candidate locations for a user style.css, same chain as the config file.
fn user_css_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        paths.push(PathBuf::from(xdg_config).join("cragkiosk/style.css"));
    }
    if let Ok(home) = std::env::var("HOME") {
        paths.push(PathBuf::from(home).join(".config/cragkiosk/style.css"));
    }
    paths.push(PathBuf::from("style.css"));
    paths
}

fn find_user_css() -> Option<PathBuf> {
    user_css_search_paths()
        .into_iter()
        .find(|path| path.exists())
}

/// Layer the user's style.css over the generated stylesheet.
fn load_user_css(display: &gdk::Display) {
    let Some(path) = find_user_css() else {
        debug!("No user style.css found");
        return;
    };

    match std::fs::read_to_string(&path) {
        Ok(css) => {
            let provider = gtk4::CssProvider::new();
            provider.load_from_string(&css);

            // Replace any previous user provider.
            USER_CSS_PROVIDER.with(|cell| {
                if let Some(old_provider) = cell.borrow_mut().take() {
                    gtk4::style_context_remove_provider_for_display(display, &old_provider);
                }
            });

            gtk4::style_context_add_provider_for_display(display, &provider, USER_CSS_PRIORITY);

            USER_CSS_PROVIDER.with(|cell| {
                *cell.borrow_mut() = Some(provider);
            });

            info!("Loaded user CSS from: {}", path.display());
        }
        Err(e) => {
            warn!("Failed to read user CSS from {}: {}", path.display(), e);
        }
    }
}

/// Reload the user's custom CSS (called when style.css changes on disk).
pub fn reload_user_css() {
    let Some(display) = gdk::Display::default() else {
        warn!("No default display available for CSS reload");
        return;
    };

    USER_CSS_PROVIDER.with(|cell| {
        if let Some(old_provider) = cell.borrow_mut().take() {
            gtk4::style_context_remove_provider_for_display(&display, &old_provider);
            debug!("Removed old user CSS provider");
        }
    });

    load_user_css(&display);
}
