//! Page construction for the kiosk content stack.

pub mod activities;
pub mod contact;
pub mod dashboard;
pub mod home;
pub mod pricing;

use gtk4::prelude::*;
use gtk4::{Label, Orientation};

use crate::navbar::NavEntry;
use crate::styles::{class, color};

/// The kiosk's navigation structure. Hrefs double as stack page names.
pub fn nav_entries() -> Vec<NavEntry> {
    vec![
        NavEntry::leaf("home", "index", "Home"),
        NavEntry::parent(
            "activities",
            "activities",
            "Activities",
            vec![
                NavEntry::leaf("bouldering", "bouldering", "Bouldering"),
                NavEntry::leaf("ropes", "ropes", "Ropes"),
                NavEntry::leaf("training", "training", "Training"),
            ],
        ),
        NavEntry::leaf("pricing", "pricing", "Pricing"),
        NavEntry::leaf("contact", "contact", "Contact"),
        NavEntry::leaf("dashboard", "dashboard", "Dashboard"),
    ]
}

/// Empty page container with standard padding.
pub(crate) fn page_root() -> gtk4::Box {
    let page = gtk4::Box::new(Orientation::Vertical, 0);
    page.add_css_class(class::PAGE);
    page
}

/// Left-aligned page heading.
pub(crate) fn page_title(title: &str) -> Label {
    let label = Label::new(Some(title));
    label.add_css_class(color::PAGE_TITLE);
    label.set_xalign(0.0);
    label
}

/// A plain content section: heading plus wrapped body text.
pub(crate) fn section(title: &str, body: &str) -> gtk4::Box {
    let section = gtk4::Box::new(Orientation::Vertical, 6);
    section.add_css_class(class::SECTION);

    let heading = Label::new(Some(title));
    heading.add_css_class(color::SECTION_TITLE);
    heading.set_xalign(0.0);
    section.append(&heading);

    let text = Label::new(Some(body));
    text.add_css_class(color::MUTED);
    text.set_xalign(0.0);
    text.set_wrap(true);
    section.append(&text);

    section
}
