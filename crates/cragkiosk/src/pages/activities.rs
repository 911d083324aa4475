//! Activities overview and the per-discipline pages.

use gtk4::prelude::*;
use gtk4::Label;

use crate::styles::{class, color};

use super::{page_root, page_title, section};

/// The activities overview page (the dropdown parent's own target).
pub fn overview() -> gtk4::Box {
    let page = page_root();
    page.append(&page_title("Activities"));

    page.append(&section(
        "Bouldering",
        "Short, punchy problems over thick mats. No ropes, no partner \
         needed, just shoes and a bit of nerve.",
    ));
    page.append(&section(
        "Ropes",
        "Twelve lead lines and eight top-rope stations up to 14 meters, \
         regraded monthly.",
    ));
    page.append(&section(
        "Training",
        "Moonboard, campus rungs and a conditioning corner on the \
         mezzanine, open to all members.",
    ));

    page
}

/// A single discipline page.
pub fn detail(title: &str, blurb: &str, notes: &[&str]) -> gtk4::Box {
    let page = page_root();
    page.append(&page_title(title));

    let intro = Label::new(Some(blurb));
    intro.add_css_class(color::MUTED);
    intro.set_xalign(0.0);
    intro.set_wrap(true);
    intro.add_css_class(class::SECTION);
    page.append(&intro);

    let card = gtk4::Box::new(gtk4::Orientation::Vertical, 4);
    card.add_css_class(class::CARD);
    card.add_css_class(class::SECTION);
    for note in notes {
        let row = Label::new(Some(*note));
        row.add_css_class(class::CARD_ROW);
        row.set_xalign(0.0);
        row.set_wrap(true);
        card.append(&row);
    }
    page.append(&card);

    page
}
