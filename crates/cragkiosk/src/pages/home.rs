//! Home page: hero, booking stub, and the reveal sections.

use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Align, Button, Label, Orientation};
use tracing::info;

use cragkiosk_core::Config;
use cragkiosk_core::reveal::RevealTracker;

use crate::styles::{button, class, color};
use crate::surface::KioskSurface;
use crate::toast::{NoticeKind, ToastHost};

use super::{page_root, section};

/// Build the home page and register its reveal sections.
pub fn build(
    surface: &Rc<KioskSurface>,
    reveal: &Rc<RevealTracker>,
    toast: &Rc<ToastHost>,
    config: &Config,
) -> gtk4::Box {
    let page = page_root();

    // Hero block with the booking stub.
    let hero = gtk4::Box::new(Orientation::Vertical, 10);
    hero.add_css_class(class::HERO);

    let headline = Label::new(Some("Climb something new today"));
    headline.add_css_class(color::PAGE_TITLE);
    headline.set_xalign(0.0);
    hero.append(&headline);

    let tagline = Label::new(Some(
        "900 m² of bouldering, lead walls and a training mezzanine in the \
         heart of town. Shoes and chalk at the front desk.",
    ));
    tagline.add_css_class(color::MUTED);
    tagline.set_xalign(0.0);
    tagline.set_wrap(true);
    hero.append(&tagline);

    let hours = Label::new(Some(&format!("Open today: {}", config.hours.today())));
    hours.set_xalign(0.0);
    hero.append(&hours);

    // Booking has no backend yet; the button only surfaces a notice.
    let book = Button::with_label("Book a session");
    book.add_css_class(button::PRIMARY);
    book.set_halign(Align::Start);
    let toast_for_booking = toast.clone();
    book.connect_clicked(move |_| {
        info!("Booking requested from the home page");
        toast_for_booking.show(
            "Online booking is coming soon - ask at the front desk",
            NoticeKind::Info,
        );
    });
    hero.append(&book);

    page.append(&hero);

    // Sections below the fold fade in as they scroll into view.
    let sections = [
        (
            "section-sets",
            "Fresh sets every week",
            "Our setters strip and rebuild two walls every Monday, from slab \
             jug hauls to comp-style coordination problems.",
        ),
        (
            "section-coaching",
            "Coaching for every level",
            "First-timer intros, technique classes and a youth squad. Check \
             the board by the café for this week's sessions.",
        ),
        (
            "section-cafe",
            "Café & community",
            "Flat whites, fresh pastries and the best belay gossip in town. \
             Route-setting feedback cards live by the counter.",
        ),
    ];

    for (target, title, body) in sections {
        let block = section(title, body);
        block.add_css_class(class::REVEAL);
        surface.register(target, &block);
        reveal.track(target);
        page.append(&block);
    }

    page
}
