//! Pricing page: pass cards plus the day-pass and login modal triggers.

use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Button, Label, Orientation};

use cragkiosk_core::modal::ModalTracker;

use crate::modal_host;
use crate::styles::{button, class, color};

use super::{page_root, page_title};

/// Build the pricing page.
pub fn build(modals: &Rc<ModalTracker>) -> gtk4::Box {
    let page = page_root();
    page.append(&page_title("Passes & membership"));

    let cards = gtk4::Box::new(Orientation::Horizontal, 16);
    cards.add_css_class(class::SECTION);

    cards.append(&price_card(
        "Day pass",
        "€ 14",
        "All walls, all day. Shoe rental included on your first visit.",
    ));
    cards.append(&price_card(
        "Ten-pass",
        "€ 120",
        "Ten entries, shareable, valid for a year.",
    ));
    cards.append(&price_card(
        "Membership",
        "€ 49 / month",
        "Unlimited climbing, classes included, bring a friend on Fridays.",
    ));

    page.append(&cards);

    let actions = gtk4::Box::new(Orientation::Horizontal, 10);
    actions.add_css_class(class::SECTION);

    let daypass = Button::with_label("Get a day pass");
    daypass.add_css_class(button::PRIMARY);
    let modals_for_daypass = modals.clone();
    daypass.connect_clicked(move |_| modals_for_daypass.open(modal_host::MODAL_DAYPASS));
    actions.append(&daypass);

    let login = Button::with_label("Member login");
    login.add_css_class(button::GHOST);
    let modals_for_login = modals.clone();
    login.connect_clicked(move |_| modals_for_login.open(modal_host::MODAL_LOGIN));
    actions.append(&login);

    page.append(&actions);

    page
}

fn price_card(name: &str, price: &str, blurb: &str) -> gtk4::Box {
    let card = gtk4::Box::new(Orientation::Vertical, 6);
    card.add_css_class(class::CARD);
    card.set_hexpand(true);

    let title = Label::new(Some(name));
    title.add_css_class(color::SECTION_TITLE);
    title.set_xalign(0.0);
    card.append(&title);

    let amount = Label::new(Some(price));
    amount.add_css_class(color::PAGE_TITLE);
    amount.set_xalign(0.0);
    card.append(&amount);

    let text = Label::new(Some(blurb));
    text.add_css_class(color::MUTED);
    text.set_xalign(0.0);
    text.set_wrap(true);
    card.append(&text);

    card
}
