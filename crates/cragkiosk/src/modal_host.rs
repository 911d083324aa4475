//! Modal overlays: backdrop, dialog cards, and their forms.
//!
//! Each modal is a full-window backdrop with a centered dialog card,
//! added as an overlay child and kept hidden until the tracker opens it.
//! Closing paths: the card's close button, a press on the backdrop
//! itself, and the window-level Escape handler.

use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Align, Button, GestureClick, Image, Label, Orientation, PickFlags};

use cragkiosk_core::form::{FieldKind, FieldSpec};
use cragkiosk_core::modal::ModalTracker;

use crate::forms::{self, FieldDef};
use crate::styles::{class, color};
use crate::surface::KioskSurface;
use crate::toast::ToastHost;

pub const MODAL_DAYPASS: &str = "modal-daypass";
pub const MODAL_LOGIN: &str = "modal-login";

/// The built modal overlays, ready to be added to the window overlay.
pub struct ModalHost {
    pub overlays: Vec<gtk4::Box>,
}

/// Build and register the kiosk's modals.
pub fn build(
    surface: &Rc<KioskSurface>,
    modals: &Rc<ModalTracker>,
    toast: &Rc<ToastHost>,
) -> ModalHost {
    let (daypass_form, _) = forms::build_form(
        surface,
        toast,
        "daypass",
        vec![
            FieldDef::new(
                FieldSpec::new("name", FieldKind::Text).required(),
                "Name",
                "Your name",
            ),
            FieldDef::new(
                FieldSpec::new("email", FieldKind::Email).required(),
                "Email",
                "you@example.com",
            ),
        ],
        "Reserve day pass",
        "Day pass reserved - pay at the front desk.",
    );
    let daypass = build_modal(
        surface,
        modals,
        MODAL_DAYPASS,
        "Get a day pass",
        &daypass_form,
    );

    let (login_form, _) = forms::build_form(
        surface,
        toast,
        "login",
        vec![
            FieldDef::new(
                FieldSpec::new("email", FieldKind::Email).required(),
                "Email",
                "you@example.com",
            ),
            FieldDef::new(
                FieldSpec::new("password", FieldKind::Password).required(),
                "Password",
                "",
            ),
        ],
        "Log in",
        "Welcome back! Your visits are on the dashboard.",
    );
    let login = build_modal(surface, modals, MODAL_LOGIN, "Member login", &login_form);

    ModalHost {
        overlays: vec![daypass, login],
    }
}

/// Build one modal overlay and register it with the tracker.
fn build_modal(
    surface: &Rc<KioskSurface>,
    modals: &Rc<ModalTracker>,
    id: &str,
    title: &str,
    content: &impl IsA<gtk4::Widget>,
) -> gtk4::Box {
    let backdrop = gtk4::Box::new(Orientation::Vertical, 0);
    backdrop.add_css_class(class::MODAL);
    backdrop.set_hexpand(true);
    backdrop.set_vexpand(true);

    let card = gtk4::Box::new(Orientation::Vertical, 8);
    card.add_css_class(class::MODAL_CARD);
    card.set_halign(Align::Center);
    card.set_valign(Align::Center);
    card.set_hexpand(true);
    card.set_vexpand(true);
    card.set_size_request(360, -1);

    let header = gtk4::Box::new(Orientation::Horizontal, 8);

    let heading = Label::new(Some(title));
    heading.add_css_class(color::SECTION_TITLE);
    heading.set_xalign(0.0);
    heading.set_hexpand(true);
    header.append(&heading);

    let close = Button::new();
    close.add_css_class(class::MODAL_CLOSE);
    close.set_child(Some(&Image::from_icon_name("window-close-symbolic")));
    close.set_valign(Align::Start);
    let modals_for_close = modals.clone();
    let id_for_close = id.to_string();
    close.connect_clicked(move |_| modals_for_close.close(&id_for_close));
    header.append(&close);

    card.append(&header);
    card.append(content.as_ref());
    backdrop.append(&card);

    surface.register_collapsible(id, &backdrop);
    modals.register(id);

    // Only a press on the backdrop itself (not the card) closes the modal.
    let gesture = GestureClick::new();
    gesture.set_button(1);
    let modals_for_press = modals.clone();
    let id_for_press = id.to_string();
    let backdrop_for_press = backdrop.clone();
    gesture.connect_pressed(move |gesture, _n_press, x, y| {
        let on_backdrop = gesture
            .widget()
            .and_then(|widget| widget.pick(x, y, PickFlags::DEFAULT))
            .is_some_and(|hit| hit == *backdrop_for_press.upcast_ref::<gtk4::Widget>());
        modals_for_press.backdrop_pressed(&id_for_press, on_backdrop);
    });
    backdrop.add_controller(gesture);

    backdrop
}
