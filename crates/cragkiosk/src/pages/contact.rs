//! Contact page: address block and the contact form.

use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Label, Orientation};

use cragkiosk_core::form::{FieldKind, FieldSpec, FormState};

use crate::forms::{self, FieldDef};
use crate::styles::{class, color};
use crate::surface::KioskSurface;
use crate::toast::ToastHost;

use super::{page_root, page_title};

/// Build the contact page; returns the page and the form state.
pub fn build(
    surface: &Rc<KioskSurface>,
    toast: &Rc<ToastHost>,
) -> (gtk4::Box, Rc<FormState>) {
    let page = page_root();
    page.append(&page_title("Get in touch"));

    let address = Label::new(Some(
        "Cragside Climbing · Mühlenstraße 12 · hello@cragside.example",
    ));
    address.add_css_class(color::MUTED);
    address.set_xalign(0.0);
    address.add_css_class(class::SECTION);
    page.append(&address);

    let (form, state) = forms::build_form(
        surface,
        toast,
        "contact",
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
            FieldDef::new(
                FieldSpec::new("phone", FieldKind::Text),
                "Phone (optional)",
                "+49 170 000000",
            ),
            FieldDef::new(
                FieldSpec::new("message", FieldKind::Textarea).required(),
                "Message",
                "",
            ),
        ],
        "Send message",
        "Thanks! We'll get back to you shortly.",
    );

    let holder = gtk4::Box::new(Orientation::Vertical, 0);
    holder.add_css_class(class::CARD);
    holder.add_css_class(class::SECTION);
    holder.append(&form);
    page.append(&holder);

    (page, state)
}
