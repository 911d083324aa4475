//! Form construction and wiring.
//!
//! Builds a GTK form from field declarations and connects it to a core
//! `FormState`: typing stores the value and optimistically clears the
//! error, leaving a field validates it, the submit button gates on the
//! whole form. The success path logs the collected pairs and shows a
//! toast; there is no backend behind any of the kiosk's forms.

use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Align, Label, Orientation};
use tracing::{debug, info};

use cragkiosk_core::form::{FieldKind, FieldSpec, FormState, SubmitOutcome};

use crate::styles::{button, field};
use crate::surface::{FieldControl, KioskSurface};
use crate::toast::{NoticeKind, ToastHost};

/// Declaration of one rendered field: the validation spec plus captions.
pub struct FieldDef {
    pub spec: FieldSpec,
    pub label: &'static str,
    pub placeholder: &'static str,
}

impl FieldDef {
    pub fn new(spec: FieldSpec, label: &'static str, placeholder: &'static str) -> Self {
        Self {
            spec,
            label,
            placeholder,
        }
    }
}

/// Build a form and wire it to a new `FormState`.
///
/// Returns the form's root widget and the state object.
pub fn build_form(
    surface: &Rc<KioskSurface>,
    toast: &Rc<ToastHost>,
    form_id: &str,
    fields: Vec<FieldDef>,
    submit_label: &str,
    success_message: &'static str,
) -> (gtk4::Box, Rc<FormState>) {
    let specs: Vec<FieldSpec> = fields.iter().map(|def| def.spec.clone()).collect();
    let state = FormState::new(surface.clone(), form_id, specs);

    let root = gtk4::Box::new(Orientation::Vertical, 0);

    for def in &fields {
        let row = gtk4::Box::new(Orientation::Vertical, 2);
        row.add_css_class(field::ROW);

        let caption = Label::new(Some(def.label));
        caption.add_css_class(field::LABEL);
        caption.set_xalign(0.0);
        row.append(&caption);

        let name = def.spec.name.clone();
        let target = state.field_target(&name);

        let control = match def.spec.kind {
            FieldKind::Textarea => {
                let view = gtk4::TextView::new();
                view.set_wrap_mode(gtk4::WrapMode::WordChar);
                view.set_height_request(90);

                let state_for_input = state.clone();
                let name_for_input = name.clone();
                view.buffer().connect_changed(move |buffer| {
                    let text = buffer.text(&buffer.start_iter(), &buffer.end_iter(), false);
                    state_for_input.field_changed(&name_for_input, &text);
                });

                row.append(&view);
                FieldControl::Multiline(view)
            }
            kind => {
                let entry = gtk4::Entry::new();
                entry.set_placeholder_text(Some(def.placeholder));
                if kind == FieldKind::Password {
                    entry.set_visibility(false);
                }
                if kind == FieldKind::Email {
                    entry.set_input_purpose(gtk4::InputPurpose::Email);
                }

                let state_for_input = state.clone();
                let name_for_input = name.clone();
                entry.connect_changed(move |entry| {
                    state_for_input.field_changed(&name_for_input, entry.text().as_str());
                });

                row.append(&entry);
                FieldControl::Entry(entry)
            }
        };

        // Leaving the field validates just that field.
        let focus = gtk4::EventControllerFocus::new();
        let state_for_blur = state.clone();
        let name_for_blur = name.clone();
        focus.connect_leave(move |_| {
            state_for_blur.field_blurred(&name_for_blur);
        });
        control.widget().add_controller(focus);

        surface.register_field(&target, control, &row);
        root.append(&row);
    }

    let submit = gtk4::Button::with_label(submit_label);
    submit.add_css_class(button::PRIMARY);
    submit.set_halign(Align::Start);
    submit.set_margin_top(14);

    let state_for_submit = state.clone();
    let toast_for_submit = toast.clone();
    let form_id = form_id.to_string();
    submit.connect_clicked(move |_| match state_for_submit.submit() {
        SubmitOutcome::Submitted(pairs) => {
            info!("Form '{}' submitted: {:?}", form_id, pairs);
            toast_for_submit.show(success_message, NoticeKind::Success);
        }
        SubmitOutcome::Blocked => {
            debug!("Form '{}' blocked by validation", form_id);
        }
    });
    root.append(&submit);

    (root, state)
}
