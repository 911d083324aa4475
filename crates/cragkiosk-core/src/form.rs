//! Per-form field validation state and the submit gate.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::surface::ViewSurface;

pub const MSG_REQUIRED: &str = "This field is required";
pub const MSG_EMAIL: &str = "Please enter a valid email address";
pub const MSG_PASSWORD: &str = "Password must be at least 6 characters";
pub const MSG_PHONE: &str = "Please enter a valid phone number";

const PASSWORD_MIN_LENGTH: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s\-+()]+$").expect("phone pattern is valid"));

/// What kind of control a field renders as (and which format rule applies).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Textarea,
}

/// Declaration of a single form field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Validate a single value against its field spec.
///
/// Rules run in a fixed order and the first failure wins: required, email
/// format, password length, phone format (keyed by the field *name*).
/// Empty optional fields are always valid.
pub fn validate_value(spec: &FieldSpec, value: &str) -> Option<&'static str> {
    let value = value.trim();

    if spec.required && value.is_empty() {
        return Some(MSG_REQUIRED);
    }
    if value.is_empty() {
        return None;
    }
    if spec.kind == FieldKind::Email && !EMAIL_PATTERN.is_match(value) {
        return Some(MSG_EMAIL);
    }
    if spec.kind == FieldKind::Password && value.chars().count() < PASSWORD_MIN_LENGTH {
        return Some(MSG_PASSWORD);
    }
    if spec.name == "phone" && !PHONE_PATTERN.is_match(value) {
        return Some(MSG_PHONE);
    }

    None
}

/// Outcome of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every field validated; carries the collected name/value pairs. The
    /// fields have already been reset.
    Submitted(Vec<(String, String)>),
    /// At least one field failed; its error stays rendered.
    Blocked,
}

/// Validation state for one form instance.
pub struct FormState {
    form: String,
    surface: Rc<dyn ViewSurface>,
    fields: Vec<FieldSpec>,
    values: RefCell<BTreeMap<String, String>>,
    errors: RefCell<BTreeMap<String, &'static str>>,
}

impl FormState {
    pub fn new(surface: Rc<dyn ViewSurface>, form: &str, fields: Vec<FieldSpec>) -> Rc<Self> {
        Rc::new(Self {
            form: form.to_string(),
            surface,
            fields,
            values: RefCell::new(BTreeMap::new()),
            errors: RefCell::new(BTreeMap::new()),
        })
    }

    /// Surface target name for one of this form's fields.
    pub fn field_target(&self, name: &str) -> String {
        format!("{}-{}", self.form, name)
    }

    pub fn error_for(&self, name: &str) -> Option<&'static str> {
        self.errors.borrow().get(name).copied()
    }

    pub fn error_count(&self) -> usize {
        self.errors.borrow().len()
    }

    pub fn value_of(&self, name: &str) -> String {
        self.values.borrow().get(name).cloned().unwrap_or_default()
    }

    /// The field's value changed: remember it and clear the error display
    /// immediately, without re-validating.
    pub fn field_changed(&self, name: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        if self.errors.borrow_mut().remove(name).is_some() {
            self.surface.set_field_error(&self.field_target(name), None);
        }
    }

    /// The field lost focus: validate it and render the result.
    pub fn field_blurred(&self, name: &str) {
        let Some(spec) = self.fields.iter().find(|spec| spec.name == name) else {
            debug!("Unknown field '{}' on form '{}'", name, self.form);
            return;
        };
        let value = self.value_of(name);
        self.apply_validation(spec, &value);
    }

    /// Gate a submit attempt: validate every field, render all errors.
    ///
    /// On success the collected pairs are returned and every field is reset
    /// to empty; the caller handles the success notice.
    pub fn submit(&self) -> SubmitOutcome {
        let mut all_valid = true;
        for spec in &self.fields {
            let value = self.value_of(&spec.name);
            if self.apply_validation(spec, &value).is_some() {
                all_valid = false;
            }
        }

        if !all_valid {
            return SubmitOutcome::Blocked;
        }

        let pairs: Vec<(String, String)> = self
            .fields
            .iter()
            .map(|spec| (spec.name.clone(), self.value_of(&spec.name)))
            .collect();

        self.reset();
        SubmitOutcome::Submitted(pairs)
    }

    /// Clear every value and error and reset the rendered fields.
    fn reset(&self) {
        self.values.borrow_mut().clear();
        self.errors.borrow_mut().clear();
        for spec in &self.fields {
            let target = self.field_target(&spec.name);
            self.surface.set_field_error(&target, None);
            self.surface.reset_field(&target);
        }
    }

    fn apply_validation(&self, spec: &FieldSpec, value: &str) -> Option<&'static str> {
        let target = self.field_target(&spec.name);
        match validate_value(spec, value) {
            Some(message) => {
                self.errors.borrow_mut().insert(spec.name.clone(), message);
                self.surface.set_field_error(&target, Some(message));
                Some(message)
            }
            None => {
                if self.errors.borrow_mut().remove(&spec.name).is_some() {
                    self.surface.set_field_error(&target, None);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::RecordingSurface;

    fn contact_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("name", FieldKind::Text).required(),
            FieldSpec::new("email", FieldKind::Email).required(),
            FieldSpec::new("phone", FieldKind::Text),
            FieldSpec::new("message", FieldKind::Textarea).required(),
        ]
    }

    #[test]
    fn test_required_beats_email_format() {
        let spec = FieldSpec::new("email", FieldKind::Email).required();
        assert_eq!(validate_value(&spec, ""), Some(MSG_REQUIRED));
        assert_eq!(validate_value(&spec, "   "), Some(MSG_REQUIRED));
    }

    #[test]
    fn test_invalid_email_fails_format() {
        let spec = FieldSpec::new("email", FieldKind::Email).required();
        assert_eq!(validate_value(&spec, "abc"), Some(MSG_EMAIL));
        assert_eq!(validate_value(&spec, "a b@c.d"), Some(MSG_EMAIL));
        assert_eq!(validate_value(&spec, "a@b"), Some(MSG_EMAIL));
    }

    #[test]
    fn test_valid_email_passes() {
        let spec = FieldSpec::new("email", FieldKind::Email);
        assert_eq!(validate_value(&spec, "a@b.co"), None);
    }

    #[test]
    fn test_short_password_fails() {
        let spec = FieldSpec::new("password", FieldKind::Password).required();
        assert_eq!(validate_value(&spec, "12345"), Some(MSG_PASSWORD));
        assert_eq!(validate_value(&spec, "123456"), None);
    }

    #[test]
    fn test_phone_rule_keys_off_field_name() {
        let spec = FieldSpec::new("phone", FieldKind::Text);
        assert_eq!(validate_value(&spec, "+43 (660) 123-456"), None);
        assert_eq!(validate_value(&spec, "call me"), Some(MSG_PHONE));

        // Same kind, different name: no phone rule.
        let other = FieldSpec::new("fax", FieldKind::Text);
        assert_eq!(validate_value(&other, "call me"), None);
    }

    #[test]
    fn test_empty_optional_field_is_valid() {
        let spec = FieldSpec::new("phone", FieldKind::Text);
        assert_eq!(validate_value(&spec, ""), None);
    }

    #[test]
    fn test_blur_renders_error() {
        let surface = RecordingSurface::new();
        let form = FormState::new(surface.clone(), "contact", contact_fields());

        form.field_changed("email", "abc");
        form.field_blurred("email");

        assert_eq!(form.error_for("email"), Some(MSG_EMAIL));
        assert_eq!(
            surface.error_for("contact-email"),
            Some(MSG_EMAIL.to_string())
        );
    }

    #[test]
    fn test_input_clears_error_without_revalidating() {
        let surface = RecordingSurface::new();
        let form = FormState::new(surface.clone(), "contact", contact_fields());

        form.field_changed("email", "abc");
        form.field_blurred("email");
        assert_eq!(form.error_count(), 1);

        // Still invalid, but typing clears the display optimistically.
        form.field_changed("email", "abcd");
        assert_eq!(form.error_count(), 0);
        assert_eq!(surface.error_for("contact-email"), None);
    }

    #[test]
    fn test_submit_blocked_renders_only_failing_fields() {
        let surface = RecordingSurface::new();
        let form = FormState::new(surface.clone(), "contact", contact_fields());

        form.field_changed("name", "Ada");
        form.field_changed("email", "not-an-email");
        form.field_changed("message", "Hi there");

        assert_eq!(form.submit(), SubmitOutcome::Blocked);
        assert_eq!(form.error_count(), 1);
        assert_eq!(form.error_for("email"), Some(MSG_EMAIL));
        assert_eq!(form.error_for("name"), None);
        assert_eq!(form.error_for("message"), None);
    }

    #[test]
    fn test_submit_success_collects_pairs_and_resets() {
        let surface = RecordingSurface::new();
        let form = FormState::new(surface.clone(), "contact", contact_fields());

        form.field_changed("name", "Ada");
        form.field_changed("email", "ada@crag.side");
        form.field_changed("message", "See you at the wall");

        let outcome = form.submit();
        let SubmitOutcome::Submitted(pairs) = outcome else {
            panic!("expected submission to pass");
        };

        assert_eq!(pairs.len(), 4);
        assert!(pairs.contains(&("name".to_string(), "Ada".to_string())));
        assert!(pairs.contains(&("email".to_string(), "ada@crag.side".to_string())));

        // All fields were reset.
        assert_eq!(form.value_of("name"), "");
        assert!(
            surface
                .reset_fields
                .borrow()
                .contains(&"contact-name".to_string())
        );
    }

    #[test]
    fn test_submit_with_all_fields_untouched_is_blocked() {
        let surface = RecordingSurface::new();
        let form = FormState::new(surface.clone(), "contact", contact_fields());

        assert_eq!(form.submit(), SubmitOutcome::Blocked);
        // name, email and message are required and empty.
        assert_eq!(form.error_count(), 3);
    }
}
