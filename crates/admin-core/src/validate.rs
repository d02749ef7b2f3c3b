//! Supplier form validation.
//!
//! Mirrors the checks the supplier screen runs before saving. Every failing
//! field gets exactly one message; the first failing rule for a field wins.

use crate::types::{scalar_text, Record};
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));
static INDIAN_MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9]\d{9}$").expect("mobile regex"));
static GST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$").expect("gst regex")
});
static PAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("pan regex"));
static LETTERS_AND_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("name regex"));

/// Field name → message for every field that failed validation.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// The raw values of a supplier create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierForm {
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub category: String,
    pub gst_number: String,
    pub pan_number: String,
    pub location: String,
    pub password: String,
    pub confirm_password: String,
}

/// Whether the form creates a new supplier or edits the one with this id.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit(Value),
}

/// Validate a supplier form against the rules of the supplier screen.
///
/// `existing` is the current supplier collection, used for the duplicate
/// email check; when editing, the supplier being edited is excluded. Password
/// rules only apply when creating.
pub fn validate_supplier(form: &SupplierForm, existing: &[Record], mode: &FormMode) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let company = form.company_name.trim();
    if company.is_empty() {
        errors.insert("companyName", "Company name is required".into());
    } else if company.chars().count() < 3 {
        errors.insert("companyName", "Company name must be at least 3 characters long".into());
    }

    let contact = form.contact_person.trim();
    if contact.is_empty() {
        errors.insert("contactPerson", "Contact person is required".into());
    } else if contact.chars().count() < 3 {
        errors.insert(
            "contactPerson",
            "Contact person name must be at least 3 characters long".into(),
        );
    } else if !LETTERS_AND_SPACES.is_match(contact) {
        errors.insert(
            "contactPerson",
            "Contact person can only contain letters and spaces".into(),
        );
    }

    let email = form.email.trim();
    if email.is_empty() {
        errors.insert("email", "Email is required".into());
    } else if !EMAIL.is_match(email) {
        errors.insert("email", "Please enter a valid email address".into());
    } else if is_duplicate_email(email, existing, mode) {
        errors.insert("email", "This email is already registered".into());
    }

    let phone = form.phone.trim();
    if phone.is_empty() {
        errors.insert("phone", "Phone number is required".into());
    } else if !INDIAN_MOBILE.is_match(phone) {
        errors.insert("phone", "Please enter a valid 10-digit Indian mobile number".into());
    }

    if form.category.trim().is_empty() {
        errors.insert("category", "Please select a category".into());
    }

    let gst = form.gst_number.trim();
    if gst.is_empty() {
        errors.insert("gstNumber", "GST number is required".into());
    } else if !GST.is_match(gst) {
        errors.insert(
            "gstNumber",
            "Please enter a valid GST number (e.g., 22AAAAA0000A1Z5)".into(),
        );
    }

    let pan = form.pan_number.trim();
    if !pan.is_empty() && !PAN.is_match(pan) {
        errors.insert("panNumber", "Please enter a valid PAN number (e.g., AAAAA0000A)".into());
    }

    let location = form.location.trim();
    if location.is_empty() {
        errors.insert("location", "Location is required".into());
    } else if location.chars().count() < 2 {
        errors.insert("location", "Location must be at least 2 characters".into());
    }

    if *mode == FormMode::Create {
        validate_password(form, &mut errors);
    }

    errors
}

fn is_duplicate_email(email: &str, existing: &[Record], mode: &FormMode) -> bool {
    let email = email.to_lowercase();
    existing.iter().any(|s| {
        let same_email = s
            .get("email")
            .and_then(scalar_text)
            .is_some_and(|e| e.to_lowercase() == email);
        let is_self = match mode {
            FormMode::Edit(id) => s.id() == Some(id),
            FormMode::Create => false,
        };
        same_email && !is_self
    })
}

fn validate_password(form: &SupplierForm, errors: &mut FieldErrors) {
    let password = &form.password;
    if password.is_empty() {
        errors.insert("password", "Password is required".into());
    } else if password.chars().count() < 8 {
        errors.insert("password", "Password must be at least 8 characters long".into());
    } else if !(password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit()))
    {
        errors.insert(
            "password",
            "Password must contain uppercase, lowercase, and number".into(),
        );
    }

    if form.confirm_password.is_empty() {
        errors.insert("confirmPassword", "Please confirm your password".into());
    } else if *password != form.confirm_password {
        errors.insert("confirmPassword", "Passwords do not match".into());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
