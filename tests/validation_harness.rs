#![allow(unused)]
//! Supplier form validation harness.
//!
//! # What this covers
//!
//! - Validation against a realistic supplier roster: duplicate e-mail
//!   detection ignores case and the supplier being edited.
//! - Field messages are keyed by the form's field names.
//!
//! # What this does NOT cover
//!
//! - Individual pattern rules (unit tests in `admin_core::validate`)
//!
//! # Running
//!
//! ```sh
//! cargo test --test validation_harness
//! ```

mod common;

use admin_core::validate::{validate_supplier, FormMode, SupplierForm};
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn form(email: &str) -> SupplierForm {
    SupplierForm {
        company_name: "Deccan Tiles".into(),
        contact_person: "Anil Kumar".into(),
        email: email.into(),
        phone: "9876501234".into(),
        category: "Tiles & Flooring".into(),
        gst_number: "27AAPFU0939F1ZV".into(),
        pan_number: "AAPFU0939F".into(),
        location: "Pune".into(),
        password: "Tiles2024".into(),
        confirm_password: "Tiles2024".into(),
    }
}

#[test]
fn new_supplier_with_fresh_email_is_valid() {
    let errors = validate_supplier(&form("hello@deccantiles.in"), &suppliers(), &FormMode::Create);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn existing_email_in_other_case_is_rejected() {
    let errors = validate_supplier(&form("SALES@BuildMart.in"), &suppliers(), &FormMode::Create);
    assert_eq!(errors.keys().copied().collect::<Vec<_>>(), vec!["email"]);
}

#[test]
fn editing_keeps_own_email() {
    let mut f = form("sales@buildmart.in");
    f.password.clear();
    f.confirm_password.clear();
    let errors = validate_supplier(&f, &suppliers(), &FormMode::Edit(json!(21)));
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");

    let errors = validate_supplier(&f, &suppliers(), &FormMode::Edit(json!(22)));
    assert!(errors.contains_key("email"));
}

#[test]
fn mismatched_confirmation() {
    let mut f = form("new@deccantiles.in");
    f.confirm_password = "Tiles2025".into();
    let errors = validate_supplier(&f, &suppliers(), &FormMode::Create);
    assert_eq!(errors.get("confirmPassword").map(String::as_str), Some("Passwords do not match"));
}
