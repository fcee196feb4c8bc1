pub mod appointment;
pub mod intake;
pub mod registration;

use gesundio_core::catalog::DOCTORS;

use crate::field::SelectOption;
use crate::schema::{FieldRules, Rule};

// Messages and options shared across forms.

pub(crate) fn name_rules(name: &str) -> FieldRules {
    FieldRules::required(name)
        .min_len(2, "Name must be at least 2 characters")
        .max_len(50, "Name must be at most 50 characters")
}

pub(crate) fn email_rules(name: &str) -> FieldRules {
    FieldRules::required(name).rule(Rule::Email("Invalid email address".to_string()))
}

pub(crate) fn phone_rules(name: &str) -> FieldRules {
    FieldRules::required(name).rule(Rule::Phone("Invalid phone number".to_string()))
}

pub(crate) fn doctor_options() -> Vec<SelectOption> {
    DOCTORS
        .iter()
        .map(|d| SelectOption::plain(d.name).with_image(d.image))
        .collect()
}

pub(crate) fn doctor_rules(name: &str) -> FieldRules {
    FieldRules::required(name).rule(Rule::OneOf(
        DOCTORS.iter().map(|d| d.name.to_string()).collect(),
        "Select at least one doctor".to_string(),
    ))
}
