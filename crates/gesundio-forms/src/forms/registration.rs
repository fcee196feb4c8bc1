use std::str::FromStr;

use gesundio_core::backend::{BoxFuture, PatientBackend};
use gesundio_core::catalog;
use gesundio_core::error::BackendError;
use gesundio_core::models::patient::{
    BinaryAttachment, Gender, IdentificationType, Patient, PatientPayload,
};
use gesundio_core::models::user::User;
use gesundio_core::routes;

use crate::binder::{FormItem, RadioGroup, Row, Section};
use crate::error::FormError;
use crate::field::{FieldConfig, SelectOption};
use crate::forms::{doctor_options, doctor_rules, email_rules, name_rules, phone_rules};
use crate::render::file_uploader;
use crate::schema::{FieldRules, FormSchema, Rule};
use crate::state::FormState;
use crate::value::FieldValue;
use crate::{FormAssembler, FormDefinition};

const DEFAULT_IDENTIFICATION_TYPE: IdentificationType = IdentificationType::BirthCertificate;

/// Full patient registration for an existing user: personal details,
/// medical background, identity document and consents.
pub struct RegistrationForm;

impl FormDefinition for RegistrationForm {
    fn id(&self) -> &str {
        "registration"
    }

    fn title(&self) -> &str {
        "Welcome"
    }

    fn subtitle(&self) -> &str {
        "Let us know more about yourself."
    }

    fn sections(&self) -> &[Section] {
        static SECTIONS: std::sync::LazyLock<Vec<Section>> = std::sync::LazyLock::new(|| {
            let gender = RadioGroup {
                name: "gender".to_string(),
                label: "Gender".to_string(),
                options: catalog::gender_options().map(SelectOption::plain).collect(),
            };

            vec![
                Section {
                    title: Some("Personal Information".to_string()),
                    rows: vec![
                        Row::single(
                            FieldConfig::input("name")
                                .label("Full name")
                                .placeholder("Mhd Bashar Al Fattal")
                                .icon("/assets/icons/user.svg", "user"),
                        ),
                        Row::of([
                            FieldConfig::input("email")
                                .label("Email")
                                .placeholder("basharalfattal@gmail.com")
                                .icon("/assets/icons/email.svg", "email")
                                .into(),
                            FieldConfig::date_picker("birthDate")
                                .label("Date of Birth")
                                .date_format("dd/MM/yyyy")
                                .into(),
                        ]),
                        Row::of([
                            FieldConfig::phone_input("phone")
                                .label("Phone number")
                                .placeholder("(+49)176 00000000")
                                .into(),
                            FormItem::Radio(gender),
                        ]),
                        Row::of([
                            FieldConfig::input("address")
                                .label("Address")
                                .placeholder("Badstr.20 ,13357 Berlin")
                                .into(),
                            FieldConfig::input("occupation")
                                .label("Occupation")
                                .placeholder("Software Engineer")
                                .into(),
                        ]),
                        Row::of([
                            FieldConfig::input("emergencyContactName")
                                .label("Emergency contact name")
                                .placeholder("Ahmad Al Sheikh")
                                .into(),
                            FieldConfig::phone_input("emergencyContactNumber")
                                .label("Emergency contact number")
                                .placeholder("(+49)176 00000000")
                                .into(),
                        ]),
                    ],
                },
                Section {
                    title: Some("Medical Information".to_string()),
                    rows: vec![
                        Row::single(
                            FieldConfig::select("primaryPhysician", doctor_options())
                                .label("Primary care physician")
                                .placeholder("Select a physician"),
                        ),
                        Row::of([
                            FieldConfig::input("insuranceProvider")
                                .label("Insurance provider")
                                .placeholder("AOK, DAK, etc.")
                                .into(),
                            FieldConfig::input("insurancePolicyNumber")
                                .label("Insurance policy number")
                                .placeholder("ABC123456789")
                                .into(),
                        ]),
                        Row::of([
                            FieldConfig::textarea("allergies")
                                .label("Allergies (if any)")
                                .placeholder("Penicillin, pollen")
                                .into(),
                            FieldConfig::textarea("currentMedication")
                                .label("Current medication")
                                .placeholder("Insulin 10mg, etc.")
                                .into(),
                        ]),
                        Row::of([
                            FieldConfig::textarea("pastMedicalHistory")
                                .label("Past medical history")
                                .placeholder("Appendectomy in 2015")
                                .into(),
                            FieldConfig::textarea("familyMedicalHistory")
                                .label("Family medical history")
                                .placeholder("Mother had heart disease, etc.")
                                .into(),
                        ]),
                    ],
                },
                Section {
                    title: Some("Identification and Verification".to_string()),
                    rows: vec![
                        Row::single(
                            FieldConfig::select(
                                "identificationType",
                                catalog::identification_types()
                                    .map(SelectOption::plain)
                                    .collect(),
                            )
                            .label("Identification type")
                            .placeholder("Select an identification type"),
                        ),
                        Row::single(
                            FieldConfig::input("identificationNumber")
                                .label("Identification number")
                                .placeholder("ABCD123456789"),
                        ),
                        Row::single(
                            FieldConfig::skeleton("identificationDocument", file_uploader)
                                .label("Scanned copy of identification document"),
                        ),
                    ],
                },
                Section {
                    title: Some("Consent and Privacy".to_string()),
                    rows: vec![
                        Row::single(
                            FieldConfig::checkbox("treatmentConsent")
                                .label("I consent to receive treatment for my health condition."),
                        ),
                        Row::single(
                            FieldConfig::checkbox("disclosureConsent").label(
                                "I consent to the use and disclosure of my health information for treatment purposes.",
                            ),
                        ),
                        Row::single(
                            FieldConfig::checkbox("privacyConsent")
                                .label("I acknowledge that I have reviewed and agree to the privacy policy."),
                        ),
                    ],
                },
            ]
        });
        &SECTIONS
    }

    fn schema(&self) -> &FormSchema {
        static SCHEMA: std::sync::LazyLock<FormSchema> = std::sync::LazyLock::new(|| {
            let consent = |name: &str, what: &str| {
                FieldRules::required(name).rule(Rule::MustBeTrue(format!(
                    "You must consent to {what} in order to proceed"
                )))
            };

            FormSchema::new(vec![
                name_rules("name"),
                email_rules("email"),
                phone_rules("phone"),
                FieldRules::required("birthDate")
                    .rule(Rule::Required("Date of birth is required".to_string())),
                FieldRules::required("gender").rule(Rule::OneOf(
                    catalog::gender_options().map(str::to_string).collect(),
                    "Select a gender".to_string(),
                )),
                FieldRules::required("address")
                    .min_len(5, "Address must be at least 5 characters")
                    .max_len(500, "Address must be at most 500 characters"),
                FieldRules::required("occupation")
                    .min_len(2, "Occupation must be at least 2 characters")
                    .max_len(500, "Occupation must be at most 500 characters"),
                FieldRules::required("emergencyContactName")
                    .min_len(2, "Contact name must be at least 2 characters")
                    .max_len(50, "Contact name must be at most 50 characters"),
                phone_rules("emergencyContactNumber"),
                doctor_rules("primaryPhysician"),
                FieldRules::required("insuranceProvider")
                    .min_len(2, "Insurance name must be at least 2 characters")
                    .max_len(50, "Insurance name must be at most 50 characters"),
                FieldRules::required("insurancePolicyNumber")
                    .min_len(2, "Policy number must be at least 2 characters")
                    .max_len(50, "Policy number must be at most 50 characters"),
                FieldRules::optional("allergies"),
                FieldRules::optional("currentMedication"),
                FieldRules::optional("familyMedicalHistory"),
                FieldRules::optional("pastMedicalHistory"),
                FieldRules::optional("identificationType").rule(Rule::OneOf(
                    catalog::identification_types().map(str::to_string).collect(),
                    "Select a valid identification type".to_string(),
                )),
                FieldRules::optional("identificationNumber"),
                FieldRules::optional("identificationDocument"),
                consent("treatmentConsent", "treatment"),
                consent("disclosureConsent", "disclosure"),
                consent("privacyConsent", "privacy"),
            ])
        });
        &SCHEMA
    }

    fn default_state(&self) -> FormState {
        let mut state = FormState::new();
        for item in self.items() {
            state.insert(item.name(), item.empty_value());
        }
        state.insert(
            "identificationType",
            FieldValue::Text(DEFAULT_IDENTIFICATION_TYPE.label().to_string()),
        );
        state
    }
}

/// First attached file, if any, as a binary attachment.
fn identification_document(state: &FormState) -> Option<BinaryAttachment> {
    state
        .files("identificationDocument")
        .first()
        .map(|file| BinaryAttachment {
            file_name: file.name.clone(),
            content_type: file.content_type.clone(),
            bytes: file.bytes.clone(),
        })
}

impl FormAssembler for RegistrationForm {
    type Context = User;
    type Payload = PatientPayload;
    type Record = Patient;

    fn shape(&self, user: &User, state: &FormState) -> Result<PatientPayload, FormError> {
        let phone = |name: &str| {
            state
                .phone(name)
                .map(|p| p.as_str().to_string())
                .ok_or_else(|| FormError::MissingValue(name.to_string()))
        };
        let birth_date = state
            .date("birthDate")
            .ok_or_else(|| FormError::MissingValue("birthDate".to_string()))?
            .date();
        let identification_type = state
            .optional_text("identificationType")
            .map(|t| IdentificationType::from_str(&t))
            .transpose()?;

        Ok(PatientPayload {
            user_id: user.id.clone(),
            name: state.text("name").trim().to_string(),
            email: state.text("email").trim().to_string(),
            phone: phone("phone")?,
            birth_date,
            gender: Gender::from_str(state.text("gender"))?,
            address: state.text("address").trim().to_string(),
            occupation: state.text("occupation").trim().to_string(),
            emergency_contact_name: state.text("emergencyContactName").trim().to_string(),
            emergency_contact_number: phone("emergencyContactNumber")?,
            primary_physician: state.text("primaryPhysician").to_string(),
            insurance_provider: state.text("insuranceProvider").trim().to_string(),
            insurance_policy_number: state.text("insurancePolicyNumber").trim().to_string(),
            allergies: state.optional_text("allergies"),
            current_medication: state.optional_text("currentMedication"),
            family_medical_history: state.optional_text("familyMedicalHistory"),
            past_medical_history: state.optional_text("pastMedicalHistory"),
            identification_type,
            identification_number: state.optional_text("identificationNumber"),
            identification_document: identification_document(state),
            treatment_consent: state.flag("treatmentConsent"),
            disclosure_consent: state.flag("disclosureConsent"),
            privacy_consent: state.flag("privacyConsent"),
        })
    }

    fn persist<'a>(
        &'a self,
        backend: &'a dyn PatientBackend,
        payload: &'a PatientPayload,
    ) -> BoxFuture<'a, Result<Option<Patient>, BackendError>> {
        backend.register_patient(payload)
    }

    fn next_route(&self, user: &User, patient: &Patient) -> Option<String> {
        if patient.id.trim().is_empty() {
            return None;
        }
        Some(routes::new_appointment(&user.id))
    }
}
