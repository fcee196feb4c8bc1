use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| CoreError::InvalidGender(s.to_string()))
    }
}

/// Accepted kinds of identity document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum IdentificationType {
    #[serde(rename = "Birth Certificate")]
    BirthCertificate,
    #[serde(rename = "Driver's License")]
    DriversLicense,
    #[serde(rename = "Medical Insurance Card/Policy")]
    MedicalInsuranceCard,
    #[serde(rename = "Military ID Card")]
    MilitaryIdCard,
    #[serde(rename = "National Identity Card")]
    NationalIdentityCard,
    #[serde(rename = "Passport")]
    Passport,
    #[serde(rename = "Resident Alien Card (Green Card)")]
    ResidentAlienCard,
    #[serde(rename = "Social Security Card")]
    SocialSecurityCard,
    #[serde(rename = "State ID Card")]
    StateIdCard,
    #[serde(rename = "Student ID Card")]
    StudentIdCard,
    #[serde(rename = "Voter ID Card")]
    VoterIdCard,
}

impl IdentificationType {
    pub const ALL: [IdentificationType; 11] = [
        IdentificationType::BirthCertificate,
        IdentificationType::DriversLicense,
        IdentificationType::MedicalInsuranceCard,
        IdentificationType::MilitaryIdCard,
        IdentificationType::NationalIdentityCard,
        IdentificationType::Passport,
        IdentificationType::ResidentAlienCard,
        IdentificationType::SocialSecurityCard,
        IdentificationType::StateIdCard,
        IdentificationType::StudentIdCard,
        IdentificationType::VoterIdCard,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IdentificationType::BirthCertificate => "Birth Certificate",
            IdentificationType::DriversLicense => "Driver's License",
            IdentificationType::MedicalInsuranceCard => "Medical Insurance Card/Policy",
            IdentificationType::MilitaryIdCard => "Military ID Card",
            IdentificationType::NationalIdentityCard => "National Identity Card",
            IdentificationType::Passport => "Passport",
            IdentificationType::ResidentAlienCard => "Resident Alien Card (Green Card)",
            IdentificationType::SocialSecurityCard => "Social Security Card",
            IdentificationType::StateIdCard => "State ID Card",
            IdentificationType::StudentIdCard => "Student ID Card",
            IdentificationType::VoterIdCard => "Voter ID Card",
        }
    }
}

impl fmt::Display for IdentificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IdentificationType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IdentificationType::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| CoreError::InvalidIdentificationType(s.to_string()))
    }
}

/// Raw file bytes plus the media type and file name they were uploaded with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Flat registration payload sent to the persistence collaborator once per
/// successful submit. Never stored as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientPayload {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: jiff::civil::Date,
    pub gender: Gender,
    pub address: String,
    pub occupation: String,
    pub emergency_contact_name: String,
    pub emergency_contact_number: String,
    pub primary_physician: String,
    pub insurance_provider: String,
    pub insurance_policy_number: String,
    pub allergies: Option<String>,
    pub current_medication: Option<String>,
    pub family_medical_history: Option<String>,
    pub past_medical_history: Option<String>,
    pub identification_type: Option<IdentificationType>,
    pub identification_number: Option<String>,
    pub identification_document: Option<BinaryAttachment>,
    pub treatment_consent: bool,
    pub disclosure_consent: bool,
    pub privacy_consent: bool,
}

/// A registered patient as persisted by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: jiff::civil::Date,
    pub gender: Gender,
    pub address: String,
    pub occupation: String,
    pub emergency_contact_name: String,
    pub emergency_contact_number: String,
    pub primary_physician: String,
    pub insurance_provider: String,
    pub insurance_policy_number: String,
    pub allergies: Option<String>,
    pub current_medication: Option<String>,
    pub family_medical_history: Option<String>,
    pub past_medical_history: Option<String>,
    pub identification_type: Option<IdentificationType>,
    pub identification_number: Option<String>,
    /// Set when a document was uploaded alongside the registration.
    pub identification_document_id: Option<String>,
    /// Object key of the uploaded document.
    pub identification_document_key: Option<String>,
    /// Short-lived read URL, filled in from the key each time the record is
    /// read. Never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identification_document_url: Option<String>,
    pub treatment_consent: bool,
    pub disclosure_consent: bool,
    pub privacy_consent: bool,
    pub created_at: jiff::Timestamp,
}

impl Patient {
    /// Build the persisted record from a payload. Document fields are left
    /// empty; the storage layer fills them in after uploading the bytes.
    pub fn from_payload(id: String, payload: &PatientPayload, created_at: jiff::Timestamp) -> Self {
        Self {
            id,
            user_id: payload.user_id.clone(),
            name: payload.name.clone(),
            email: payload.email.clone(),
            phone: payload.phone.clone(),
            birth_date: payload.birth_date,
            gender: payload.gender,
            address: payload.address.clone(),
            occupation: payload.occupation.clone(),
            emergency_contact_name: payload.emergency_contact_name.clone(),
            emergency_contact_number: payload.emergency_contact_number.clone(),
            primary_physician: payload.primary_physician.clone(),
            insurance_provider: payload.insurance_provider.clone(),
            insurance_policy_number: payload.insurance_policy_number.clone(),
            allergies: payload.allergies.clone(),
            current_medication: payload.current_medication.clone(),
            family_medical_history: payload.family_medical_history.clone(),
            past_medical_history: payload.past_medical_history.clone(),
            identification_type: payload.identification_type,
            identification_number: payload.identification_number.clone(),
            identification_document_id: None,
            identification_document_key: None,
            identification_document_url: None,
            treatment_consent: payload.treatment_consent,
            disclosure_consent: payload.disclosure_consent,
            privacy_consent: payload.privacy_consent,
            created_at,
        }
    }
}
