//! S3 key/path conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the canonical
//! layout of objects in the Gesundio S3 bucket.

use uuid::Uuid;

pub fn user(id: &str) -> String {
    format!("users/{id}.json")
}

/// Email uniqueness marker pointing at the owning user. Expects an address
/// already passed through [`normalize_email`](crate::models::user::normalize_email).
pub fn user_email_index(normalized_email: &str) -> String {
    let email = normalized_email.replace(['/', '\\'], "_");
    format!("users/by-email/{email}.json")
}

pub fn patient(user_id: &str) -> String {
    format!("patients/{user_id}.json")
}

/// Uploaded identity document. Path separators in the original file name are
/// replaced so the name cannot escape its document prefix.
pub fn identification_document(user_id: &str, document_id: Uuid, file_name: &str) -> String {
    let file_name = file_name.replace(['/', '\\'], "_");
    format!("patients/{user_id}/documents/{document_id}/{file_name}")
}

pub const APPOINTMENTS_PREFIX: &str = "appointments/";

pub fn appointment(id: Uuid) -> String {
    format!("appointments/{id}.json")
}
