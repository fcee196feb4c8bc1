use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// An account created by the intake form. The identifier is opaque and is
/// interpolated into client-side routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: jiff::Timestamp,
}

/// The exact payload of an intake submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Points an email address at the user that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailIndexEntry {
    pub user_id: String,
}

/// Emails are unique ignoring case and surrounding whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
