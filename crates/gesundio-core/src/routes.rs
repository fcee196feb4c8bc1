//! Client-side route conventions used for post-submit navigation.

use uuid::Uuid;

pub fn register(user_id: &str) -> String {
    format!("/patients/{user_id}/register")
}

pub fn new_appointment(user_id: &str) -> String {
    format!("/patients/{user_id}/new-appointment")
}

pub fn appointment_success(user_id: &str, appointment_id: Uuid) -> String {
    format!("/patients/{user_id}/new-appointment/success?appointmentId={appointment_id}")
}
