use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: String,
    pub patient_id: String,
    pub primary_physician: String,
    pub schedule: jiff::Timestamp,
    pub reason: String,
    pub note: Option<String>,
    pub status: AppointmentStatus,
    pub cancellation_reason: Option<String>,
    pub created_at: jiff::Timestamp,
}

impl Appointment {
    /// A freshly requested appointment awaiting confirmation.
    pub fn pending(id: Uuid, request: &NewAppointment, created_at: jiff::Timestamp) -> Self {
        Self {
            id,
            user_id: request.user_id.clone(),
            patient_id: request.patient_id.clone(),
            primary_physician: request.primary_physician.clone(),
            schedule: request.schedule,
            reason: request.reason.clone(),
            note: request.note.clone(),
            status: AppointmentStatus::Pending,
            cancellation_reason: None,
            created_at,
        }
    }
}

/// The exact payload of an appointment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewAppointment {
    pub user_id: String,
    pub patient_id: String,
    pub primary_physician: String,
    pub schedule: jiff::Timestamp,
    pub reason: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AppointmentStatus {
    Pending,
    Scheduled,
    Cancelled,
}

/// Admin dashboard view: per-status counts plus the appointments themselves,
/// newest first.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AppointmentSummary {
    pub total_count: usize,
    pub scheduled_count: usize,
    pub pending_count: usize,
    pub cancelled_count: usize,
    pub documents: Vec<Appointment>,
}

impl AppointmentSummary {
    pub fn from_appointments(mut appointments: Vec<Appointment>) -> Self {
        appointments.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let count = |status: AppointmentStatus| {
            appointments.iter().filter(|a| a.status == status).count()
        };
        let scheduled_count = count(AppointmentStatus::Scheduled);
        let pending_count = count(AppointmentStatus::Pending);
        let cancelled_count = count(AppointmentStatus::Cancelled);

        Self {
            total_count: appointments.len(),
            scheduled_count,
            pending_count,
            cancelled_count,
            documents: appointments,
        }
    }
}
