#![allow(dead_code)]

use std::sync::Mutex;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use gesundio_core::backend::{BoxFuture, PatientBackend};
use gesundio_core::error::BackendError;
use gesundio_core::models::appointment::{Appointment, AppointmentSummary, NewAppointment};
use gesundio_core::models::patient::{Patient, PatientPayload};
use gesundio_core::models::user::{NewUser, User};
use gesundio_server::state::AppState;

/// In-memory backend seeded with user `u1`.
pub struct MemoryBackend {
    pub offline: bool,
    pub users: Mutex<Vec<User>>,
    pub patients: Mutex<Vec<Patient>>,
    pub appointments: Mutex<Vec<Appointment>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            offline: false,
            users: Mutex::new(vec![User {
                id: "u1".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: "+4917600000000".to_string(),
                created_at: jiff::Timestamp::UNIX_EPOCH,
            }]),
            patients: Mutex::new(Vec::new()),
            appointments: Mutex::new(Vec::new()),
        }
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::new()
        }
    }

    fn check(&self) -> Result<(), BackendError> {
        if self.offline {
            Err(BackendError::Request("bucket unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl PatientBackend for MemoryBackend {
    fn create_user<'a>(
        &'a self,
        new_user: &'a NewUser,
    ) -> BoxFuture<'a, Result<Option<User>, BackendError>> {
        Box::pin(async move {
            self.check()?;
            let mut users = self.users.lock().unwrap();
            let user = User {
                id: format!("u{}", users.len() + 1),
                name: new_user.name.clone(),
                email: new_user.email.clone(),
                phone: new_user.phone.clone(),
                created_at: jiff::Timestamp::UNIX_EPOCH,
            };
            users.push(user.clone());
            Ok(Some(user))
        })
    }

    fn get_user<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<Option<User>, BackendError>> {
        Box::pin(async move {
            self.check()?;
            Ok(self.users.lock().unwrap().iter().find(|u| u.id == user_id).cloned())
        })
    }

    fn register_patient<'a>(
        &'a self,
        payload: &'a PatientPayload,
    ) -> BoxFuture<'a, Result<Option<Patient>, BackendError>> {
        Box::pin(async move {
            self.check()?;
            let mut patient =
                Patient::from_payload("p1".to_string(), payload, jiff::Timestamp::UNIX_EPOCH);
            if let Some(document) = &payload.identification_document {
                patient.identification_document_id = Some(document.file_name.clone());
            }
            self.patients.lock().unwrap().push(patient.clone());
            Ok(Some(patient))
        })
    }

    fn get_patient<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<Patient>, BackendError>> {
        Box::pin(async move {
            self.check()?;
            Ok(self
                .patients
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.user_id == user_id)
                .cloned())
        })
    }

    fn create_appointment<'a>(
        &'a self,
        request: &'a NewAppointment,
    ) -> BoxFuture<'a, Result<Option<Appointment>, BackendError>> {
        Box::pin(async move {
            self.check()?;
            let appointment =
                Appointment::pending(uuid::Uuid::new_v4(), request, jiff::Timestamp::UNIX_EPOCH);
            self.appointments.lock().unwrap().push(appointment.clone());
            Ok(Some(appointment))
        })
    }

    fn recent_appointments(&self) -> BoxFuture<'_, Result<AppointmentSummary, BackendError>> {
        Box::pin(async move {
            self.check()?;
            let appointments = self.appointments.lock().unwrap().clone();
            Ok(AppointmentSummary::from_appointments(appointments))
        })
    }
}

pub async fn send(
    state: AppState,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    send_raw(state, method, uri, body.map(|json| json.to_string())).await
}

/// Like [`send`], with the body taken verbatim and labelled as JSON.
pub async fn send_raw(
    state: AppState,
    method: &str,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(text) => {
            builder = builder.header("content-type", "application/json");
            Body::from(text)
        }
        None => Body::empty(),
    };

    let response = gesundio_server::router(state)
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
