use std::future::Future;
use std::pin::Pin;

use crate::error::BackendError;
use crate::models::appointment::{Appointment, AppointmentSummary, NewAppointment};
use crate::models::patient::{Patient, PatientPayload};
use crate::models::user::{NewUser, User};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The external persistence collaborator.
///
/// Every call is a single request/response exchange; no retry or idempotency
/// key is applied on this side. `Ok(None)` means the call completed but
/// produced no usable record.
pub trait PatientBackend: Send + Sync {
    fn create_user<'a>(
        &'a self,
        user: &'a NewUser,
    ) -> BoxFuture<'a, Result<Option<User>, BackendError>>;

    fn get_user<'a>(&'a self, user_id: &'a str)
    -> BoxFuture<'a, Result<Option<User>, BackendError>>;

    fn register_patient<'a>(
        &'a self,
        payload: &'a PatientPayload,
    ) -> BoxFuture<'a, Result<Option<Patient>, BackendError>>;

    fn get_patient<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<Patient>, BackendError>>;

    fn create_appointment<'a>(
        &'a self,
        request: &'a NewAppointment,
    ) -> BoxFuture<'a, Result<Option<Appointment>, BackendError>>;

    fn recent_appointments(&self) -> BoxFuture<'_, Result<AppointmentSummary, BackendError>>;
}
