#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use gesundio_core::backend::{BoxFuture, PatientBackend};
use gesundio_core::error::BackendError;
use gesundio_core::models::appointment::{Appointment, AppointmentSummary, NewAppointment};
use gesundio_core::models::patient::{Patient, PatientPayload};
use gesundio_core::models::user::{NewUser, User};
use gesundio_forms::pipeline::Navigator;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// What the stub answers to every create/register call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Record,
    Empty,
    Fail,
}

pub struct StubBackend {
    pub reply: Reply,
    pub user_id: String,
    pub created: Mutex<Vec<NewUser>>,
    pub registered: Mutex<Vec<PatientPayload>>,
    pub requested: Mutex<Vec<NewAppointment>>,
}

impl StubBackend {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            user_id: "u1".to_string(),
            created: Mutex::new(Vec::new()),
            registered: Mutex::new(Vec::new()),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.created.lock().unwrap().len()
            + self.registered.lock().unwrap().len()
            + self.requested.lock().unwrap().len()
    }
}

pub fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        phone: "+4917600000000".to_string(),
        created_at: jiff::Timestamp::UNIX_EPOCH,
    }
}

impl PatientBackend for StubBackend {
    fn create_user<'a>(
        &'a self,
        new_user: &'a NewUser,
    ) -> BoxFuture<'a, Result<Option<User>, BackendError>> {
        Box::pin(async move {
            self.created.lock().unwrap().push(new_user.clone());
            match self.reply {
                Reply::Record => Ok(Some(user(&self.user_id))),
                Reply::Empty => Ok(None),
                Reply::Fail => Err(BackendError::Request("connection reset".to_string())),
            }
        })
    }

    fn get_user<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<Option<User>, BackendError>> {
        Box::pin(async move { Ok((user_id == self.user_id).then(|| user(user_id))) })
    }

    fn register_patient<'a>(
        &'a self,
        payload: &'a PatientPayload,
    ) -> BoxFuture<'a, Result<Option<Patient>, BackendError>> {
        Box::pin(async move {
            self.registered.lock().unwrap().push(payload.clone());
            match self.reply {
                Reply::Record => Ok(Some(Patient::from_payload(
                    "p1".to_string(),
                    payload,
                    jiff::Timestamp::UNIX_EPOCH,
                ))),
                Reply::Empty => Ok(None),
                Reply::Fail => Err(BackendError::Rejected("document too large".to_string())),
            }
        })
    }

    fn get_patient<'a>(
        &'a self,
        _user_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<Patient>, BackendError>> {
        Box::pin(async move { Ok(None) })
    }

    fn create_appointment<'a>(
        &'a self,
        request: &'a NewAppointment,
    ) -> BoxFuture<'a, Result<Option<Appointment>, BackendError>> {
        Box::pin(async move {
            self.requested.lock().unwrap().push(request.clone());
            match self.reply {
                Reply::Record => Ok(Some(Appointment::pending(
                    uuid::Uuid::nil(),
                    request,
                    jiff::Timestamp::UNIX_EPOCH,
                ))),
                Reply::Empty => Ok(None),
                Reply::Fail => Err(BackendError::Request("timed out".to_string())),
            }
        })
    }

    fn recent_appointments(&self) -> BoxFuture<'_, Result<AppointmentSummary, BackendError>> {
        Box::pin(async move { Ok(AppointmentSummary::from_appointments(Vec::new())) })
    }
}

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub paths: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn push(&mut self, path: &str) {
        self.paths.push(path.to_string());
    }
}

/// One event seen by [`LogCapture`]: its level and every field, formatted.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: BTreeMap<String, String>,
}

/// Layer that keeps every event it sees.
#[derive(Clone, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl LogCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn at(&self, level: Level) -> Vec<CapturedEvent> {
        self.events().into_iter().filter(|e| e.level == level).collect()
    }
}

struct FieldMap<'a>(&'a mut BTreeMap<String, String>);

impl Visit for FieldMap<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        event.record(&mut FieldMap(&mut fields));
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields,
        });
    }
}
