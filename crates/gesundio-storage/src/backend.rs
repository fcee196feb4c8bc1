use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;

use gesundio_core::backend::{BoxFuture, PatientBackend};
use gesundio_core::error::BackendError;
use gesundio_core::models::appointment::{Appointment, AppointmentSummary, NewAppointment};
use gesundio_core::models::patient::{Patient, PatientPayload};
use gesundio_core::models::user::{EmailIndexEntry, NewUser, User, normalize_email};
use gesundio_core::s3_keys;

use crate::error::StorageError;
use crate::records;
use crate::store::ObjectStore;

/// Longest expiry S3 accepts for a presigned URL.
pub const MAX_PRESIGN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Presign expiry capped at [`MAX_PRESIGN_TTL`].
pub fn clamp_url_ttl(ttl: Duration) -> Duration {
    ttl.min(MAX_PRESIGN_TTL)
}

/// [`PatientBackend`] over one object store. Users, patients and appointments
/// are JSON objects; identification documents are stored as-is and handed out
/// through read URLs minted per request.
#[derive(Clone)]
pub struct StorageBackend {
    store: Arc<dyn ObjectStore>,
    document_url_ttl: Duration,
}

impl StorageBackend {
    pub fn new(store: impl ObjectStore + 'static, document_url_ttl: Duration) -> Self {
        Self {
            store: Arc::new(store),
            document_url_ttl: clamp_url_ttl(document_url_ttl),
        }
    }

    /// The user an email index entry points at. An entry whose user record is
    /// missing is completed from `new_user` under the indexed id.
    async fn indexed_user(
        &self,
        index_key: &str,
        new_user: &NewUser,
    ) -> Result<Option<User>, StorageError> {
        let Some(entry) = records::find::<EmailIndexEntry>(&*self.store, index_key).await? else {
            return Ok(None);
        };
        let user_key = s3_keys::user(&entry.user_id);
        if let Some(user) = records::find::<User>(&*self.store, &user_key).await? {
            info!(user_id = %user.id, "user with this email already exists");
            return Ok(Some(user));
        }

        warn!(user_id = %entry.user_id, "email index without user record, completing it");
        let user = new_user_record(entry.user_id, new_user);
        records::save(&*self.store, &user_key, &user).await?;
        Ok(Some(user))
    }

    async fn insert_user(&self, new_user: &NewUser) -> Result<User, StorageError> {
        let index_key = s3_keys::user_email_index(&normalize_email(&new_user.email));
        if let Some(existing) = self.indexed_user(&index_key, new_user).await? {
            return Ok(existing);
        }

        let user = new_user_record(Uuid::new_v4().to_string(), new_user);
        let entry = EmailIndexEntry {
            user_id: user.id.clone(),
        };
        match records::create(&*self.store, &index_key, &entry).await {
            Ok(()) => {}
            Err(StorageError::PreconditionFailed { key }) => {
                info!(key = %key, "email claimed concurrently");
                return self
                    .indexed_user(&index_key, new_user)
                    .await?
                    .ok_or(StorageError::PreconditionFailed { key });
            }
            Err(e) => return Err(e),
        }

        records::save(&*self.store, &s3_keys::user(&user.id), &user).await?;
        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    async fn store_patient(&self, payload: &PatientPayload) -> Result<Patient, StorageError> {
        let mut patient = Patient::from_payload(
            Uuid::new_v4().to_string(),
            payload,
            jiff::Timestamp::now(),
        );

        if let Some(document) = &payload.identification_document {
            let document_id = Uuid::new_v4();
            let key =
                s3_keys::identification_document(&payload.user_id, document_id, &document.file_name);
            self.store
                .put(&key, document.bytes.clone(), &document.content_type)
                .await?;
            info!(
                user_id = %payload.user_id,
                document_id = %document_id,
                size = document.bytes.len(),
                "identification document stored"
            );
            patient.identification_document_id = Some(document_id.to_string());
            patient.identification_document_key = Some(key);
        }

        records::save(&*self.store, &s3_keys::patient(&payload.user_id), &patient).await?;
        info!(user_id = %payload.user_id, patient_id = %patient.id, "patient registered");
        self.with_document_url(patient).await
    }

    async fn load_patient(&self, user_id: &str) -> Result<Option<Patient>, StorageError> {
        match records::find::<Patient>(&*self.store, &s3_keys::patient(user_id)).await? {
            Some(patient) => Ok(Some(self.with_document_url(patient).await?)),
            None => Ok(None),
        }
    }

    /// Fill in a fresh read URL for the patient's document, if any.
    async fn with_document_url(&self, mut patient: Patient) -> Result<Patient, StorageError> {
        patient.identification_document_url = match &patient.identification_document_key {
            Some(key) => Some(self.store.presign_get(key, self.document_url_ttl).await?),
            None => None,
        };
        Ok(patient)
    }

    async fn insert_appointment(&self, request: &NewAppointment) -> Result<Appointment, StorageError> {
        let appointment = Appointment::pending(Uuid::new_v4(), request, jiff::Timestamp::now());
        records::save(&*self.store, &s3_keys::appointment(appointment.id), &appointment).await?;
        info!(
            appointment_id = %appointment.id,
            user_id = %request.user_id,
            "appointment requested"
        );
        Ok(appointment)
    }

    async fn load_appointments(&self) -> Result<AppointmentSummary, StorageError> {
        let appointments: Vec<Appointment> =
            records::load_all(&*self.store, s3_keys::APPOINTMENTS_PREFIX).await?;
        Ok(AppointmentSummary::from_appointments(appointments))
    }
}

fn new_user_record(id: String, new_user: &NewUser) -> User {
    User {
        id,
        name: new_user.name.clone(),
        email: new_user.email.clone(),
        phone: new_user.phone.clone(),
        created_at: jiff::Timestamp::now(),
    }
}

impl PatientBackend for StorageBackend {
    fn create_user<'a>(
        &'a self,
        new_user: &'a NewUser,
    ) -> BoxFuture<'a, Result<Option<User>, BackendError>> {
        Box::pin(async move { Ok(Some(self.insert_user(new_user).await?)) })
    }

    fn get_user<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, Result<Option<User>, BackendError>> {
        Box::pin(async move { Ok(records::find(&*self.store, &s3_keys::user(user_id)).await?) })
    }

    fn register_patient<'a>(
        &'a self,
        payload: &'a PatientPayload,
    ) -> BoxFuture<'a, Result<Option<Patient>, BackendError>> {
        Box::pin(async move { Ok(Some(self.store_patient(payload).await?)) })
    }

    fn get_patient<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<Patient>, BackendError>> {
        Box::pin(async move { Ok(self.load_patient(user_id).await?) })
    }

    fn create_appointment<'a>(
        &'a self,
        request: &'a NewAppointment,
    ) -> BoxFuture<'a, Result<Option<Appointment>, BackendError>> {
        Box::pin(async move { Ok(Some(self.insert_appointment(request).await?)) })
    }

    fn recent_appointments(&self) -> BoxFuture<'_, Result<AppointmentSummary, BackendError>> {
        Box::pin(async move { Ok(self.load_appointments().await?) })
    }
}
