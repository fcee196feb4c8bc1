mod common;

use std::time::Duration;

use common::MemoryStore;
use gesundio_core::backend::PatientBackend;
use gesundio_core::error::BackendError;
use gesundio_core::models::appointment::{AppointmentStatus, NewAppointment};
use gesundio_core::models::patient::{BinaryAttachment, Gender, PatientPayload};
use gesundio_core::models::user::NewUser;
use gesundio_core::s3_keys;
use gesundio_storage::backend::{MAX_PRESIGN_TTL, StorageBackend, clamp_url_ttl};
use gesundio_storage::error::StorageError;
use serde_json::json;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

fn backend() -> (StorageBackend, MemoryStore) {
    let store = MemoryStore::default();
    (StorageBackend::new(store.clone(), DAY), store)
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Ada".to_string(),
        email: email.to_string(),
        phone: "+4917600000000".to_string(),
    }
}

fn payload(document: Option<BinaryAttachment>) -> PatientPayload {
    PatientPayload {
        user_id: "u1".to_string(),
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "+4917600000000".to_string(),
        birth_date: jiff::civil::date(1990, 4, 15),
        gender: Gender::Female,
        address: "Badstr. 20, 13357 Berlin".to_string(),
        occupation: "Engineer".to_string(),
        emergency_contact_name: "Charles Babbage".to_string(),
        emergency_contact_number: "+4917611111111".to_string(),
        primary_physician: "Jane Powell".to_string(),
        insurance_provider: "AOK".to_string(),
        insurance_policy_number: "ABC123456789".to_string(),
        allergies: None,
        current_medication: None,
        family_medical_history: None,
        past_medical_history: None,
        identification_type: None,
        identification_number: None,
        identification_document: document,
        treatment_consent: true,
        disclosure_consent: true,
        privacy_consent: true,
    }
}

#[test]
fn presign_ttl_is_capped_at_seven_days() {
    assert_eq!(clamp_url_ttl(Duration::from_secs(3600)), Duration::from_secs(3600));
    assert_eq!(clamp_url_ttl(Duration::from_secs(30 * 24 * 3600)), MAX_PRESIGN_TTL);
    assert_eq!(MAX_PRESIGN_TTL, Duration::from_secs(604_800));
}

#[test]
fn storage_errors_surface_as_backend_requests() {
    let err: BackendError = StorageError::NotFound {
        key: "users/u1.json".to_string(),
    }
    .into();
    assert!(matches!(err, BackendError::Request(ref m) if m.contains("users/u1.json")));

    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: BackendError = StorageError::Serialization(json_err).into();
    assert!(matches!(err, BackendError::Serialization(_)));
}

#[tokio::test]
async fn same_email_in_any_case_maps_to_one_user() {
    let (backend, store) = backend();

    let first = backend.create_user(&new_user("ada@example.com")).await.unwrap().unwrap();
    let second = backend
        .create_user(&new_user("  ADA@Example.COM "))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(first.id, second.id);
    let index = s3_keys::user_email_index("ada@example.com");
    assert_eq!(store.json(&index)["user_id"], first.id);
    let user_records: Vec<_> = store
        .keys()
        .into_iter()
        .filter(|k| k.starts_with("users/") && !k.starts_with("users/by-email/"))
        .collect();
    assert_eq!(user_records, [s3_keys::user(&first.id)]);
}

#[tokio::test]
async fn different_emails_get_different_users() {
    let (backend, _) = backend();
    let a = backend.create_user(&new_user("ada@example.com")).await.unwrap().unwrap();
    let b = backend.create_user(&new_user("grace@example.com")).await.unwrap().unwrap();
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn losing_a_concurrent_signup_returns_the_winner() {
    let (backend, store) = backend();
    let index = s3_keys::user_email_index("ada@example.com");
    store.before_next_create(&index, json!({ "user_id": "winner" }));
    store.before_next_create(
        &s3_keys::user("winner"),
        json!({
            "id": "winner",
            "name": "Ada",
            "email": "ada@example.com",
            "phone": "+4917600000000",
            "created_at": "2026-01-01T00:00:00Z",
        }),
    );

    let user = backend.create_user(&new_user("ada@example.com")).await.unwrap().unwrap();

    assert_eq!(user.id, "winner");
    assert_eq!(store.json(&index)["user_id"], "winner");
    assert_eq!(
        store.keys().iter().filter(|k| k.starts_with("users/")).count(),
        2
    );
}

#[tokio::test]
async fn index_without_user_record_is_completed() {
    let (backend, store) = backend();
    store.insert_json(
        &s3_keys::user_email_index("ada@example.com"),
        json!({ "user_id": "orphan" }),
    );

    let user = backend.create_user(&new_user("Ada@example.com")).await.unwrap().unwrap();

    assert_eq!(user.id, "orphan");
    assert_eq!(store.json(&s3_keys::user("orphan"))["name"], "Ada");
    assert!(backend.get_user("orphan").await.unwrap().is_some());
}

#[tokio::test]
async fn document_key_is_stored_and_url_minted_per_read() {
    let (backend, store) = backend();
    let scan = BinaryAttachment {
        file_name: "passport.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0x89, b'P', b'N', b'G', 0, 255],
    };

    let patient = backend
        .register_patient(&payload(Some(scan.clone())))
        .await
        .unwrap()
        .unwrap();

    let key = patient.identification_document_key.clone().unwrap();
    assert!(key.starts_with("patients/u1/documents/"));
    assert!(key.ends_with("/passport.png"));
    let object = store.object(&key).unwrap();
    assert_eq!(object.body, scan.bytes);
    assert_eq!(object.content_type, "image/png");

    let record = store.json(&s3_keys::patient("u1"));
    assert_eq!(record["identification_document_key"], key.as_str());
    assert!(record.get("identification_document_url").is_none());

    let read = backend.get_patient("u1").await.unwrap().unwrap();
    assert_eq!(
        read.identification_document_url.as_deref(),
        Some(format!("memory://{key}?expires=86400").as_str())
    );
    assert_eq!(patient.identification_document_url, read.identification_document_url);
}

#[tokio::test]
async fn patient_without_document_has_no_url() {
    let (backend, _) = backend();
    backend.register_patient(&payload(None)).await.unwrap();

    let read = backend.get_patient("u1").await.unwrap().unwrap();
    assert!(read.identification_document_key.is_none());
    assert!(read.identification_document_url.is_none());
    assert!(backend.get_patient("u2").await.unwrap().is_none());
}

#[tokio::test]
async fn requested_appointment_shows_up_as_pending() {
    let (backend, store) = backend();
    let request = NewAppointment {
        user_id: "u1".to_string(),
        patient_id: "p1".to_string(),
        primary_physician: "Leila Cameron".to_string(),
        schedule: "2026-11-02T14:30:00Z".parse().unwrap(),
        reason: "Annual check-up".to_string(),
        note: Some("Afternoon please".to_string()),
    };

    let appointment = backend.create_appointment(&request).await.unwrap().unwrap();
    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(
        store.json(&s3_keys::appointment(appointment.id))["status"],
        "pending"
    );

    let summary = backend.recent_appointments().await.unwrap();
    assert_eq!(summary.total_count, 1);
    assert_eq!(summary.pending_count, 1);
    assert_eq!(summary.documents[0].id, appointment.id);
}
