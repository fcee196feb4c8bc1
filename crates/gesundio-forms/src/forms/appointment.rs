use gesundio_core::backend::{BoxFuture, PatientBackend};
use gesundio_core::error::BackendError;
use gesundio_core::models::appointment::{Appointment, NewAppointment};
use gesundio_core::models::patient::Patient;
use gesundio_core::routes;
use jiff::tz::TimeZone;

use crate::binder::{Row, Section};
use crate::error::FormError;
use crate::field::FieldConfig;
use crate::forms::{doctor_options, doctor_rules};
use crate::schema::{FieldRules, FormSchema, Rule};
use crate::state::FormState;
use crate::{FormAssembler, FormDefinition};

/// Widget format for the schedule picker, time included.
pub const SCHEDULE_FORMAT: &str = "MM/dd/yyyy - h:mm aa";

/// Appointment request for a registered patient.
pub struct AppointmentForm;

/// Who the appointment is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentContext {
    pub user_id: String,
    pub patient_id: String,
}

impl From<&Patient> for AppointmentContext {
    fn from(patient: &Patient) -> Self {
        Self {
            user_id: patient.user_id.clone(),
            patient_id: patient.id.clone(),
        }
    }
}

impl FormDefinition for AppointmentForm {
    fn id(&self) -> &str {
        "appointment"
    }

    fn title(&self) -> &str {
        "New Appointment"
    }

    fn subtitle(&self) -> &str {
        "Request a new appointment in 10 seconds."
    }

    fn submit_label(&self) -> &str {
        "Submit Appointment"
    }

    fn sections(&self) -> &[Section] {
        static SECTIONS: std::sync::LazyLock<Vec<Section>> = std::sync::LazyLock::new(|| {
            vec![Section {
                title: None,
                rows: vec![
                    Row::single(
                        FieldConfig::select("primaryPhysician", doctor_options())
                            .label("Doctor")
                            .placeholder("Select a doctor"),
                    ),
                    Row::single(
                        FieldConfig::date_picker("schedule")
                            .label("Expected appointment date")
                            .date_format(SCHEDULE_FORMAT)
                            .show_time_select(true),
                    ),
                    Row::of([
                        FieldConfig::textarea("reason")
                            .label("Appointment reason")
                            .placeholder("Annual monthly check-up")
                            .into(),
                        FieldConfig::textarea("note")
                            .label("Comments/notes")
                            .placeholder("Prefer afternoon appointments, if possible")
                            .into(),
                    ]),
                ],
            }]
        });
        &SECTIONS
    }

    fn schema(&self) -> &FormSchema {
        static SCHEMA: std::sync::LazyLock<FormSchema> = std::sync::LazyLock::new(|| {
            FormSchema::new(vec![
                doctor_rules("primaryPhysician"),
                FieldRules::required("schedule").rule(Rule::Required(
                    "Select a date and time for the appointment".to_string(),
                )),
                FieldRules::required("reason")
                    .min_len(2, "Reason must be at least 2 characters")
                    .max_len(500, "Reason must be at most 500 characters"),
                FieldRules::optional("note"),
            ])
        });
        &SCHEMA
    }
}

impl FormAssembler for AppointmentForm {
    type Context = AppointmentContext;
    type Payload = NewAppointment;
    type Record = Appointment;

    /// The picked wall-clock time is taken as UTC.
    fn shape(
        &self,
        context: &AppointmentContext,
        state: &FormState,
    ) -> Result<NewAppointment, FormError> {
        let schedule = state
            .date("schedule")
            .ok_or_else(|| FormError::MissingValue("schedule".to_string()))?
            .to_zoned(TimeZone::UTC)
            .map_err(|e| FormError::MalformedValue {
                field: "schedule".to_string(),
                reason: e.to_string(),
            })?
            .timestamp();

        Ok(NewAppointment {
            user_id: context.user_id.clone(),
            patient_id: context.patient_id.clone(),
            primary_physician: state.text("primaryPhysician").to_string(),
            schedule,
            reason: state.text("reason").trim().to_string(),
            note: state.optional_text("note"),
        })
    }

    fn persist<'a>(
        &'a self,
        backend: &'a dyn PatientBackend,
        payload: &'a NewAppointment,
    ) -> BoxFuture<'a, Result<Option<Appointment>, BackendError>> {
        backend.create_appointment(payload)
    }

    fn next_route(&self, context: &AppointmentContext, appointment: &Appointment) -> Option<String> {
        Some(routes::appointment_success(&context.user_id, appointment.id))
    }
}
