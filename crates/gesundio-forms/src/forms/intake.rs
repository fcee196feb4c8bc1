use gesundio_core::backend::{BoxFuture, PatientBackend};
use gesundio_core::error::BackendError;
use gesundio_core::models::user::{NewUser, User};
use gesundio_core::routes;

use crate::binder::{Row, Section};
use crate::error::FormError;
use crate::field::FieldConfig;
use crate::forms::{email_rules, name_rules, phone_rules};
use crate::schema::FormSchema;
use crate::state::FormState;
use crate::{FormAssembler, FormDefinition};

/// First-contact form: name, email and phone. Creates the user account.
pub struct IntakeForm;

impl FormDefinition for IntakeForm {
    fn id(&self) -> &str {
        "intake"
    }

    fn title(&self) -> &str {
        "Hi there"
    }

    fn subtitle(&self) -> &str {
        "Schedule your first appointment."
    }

    fn sections(&self) -> &[Section] {
        static SECTIONS: std::sync::LazyLock<Vec<Section>> = std::sync::LazyLock::new(|| {
            vec![Section {
                title: None,
                rows: vec![
                    Row::single(
                        FieldConfig::input("name")
                            .label("Full name")
                            .placeholder("Mhd Bashar Al Fattal")
                            .icon("/assets/icons/user.svg", "user"),
                    ),
                    Row::single(
                        FieldConfig::input("email")
                            .label("Email")
                            .placeholder("basharalfattal@gmail.com")
                            .icon("/assets/icons/email.svg", "email"),
                    ),
                    Row::single(
                        FieldConfig::phone_input("phone")
                            .label("Phone number")
                            .placeholder("(+49)176 00000000"),
                    ),
                ],
            }]
        });
        &SECTIONS
    }

    fn schema(&self) -> &FormSchema {
        static SCHEMA: std::sync::LazyLock<FormSchema> = std::sync::LazyLock::new(|| {
            FormSchema::new(vec![
                name_rules("name"),
                email_rules("email"),
                phone_rules("phone"),
            ])
        });
        &SCHEMA
    }
}

impl FormAssembler for IntakeForm {
    type Context = ();
    type Payload = NewUser;
    type Record = User;

    fn shape(&self, _context: &(), state: &FormState) -> Result<NewUser, FormError> {
        let phone = state
            .phone("phone")
            .ok_or_else(|| FormError::MissingValue("phone".to_string()))?;

        Ok(NewUser {
            name: state.text("name").trim().to_string(),
            email: state.text("email").trim().to_string(),
            phone: phone.as_str().to_string(),
        })
    }

    fn persist<'a>(
        &'a self,
        backend: &'a dyn PatientBackend,
        payload: &'a NewUser,
    ) -> BoxFuture<'a, Result<Option<User>, BackendError>> {
        backend.create_user(payload)
    }

    fn next_route(&self, _context: &(), user: &User) -> Option<String> {
        if user.id.trim().is_empty() {
            return None;
        }
        Some(routes::register(&user.id))
    }
}
