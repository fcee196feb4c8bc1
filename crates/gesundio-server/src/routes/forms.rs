use axum::Json;
use axum::extract::Path;
use serde::Serialize;

use gesundio_forms::binder::{self, RenderedSection};
use gesundio_forms::{all_forms, get_form};

use crate::error::ApiError;

#[derive(Serialize)]
pub struct FormSummary {
    id: String,
    title: String,
}

/// Everything a client needs to draw a form with its default values.
#[derive(Serialize)]
pub struct FormDescriptor {
    id: String,
    title: String,
    subtitle: String,
    submit_label: String,
    sections: Vec<RenderedSection>,
}

pub async fn list_forms() -> Json<Vec<FormSummary>> {
    let forms = all_forms()
        .iter()
        .map(|f| FormSummary {
            id: f.id().to_string(),
            title: f.title().to_string(),
        })
        .collect();
    Json(forms)
}

pub async fn get_form_descriptor(Path(id): Path<String>) -> Result<Json<FormDescriptor>, ApiError> {
    let form = get_form(&id).ok_or_else(|| ApiError::NotFound(format!("form not found: {id}")))?;

    let sections = binder::render_sections(form.sections(), &form.default_state())
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(FormDescriptor {
        id: form.id().to_string(),
        title: form.title().to_string(),
        subtitle: form.subtitle().to_string(),
        submit_label: form.submit_label().to_string(),
        sections,
    }))
}
