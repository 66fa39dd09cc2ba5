//! Document creation endpoint.

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use mdwiki_storage::{DocumentName, StorageErrorKind};
use serde::Deserialize;

use crate::error::ServerError;
use crate::handlers::{normalize_newlines, run_blocking};
use crate::state::AppState;
use crate::templates;

/// Form body for POST /new.
#[derive(Debug, Deserialize)]
pub(crate) struct NewPageForm {
    fname: String,
    content: String,
    /// Checkbox value; present means overwrite an existing page.
    #[serde(default)]
    overwrite: Option<String>,
}

impl NewPageForm {
    fn overwrite_requested(&self) -> bool {
        self.overwrite
            .as_deref()
            .is_some_and(|v| matches!(v, "on" | "true" | "1" | "yes"))
    }
}

/// Handle GET /new.
pub(crate) async fn get_form() -> Html<String> {
    Html(templates::new_form())
}

/// Handle POST /new.
///
/// Writes the document but does not add it to the index; it shows up in the
/// list after the next refresh.
pub(crate) async fn create_page(
    State(state): State<Arc<AppState>>,
    form: Result<Form<NewPageForm>, FormRejection>,
) -> Result<impl IntoResponse, ServerError> {
    let Form(form) = form.map_err(|e| ServerError::BadForm(e.body_text()))?;
    let name = DocumentName::parse(form.fname.trim())?;
    let overwrite = form.overwrite_requested();
    let content = normalize_newlines(&form.content);

    run_blocking(move || {
        match state.storage.create(&name, content.as_bytes(), overwrite) {
            Ok(()) => {}
            Err(err) if err.kind == StorageErrorKind::AlreadyExists => {
                return Err(ServerError::Conflict(name));
            }
            Err(err) => return Err(ServerError::storage(&name, err)),
        }

        tracing::info!(name = %name, bytes = content.len(), overwrite, "Page created");
        Ok((
            StatusCode::CREATED,
            Html(templates::created_page(&name, &content, overwrite)),
        ))
    })
    .await
}
