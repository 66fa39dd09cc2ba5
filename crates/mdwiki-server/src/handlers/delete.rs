//! Document delete endpoint.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Html;
use mdwiki_storage::DocumentName;

use crate::error::ServerError;
use crate::handlers::{require_indexed, run_blocking};
use crate::state::AppState;
use crate::templates;

/// Handle POST /delete/{name}.
///
/// Removes the file but leaves the index alone; the name keeps being listed
/// until the next refresh.
pub(crate) async fn delete_page(
    Path(raw): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    let name = DocumentName::parse(&raw)?;

    run_blocking(move || {
        require_indexed(&state, &name)?;

        state
            .storage
            .delete(&name)
            .map_err(|e| ServerError::storage(&name, e))?;

        tracing::info!(name = %name, "Page deleted");
        Ok(Html(templates::deleted_page(&name)))
    })
    .await
}
