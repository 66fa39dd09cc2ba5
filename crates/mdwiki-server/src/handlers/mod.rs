//! HTTP request handlers.

pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod new;
pub(crate) mod pages;
pub(crate) mod refresh;

use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse};
use mdwiki_storage::DocumentName;

use crate::error::ServerError;
use crate::state::AppState;
use crate::templates;

/// Fail with `NotFound` unless `name` is in the page index.
///
/// The index is authoritative: a file on disk that was never indexed is
/// still not found.
pub(crate) fn require_indexed(state: &AppState, name: &DocumentName) -> Result<(), ServerError> {
    if state.index.contains(name) {
        Ok(())
    } else {
        Err(ServerError::NotFound(name.clone()))
    }
}

/// Run storage and render work on the blocking thread pool.
///
/// The handler future stays pending while the work runs, so the request
/// timeout can answer before a slow filesystem call returns.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T, ServerError>
where
    F: FnOnce() -> Result<T, ServerError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await?
}

/// Convert CRLF line endings from submitted textareas to LF.
pub(crate) fn normalize_newlines(content: &str) -> String {
    content.replace("\r\n", "\n")
}

/// Fallback for unmatched paths.
pub(crate) async fn not_found(uri: Uri) -> impl IntoResponse {
    tracing::debug!(path = %uri.path(), "No route matched");
    (
        StatusCode::NOT_FOUND,
        Html(templates::error_page(StatusCode::NOT_FOUND)),
    )
}
