//! Index refresh endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;

use crate::error::ServerError;
use crate::handlers::run_blocking;
use crate::state::AppState;

/// Handle POST /refresh.
///
/// Rescans the pages directory and replaces the index. Answers with an empty
/// body on success.
pub(crate) async fn refresh(State(state): State<Arc<AppState>>) -> Result<StatusCode, ServerError> {
    let index = Arc::clone(&state.index);

    run_blocking(move || {
        index.rebuild().map_err(|source| ServerError::Refresh {
            location: index.location(),
            source,
        })
    })
    .await?;

    Ok(StatusCode::OK)
}
