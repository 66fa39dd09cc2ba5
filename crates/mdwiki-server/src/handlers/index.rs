//! Document index endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;

use crate::state::AppState;
use crate::templates;

/// Handle GET /.
pub(crate) async fn get_index(State(state): State<Arc<AppState>>) -> Html<String> {
    let names = state.index.snapshot();
    Html(templates::index_page(&names))
}
