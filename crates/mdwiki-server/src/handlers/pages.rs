//! Document view and edit endpoints.
//!
//! Both live under `/page/{*path}`: a path ending in `/edit` addresses the
//! edit form of the document named by the rest, anything else addresses the
//! rendered view. Document names always end in `.md`, so the two never
//! collide.

use std::sync::Arc;

use axum::Form;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use mdwiki_renderer::RenderError;
use mdwiki_storage::DocumentName;
use serde::Deserialize;

use crate::error::ServerError;
use crate::handlers::{normalize_newlines, require_indexed, run_blocking};
use crate::state::AppState;
use crate::templates;

const EDIT_SUFFIX: &str = "/edit";

/// What a `/page/...` path refers to.
#[derive(Debug, PartialEq, Eq)]
enum PageTarget {
    View(DocumentName),
    Edit(DocumentName),
}

impl PageTarget {
    fn parse(path: &str) -> Result<Self, ServerError> {
        match path.strip_suffix(EDIT_SUFFIX) {
            Some(name) => Ok(Self::Edit(DocumentName::parse(name)?)),
            None => Ok(Self::View(DocumentName::parse(path)?)),
        }
    }

    /// Like [`parse`](Self::parse), but only edit paths are accepted; the
    /// method check comes before name validation.
    fn parse_for_post(path: &str) -> Result<Self, ServerError> {
        if path.ends_with(EDIT_SUFFIX) {
            Self::parse(path)
        } else {
            Err(ServerError::MethodNotAllowed)
        }
    }
}

/// Form body for POST /page/{name}/edit.
#[derive(Debug, Deserialize)]
pub(crate) struct EditForm {
    content: String,
}

/// Handle GET /page/{name} and GET /page/{name}/edit.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    let target = PageTarget::parse(&path)?;

    run_blocking(move || match target {
        PageTarget::View(name) => view_page(&state, &name).map(IntoResponse::into_response),
        PageTarget::Edit(name) => edit_form(&state, &name).map(IntoResponse::into_response),
    })
    .await
}

/// Handle POST /page/{name}/edit.
///
/// Replaces the document content and redirects to its view. Any other POST
/// under `/page/` is rejected before the name is looked at.
pub(crate) async fn post_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    form: Result<Form<EditForm>, FormRejection>,
) -> Result<Redirect, ServerError> {
    let PageTarget::Edit(name) = PageTarget::parse_for_post(&path)? else {
        return Err(ServerError::MethodNotAllowed);
    };
    let Form(form) = form.map_err(|e| ServerError::BadForm(e.body_text()))?;
    let location = templates::page_url(&name);

    run_blocking(move || {
        require_indexed(&state, &name)?;

        let content = normalize_newlines(&form.content);
        state
            .storage
            .update(&name, content.as_bytes())
            .map_err(|e| ServerError::storage(&name, e))?;

        tracing::info!(name = %name, bytes = content.len(), "Page updated");
        Ok(())
    })
    .await?;

    Ok(Redirect::to(&location))
}

fn view_page(state: &AppState, name: &DocumentName) -> Result<Html<String>, ServerError> {
    require_indexed(state, name)?;

    let content = state
        .storage
        .read(name)
        .map_err(|e| ServerError::storage(name, e))?;
    let rendered = state
        .renderer
        .render(&content)
        .map_err(|e| ServerError::render(name, e))?;

    Ok(Html(templates::document_page(name, &rendered)))
}

fn edit_form(state: &AppState, name: &DocumentName) -> Result<Html<String>, ServerError> {
    require_indexed(state, name)?;

    let content = state
        .storage
        .read(name)
        .map_err(|e| ServerError::storage(name, e))?;
    let text = std::str::from_utf8(&content)
        .map_err(|e| ServerError::render(name, RenderError::from(e)))?;

    Ok(Html(templates::edit_form(name, text)))
}
