//! Error types for the HTTP server.

use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use mdwiki_index::IndexError;
use mdwiki_renderer::RenderError;
use mdwiki_storage::{DocumentName, NameError, StorageError};

use crate::templates;

/// Server error type.
///
/// Client-facing bodies are generic. Store and render failures carry full
/// detail for the server log only; the refresh failure is the one response
/// that reports the pages location and cause to the client.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Document name failed validation.
    #[error("Invalid document name: {0}")]
    InvalidName(#[from] NameError),

    /// Document is not in the page index.
    #[error("Page not found: {0}")]
    NotFound(DocumentName),

    /// Document already exists and overwrite was not requested.
    #[error("Page already exists: {0}")]
    Conflict(DocumentName),

    /// Submitted form could not be parsed.
    #[error("Malformed form submission: {0}")]
    BadForm(String),

    /// Route exists but does not accept this method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Reading, writing or deleting a document failed.
    #[error("Storage error for {name}: {source}")]
    Storage {
        name: DocumentName,
        #[source]
        source: StorageError,
    },

    /// Document content could not be rendered.
    #[error("Render error for {name}: {source}")]
    Render {
        name: DocumentName,
        #[source]
        source: RenderError,
    },

    /// Blocking storage task panicked or was cancelled.
    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Rebuilding the page index failed.
    #[error("failed to read pages directory {location:?}: {source}")]
    Refresh {
        location: String,
        #[source]
        source: IndexError,
    },
}

impl ServerError {
    /// Wrap a storage failure with the document it concerns.
    pub(crate) fn storage(name: &DocumentName, source: StorageError) -> Self {
        Self::Storage {
            name: name.clone(),
            source,
        }
    }

    /// Wrap a render failure with the document it concerns.
    pub(crate) fn render(name: &DocumentName, source: RenderError) -> Self {
        Self::Render {
            name: name.clone(),
            source,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidName(_) | Self::BadForm(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Storage { .. }
            | Self::Render { .. }
            | Self::Task(_)
            | Self::Refresh { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::Storage { .. } | Self::Render { .. } | Self::Task(_) | Self::Refresh { .. } => {
                tracing::error!(error = %self, "Request failed");
            }
            _ => tracing::warn!(error = %self, status = status.as_u16(), "Request rejected"),
        }

        match self {
            // Location and cause go to the client verbatim.
            Self::Refresh { .. } => (
                status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                self.to_string(),
            )
                .into_response(),
            Self::MethodNotAllowed => status.into_response(),
            _ => (status, Html(templates::error_page(status))).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use mdwiki_storage::StorageErrorKind;

    use super::*;

    fn name(raw: &str) -> DocumentName {
        DocumentName::parse(raw).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServerError::from(NameError::Empty).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::NotFound(name("a.md")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::Conflict(name("a.md")).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServerError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ServerError::storage(&name("a.md"), StorageError::not_found("/pages/a.md")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_panicked_task_is_internal_error() {
        let join_err = tokio::spawn(async { panic!("boom") }).await.unwrap_err();

        let err = ServerError::from(join_err);

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_refresh_message_includes_location_and_cause() {
        let err = ServerError::Refresh {
            location: "/srv/pages".to_owned(),
            source: IndexError::StoreUnavailable(StorageError::new(
                StorageErrorKind::Unavailable,
            )),
        };

        let message = err.to_string();

        assert!(message.contains("\"/srv/pages\""));
        assert!(message.contains("Unavailable"));
    }
}
