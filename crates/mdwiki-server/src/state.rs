//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use mdwiki_index::PageIndex;
use mdwiki_renderer::MarkdownRenderer;
use mdwiki_storage::Storage;

/// Application state shared across all handlers.
pub struct AppState {
    /// Storage backend for reading and writing documents.
    pub(crate) storage: Arc<dyn Storage>,
    /// Authoritative set of servable document names.
    pub(crate) index: Arc<PageIndex>,
    /// Markdown to HTML renderer.
    pub(crate) renderer: MarkdownRenderer,
}

impl AppState {
    /// Create state from a storage backend and an index built over it.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, index: Arc<PageIndex>) -> Self {
        Self {
            storage,
            index,
            renderer: MarkdownRenderer::new(),
        }
    }
}
