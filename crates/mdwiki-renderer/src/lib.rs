//! Markdown to HTML rendering for mdwiki.
//!
//! [`MarkdownRenderer`] turns raw document bytes into an HTML fragment using
//! pulldown-cmark, extracting the first H1 heading as the page title along
//! the way. Rendering is pure: no I/O, no caching.
//!
//! # Example
//!
//! ```
//! use mdwiki_renderer::MarkdownRenderer;
//!
//! let result = MarkdownRenderer::new().render(b"# Hello\n\n**Bold** text").unwrap();
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! assert!(result.html.contains("<h1>Hello</h1>"));
//! ```

mod renderer;
mod util;

pub use renderer::{MarkdownRenderer, RenderError, RenderResult};
pub use util::escape_html;
