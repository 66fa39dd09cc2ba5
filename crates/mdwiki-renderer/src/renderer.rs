//! Markdown renderer.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

/// Result of rendering markdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Plain text of the first H1 heading, if any.
    pub title: Option<String>,
}

/// Error returned when a document cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Document content is not valid UTF-8.
    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Markdown renderer with GitHub-flavored extensions.
///
/// Tables, strikethrough (`~~text~~`) and task lists (`- [ ] item`) are
/// enabled. Stateless, so one instance can be shared between requests.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Create a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render raw document bytes to HTML.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidUtf8`] if `source` is not UTF-8.
    pub fn render(&self, source: &[u8]) -> Result<RenderResult, RenderError> {
        let markdown = std::str::from_utf8(source)?;
        Ok(self.render_markdown(markdown))
    }

    /// Render markdown text to HTML.
    #[must_use]
    pub fn render_markdown(&self, markdown: &str) -> RenderResult {
        let mut title = TitleCollector::default();
        let events = Parser::new_ext(markdown, parser_options()).inspect(|e| title.observe(e));

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, events);

        RenderResult {
            html: output,
            title: title.finish(),
        }
    }
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Collects the text of the first H1 heading from an event stream.
#[derive(Default)]
struct TitleCollector {
    in_h1: bool,
    done: bool,
    text: String,
}

impl TitleCollector {
    fn observe(&mut self, event: &Event<'_>) {
        if self.done {
            return;
        }
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => self.in_h1 = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                self.in_h1 = false;
                self.done = true;
            }
            Event::Text(text) | Event::Code(text) if self.in_h1 => self.text.push_str(text),
            _ => {}
        }
    }

    fn finish(self) -> Option<String> {
        let title = self.text.trim();
        (self.done && !title.is_empty()).then(|| title.to_owned())
    }
}
