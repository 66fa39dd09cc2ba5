//! HTML page templates.
//!
//! Every dynamic value is escaped here; handlers pass raw names and text.

use std::collections::BTreeSet;
use std::fmt::Write;

use axum::http::StatusCode;
use mdwiki_renderer::{RenderResult, escape_html};
use mdwiki_storage::DocumentName;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters that must be percent-encoded inside one URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// URL of the rendered view of `name`.
pub(crate) fn page_url(name: &DocumentName) -> String {
    format!("/page/{}", utf8_percent_encode(name.as_str(), PATH_SEGMENT))
}

fn edit_url(name: &DocumentName) -> String {
    format!("{}/edit", page_url(name))
}

fn delete_url(name: &DocumentName) -> String {
    format!("/delete/{}", utf8_percent_encode(name.as_str(), PATH_SEGMENT))
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{}</title>
</head>
<body>
{body}
</body>
</html>
"#,
        escape_html(title)
    )
}

/// Inline POST button, for actions that must not be triggered by a GET.
fn post_button(action: &str, label: &str) -> String {
    format!(
        r#"<form method="post" action="{}" style="display:inline"><button type="submit">{label}</button></form>"#,
        escape_html(action)
    )
}

/// Document list with links to every indexed page.
pub(crate) fn index_page(names: &BTreeSet<DocumentName>) -> String {
    let mut body = format!(
        r#"<nav><a href="/new">new</a> {}</nav>
<ul>
"#,
        post_button("/refresh", "refresh")
    );
    for name in names {
        let _ = writeln!(
            body,
            r#"<li><a href="{}">{}</a></li>"#,
            escape_html(&page_url(name)),
            escape_html(name.as_str())
        );
    }
    body.push_str("</ul>");

    layout("mdwiki", &body)
}

/// Rendered document wrapped in the page frame.
pub(crate) fn document_page(name: &DocumentName, rendered: &RenderResult) -> String {
    let title = rendered.title.as_deref().unwrap_or(name.as_str());
    let body = format!(
        r#"<nav><a href="/">index</a> <a href="{}">edit</a> {}</nav>
<article>
{}</article>"#,
        escape_html(&edit_url(name)),
        post_button(&delete_url(name), "delete"),
        rendered.html
    );

    layout(title, &body)
}

/// Creation form with the `fname` and `content` fields.
pub(crate) fn new_form() -> String {
    let body = r#"<nav><a href="/">index</a></nav>
<form method="post" action="/new">
<label>file name:<br><input type="text" name="fname" value="" required></label><br>
<label>content:<br><textarea name="content" rows="20" cols="80"></textarea></label><br>
<label><input type="checkbox" name="overwrite" value="on"> overwrite existing page</label><br>
<input type="submit" value="submit">
</form>"#;

    layout("new page", body)
}

/// Edit form pre-filled with the current content.
pub(crate) fn edit_form(name: &DocumentName, content: &str) -> String {
    let body = format!(
        r#"<nav><a href="/">index</a> <a href="{page}">view</a></nav>
<h1>{title}</h1>
<form method="post" action="{action}">
<textarea name="content" rows="20" cols="80">{content}</textarea><br>
<input type="submit" value="save">
</form>"#,
        page = escape_html(&page_url(name)),
        title = escape_html(name.as_str()),
        action = escape_html(&edit_url(name)),
        content = escape_html(content),
    );

    layout(&format!("edit {name}"), &body)
}

/// Acknowledgment for a created document, echoing the submitted fields.
pub(crate) fn created_page(name: &DocumentName, content: &str, overwrite: bool) -> String {
    let body = format!(
        r#"<nav><a href="/">index</a> {refresh}</nav>
<p>saved {name}{replaced}. Refresh the index to list it.</p>
<dl>
<dt>fname</dt><dd>{name}</dd>
<dt>content</dt><dd><pre>{content}</pre></dd>
<dt>overwrite</dt><dd>{overwrite}</dd>
</dl>"#,
        refresh = post_button("/refresh", "refresh"),
        name = escape_html(name.as_str()),
        replaced = if overwrite { " (overwrite allowed)" } else { "" },
        content = escape_html(content),
    );

    layout("created", &body)
}

/// Acknowledgment for a deleted document.
pub(crate) fn deleted_page(name: &DocumentName) -> String {
    let body = format!(
        r#"<nav><a href="/">index</a> {}</nav>
<p>deleted {}. Refresh the index to drop it from the list.</p>"#,
        post_button("/refresh", "refresh"),
        escape_html(name.as_str())
    );

    layout("deleted", &body)
}

/// Generic error page; never includes request-specific detail.
pub(crate) fn error_page(status: StatusCode) -> String {
    let reason = status.canonical_reason().unwrap_or("error");
    let body = format!(
        r#"<nav><a href="/">index</a></nav>
<h1>{} {}</h1>"#,
        status.as_u16(),
        escape_html(reason)
    );

    layout(reason, &body)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn name(raw: &str) -> DocumentName {
        DocumentName::parse(raw).unwrap()
    }

    #[test]
    fn test_page_url_encodes_reserved_characters() {
        assert_eq!(page_url(&name("my notes #1?.md")), "/page/my%20notes%20%231%3F.md");
    }

    #[test]
    fn test_index_page_lists_names_in_order() {
        let names: BTreeSet<_> = [name("b.md"), name("a.md")].into_iter().collect();

        let html = index_page(&names);

        let a = html.find(r#"<a href="/page/a.md">a.md</a>"#).unwrap();
        let b = html.find(r#"<a href="/page/b.md">b.md</a>"#).unwrap();
        assert!(a < b);
        assert!(html.contains(r#"<a href="/new">new</a>"#));
        assert!(html.contains(r#"action="/refresh""#));
    }

    #[test]
    fn test_index_page_escapes_names() {
        let names: BTreeSet<_> = [name("<b>&.md")].into_iter().collect();

        let html = index_page(&names);

        assert!(html.contains("&lt;b&gt;&amp;.md"));
        assert!(!html.contains("<b>&"));
    }

    #[test]
    fn test_document_page_frame() {
        let rendered = RenderResult {
            html: "<h1>Hi</h1>\n".to_owned(),
            title: Some("Hi".to_owned()),
        };

        let html = document_page(&name("foo.md"), &rendered);

        assert!(html.contains("<title>Hi</title>"));
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains(r#"<a href="/">index</a>"#));
        assert!(html.contains(r#"<a href="/page/foo.md/edit">edit</a>"#));
        assert!(html.contains(r#"action="/delete/foo.md""#));
    }

    #[test]
    fn test_document_page_falls_back_to_name_for_title() {
        let rendered = RenderResult {
            html: "<p>text</p>\n".to_owned(),
            title: None,
        };

        let html = document_page(&name("foo.md"), &rendered);

        assert!(html.contains("<title>foo.md</title>"));
    }

    #[test]
    fn test_edit_form_escapes_content() {
        let html = edit_form(&name("a.md"), "</textarea><script>");

        assert!(html.contains("&lt;/textarea&gt;&lt;script&gt;"));
        assert!(html.contains(r#"action="/page/a.md/edit""#));
    }

    #[test]
    fn test_new_form_fields() {
        let html = new_form();

        assert!(html.contains(r#"name="fname""#));
        assert!(html.contains(r#"name="content""#));
        assert!(html.contains(r#"name="overwrite""#));
    }

    #[test]
    fn test_created_page_echoes_fields() {
        let html = created_page(&name("foo.md"), "# Hi <there>", false);

        assert!(html.contains("<dd>foo.md</dd>"));
        assert!(html.contains("# Hi &lt;there&gt;"));
        assert!(html.contains("<dd>false</dd>"));
    }

    #[test]
    fn test_error_page_is_generic() {
        let html = error_page(StatusCode::INTERNAL_SERVER_ERROR);

        assert!(html.contains("<h1>500 Internal Server Error</h1>"));
    }
}
