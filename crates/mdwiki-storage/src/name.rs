//! Validated document names.
//!
//! A [`DocumentName`] is a bare filename inside the pages directory. Names
//! come straight from URL paths and form fields, so they are checked here
//! before any storage backend sees them.

use std::fmt;
use std::path::{Component, Path};

/// File suffix that marks a directory entry as a document.
pub const DOCUMENT_SUFFIX: &str = ".md";

/// Reason a candidate document name was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// Name is empty.
    #[error("document name is empty")]
    Empty,
    /// Name would resolve outside the pages directory.
    #[error("document name {0:?} escapes the pages directory")]
    Traversal(String),
    /// Name contains a NUL or control character.
    #[error("document name {0:?} contains a control character")]
    InvalidCharacter(String),
    /// Name starts with a dot.
    #[error("document name {0:?} refers to a hidden file")]
    Hidden(String),
    /// Name lacks the document suffix.
    #[error("document name {0:?} must end in {DOCUMENT_SUFFIX}")]
    MissingSuffix(String),
}

/// Name of a document in the pages directory.
///
/// Guaranteed to be a single normal path component ending in
/// [`DOCUMENT_SUFFIX`], with no separators, parent segments or leading dot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentName(String);

impl DocumentName {
    /// Validate a raw name.
    ///
    /// # Example
    ///
    /// ```
    /// use mdwiki_storage::{DocumentName, NameError};
    ///
    /// assert!(DocumentName::parse("notes.md").is_ok());
    /// assert!(matches!(
    ///     DocumentName::parse("../../etc/passwd"),
    ///     Err(NameError::Traversal(_))
    /// ));
    /// ```
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        if raw.is_empty() {
            return Err(NameError::Empty);
        }

        if raw.chars().any(char::is_control) {
            return Err(NameError::InvalidCharacter(raw.to_owned()));
        }

        // Backslash is a separator on Windows.
        if raw.contains(['/', '\\']) || !is_single_normal_component(raw) {
            return Err(NameError::Traversal(raw.to_owned()));
        }

        if raw.starts_with('.') {
            return Err(NameError::Hidden(raw.to_owned()));
        }

        if !raw.ends_with(DOCUMENT_SUFFIX) || raw.len() == DOCUMENT_SUFFIX.len() {
            return Err(NameError::MissingSuffix(raw.to_owned()));
        }

        Ok(Self(raw.to_owned()))
    }

    /// Borrow the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_single_normal_component(raw: &str) -> bool {
    let mut components = Path::new(raw).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

impl fmt::Display for DocumentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocumentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for DocumentName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_name() {
        let name = DocumentName::parse("notes.md").unwrap();

        assert_eq!(name.as_str(), "notes.md");
        assert_eq!(name.to_string(), "notes.md");
    }

    #[test]
    fn test_parse_allows_inner_dots_and_spaces() {
        assert!(DocumentName::parse("v1.2 release..notes.md").is_ok());
        assert!(DocumentName::parse("заметки.md").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(DocumentName::parse(""), Err(NameError::Empty));
    }

    #[test]
    fn test_parse_rejects_parent_segments() {
        for raw in ["..", "../secret.md", "../../etc/passwd", "a/../b.md"] {
            assert!(
                matches!(DocumentName::parse(raw), Err(NameError::Traversal(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_separators_and_absolute_paths() {
        for raw in ["/etc/passwd", "dir/page.md", "dir\\page.md", "C:\\page.md", "."] {
            assert!(
                matches!(DocumentName::parse(raw), Err(NameError::Traversal(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_control_characters() {
        assert!(matches!(
            DocumentName::parse("bad\0name.md"),
            Err(NameError::InvalidCharacter(_))
        ));
        assert!(matches!(
            DocumentName::parse("line\nbreak.md"),
            Err(NameError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn test_parse_rejects_hidden_files() {
        assert!(matches!(
            DocumentName::parse(".secret.md"),
            Err(NameError::Hidden(_))
        ));
    }

    #[test]
    fn test_parse_requires_suffix() {
        assert!(matches!(
            DocumentName::parse("notes.txt"),
            Err(NameError::MissingSuffix(_))
        ));
        assert!(matches!(
            DocumentName::parse("notes"),
            Err(NameError::MissingSuffix(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bare_suffix() {
        // ".md" alone is caught as hidden before the suffix check
        assert!(DocumentName::parse(".md").is_err());
    }

    #[test]
    fn test_names_sort_lexically() {
        let mut names = vec![
            DocumentName::parse("b.md").unwrap(),
            DocumentName::parse("a.md").unwrap(),
        ];
        names.sort();

        assert_eq!(names[0].as_str(), "a.md");
    }

    #[test]
    fn test_from_str() {
        let name: DocumentName = "page.md".parse().unwrap();
        assert_eq!(name.as_ref(), "page.md");
    }
}
