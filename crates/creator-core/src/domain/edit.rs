//! Anchored text edits.
//!
//! An [`Edit`] locates a literal anchor in a text buffer and inserts or
//! replaces text next to it. Matching is exact (no regex, no knowledge of
//! the host file format) and every edit is checked against its
//! *post-image*, the text it leaves behind, so applying an edit twice is
//! a no-op instead of a duplicate insertion.
//!
//! Resolution order for one edit:
//!
//! 1. post-image already present → [`EditOutcome::AlreadyApplied`]
//! 2. anchor present exactly once → apply, [`EditOutcome::Applied`]
//! 3. anchor absent → [`DomainError::AnchorNotFound`]
//! 4. anchor present more than once → [`DomainError::AmbiguousAnchor`]

use std::fmt;

use serde::Serialize;

use super::DomainError;

/// A single anchored change to a text buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Edit {
    /// Insert `text` immediately after `anchor`.
    InsertAfter { anchor: String, text: String },
    /// Insert `text` immediately before `anchor`.
    InsertBefore { anchor: String, text: String },
    /// Replace `anchor` with `replacement`.
    Replace { anchor: String, replacement: String },
    /// Append `text` at end-of-file.
    Append { text: String },
}

/// What happened when an edit was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOutcome {
    Applied,
    AlreadyApplied,
}

impl EditOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

impl fmt::Display for EditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => f.write_str("applied"),
            Self::AlreadyApplied => f.write_str("already applied"),
        }
    }
}

impl Edit {
    pub fn insert_after(anchor: impl Into<String>, text: impl Into<String>) -> Self {
        Self::InsertAfter {
            anchor: anchor.into(),
            text: text.into(),
        }
    }

    pub fn insert_before(anchor: impl Into<String>, text: impl Into<String>) -> Self {
        Self::InsertBefore {
            anchor: anchor.into(),
            text: text.into(),
        }
    }

    pub fn replace(anchor: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self::Replace {
            anchor: anchor.into(),
            replacement: replacement.into(),
        }
    }

    pub fn append(text: impl Into<String>) -> Self {
        Self::Append { text: text.into() }
    }

    /// The anchor this edit searches for, if any.
    pub fn anchor(&self) -> Option<&str> {
        match self {
            Self::InsertAfter { anchor, .. }
            | Self::InsertBefore { anchor, .. }
            | Self::Replace { anchor, .. } => Some(anchor),
            Self::Append { .. } => None,
        }
    }

    /// The text this edit leaves in the buffer.
    pub fn post_image(&self) -> String {
        match self {
            Self::InsertAfter { anchor, text } => format!("{anchor}{text}"),
            Self::InsertBefore { anchor, text } => format!("{text}{anchor}"),
            Self::Replace { replacement, .. } => replacement.clone(),
            Self::Append { text } => text.clone(),
        }
    }

    /// One-line label for reports and logs.
    pub fn describe(&self) -> String {
        match self {
            Self::InsertAfter { anchor, .. } => format!("insert after {:?}", first_line(anchor)),
            Self::InsertBefore { anchor, .. } => format!("insert before {:?}", first_line(anchor)),
            Self::Replace { anchor, .. } => format!("replace {:?}", first_line(anchor)),
            Self::Append { text } => format!("append {:?}", first_line(text)),
        }
    }

    /// Apply this edit to `buffer` in place.
    ///
    /// `file` is only used to label errors.
    pub fn apply_to(&self, file: &str, buffer: &mut String) -> Result<EditOutcome, DomainError> {
        if let Some(anchor) = self.anchor() {
            if anchor.is_empty() {
                return Err(DomainError::EmptyAnchor { file: file.into() });
            }
        }

        if buffer.contains(&self.post_image()) {
            return Ok(EditOutcome::AlreadyApplied);
        }

        match self {
            Self::Append { text } => {
                if !buffer.is_empty() && !buffer.ends_with('\n') && !text.starts_with('\n') {
                    buffer.push('\n');
                }
                buffer.push_str(text);
            }
            Self::InsertAfter { anchor, text } => {
                let at = locate_once(file, buffer, anchor)?;
                buffer.insert_str(at + anchor.len(), text);
            }
            Self::InsertBefore { anchor, text } => {
                let at = locate_once(file, buffer, anchor)?;
                buffer.insert_str(at, text);
            }
            Self::Replace {
                anchor,
                replacement,
            } => {
                let at = locate_once(file, buffer, anchor)?;
                buffer.replace_range(at..at + anchor.len(), replacement);
            }
        }

        Ok(EditOutcome::Applied)
    }
}

/// Byte offset of the single occurrence of `anchor` in `buffer`.
fn locate_once(file: &str, buffer: &str, anchor: &str) -> Result<usize, DomainError> {
    let mut hits = buffer.match_indices(anchor).map(|(i, _)| i);
    match (hits.next(), hits.count()) {
        (None, _) => Err(DomainError::AnchorNotFound {
            file: file.into(),
            anchor: anchor.into(),
        }),
        (Some(at), 0) => Ok(at),
        (Some(_), rest) => Err(DomainError::AmbiguousAnchor {
            file: file.into(),
            anchor: anchor.into(),
            count: rest + 1,
        }),
    }
}

fn first_line(s: &str) -> &str {
    s.trim_start_matches('\n').lines().next().unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WSGI: &str = "import os\n\nfrom django.core.wsgi import get_wsgi_application\n\napplication = get_wsgi_application()\n";

    #[test]
    fn insert_after_places_text_after_anchor() {
        let mut buf = WSGI.to_string();
        let edit = Edit::insert_after("import os\n", "import sys\n");
        assert_eq!(edit.apply_to("wsgi.py", &mut buf).unwrap(), EditOutcome::Applied);
        assert!(buf.starts_with("import os\nimport sys\n\nfrom django"));
    }

    #[test]
    fn insert_before_places_text_before_anchor() {
        let mut buf = WSGI.to_string();
        let edit = Edit::insert_before("application = ", "# entry point\n");
        edit.apply_to("wsgi.py", &mut buf).unwrap();
        assert!(buf.contains("# entry point\napplication = get_wsgi_application()"));
    }

    #[test]
    fn replace_swaps_anchor() {
        let mut buf = "DEBUG = True\n".to_string();
        Edit::replace("DEBUG = True", "DEBUG = False")
            .apply_to("settings.py", &mut buf)
            .unwrap();
        assert_eq!(buf, "DEBUG = False\n");
    }

    #[test]
    fn append_adds_missing_newline() {
        let mut buf = "x = 1".to_string();
        Edit::append("y = 2\n").apply_to("f.py", &mut buf).unwrap();
        assert_eq!(buf, "x = 1\ny = 2\n");
    }

    #[test]
    fn second_application_is_noop() {
        let edits = [
            Edit::insert_after("import os\n", "import sys\n"),
            Edit::insert_before("application = ", "# entry point\n"),
            Edit::replace("application = get_wsgi_application()", "application = wrap(get_wsgi_application())"),
            Edit::append("\nprint('loaded')\n"),
        ];

        let mut buf = WSGI.to_string();
        for edit in &edits {
            assert_eq!(edit.apply_to("wsgi.py", &mut buf).unwrap(), EditOutcome::Applied);
        }
        let once = buf.clone();
        for edit in &edits {
            assert_eq!(
                edit.apply_to("wsgi.py", &mut buf).unwrap(),
                EditOutcome::AlreadyApplied
            );
        }
        assert_eq!(buf, once);
    }

    #[test]
    fn replacement_containing_anchor_is_idempotent() {
        let mut buf = "STATIC_URL = '/static/'\n".to_string();
        let edit = Edit::replace(
            "STATIC_URL = '/static/'\n",
            "STATIC_URL = '/static/'\nSTATIC_ROOT = 'public'\n",
        );
        assert_eq!(edit.apply_to("s.py", &mut buf).unwrap(), EditOutcome::Applied);
        assert_eq!(edit.apply_to("s.py", &mut buf).unwrap(), EditOutcome::AlreadyApplied);
        assert_eq!(buf.matches("STATIC_ROOT").count(), 1);
    }

    #[test]
    fn missing_anchor_is_an_error() {
        let mut buf = WSGI.to_string();
        let err = Edit::insert_after("import json\n", "x")
            .apply_to("wsgi.py", &mut buf)
            .unwrap_err();
        assert!(matches!(err, DomainError::AnchorNotFound { ref file, .. } if file == "wsgi.py"));
        assert_eq!(buf, WSGI);
    }

    #[test]
    fn ambiguous_anchor_is_an_error() {
        let mut buf = "a\nb\na\n".to_string();
        let err = Edit::insert_after("a\n", "c\n")
            .apply_to("f", &mut buf)
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::AmbiguousAnchor {
                file: "f".into(),
                anchor: "a\n".into(),
                count: 2
            }
        );
    }

    #[test]
    fn empty_anchor_is_rejected() {
        let mut buf = String::new();
        assert!(matches!(
            Edit::replace("", "x").apply_to("f", &mut buf),
            Err(DomainError::EmptyAnchor { .. })
        ));
    }

    #[test]
    fn describe_uses_first_line() {
        let edit = Edit::append("\nif settings.DEBUG:\n    pass\n");
        assert_eq!(edit.describe(), "append \"if settings.DEBUG:\"");
    }
}
