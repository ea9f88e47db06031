/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Identifier encoding for the Deki API.
//!
//! Numeric ids go into the url as is. Named resources are prefixed with `=` so the
//! server can tell them apart from numeric ids. Page names use a private escaping
//! scheme where a `/` inside a title is written as `//`, because a single `/` separates
//! the segments of a page path. The server decodes the path segment once before its own
//! decode step, so names are percent-encoded twice.

/// Longest page title the server accepts, counted after slash escaping
pub const MAX_TITLE_LEN: usize = 150;

/// Identifies a user or group either by numeric id or by name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Numeric(u64),
    Named(String),
}

impl Identifier {
    /// Url segment for a group: `5` or `=` followed by the double-encoded name
    pub(crate) fn group_segment(&self) -> String {
        match self {
            Self::Numeric(id) => id.to_string(),
            Self::Named(name) => format!("={}", double_encode(name)),
        }
    }

    /// Url segment for a user. The special `current` user is never prefixed.
    pub(crate) fn user_segment(&self) -> String {
        match self {
            Self::Named(name) if name == "current" => name.clone(),
            _ => self.group_segment(),
        }
    }
}

impl From<u64> for Identifier {
    fn from(id: u64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Identifies a page (or the draft of a page)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageId {
    Numeric(u64),
    /// The site's home page
    Home,
    /// A page id already encoded with [`build_page_id`]
    Encoded(String),
}

impl PageId {
    /// Page id for `title` below `path`
    pub fn from_title(title: &str, path: &str) -> Self {
        Self::Encoded(build_page_id(title, path))
    }

    /// Page id for a full page path whose title may contain `//` escaped slashes
    pub fn from_path(full_path: &str) -> Self {
        Self::Encoded(build_page_id_from_path(full_path))
    }

    /// Url segment used below `pages/`
    pub(crate) fn page_segment(&self) -> String {
        match self {
            Self::Numeric(id) => id.to_string(),
            Self::Home => "home".to_string(),
            Self::Encoded(id) => format!("={id}"),
        }
    }

    /// Url segment used below `drafts/`. Drafts have no `home` shortcut.
    pub(crate) fn draft_segment(&self) -> String {
        match self {
            Self::Numeric(id) => id.to_string(),
            Self::Home => "=home".to_string(),
            Self::Encoded(id) => format!("={id}"),
        }
    }
}

impl From<u64> for PageId {
    fn from(id: u64) -> Self {
        Self::Numeric(id)
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.page_segment())
    }
}

/// Escapes every `/` in a page title as `//`
pub fn escape_slashes(title: &str) -> String {
    title.replace('/', "//")
}

/// Builds an encoded page id from a title and an optional parent path.
///
/// The title is slash escaped and then cut to [`MAX_TITLE_LEN`] characters, so a doubled
/// slash sitting on the limit loses its second half.
pub fn build_page_id(title: &str, path: &str) -> String {
    let title: String = escape_slashes(title).chars().take(MAX_TITLE_LEN).collect();
    let joined = if path.is_empty() {
        title
    } else {
        format!("{}/{}", path.trim_end_matches('/'), title)
    };
    double_encode(&joined)
}

/// Splits a full page path into `(path, title)`.
///
/// The title starts at the segment in front of the last `//` marker and runs to the end.
/// Without a marker the title is the last segment.
pub fn split_path_and_title(full_path: &str) -> (String, String) {
    let (head, tail) = match full_path.rfind("//") {
        // tail keeps one slash of the marker, which is the unescaped slash of the title
        Some(pos) => (&full_path[..pos], &full_path[pos + 1..]),
        None => (full_path, ""),
    };

    let mut segments: Vec<&str> = head.split('/').collect();
    let title_start = segments.pop().unwrap_or_default();
    (segments.join("/"), format!("{title_start}{tail}"))
}

/// Builds an encoded page id from a full path such as `Guides/Input//Output`
pub fn build_page_id_from_path(full_path: &str) -> String {
    let (path, title) = split_path_and_title(full_path);
    build_page_id(&title, &path)
}

pub(crate) fn double_encode(value: &str) -> String {
    urlencoding::encode(&urlencoding::encode(value)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_in_title_is_doubled_then_double_encoded() {
        assert_eq!(build_page_id("a/b", ""), double_encode("a//b"));
        assert_eq!(build_page_id("a/b", ""), "a%252F%252Fb");
    }

    #[test]
    fn path_is_joined_with_trailing_slashes_removed() {
        assert_eq!(
            build_page_id("Install", "Guides/Setup//"),
            double_encode("Guides/Setup/Install")
        );
    }

    #[test]
    fn page_id_has_no_reserved_characters() {
        for (title, path) in [
            ("What is this?", "FAQ/General"),
            ("a=b", ""),
            ("x/y/z", "root/"),
            ("Ünïcode & spaces", "Docs"),
        ] {
            let id = build_page_id(title, path);
            assert!(
                !id.contains('/') && !id.contains('=') && !id.contains('?'),
                "{id} leaks a reserved character"
            );
        }
    }

    #[test]
    fn split_recovers_escaped_title() {
        for title in ["Input/Output", "a/b", "TCP/IP"] {
            let full = format!("Docs/Networking/{}", escape_slashes(title));
            let (path, recovered) = split_path_and_title(&full);
            assert_eq!(path, "Docs/Networking");
            assert_eq!(recovered, title);
        }

        let (path, title) = split_path_and_title(&escape_slashes("TCP/IP"));
        assert_eq!(path, "");
        assert_eq!(title, "TCP/IP");
    }

    #[test]
    fn split_without_marker_takes_last_segment() {
        assert_eq!(
            split_path_and_title("Docs/Networking/Routing"),
            ("Docs/Networking".to_string(), "Routing".to_string())
        );
        assert_eq!(
            split_path_and_title("Routing"),
            (String::new(), "Routing".to_string())
        );
    }

    #[test]
    fn build_from_path_round_trips_to_the_same_id() {
        assert_eq!(
            build_page_id_from_path("Docs/Networking/TCP//IP"),
            build_page_id("TCP/IP", "Docs/Networking")
        );
    }

    #[test]
    fn truncation_after_escaping_splits_a_doubled_slash() {
        // 149 characters followed by a slash: escaping makes 151 characters and the
        // cut at 150 keeps only the first half of the doubled slash.
        let title = format!("{}/", "a".repeat(149));
        let expected = format!("{}/", "a".repeat(149));
        assert_eq!(build_page_id(&title, ""), double_encode(&expected));

        let (_, recovered) = split_path_and_title(&expected);
        assert_ne!(recovered, title);
    }

    #[test]
    fn segments() {
        assert_eq!(PageId::from(42).page_segment(), "42");
        assert_eq!(PageId::Home.page_segment(), "home");
        assert_eq!(PageId::Home.draft_segment(), "=home");
        assert_eq!(PageId::from_title("a/b", "").page_segment(), "=a%252F%252Fb");

        assert_eq!(Identifier::from(7).user_segment(), "7");
        assert_eq!(Identifier::from("current").user_segment(), "current");
        assert_eq!(Identifier::from("j doe").user_segment(), "=j%2520doe");
        assert_eq!(Identifier::from("current").group_segment(), "=current");
    }
}
