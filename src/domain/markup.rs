//! Safe HTML fragments

use serde::Serialize;
use std::fmt;

/// An HTML fragment that is already safe for direct embedding in a page.
///
/// Text only becomes `Markup` through [`Markup::escape`] (caller-supplied text)
/// or [`Markup::raw`] (fragments the caller vouches for, such as decorations
/// or the output of a widget renderer). Composed shells are never re-escaped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Escape plain text for embedding in HTML content or attribute values.
    pub fn escape(text: &str) -> Self {
        Self(tera::escape_html(text))
    }

    /// Wrap a fragment that is already safe HTML.
    pub fn raw(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Join fragments with a separator that is itself trusted markup.
    pub fn join<I>(parts: I, separator: &str) -> Self
    where
        I: IntoIterator<Item = Markup>,
    {
        let joined = parts
            .into_iter()
            .map(|m| m.0)
            .collect::<Vec<_>>()
            .join(separator);
        Self(joined)
    }

    pub fn push(&mut self, other: &Markup) {
        self.0.push_str(&other.0);
    }

    pub fn push_escaped(&mut self, text: &str) {
        self.0.push_str(&tera::escape_html(text));
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Markup> for String {
    fn from(markup: Markup) -> Self {
        markup.0
    }
}

impl AsRef<str> for Markup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_neutralises_tags() {
        let markup = Markup::escape("<b>Tom & Jerry</b>");
        assert!(!markup.as_str().contains('<'));
        assert!(markup.as_str().contains("&amp;"));
    }

    #[test]
    fn test_raw_is_untouched() {
        let markup = Markup::raw("<span class=\"spinner\"></span>");
        assert_eq!(markup.as_str(), "<span class=\"spinner\"></span>");
    }

    #[test]
    fn test_join_and_push() {
        let mut joined = Markup::join(vec![Markup::raw("<a>"), Markup::raw("<b>")], "<br />");
        assert_eq!(joined.as_str(), "<a><br /><b>");

        joined.push_escaped("&");
        assert!(joined.as_str().ends_with("&amp;"));
    }
}
