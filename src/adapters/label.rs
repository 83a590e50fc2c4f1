//! Label derivation
//!
//! Turns a field identifier and the label options of a call into a finished
//! `<label>` fragment. Caller text is always escaped; the required marker is
//! trusted markup appended after escaping.

use crate::domain::{LabelOptions, Markup};

/// Humanize a field identifier: `first_name` → `First name`.
///
/// A trailing `_id` is dropped, `_` and `-` become spaces and the first
/// character is upper-cased. The rest of the text is left as-is.
pub fn humanize(identifier: &str) -> String {
    let base = identifier.strip_suffix("_id").unwrap_or(identifier);
    let spaced = base.replace(['_', '-'], " ");
    let trimmed = spaced.trim();

    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Builds label fragments with a fixed required-indicator.
#[derive(Debug, Clone)]
pub struct LabelDeriver {
    required_marker: Markup,
}

impl LabelDeriver {
    pub fn new(required_marker: Markup) -> Self {
        Self { required_marker }
    }

    /// Render the label for `field`.
    ///
    /// `element_id` is the natural target of the `for` attribute; the
    /// `label_for` option overrides it for composite widgets.
    pub fn derive(
        &self,
        field: &str,
        override_text: Option<&str>,
        options: &LabelOptions,
        element_id: &str,
    ) -> Markup {
        let text = match override_text {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => humanize(field),
        };

        let target = options.label_for.as_deref().unwrap_or(element_id);

        let mut label = Markup::raw(format!("<label for=\"{}\">", tera::escape_html(target)));
        label.push_escaped(&text);
        if options.colon {
            label.push_escaped(":");
        }
        if options.required {
            label.push(&self.required_marker);
        }
        label.push(&Markup::raw("</label>"));
        label
    }
}

impl Default for LabelDeriver {
    fn default() -> Self {
        Self::new(Markup::raw("<span class=\"required\">*</span>"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(field: &str, text: Option<&str>, options: LabelOptions) -> String {
        LabelDeriver::default()
            .derive(field, text, &options, &format!("car_{}", field))
            .into_string()
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("first_name"), "First name");
        assert_eq!(humanize("color"), "Color");
        assert_eq!(humanize("author_id"), "Author");
        assert_eq!(humanize("category_ids"), "Category ids");
        assert_eq!(humanize("zip-code"), "Zip code");
        assert_eq!(humanize("already Capital"), "Already Capital");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_label_defaults_to_humanized_field() {
        assert_eq!(
            label("first_name", None, LabelOptions::default()),
            "<label for=\"car_first_name\">First name</label>"
        );
    }

    #[test]
    fn test_blank_override_falls_back() {
        assert_eq!(
            label("color", Some("   "), LabelOptions::default()),
            "<label for=\"car_color\">Color</label>"
        );
    }

    #[test]
    fn test_override_text_is_escaped() {
        let html = label("color", Some("<b>Paint</b>"), LabelOptions::default());
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;Paint"));
    }

    #[test]
    fn test_colon_and_required_marker() {
        let options = LabelOptions {
            colon: true,
            required: true,
            label_for: None,
        };
        assert_eq!(
            label("number", None, options),
            "<label for=\"car_number\">Number:<span class=\"required\">*</span></label>"
        );
    }

    #[test]
    fn test_required_marker_absent_when_not_required() {
        let html = label("number", None, LabelOptions::default());
        assert!(!html.contains("required"));
    }

    #[test]
    fn test_label_for_override() {
        let options = LabelOptions {
            label_for: Some("car_born_on_1i".to_string()),
            ..Default::default()
        };
        assert_eq!(
            label("born_on", None, options),
            "<label for=\"car_born_on_1i\">Born on</label>"
        );
    }

    #[test]
    fn test_custom_required_marker() {
        let deriver = LabelDeriver::new(Markup::raw("<abbr title=\"required\">!</abbr>"));
        let options = LabelOptions {
            required: true,
            ..Default::default()
        };
        let html = deriver.derive("email", None, &options, "user_email").into_string();
        assert!(html.ends_with("Email<abbr title=\"required\">!</abbr></label>"));
    }
}
