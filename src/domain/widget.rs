//! Port for the external widget renderer
//!
//! The shell builder decorates markup it does not produce itself. Anything
//! that can turn a field and its pass-through options into an input element
//! implements [`WidgetRenderer`]; `adapters::html_renderer` ships the default.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{FieldOptions, Markup};
use crate::error::FormResult;

/// The field being rendered and its current value on the bound object.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    pub object_name: &'a str,
    pub field: &'a str,
    pub value: Option<&'a Value>,
}

impl<'a> FieldContext<'a> {
    pub fn new(object_name: &'a str, field: &'a str, value: Option<&'a Value>) -> Self {
        Self {
            object_name,
            field,
            value,
        }
    }

    /// The bound value as text, `None` when missing or null.
    pub fn value_text(&self) -> Option<String> {
        value_text(self.value?)
    }
}

/// Textual form of a JSON value as it appears in an HTML attribute.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// One selectable option: display label and submitted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// One choice per integer in `first..=last`, labelled with the number.
    pub fn numeric_range(first: i64, last: i64) -> Vec<Choice> {
        (first..=last)
            .map(|n| Choice::new(n.to_string(), n.to_string()))
            .collect()
    }

    /// Month names submitting `1` through `12`.
    pub fn months() -> Vec<Choice> {
        MONTH_NAMES
            .iter()
            .enumerate()
            .map(|(index, name)| Choice::new(*name, (index + 1).to_string()))
            .collect()
    }
}

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl<L: Into<String>, V: Into<String>> From<(L, V)> for Choice {
    fn from((label, value): (L, V)) -> Self {
        Self::new(label, value)
    }
}

/// Sanitize a string for use as an HTML id: `car[wheels]` → `car_wheels`.
pub fn sanitize_id(raw: &str) -> String {
    let replaced: String = raw
        .replace("][", "_")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    replaced.trim_end_matches('_').to_string()
}

/// Renders the core element of a field.
///
/// Implementations receive only pass-through options; presentation options
/// have already been consumed by the shell builder. Any error returned here
/// propagates to the caller unchanged.
pub trait WidgetRenderer: Send + Sync {
    /// Default element id, e.g. `car_color`.
    fn element_id(&self, object_name: &str, field: &str) -> String {
        sanitize_id(&format!("{}_{}", object_name, field))
    }

    /// Default element name, e.g. `car[color]`.
    fn element_name(&self, object_name: &str, field: &str) -> String {
        format!("{}[{}]", object_name, field)
    }

    /// Id of one choice within a group, e.g. `car_color_red`.
    fn tag_id(&self, object_name: &str, field: &str, tag_value: &str) -> String {
        sanitize_id(&format!(
            "{}_{}",
            self.element_id(object_name, field),
            tag_value.to_lowercase()
        ))
    }

    /// `<input>` of the given type (`text`, `password`, `email`, ...).
    fn input(
        &self,
        ctx: &FieldContext<'_>,
        input_type: &str,
        options: &FieldOptions,
    ) -> FormResult<Markup>;

    fn text_area(&self, ctx: &FieldContext<'_>, options: &FieldOptions) -> FormResult<Markup>;

    /// Single boolean checkbox bound to the field.
    fn check_box(&self, ctx: &FieldContext<'_>, options: &FieldOptions) -> FormResult<Markup>;

    /// One radio button submitting `tag_value`.
    fn radio_button(
        &self,
        ctx: &FieldContext<'_>,
        tag_value: &str,
        options: &FieldOptions,
    ) -> FormResult<Markup>;

    /// One checkbox of a multi-choice group, not bound to a single field.
    fn collection_check_box(
        &self,
        name: &str,
        id: &str,
        value: &str,
        checked: bool,
        options: &FieldOptions,
    ) -> FormResult<Markup>;

    fn select(
        &self,
        ctx: &FieldContext<'_>,
        choices: &[Choice],
        options: &FieldOptions,
    ) -> FormResult<Markup>;

    /// Year, month and day selects for a date-valued field.
    fn date_select(&self, ctx: &FieldContext<'_>, options: &FieldOptions) -> FormResult<Markup>;

    fn submit(&self, value: &str, options: &FieldOptions) -> FormResult<Markup>;

    fn hidden(&self, name: &str, value: &str) -> FormResult<Markup>;

    fn fieldset(
        &self,
        legend: Option<&str>,
        options: &FieldOptions,
        content: &Markup,
    ) -> FormResult<Markup>;
}
