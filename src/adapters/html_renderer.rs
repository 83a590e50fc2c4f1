//! Default widget renderer producing conventional HTML inputs
//!
//! Elements take their ids and names from the bound object
//! (`car_color` / `car[color]`); pass-through options become attributes,
//! except the handful of keys the renderer consumes itself.

use chrono::{Datelike, NaiveDate};
use serde_json::Value;
use tracing::warn;

use crate::domain::{value_text, Choice, FieldContext, FieldOptions, Markup, WidgetRenderer};
use crate::error::{FormError, FormResult};

/// Options read by the renderer that never become attributes.
pub const RENDERER_OPTION_KEYS: &[&str] = &[
    "include_blank",
    "start_year",
    "end_year",
    "first",
    "last",
    "prefix",
    "checked_value",
    "unchecked_value",
    "selected",
];

/// Whether `key` can be written into a tag as an attribute name.
pub fn is_attribute_name(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

/// Render `options` as ` key="value"` pairs.
///
/// `true` renders as `key="key"`; `false` and null are omitted. Keys that
/// are not plain attribute names are dropped.
pub fn attributes(options: &FieldOptions) -> String {
    let mut out = String::new();
    for (key, value) in options.iter() {
        if RENDERER_OPTION_KEYS.contains(&key.as_str()) {
            continue;
        }
        if !is_attribute_name(key) {
            warn!(key = %key, "dropping option that is not an attribute name");
            continue;
        }
        match value {
            Value::Null | Value::Bool(false) => {}
            Value::Bool(true) => out.push_str(&format!(" {}=\"{}\"", key, key)),
            Value::String(s) => out.push_str(&format!(" {}=\"{}\"", key, tera::escape_html(s))),
            other => out.push_str(&format!(
                " {}=\"{}\"",
                key,
                tera::escape_html(&other.to_string())
            )),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlWidgetRenderer;

impl HtmlWidgetRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Options with the default `name` and `id` of the field appended.
    fn bound_options(&self, ctx: &FieldContext<'_>, options: &FieldOptions) -> FieldOptions {
        let mut attrs = options.clone();
        attrs.or_insert("name", self.element_name(ctx.object_name, ctx.field));
        attrs.or_insert("id", self.element_id(ctx.object_name, ctx.field));
        attrs
    }

    fn select_tag(
        &self,
        attrs: &FieldOptions,
        choices: &[Choice],
        selected: Option<&str>,
        include_blank: bool,
    ) -> Markup {
        let mut html = format!("<select{}>", attributes(attrs));
        if include_blank {
            html.push_str("<option value=\"\"></option>");
        }
        for choice in choices {
            let selected_attr = if selected == Some(choice.value.as_str()) {
                " selected=\"selected\""
            } else {
                ""
            };
            html.push_str(&format!(
                "<option value=\"{}\"{}>{}</option>",
                tera::escape_html(&choice.value),
                selected_attr,
                tera::escape_html(&choice.label)
            ));
        }
        html.push_str("</select>");
        Markup::raw(html)
    }
}

fn year_range(options: &FieldOptions) -> FormResult<(i64, i64)> {
    let start = options
        .get_i64("start_year")
        .ok_or_else(|| FormError::Widget("date select needs a start_year".to_string()))?;
    let end = options
        .get_i64("end_year")
        .ok_or_else(|| FormError::Widget("date select needs an end_year".to_string()))?;
    Ok((start, end))
}

impl WidgetRenderer for HtmlWidgetRenderer {
    fn input(
        &self,
        ctx: &FieldContext<'_>,
        input_type: &str,
        options: &FieldOptions,
    ) -> FormResult<Markup> {
        let mut attrs = options.clone();
        attrs.or_insert("type", input_type);
        if !matches!(input_type, "password" | "file") {
            if let Some(value) = ctx.value_text() {
                attrs.or_insert("value", value);
            }
        }
        let attrs = self.bound_options(ctx, &attrs);
        Ok(Markup::raw(format!("<input{} />", attributes(&attrs))))
    }

    fn text_area(&self, ctx: &FieldContext<'_>, options: &FieldOptions) -> FormResult<Markup> {
        let attrs = self.bound_options(ctx, options);
        let mut html = Markup::raw(format!("<textarea{}>", attributes(&attrs)));
        html.push_escaped(&ctx.value_text().unwrap_or_default());
        html.push(&Markup::raw("</textarea>"));
        Ok(html)
    }

    fn check_box(&self, ctx: &FieldContext<'_>, options: &FieldOptions) -> FormResult<Markup> {
        let checked_value = options.text("checked_value").unwrap_or_else(|| "1".to_string());
        let unchecked_value = options.text("unchecked_value").unwrap_or_else(|| "0".to_string());
        let checked = match ctx.value {
            Some(Value::Bool(b)) => *b,
            Some(value) => value_text(value).as_deref() == Some(checked_value.as_str()),
            None => false,
        };

        let name = self.element_name(ctx.object_name, ctx.field);
        let hidden = self.hidden(&name, &unchecked_value)?;

        let mut attrs = options.clone();
        attrs.or_insert("type", "checkbox");
        attrs.or_insert("value", checked_value);
        let mut attrs = self.bound_options(ctx, &attrs);
        if checked {
            attrs.or_insert("checked", "checked");
        }

        let mut html = hidden;
        html.push(&Markup::raw(format!("<input{} />", attributes(&attrs))));
        Ok(html)
    }

    fn radio_button(
        &self,
        ctx: &FieldContext<'_>,
        tag_value: &str,
        options: &FieldOptions,
    ) -> FormResult<Markup> {
        let mut attrs = options.clone();
        attrs.or_insert("type", "radio");
        attrs.or_insert("value", tag_value);
        attrs.or_insert("name", self.element_name(ctx.object_name, ctx.field));
        attrs.or_insert("id", self.tag_id(ctx.object_name, ctx.field, tag_value));
        if ctx.value_text().as_deref() == Some(tag_value) {
            attrs.or_insert("checked", "checked");
        }
        Ok(Markup::raw(format!("<input{} />", attributes(&attrs))))
    }

    fn collection_check_box(
        &self,
        name: &str,
        id: &str,
        value: &str,
        checked: bool,
        options: &FieldOptions,
    ) -> FormResult<Markup> {
        let mut attrs = options.clone();
        attrs.or_insert("type", "checkbox");
        attrs.or_insert("value", value);
        attrs.or_insert("name", name);
        attrs.or_insert("id", id);
        if checked {
            attrs.or_insert("checked", "checked");
        }
        Ok(Markup::raw(format!("<input{} />", attributes(&attrs))))
    }

    fn select(
        &self,
        ctx: &FieldContext<'_>,
        choices: &[Choice],
        options: &FieldOptions,
    ) -> FormResult<Markup> {
        let attrs = self.bound_options(ctx, options);
        let selected = options.text("selected").or_else(|| ctx.value_text());
        Ok(self.select_tag(
            &attrs,
            choices,
            selected.as_deref(),
            options.flag("include_blank"),
        ))
    }

    fn date_select(&self, ctx: &FieldContext<'_>, options: &FieldOptions) -> FormResult<Markup> {
        let (start_year, end_year) = year_range(options)?;
        let date = ctx
            .value_text()
            .and_then(|text| NaiveDate::parse_from_str(&text, "%Y-%m-%d").ok());
        let include_blank = options.flag("include_blank");

        let parts = [
            ("1i", Choice::numeric_range(start_year, end_year), date.map(|d| d.year() as u32)),
            ("2i", Choice::months(), date.map(|d| d.month())),
            ("3i", Choice::numeric_range(1, 31), date.map(|d| d.day())),
        ];

        let base_name = self.element_name(ctx.object_name, ctx.field);
        let base_id = self.element_id(ctx.object_name, ctx.field);
        let selects = parts.into_iter().map(|(suffix, choices, selected)| {
            let mut attrs = options.clone();
            attrs.or_insert(
                "name",
                format!("{}({})]", base_name.trim_end_matches(']'), suffix),
            );
            attrs.or_insert("id", format!("{}_{}", base_id, suffix));
            let selected = selected.map(|n| n.to_string());
            self.select_tag(&attrs, &choices, selected.as_deref(), include_blank)
        });

        Ok(Markup::join(selects, ""))
    }

    fn submit(&self, value: &str, options: &FieldOptions) -> FormResult<Markup> {
        let mut attrs = options.clone();
        attrs.or_insert("type", "submit");
        attrs.or_insert("name", "commit");
        attrs.or_insert("value", value);
        Ok(Markup::raw(format!("<input{} />", attributes(&attrs))))
    }

    fn hidden(&self, name: &str, value: &str) -> FormResult<Markup> {
        Ok(Markup::raw(format!(
            "<input type=\"hidden\" name=\"{}\" value=\"{}\" />",
            tera::escape_html(name),
            tera::escape_html(value)
        )))
    }

    fn fieldset(
        &self,
        legend: Option<&str>,
        options: &FieldOptions,
        content: &Markup,
    ) -> FormResult<Markup> {
        let mut html = Markup::raw(format!("<fieldset{}>", attributes(options)));
        if let Some(legend) = legend.filter(|l| !l.trim().is_empty()) {
            html.push(&Markup::raw("<legend>"));
            html.push_escaped(legend);
            html.push(&Markup::raw("</legend>"));
        }
        html.push(content);
        html.push(&Markup::raw("</fieldset>"));
        Ok(html)
    }
}
