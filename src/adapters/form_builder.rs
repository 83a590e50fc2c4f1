//! Form builder
//!
//! One method per widget, each taking a field identifier and its options and
//! returning the finished shell. Composite helpers render radio groups,
//! multi-choice checkbox groups and field sets.
//!
//! ```rust
//! use fieldshell::adapters::form_builder::FormBuilder;
//! use fieldshell::domain::FieldOptions;
//! use serde_json::json;
//!
//! # fn main() -> fieldshell::error::FormResult<()> {
//! let form = FormBuilder::new("car", json!({ "color": "red" }))?;
//! let html = form.text_field("color", FieldOptions::new().with("description", "Exterior paint"))?;
//! assert!(html.as_str().starts_with("<div id=\"car_color_field\""));
//! # Ok(())
//! # }
//! ```

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::adapters::html_renderer::HtmlWidgetRenderer;
use crate::adapters::label::{humanize, LabelDeriver};
use crate::adapters::shell::{ShellBuilder, ShellExtras};
use crate::adapters::variants::{Presentation, ShellTemplates};
use crate::config::FormSettings;
use crate::domain::{
    dispatch, value_text, Choice, FieldContext, FieldKind, FieldOptions, Markup, Widget,
    WidgetRenderer,
};
use crate::error::{FormError, FormResult};

/// Error messages keyed by field identifier.
pub type FieldErrors = HashMap<String, Vec<String>>;

pub struct FormBuilder {
    object: Value,
    shell: ShellBuilder,
    renderer: Arc<dyn WidgetRenderer>,
    settings: FormSettings,
    errors: FieldErrors,
}

impl FormBuilder {
    /// Builder for `object_name` with default settings and the HTML renderer.
    pub fn new(object_name: impl Into<String>, object: Value) -> FormResult<Self> {
        Self::with_settings(object_name, object, &FormSettings::default())
    }

    /// Builder using the variant and defaults named in `settings`.
    pub fn with_settings(
        object_name: impl Into<String>,
        object: Value,
        settings: &FormSettings,
    ) -> FormResult<Self> {
        let templates = ShellTemplates::for_variant(settings.variant, settings)?;
        Ok(Self::from_parts(
            object_name,
            object,
            Arc::new(templates),
            Arc::new(HtmlWidgetRenderer::new()),
            settings.clone(),
        ))
    }

    /// Builder using a custom presentation.
    pub fn with_presentation(
        object_name: impl Into<String>,
        object: Value,
        presentation: &dyn Presentation,
        settings: &FormSettings,
    ) -> FormResult<Self> {
        let templates = ShellTemplates::compile(presentation, settings)?;
        Ok(Self::from_parts(
            object_name,
            object,
            Arc::new(templates),
            Arc::new(HtmlWidgetRenderer::new()),
            settings.clone(),
        ))
    }

    /// Assemble a builder from precompiled templates and any renderer.
    pub fn from_parts(
        object_name: impl Into<String>,
        object: Value,
        templates: Arc<ShellTemplates>,
        renderer: Arc<dyn WidgetRenderer>,
        settings: FormSettings,
    ) -> Self {
        let labels = LabelDeriver::new(Markup::raw(settings.required_marker.clone()));
        let shell = ShellBuilder::new(object_name, templates, labels, renderer.clone());
        Self {
            object,
            shell,
            renderer,
            settings,
            errors: FieldErrors::new(),
        }
    }

    /// Attach error messages; the first message of a field renders in its shell.
    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors;
        self
    }

    pub fn object_name(&self) -> &str {
        self.shell.object_name()
    }

    pub fn variant(&self) -> &str {
        self.shell.templates().variant()
    }

    /// Render any widget by its tag, e.g. `field("text_field", "color", opts)`.
    ///
    /// Widgets that take extra arguments read them from options: `choices`
    /// (array of `[label, value]` pairs) for selects and groups, `tag_value`
    /// for a single radio button, `value` for the submit button.
    pub fn field(&self, tag: &str, field: &str, options: FieldOptions) -> FormResult<Markup> {
        let entry = dispatch(tag)?;
        let mut options = options;
        match entry.widget {
            Widget::TextField => self.text_field(field, options),
            Widget::PasswordField => self.password_field(field, options),
            Widget::EmailField => self.email_field(field, options),
            Widget::NumberField => self.number_field(field, options),
            Widget::TextArea => self.text_area(field, options),
            Widget::FileField => self.file_field(field, options),
            Widget::CheckBox => self.check_box(field, options),
            Widget::RadioButton => {
                let tag_value = options.remove("tag_value").and_then(|v| value_text(&v));
                let tag_value = tag_value.ok_or_else(|| {
                    FormError::InvalidOptions("radio_button needs a `tag_value` option".to_string())
                })?;
                self.radio_button(field, &tag_value, options)
            }
            Widget::Select => {
                let choices = take_choices(&mut options)?;
                self.select(field, &choices, options)
            }
            Widget::DateSelect => self.date_select(field, options),
            Widget::MultipartDateSelect => self.multipart_date_select(field, options),
            Widget::YearSelect => self.year_select(field, options),
            Widget::IntegerSelect => self.integer_select(field, options),
            Widget::Submit => {
                let value = options.remove("value").and_then(|v| value_text(&v));
                self.submit(value.as_deref(), options)
            }
            Widget::RadioButtons => {
                let choices = take_choices(&mut options)?;
                self.radio_buttons(field, &choices, options)
            }
            Widget::CheckBoxes => {
                let choices = take_choices(&mut options)?;
                self.check_boxes(field, &choices, options)
            }
        }
    }

    pub fn text_field(&self, field: &str, options: FieldOptions) -> FormResult<Markup> {
        self.input(Widget::TextField, field, "text", options)
    }

    pub fn password_field(&self, field: &str, options: FieldOptions) -> FormResult<Markup> {
        self.input(Widget::PasswordField, field, "password", options)
    }

    pub fn email_field(&self, field: &str, options: FieldOptions) -> FormResult<Markup> {
        self.input(Widget::EmailField, field, "email", options)
    }

    pub fn number_field(&self, field: &str, options: FieldOptions) -> FormResult<Markup> {
        self.input(Widget::NumberField, field, "number", options)
    }

    pub fn file_field(&self, field: &str, options: FieldOptions) -> FormResult<Markup> {
        self.input(Widget::FileField, field, "file", options)
    }

    pub fn text_area(&self, field: &str, options: FieldOptions) -> FormResult<Markup> {
        let ctx = self.context(field);
        self.shell(field, &options, Widget::TextArea.kind(), |opts| {
            self.renderer.text_area(&ctx, opts)
        })
    }

    pub fn check_box(&self, field: &str, options: FieldOptions) -> FormResult<Markup> {
        let ctx = self.context(field);
        self.shell(field, &options, Widget::CheckBox.kind(), |opts| {
            self.renderer.check_box(&ctx, opts)
        })
    }

    /// A single radio button with its label, without a field container.
    ///
    /// The label defaults to the humanized `tag_value` and targets the
    /// button's own id.
    pub fn radio_button(
        &self,
        field: &str,
        tag_value: &str,
        options: FieldOptions,
    ) -> FormResult<Markup> {
        let mut options = options;
        options.or_insert("label", humanize(tag_value));
        options.or_insert(
            "label_for",
            self.renderer.tag_id(self.object_name(), field, tag_value),
        );
        let ctx = self.context(field);
        self.shell.build(field, &options, Widget::RadioButton.kind(), |opts| {
            self.renderer.radio_button(&ctx, tag_value, opts)
        })
    }

    pub fn select(
        &self,
        field: &str,
        choices: &[Choice],
        options: FieldOptions,
    ) -> FormResult<Markup> {
        let ctx = self.context(field);
        self.shell(field, &options, Widget::Select.kind(), |opts| {
            self.renderer.select(&ctx, choices, opts)
        })
    }

    /// Year, month and day selects for a date attribute.
    pub fn date_select(&self, field: &str, options: FieldOptions) -> FormResult<Markup> {
        let mut options = options;
        self.apply_date_defaults(&mut options);
        options.or_insert(
            "label_for",
            format!("{}_1i", self.renderer.element_id(self.object_name(), field)),
        );
        let ctx = self.context(field);
        self.shell(field, &options, Widget::DateSelect.kind(), |opts| {
            self.renderer.date_select(&ctx, opts)
        })
    }

    /// Date select storing year, month and day in three attributes
    /// (`<field>_y`, `<field>_m`, `<field>_d`), which allows partial dates.
    pub fn multipart_date_select(&self, field: &str, options: FieldOptions) -> FormResult<Markup> {
        let mut options = options;
        self.apply_date_defaults(&mut options);
        options.or_insert(
            "label_for",
            format!("{}_y", self.renderer.element_id(self.object_name(), field)),
        );

        self.shell(field, &options, Widget::MultipartDateSelect.kind(), |opts| {
            let start = opts.get_i64("start_year").unwrap_or(self.settings.start_year as i64);
            let end = opts.get_i64("end_year").unwrap_or(self.settings.end_year() as i64);
            let parts = [
                ("y", Choice::numeric_range(start, end)),
                ("m", Choice::months()),
                ("d", Choice::numeric_range(1, 31)),
            ];

            let selects = parts
                .iter()
                .map(|(suffix, choices)| {
                    let part_field = format!("{}_{}", field, suffix);
                    let ctx = self.context(&part_field);
                    self.renderer.select(&ctx, choices, opts)
                })
                .collect::<FormResult<Vec<_>>>()?;

            Ok(Markup::join(selects, " "))
        })
    }

    /// Select of years, from `start_year` to `end_year`.
    pub fn year_select(&self, field: &str, options: FieldOptions) -> FormResult<Markup> {
        let mut options = options;
        let first = options
            .get_i64("start_year")
            .unwrap_or(self.settings.start_year as i64);
        let last = options
            .get_i64("end_year")
            .unwrap_or(self.settings.end_year() as i64);
        options.remove("start_year");
        options.remove("end_year");
        options.insert("first", first);
        options.insert("last", last);
        self.integer_select(field, options)
    }

    /// Select of the integers `first..=last`.
    pub fn integer_select(&self, field: &str, options: FieldOptions) -> FormResult<Markup> {
        let (first, last) = match (options.get_i64("first"), options.get_i64("last")) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(FormError::InvalidOptions(
                    "integer_select needs integer `first` and `last` options".to_string(),
                ))
            }
        };
        let choices = Choice::numeric_range(first, last);
        let ctx = self.context(field);
        self.shell(field, &options, Widget::IntegerSelect.kind(), |opts| {
            self.renderer.select(&ctx, &choices, opts)
        })
    }

    /// Submit button with the `submit` class; the text defaults to
    /// "Create" for new objects and "Update" for persisted ones.
    pub fn submit(&self, value: Option<&str>, options: FieldOptions) -> FormResult<Markup> {
        let mut options = options;
        let class = match options.text("class") {
            Some(existing) => format!("{} submit", existing.trim()),
            None => "submit".to_string(),
        };
        options.insert("class", class);

        let value = match value {
            Some(value) => value.to_string(),
            None if self.is_persisted() => "Update".to_string(),
            None => "Create".to_string(),
        };

        self.shell.build("submit", &options, Widget::Submit.kind(), |opts| {
            self.renderer.submit(&value, opts)
        })
    }

    /// Group of radio buttons, one per choice, in a single field shell.
    pub fn radio_buttons(
        &self,
        field: &str,
        choices: &[Choice],
        options: FieldOptions,
    ) -> FormResult<Markup> {
        let mut options = options;
        self.target_first_choice(&mut options, field, choices);
        let ctx = self.context(field);
        self.shell(field, &options, Widget::RadioButtons.kind(), |opts| {
            let buttons = choices
                .iter()
                .map(|choice| {
                    let tag_id = self.renderer.tag_id(self.object_name(), field, &choice.value);
                    let pair = pair_options(opts, &choice.label, tag_id);
                    self.shell.build(field, &pair, FieldKind::RadioChoice, |pair_opts| {
                        let mut attrs = pair_opts.clone();
                        if opts.contains_key("required") {
                            attrs.insert("required", "required");
                        }
                        self.renderer.radio_button(&ctx, &choice.value, &attrs)
                    })
                })
                .collect::<FormResult<Vec<_>>>()?;
            Ok(Markup::join(buttons, "<br />"))
        })
    }

    /// Checkboxes for a many-valued attribute such as `category_ids`.
    ///
    /// A hidden empty value precedes the group so that clearing every box
    /// still submits the attribute.
    pub fn check_boxes(
        &self,
        field: &str,
        choices: &[Choice],
        options: FieldOptions,
    ) -> FormResult<Markup> {
        let mut options = options;
        self.target_first_choice(&mut options, field, choices);
        let name = format!("{}[]", self.renderer.element_name(self.object_name(), field));
        let selected: Vec<String> = match self.object.get(field) {
            Some(Value::Array(values)) => values.iter().filter_map(value_text).collect(),
            Some(value) => value_text(value).into_iter().collect(),
            None => Vec::new(),
        };

        let extras = ShellExtras {
            error: self.error_for(field),
            hidden: Some(self.renderer.hidden(&name, "")?),
        };

        self.shell.build_with(
            field,
            &options,
            Widget::CheckBoxes.kind(),
            extras,
            |opts| {
                let boxes = choices
                    .iter()
                    .map(|choice| {
                        let id = self.renderer.tag_id(self.object_name(), field, &choice.value);
                        let checked = selected.iter().any(|v| v == &choice.value);
                        let pair = pair_options(opts, &choice.label, id.clone());
                        self.shell.build(field, &pair, FieldKind::RadioChoice, |pair_opts| {
                            self.renderer
                                .collection_check_box(&name, &id, &choice.value, checked, pair_opts)
                        })
                    })
                    .collect::<FormResult<Vec<_>>>()?;
                Ok(Markup::join(boxes, "<br />"))
            },
        )
    }

    /// `<fieldset>` around the fields rendered by `content`.
    pub fn field_set<F>(
        &self,
        legend: Option<&str>,
        options: FieldOptions,
        content: F,
    ) -> FormResult<Markup>
    where
        F: FnOnce(&Self) -> FormResult<Markup>,
    {
        let body = content(self)?;
        self.renderer.fieldset(legend, &options, &body)
    }

    fn input(
        &self,
        widget: Widget,
        field: &str,
        input_type: &str,
        options: FieldOptions,
    ) -> FormResult<Markup> {
        let ctx = self.context(field);
        self.shell(field, &options, widget.kind(), |opts| {
            self.renderer.input(&ctx, input_type, opts)
        })
    }

    fn shell<F>(
        &self,
        field: &str,
        options: &FieldOptions,
        kind: FieldKind,
        element: F,
    ) -> FormResult<Markup>
    where
        F: FnOnce(&FieldOptions) -> FormResult<Markup>,
    {
        let extras = ShellExtras {
            error: self.error_for(field),
            hidden: None,
        };
        self.shell.build_with(field, options, kind, extras, element)
    }

    fn context<'a>(&'a self, field: &'a str) -> FieldContext<'a> {
        FieldContext::new(self.object_name(), field, self.object.get(field))
    }

    fn error_for(&self, field: &str) -> Option<Markup> {
        let message = self.errors.get(field)?.first()?;
        let mut markup = Markup::raw(format!("<div class=\"{}\">", self.settings.error_class));
        markup.push_escaped(message);
        markup.push(&Markup::raw("</div>"));
        Some(markup)
    }

    /// Group labels point at the first choice; no element carries the bare field id.
    fn target_first_choice(&self, options: &mut FieldOptions, field: &str, choices: &[Choice]) {
        if let Some(first) = choices.first() {
            options.or_insert(
                "label_for",
                self.renderer.tag_id(self.object_name(), field, &first.value),
            );
        }
    }

    fn is_persisted(&self) -> bool {
        self.object.get("id").map_or(false, |id| !id.is_null())
    }

    fn apply_date_defaults(&self, options: &mut FieldOptions) {
        options.or_insert("include_blank", false);
        options.or_insert("start_year", self.settings.start_year);
        options.or_insert("end_year", self.settings.end_year());
    }
}

/// Options of one element + label pair inside a group. Only the group's
/// label carries the required marker.
fn pair_options(group: &FieldOptions, label: &str, label_for: String) -> FieldOptions {
    let mut options = group.clone();
    options.remove("required");
    options.with("label", label).with("label_for", label_for)
}

fn take_choices(options: &mut FieldOptions) -> FormResult<Vec<Choice>> {
    let Some(raw) = options.remove("choices") else {
        return Ok(Vec::new());
    };
    let Value::Array(items) = raw else {
        return Err(FormError::InvalidOptions(
            "`choices` must be an array of [label, value] pairs".to_string(),
        ));
    };

    items
        .iter()
        .map(|item| match item {
            Value::Array(pair) if pair.len() == 2 => {
                match (value_text(&pair[0]), value_text(&pair[1])) {
                    (Some(label), Some(value)) => Ok(Choice::new(label, value)),
                    _ => Err(FormError::InvalidOptions(format!("invalid choice {}", item))),
                }
            }
            Value::String(s) => Ok(Choice::new(s.clone(), s.clone())),
            other => Err(FormError::InvalidOptions(format!("invalid choice {}", other))),
        })
        .collect()
}
