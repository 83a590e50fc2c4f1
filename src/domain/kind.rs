//! Field kinds, presentation variants and the widget dispatch table

use serde::{Deserialize, Serialize};

use crate::error::{FormError, FormResult};

/// Rendering shape of a field's shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Text, number, select, date and every other ordinary input
    Plain,
    Checkbox,
    SubmitButton,
    /// Bare element + label pair, nested inside a group wrapper
    RadioChoice,
    RadioGroup,
    MultiChoiceCheckboxes,
}

impl FieldKind {
    pub const ALL: [FieldKind; 6] = [
        FieldKind::Plain,
        FieldKind::Checkbox,
        FieldKind::SubmitButton,
        FieldKind::RadioChoice,
        FieldKind::RadioGroup,
        FieldKind::MultiChoiceCheckboxes,
    ];

    /// Name of the wrapper template registered for this kind.
    pub fn template_name(self) -> &'static str {
        match self {
            FieldKind::Plain => "plain_field",
            FieldKind::Checkbox => "check_box_field",
            FieldKind::SubmitButton => "submit_button",
            FieldKind::RadioChoice => "radio_choice",
            FieldKind::RadioGroup => "radio_group_field",
            FieldKind::MultiChoiceCheckboxes => "check_boxes_field",
        }
    }

    /// Kinds whose label sits beside a single box or button never render a
    /// trailing colon. Group kinds keep it: their label heads the whole group
    /// the way a plain field's label heads its element.
    pub fn forces_colon_off(self) -> bool {
        matches!(self, FieldKind::Checkbox | FieldKind::RadioChoice)
    }
}

/// Named presentation strategies selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationVariant {
    /// Fields in `<div>` containers
    #[default]
    Standard,
    /// Fields in table rows
    Table,
    /// No containers at all
    Simple,
}

/// Every widget operation the form builder exposes.
///
/// Discriminants index [`WIDGETS`]; keep the two in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Widget {
    TextField,
    PasswordField,
    EmailField,
    NumberField,
    TextArea,
    FileField,
    CheckBox,
    RadioButton,
    Select,
    DateSelect,
    MultipartDateSelect,
    YearSelect,
    IntegerSelect,
    Submit,
    RadioButtons,
    CheckBoxes,
}

/// One row of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetEntry {
    pub tag: &'static str,
    pub widget: Widget,
    pub kind: FieldKind,
}

const fn entry(tag: &'static str, widget: Widget, kind: FieldKind) -> WidgetEntry {
    WidgetEntry { tag, widget, kind }
}

/// Widget tag → field kind. Adding a widget is one row here plus, for a
/// novel shape, one template per presentation variant.
pub const WIDGETS: &[WidgetEntry] = &[
    entry("text_field", Widget::TextField, FieldKind::Plain),
    entry("password_field", Widget::PasswordField, FieldKind::Plain),
    entry("email_field", Widget::EmailField, FieldKind::Plain),
    entry("number_field", Widget::NumberField, FieldKind::Plain),
    entry("text_area", Widget::TextArea, FieldKind::Plain),
    entry("file_field", Widget::FileField, FieldKind::Plain),
    entry("check_box", Widget::CheckBox, FieldKind::Checkbox),
    entry("radio_button", Widget::RadioButton, FieldKind::RadioChoice),
    entry("select", Widget::Select, FieldKind::Plain),
    entry("date_select", Widget::DateSelect, FieldKind::Plain),
    entry("multipart_date_select", Widget::MultipartDateSelect, FieldKind::Plain),
    entry("year_select", Widget::YearSelect, FieldKind::Plain),
    entry("integer_select", Widget::IntegerSelect, FieldKind::Plain),
    entry("submit", Widget::Submit, FieldKind::SubmitButton),
    entry("radio_buttons", Widget::RadioButtons, FieldKind::RadioGroup),
    entry("check_boxes", Widget::CheckBoxes, FieldKind::MultiChoiceCheckboxes),
];

/// Resolve a widget tag such as `"text_field"`.
pub fn dispatch(tag: &str) -> FormResult<&'static WidgetEntry> {
    WIDGETS
        .iter()
        .find(|entry| entry.tag == tag)
        .ok_or_else(|| FormError::UnknownWidget(tag.to_string()))
}

impl Widget {
    pub fn entry(self) -> &'static WidgetEntry {
        &WIDGETS[self as usize]
    }

    pub fn tag(self) -> &'static str {
        self.entry().tag
    }

    pub fn kind(self) -> FieldKind {
        self.entry().kind
    }
}
