//! Core types: field options, markup, field kinds and the widget port

pub mod kind;
pub mod markup;
pub mod options;
pub mod widget;

pub use kind::{dispatch, FieldKind, PresentationVariant, Widget, WidgetEntry, WIDGETS};
pub use markup::Markup;
pub use options::{
    FieldOptions, LabelOptions, PartitionedOptions, PresentationOptions, FIELD_OPTION_KEYS,
    LABEL_OPTION_KEYS,
};
pub use widget::{sanitize_id, value_text, Choice, FieldContext, WidgetRenderer, MONTH_NAMES};
