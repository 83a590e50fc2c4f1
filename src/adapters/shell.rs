//! Field shell builder
//!
//! Partitions a call's options, derives the label, asks the caller's element
//! producer for the core markup and renders the variant's wrapper template
//! around it.

use serde::{Serialize, Serializer};
use std::sync::Arc;
use tracing::debug;

use crate::adapters::label::LabelDeriver;
use crate::adapters::variants::ShellTemplates;
use crate::domain::{FieldKind, FieldOptions, Markup, PartitionedOptions, WidgetRenderer};
use crate::error::FormResult;

/// Everything a wrapper template can interpolate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShellLocals {
    pub element: Markup,
    pub label: Markup,
    #[serde(serialize_with = "markup_or_empty")]
    pub description: Option<Markup>,
    #[serde(serialize_with = "markup_or_empty")]
    pub decoration: Option<Markup>,
    #[serde(serialize_with = "markup_or_empty")]
    pub error: Option<Markup>,
    #[serde(serialize_with = "markup_or_empty")]
    pub hidden: Option<Markup>,
    pub required: bool,
    pub div_id: String,
}

// Templates test emptiness, so absent fragments render as "".
fn markup_or_empty<S: Serializer>(value: &Option<Markup>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_ref().map_or("", Markup::as_str))
}

/// Fragments supplied by the form builder rather than by options.
#[derive(Debug, Clone, Default)]
pub struct ShellExtras {
    pub error: Option<Markup>,
    pub hidden: Option<Markup>,
}

/// Wraps element markup in the shell of the active presentation variant.
#[derive(Clone)]
pub struct ShellBuilder {
    object_name: String,
    templates: Arc<ShellTemplates>,
    labels: LabelDeriver,
    renderer: Arc<dyn WidgetRenderer>,
}

impl ShellBuilder {
    pub fn new(
        object_name: impl Into<String>,
        templates: Arc<ShellTemplates>,
        labels: LabelDeriver,
        renderer: Arc<dyn WidgetRenderer>,
    ) -> Self {
        Self {
            object_name: object_name.into(),
            templates,
            labels,
            renderer,
        }
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn templates(&self) -> &ShellTemplates {
        &self.templates
    }

    pub fn build<F>(
        &self,
        field: &str,
        options: &FieldOptions,
        kind: FieldKind,
        element: F,
    ) -> FormResult<Markup>
    where
        F: FnOnce(&FieldOptions) -> FormResult<Markup>,
    {
        self.build_with(field, options, kind, ShellExtras::default(), element)
    }

    /// Build the shell for `field`.
    ///
    /// `element` receives the pass-through options and produces the core
    /// element; its errors are returned as-is.
    pub fn build_with<F>(
        &self,
        field: &str,
        options: &FieldOptions,
        kind: FieldKind,
        extras: ShellExtras,
        element: F,
    ) -> FormResult<Markup>
    where
        F: FnOnce(&FieldOptions) -> FormResult<Markup>,
    {
        let PartitionedOptions {
            label: mut label_options,
            field: field_options,
            mut passthrough,
        } = options.partition();

        if kind.forces_colon_off() {
            label_options.colon = false;
        }
        if field_options.required {
            passthrough.insert("required", "required");
        }

        let element_id = self.renderer.element_id(&self.object_name, field);
        let label = self.labels.derive(
            field,
            field_options.label.as_deref(),
            &label_options,
            &element_id,
        );

        let element = element(&passthrough)?;

        let locals = ShellLocals {
            element,
            label,
            description: field_options.description.as_deref().map(Markup::escape),
            decoration: field_options.decoration.map(Markup::raw),
            error: extras.error,
            hidden: extras.hidden,
            required: field_options.required,
            div_id: format!("{}_field", element_id),
        };

        debug!(
            object = %self.object_name,
            field,
            ?kind,
            variant = self.templates.variant(),
            "building field shell"
        );

        self.templates.render(kind, &locals)
    }
}
