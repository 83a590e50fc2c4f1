//! Presentation variants
//!
//! A variant maps a [`FieldKind`] to the Tera source of its wrapper
//! template. Variants only name the kinds they specialise; every other kind
//! falls back to the Standard template below. [`ShellTemplates`] compiles a
//! variant once into a Tera instance that the shell builder renders from.
//!
//! Templates see these variables:
//!
//! | name | content |
//! |------|---------|
//! | `element` | core element markup |
//! | `label` | finished `<label>` markup |
//! | `description` | escaped description text, empty when absent |
//! | `decoration` | raw decoration markup, empty when absent |
//! | `error` | error message markup, empty when absent |
//! | `hidden` | hidden companion field (multi-choice only) |
//! | `required` | required flag |
//! | `div_id` | container id, `<object>_<field>_field` |
//! | `field_class`, `description_class` | configured CSS classes |

use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

use crate::adapters::shell::ShellLocals;
use crate::config::FormSettings;
use crate::domain::{FieldKind, Markup, PresentationVariant};
use crate::error::FormResult;

// Standard: fields in <div> containers.

const STANDARD_PLAIN: &str = concat!(
    r#"<div id="{{ div_id }}" class="{{ field_class }}">"#,
    r#"{{ label }}<br />{{ element }}{{ decoration }}{{ error }}"#,
    r#"{% if description %}<p class="{{ description_class }}">{{ description }}</p>{% endif %}"#,
    r#"</div>"#
);

const STANDARD_CHECK_BOX: &str = concat!(
    r#"<div id="{{ div_id }}" class="{{ field_class }}">"#,
    r#"{{ element }} {{ label }}{% if decoration %} {{ decoration }}{% endif %}{{ error }}<br />"#,
    r#"{% if description %}<p class="{{ description_class }}">{{ description }}</p>{% endif %}"#,
    r#"</div>"#
);

const STANDARD_SUBMIT: &str = r#"<div class="button">{{ element }}</div>"#;

const STANDARD_RADIO_CHOICE: &str = r#"{{ element }} {{ label }}"#;

const STANDARD_RADIO_GROUP: &str = STANDARD_PLAIN;

const STANDARD_CHECK_BOXES: &str = concat!(
    r#"<div id="{{ div_id }}" class="{{ field_class }}">"#,
    r#"{{ label }}<br />{{ hidden }}"#,
    r#"<div class="check_box_group">{{ element }}</div>"#,
    r#"{{ decoration }}{{ error }}"#,
    r#"{% if description %}<p class="{{ description_class }}">{{ description }}</p>{% endif %}"#,
    r#"</div>"#
);

// Table: fields in rows, label in the first cell.

const TABLE_PLAIN: &str = concat!(
    r#"<tr id="{{ div_id }}" class="{{ field_class }}">"#,
    r#"<td>{{ label }}</td>"#,
    r#"<td>{{ element }}{{ decoration }}{{ error }}"#,
    r#"{% if description %}<p class="{{ description_class }}">{{ description }}</p>{% endif %}</td>"#,
    r#"</tr>"#
);

const TABLE_CHECK_BOXES: &str = concat!(
    r#"<tr id="{{ div_id }}" class="{{ field_class }}">"#,
    r#"<td>{{ label }}</td>"#,
    r#"<td>{{ hidden }}<div class="check_box_group">{{ element }}</div>{{ decoration }}{{ error }}"#,
    r#"{% if description %}<p class="{{ description_class }}">{{ description }}</p>{% endif %}</td>"#,
    r#"</tr>"#
);

const TABLE_SUBMIT: &str = r#"<tr class="button"><td></td><td>{{ element }}</td></tr>"#;

// Simple: no containers.

const SIMPLE_PLAIN: &str = r#"{{ element }}{{ decoration }}"#;

const SIMPLE_CHECK_BOX: &str = r#"{{ element }} {{ label }} {{ decoration }}"#;

const SIMPLE_SUBMIT: &str = r#"{{ element }}"#;

/// Fallback table shared by every variant.
pub fn standard_template(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Plain => STANDARD_PLAIN,
        FieldKind::Checkbox => STANDARD_CHECK_BOX,
        FieldKind::SubmitButton => STANDARD_SUBMIT,
        FieldKind::RadioChoice => STANDARD_RADIO_CHOICE,
        FieldKind::RadioGroup => STANDARD_RADIO_GROUP,
        FieldKind::MultiChoiceCheckboxes => STANDARD_CHECK_BOXES,
    }
}

/// Capability of producing wrapper templates per field kind.
///
/// Return `None` to inherit the Standard template for a kind.
pub trait Presentation: Send + Sync {
    fn name(&self) -> &str;

    fn template(&self, kind: FieldKind) -> Option<&str> {
        let _ = kind;
        None
    }
}

/// Fields in a `<div>`, label on one line, element below it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Standard;

impl Presentation for Standard {
    fn name(&self) -> &str {
        "standard"
    }
}

/// Fields in table rows: label in the first column, element with
/// decoration and description in the second. Groups get a row too; their
/// choice pairs inherit the Standard template.
#[derive(Debug, Clone, Copy, Default)]
pub struct Table;

impl Presentation for Table {
    fn name(&self) -> &str {
        "table"
    }

    fn template(&self, kind: FieldKind) -> Option<&str> {
        match kind {
            FieldKind::Plain | FieldKind::Checkbox | FieldKind::RadioGroup => Some(TABLE_PLAIN),
            FieldKind::MultiChoiceCheckboxes => Some(TABLE_CHECK_BOXES),
            FieldKind::SubmitButton => Some(TABLE_SUBMIT),
            _ => None,
        }
    }
}

/// Fields with no surrounding containers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simple;

impl Presentation for Simple {
    fn name(&self) -> &str {
        "simple"
    }

    fn template(&self, kind: FieldKind) -> Option<&str> {
        match kind {
            FieldKind::Plain => Some(SIMPLE_PLAIN),
            FieldKind::Checkbox => Some(SIMPLE_CHECK_BOX),
            FieldKind::SubmitButton => Some(SIMPLE_SUBMIT),
            _ => None,
        }
    }
}

/// Built-in presentation for a configured variant name.
pub fn presentation_for(variant: PresentationVariant) -> &'static dyn Presentation {
    match variant {
        PresentationVariant::Standard => &Standard,
        PresentationVariant::Table => &Table,
        PresentationVariant::Simple => &Simple,
    }
}

#[derive(Serialize)]
struct ShellContext<'a> {
    #[serde(flatten)]
    locals: &'a ShellLocals,
    field_class: &'a str,
    description_class: &'a str,
}

/// Compiled wrapper templates of one variant.
pub struct ShellTemplates {
    variant: String,
    tera: Tera,
    field_class: String,
    description_class: String,
}

impl ShellTemplates {
    /// Compile every kind's template, overlaying `presentation` on the
    /// Standard fallback table.
    pub fn compile(presentation: &dyn Presentation, settings: &FormSettings) -> FormResult<Self> {
        let mut tera = Tera::default();
        // Locals are already markup; escaping here would double-escape them.
        tera.autoescape_on(vec![]);

        for kind in FieldKind::ALL {
            let source = presentation
                .template(kind)
                .unwrap_or_else(|| standard_template(kind));
            tera.add_raw_template(kind.template_name(), source)?;
        }

        debug!(variant = presentation.name(), "compiled shell templates");

        Ok(Self {
            variant: presentation.name().to_string(),
            tera,
            field_class: settings.field_class.clone(),
            description_class: settings.description_class.clone(),
        })
    }

    /// Compile one of the built-in variants.
    pub fn for_variant(variant: PresentationVariant, settings: &FormSettings) -> FormResult<Self> {
        Self::compile(presentation_for(variant), settings)
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Render the wrapper of `kind` around `locals`.
    pub fn render(&self, kind: FieldKind, locals: &ShellLocals) -> FormResult<Markup> {
        let context = Context::from_serialize(ShellContext {
            locals,
            field_class: &self.field_class,
            description_class: &self.description_class,
        })?;
        let rendered = self.tera.render(kind.template_name(), &context)?;
        Ok(Markup::raw(rendered))
    }
}

impl std::fmt::Debug for ShellTemplates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellTemplates")
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_aliases_check_box_to_plain() {
        assert_eq!(Table.template(FieldKind::Checkbox), Table.template(FieldKind::Plain));
    }

    #[test]
    fn test_variants_inherit_choice_template() {
        for presentation in [
            presentation_for(PresentationVariant::Table),
            presentation_for(PresentationVariant::Simple),
        ] {
            assert!(presentation.template(FieldKind::RadioChoice).is_none());
        }
        assert!(Simple.template(FieldKind::RadioGroup).is_none());
        assert!(Simple.template(FieldKind::MultiChoiceCheckboxes).is_none());
    }

    #[test]
    fn test_table_groups_render_as_rows() {
        for kind in [FieldKind::RadioGroup, FieldKind::MultiChoiceCheckboxes] {
            let template = Table.template(kind).unwrap();
            assert!(template.starts_with("<tr "));
            assert!(template.ends_with("</tr>"));
        }
    }

    #[test]
    fn test_every_builtin_variant_compiles() {
        let settings = FormSettings::default();
        for variant in [
            PresentationVariant::Standard,
            PresentationVariant::Table,
            PresentationVariant::Simple,
        ] {
            let templates = ShellTemplates::for_variant(variant, &settings).unwrap();
            assert_eq!(templates.variant(), presentation_for(variant).name());
        }
    }
}
