use fieldshell::adapters::variants::{Presentation, ShellTemplates};
use fieldshell::adapters::html_renderer::HtmlWidgetRenderer;
use fieldshell::config::FormSettings;
use fieldshell::domain::{Choice, FieldKind, FieldOptions, WIDGETS};
use fieldshell::{FormBuilder, FormError};
use serde_json::json;
use std::sync::Arc;

/// Definition list presentation that only customises plain fields.
struct DefinitionList;

impl Presentation for DefinitionList {
    fn name(&self) -> &str {
        "definition_list"
    }

    fn template(&self, kind: FieldKind) -> Option<&str> {
        match kind {
            FieldKind::Plain => Some("<dt>{{ label }}</dt><dd>{{ element }}{{ error }}</dd>"),
            _ => None,
        }
    }
}

#[test]
fn test_full_form_with_custom_presentation() -> anyhow::Result<()> {
    let settings = FormSettings::default();
    let templates = Arc::new(ShellTemplates::compile(&DefinitionList, &settings)?);
    let form = FormBuilder::from_parts(
        "car",
        json!({ "id": 12, "make": "Volvo", "color": "red", "used": true }),
        templates,
        Arc::new(HtmlWidgetRenderer::new()),
        settings,
    );

    let make = form.text_field("make", FieldOptions::new())?;
    assert_eq!(
        make.as_str(),
        "<dt><label for=\"car_make\">Make</label></dt>\
         <dd><input type=\"text\" value=\"Volvo\" name=\"car[make]\" id=\"car_make\" /></dd>"
    );

    // Kinds the presentation leaves out fall back to Standard
    let used = form.check_box("used", FieldOptions::new())?;
    assert!(used.as_str().starts_with("<div id=\"car_used_field\" class=\"field\">"));
    assert!(used.as_str().contains("checked=\"checked\""));

    let colors = vec![Choice::new("Red", "red"), Choice::new("Green", "green")];
    let color = form.radio_buttons("color", &colors, FieldOptions::new())?;
    assert!(color.as_str().contains("<label for=\"car_color_green\">Green</label>"));

    let submit = form.submit(None, FieldOptions::new())?;
    assert!(submit.as_str().contains("value=\"Update\""));

    Ok(())
}

#[test]
fn test_every_dispatchable_widget_renders() -> anyhow::Result<()> {
    let form = FormBuilder::new("thing", json!({}))?;

    for entry in WIDGETS {
        let options = FieldOptions::try_from(json!({
            "choices": [["One", "1"], ["Two", "2"]],
            "tag_value": "1",
            "first": 1,
            "last": 3
        }))?;
        let html = form.field(entry.tag, "value", options)?;
        assert!(!html.is_empty(), "{} rendered nothing", entry.tag);
    }

    Ok(())
}

#[test]
fn test_unknown_widget_is_an_error() {
    let form = FormBuilder::new("thing", json!({})).unwrap();
    match form.field("slider", "value", FieldOptions::new()) {
        Err(FormError::UnknownWidget(tag)) => assert_eq!(tag, "slider"),
        other => panic!("expected unknown widget error, got {:?}", other),
    }
}
