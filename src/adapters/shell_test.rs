use super::label::LabelDeriver;
use super::shell::{ShellBuilder, ShellExtras};
use super::variants::{Presentation, ShellTemplates, Standard};
use crate::config::FormSettings;
use crate::domain::{Choice, FieldContext, FieldKind, FieldOptions, Markup, WidgetRenderer};
use crate::error::{FormError, FormResult};
use std::sync::{Arc, Mutex};

/// Renderer that records the options it was handed and echoes them back.
#[derive(Default)]
struct RecordingRenderer {
    seen: Mutex<Vec<FieldOptions>>,
}

impl RecordingRenderer {
    fn element(&self, options: &FieldOptions) -> FormResult<Markup> {
        self.seen.lock().unwrap().push(options.clone());
        let keys: Vec<&str> = options.iter().map(|(k, _)| k.as_str()).collect();
        Ok(Markup::raw(format!("<x {}/>", keys.join(" "))))
    }
}

impl WidgetRenderer for RecordingRenderer {
    fn input(&self, _: &FieldContext<'_>, _: &str, options: &FieldOptions) -> FormResult<Markup> {
        self.element(options)
    }

    fn text_area(&self, _: &FieldContext<'_>, options: &FieldOptions) -> FormResult<Markup> {
        self.element(options)
    }

    fn check_box(&self, _: &FieldContext<'_>, options: &FieldOptions) -> FormResult<Markup> {
        self.element(options)
    }

    fn radio_button(
        &self,
        _: &FieldContext<'_>,
        _: &str,
        options: &FieldOptions,
    ) -> FormResult<Markup> {
        self.element(options)
    }

    fn collection_check_box(
        &self,
        _: &str,
        _: &str,
        _: &str,
        _: bool,
        options: &FieldOptions,
    ) -> FormResult<Markup> {
        self.element(options)
    }

    fn select(
        &self,
        _: &FieldContext<'_>,
        _: &[Choice],
        options: &FieldOptions,
    ) -> FormResult<Markup> {
        self.element(options)
    }

    fn date_select(&self, _: &FieldContext<'_>, options: &FieldOptions) -> FormResult<Markup> {
        self.element(options)
    }

    fn submit(&self, _: &str, options: &FieldOptions) -> FormResult<Markup> {
        self.element(options)
    }

    fn hidden(&self, name: &str, _: &str) -> FormResult<Markup> {
        Ok(Markup::raw(format!("<h {}/>", name)))
    }

    fn fieldset(&self, _: Option<&str>, _: &FieldOptions, content: &Markup) -> FormResult<Markup> {
        Ok(content.clone())
    }
}

fn builder_with(presentation: &dyn Presentation) -> (ShellBuilder, Arc<RecordingRenderer>) {
    let renderer = Arc::new(RecordingRenderer::default());
    let templates = ShellTemplates::compile(presentation, &FormSettings::default()).unwrap();
    let builder = ShellBuilder::new(
        "car",
        Arc::new(templates),
        LabelDeriver::default(),
        renderer.clone(),
    );
    (builder, renderer)
}

fn builder() -> (ShellBuilder, Arc<RecordingRenderer>) {
    builder_with(&Standard)
}

#[test]
fn test_presentation_keys_never_reach_renderer() {
    let (shell, renderer) = builder();
    let options = FieldOptions::new()
        .with("label", "Paint")
        .with("colon", true)
        .with("label_for", "elsewhere")
        .with("description", "Exterior")
        .with("decoration", "<em>!</em>")
        .with("size", 10)
        .with("class", "wide");

    shell
        .build("color", &options, FieldKind::Plain, |opts| renderer.element(opts))
        .unwrap();

    let seen = renderer.seen.lock().unwrap();
    let keys: Vec<&str> = seen[0].iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["size", "class"]);
}

#[test]
fn test_required_becomes_canonical_attribute() {
    let (shell, renderer) = builder();
    let options = FieldOptions::new().with("required", true);

    let html = shell
        .build("number", &options, FieldKind::Plain, |opts| renderer.element(opts))
        .unwrap();

    let seen = renderer.seen.lock().unwrap();
    assert_eq!(seen[0].get_str("required"), Some("required"));
    assert!(html.as_str().contains("Number<span class=\"required\">*</span>"));
}

#[test]
fn test_caller_options_are_not_mutated() {
    let (shell, renderer) = builder();
    let options = FieldOptions::new()
        .with("label", "Paint")
        .with("required", true);
    let before = options.clone();

    shell
        .build("color", &options, FieldKind::Plain, |opts| renderer.element(opts))
        .unwrap();

    assert_eq!(options, before);
}

#[test]
fn test_build_is_idempotent() {
    let (shell, renderer) = builder();
    let options = FieldOptions::new()
        .with("description", "Exterior paint")
        .with("required", true);

    let first = shell
        .build("color", &options, FieldKind::Plain, |opts| renderer.element(opts))
        .unwrap();
    let second = shell
        .build("color", &options, FieldKind::Plain, |opts| renderer.element(opts))
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_element_error_propagates_unchanged() {
    let (shell, _) = builder();
    let err = shell
        .build("color", &FieldOptions::new(), FieldKind::Plain, |_| {
            Err(FormError::Widget("renderer exploded".to_string()))
        })
        .unwrap_err();

    match err {
        FormError::Widget(message) => assert_eq!(message, "renderer exploded"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_checkbox_kinds_force_colon_off() {
    let (shell, renderer) = builder();
    let options = FieldOptions::new().with("colon", true);

    let plain = shell
        .build("used", &options, FieldKind::Plain, |opts| renderer.element(opts))
        .unwrap();
    let check_box = shell
        .build("used", &options, FieldKind::Checkbox, |opts| renderer.element(opts))
        .unwrap();
    let choice = shell
        .build("used", &options, FieldKind::RadioChoice, |opts| renderer.element(opts))
        .unwrap();

    assert!(plain.as_str().contains("Used:</label>"));
    assert!(check_box.as_str().contains("Used</label>"));
    assert!(choice.as_str().contains("Used</label>"));
}

#[test]
fn test_description_is_escaped_and_decoration_is_not() {
    let (shell, renderer) = builder();
    let options = FieldOptions::new()
        .with("description", "Fish & <chips>")
        .with("decoration", "<img src=\"x.png\" />");

    let html = shell
        .build("color", &options, FieldKind::Plain, |opts| renderer.element(opts))
        .unwrap();

    assert!(html
        .as_str()
        .contains("<p class=\"field_description\">Fish &amp; &lt;chips&gt;</p>"));
    assert!(html.as_str().contains("<img src=\"x.png\" />"));
}

#[test]
fn test_empty_fragments_render_nothing() {
    let (shell, renderer) = builder();
    let html = shell
        .build("color", &FieldOptions::new(), FieldKind::Plain, |opts| renderer.element(opts))
        .unwrap();

    assert_eq!(
        html.as_str(),
        "<div id=\"car_color_field\" class=\"field\"><label for=\"car_color\">Color</label><br /><x /></div>"
    );
}

#[test]
fn test_false_presentation_values_render_nothing() {
    let (shell, renderer) = builder();
    let options = FieldOptions::new()
        .with("label", false)
        .with("description", false)
        .with("decoration", false)
        .with("label_for", false);

    let html = shell
        .build("color", &options, FieldKind::Plain, |opts| renderer.element(opts))
        .unwrap();

    assert_eq!(
        html.as_str(),
        "<div id=\"car_color_field\" class=\"field\"><label for=\"car_color\">Color</label><br /><x /></div>"
    );
    assert!(!html.as_str().contains("false"));
}

#[test]
fn test_extras_render_in_multi_choice_shell() {
    let (shell, renderer) = builder();
    let extras = ShellExtras {
        error: Some(Markup::raw("<div class=\"formError\">pick one</div>")),
        hidden: Some(Markup::raw("<h car[category_ids][]/>")),
    };

    let html = shell
        .build_with(
            "category_ids",
            &FieldOptions::new(),
            FieldKind::MultiChoiceCheckboxes,
            extras,
            |opts| renderer.element(opts),
        )
        .unwrap();

    assert_eq!(
        html.as_str(),
        "<div id=\"car_category_ids_field\" class=\"field\">\
         <label for=\"car_category_ids\">Category ids</label><br />\
         <h car[category_ids][]/>\
         <div class=\"check_box_group\"><x /></div>\
         <div class=\"formError\">pick one</div></div>"
    );
}

struct Boxed;

impl Presentation for Boxed {
    fn name(&self) -> &str {
        "boxed"
    }

    fn template(&self, kind: FieldKind) -> Option<&str> {
        match kind {
            FieldKind::Plain => Some("<section>{{ label }}{{ element }}</section>"),
            _ => None,
        }
    }
}

#[test]
fn test_custom_presentation_inherits_standard_templates() {
    let (shell, renderer) = builder_with(&Boxed);
    assert_eq!(shell.templates().variant(), "boxed");

    let plain = shell
        .build("color", &FieldOptions::new(), FieldKind::Plain, |opts| renderer.element(opts))
        .unwrap();
    assert_eq!(
        plain.as_str(),
        "<section><label for=\"car_color\">Color</label><x /></section>"
    );

    let submit = shell
        .build("submit", &FieldOptions::new(), FieldKind::SubmitButton, |opts| {
            renderer.element(opts)
        })
        .unwrap();
    assert_eq!(submit.as_str(), "<div class=\"button\"><x /></div>");
}

#[test]
fn test_broken_custom_template_fails_to_compile() {
    struct Broken;

    impl Presentation for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn template(&self, kind: FieldKind) -> Option<&str> {
            match kind {
                FieldKind::Plain => Some("{% if element %}unterminated"),
                _ => None,
            }
        }
    }

    let err = ShellTemplates::compile(&Broken, &FormSettings::default()).unwrap_err();
    assert!(matches!(err, FormError::Template(_)));
}
