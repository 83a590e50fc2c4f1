use chrono::Datelike;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod validator;

use crate::domain::PresentationVariant;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub forms: FormSettings,
}

/// Defaults applied by every form builder.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormSettings {
    /// Presentation variant used when none is chosen explicitly
    #[serde(default)]
    pub variant: PresentationVariant,
    /// Markup appended to the label of required fields
    #[serde(default = "default_required_marker")]
    pub required_marker: String,
    /// Class of the container wrapping each field
    #[serde(default = "default_field_class")]
    pub field_class: String,
    /// Class of the paragraph holding a field's description
    #[serde(default = "default_description_class")]
    pub description_class: String,
    /// Class of the element holding a field's error message
    #[serde(default = "default_error_class")]
    pub error_class: String,
    /// First year offered by date and year selects
    #[serde(default = "default_start_year")]
    pub start_year: i32,
    /// Last year offered by date and year selects (current year when unset)
    #[serde(default)]
    pub end_year: Option<i32>,
}

fn default_required_marker() -> String {
    "<span class=\"required\">*</span>".to_string()
}

fn default_field_class() -> String {
    "field".to_string()
}

fn default_description_class() -> String {
    "field_description".to_string()
}

fn default_error_class() -> String {
    "formError".to_string()
}

fn default_start_year() -> i32 {
    1801
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            variant: PresentationVariant::default(),
            required_marker: default_required_marker(),
            field_class: default_field_class(),
            description_class: default_description_class(),
            error_class: default_error_class(),
            start_year: default_start_year(),
            end_year: None,
        }
    }
}

impl FormSettings {
    /// Configured end year, falling back to the current year.
    pub fn end_year(&self) -> i32 {
        self.end_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Load `fieldshell.{toml,yaml,json}` from `root`, then apply
    /// `FIELDSHELL_FORMS__*` environment overrides.
    pub fn from_root(root: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let config_path = root.as_ref().join("fieldshell");
        Self::load(File::from(config_path).required(false))
    }

    /// Load settings from an explicit file path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        Self::load(File::from(path.as_ref()).required(true))
    }

    fn load<S>(file: S) -> Result<Self, anyhow::Error>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let s = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("FIELDSHELL")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("forms.variant", "standard")?
            .set_default("forms.start_year", default_start_year() as i64)?
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        // Validate configuration
        validator::SettingsValidator::validate(&settings).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            tracing::warn!("Rejected form settings: {}", error_messages.join("; "));
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })?;

        Ok(settings)
    }
}
