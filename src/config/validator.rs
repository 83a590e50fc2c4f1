use thiserror::Error;

use crate::config::{FormSettings, Settings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct SettingsValidator;

impl SettingsValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_forms(&settings.forms) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_forms(forms: &FormSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let classes = [
            ("forms.field_class", &forms.field_class),
            ("forms.description_class", &forms.description_class),
            ("forms.error_class", &forms.error_class),
        ];
        for (field, value) in classes {
            if value.trim().is_empty() {
                errors.push(ValidationError::MissingField(field.to_string()));
            } else if value.contains('"') || value.contains('<') {
                errors.push(ValidationError::InvalidValue {
                    field: field.to_string(),
                    reason: "Class names cannot contain quotes or angle brackets".to_string(),
                });
            }
        }

        if let Some(end_year) = forms.end_year {
            if end_year < forms.start_year {
                errors.push(ValidationError::InvalidValue {
                    field: "forms.end_year".to_string(),
                    reason: format!(
                        "End year {} is before start year {}",
                        end_year, forms.start_year
                    ),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
