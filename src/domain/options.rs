//! Field options and their partitioning into presentation and widget views

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FormError;

/// Options that shape the label and never reach the widget renderer.
pub const LABEL_OPTION_KEYS: &[&str] = &["required", "colon", "label_for"];

/// Options that shape the shell around the element and never reach the widget renderer.
pub const FIELD_OPTION_KEYS: &[&str] = &["label", "required", "description", "decoration"];

/// Per-call field options, kept in insertion order.
///
/// Presentation keys (see [`LABEL_OPTION_KEYS`] and [`FIELD_OPTION_KEYS`])
/// are consumed by the shell builder; everything else is handed to the
/// widget renderer untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldOptions(Map<String, Value>);

impl FieldOptions {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Insert `value` unless the key already holds something other than null.
    pub fn or_insert(&mut self, key: &str, value: impl Into<Value>) {
        if self.0.get(key).map_or(true, Value::is_null) {
            self.0.insert(key.to_string(), value.into());
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Integer option, accepting numbers and numeric strings.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Truthiness of an option: anything but absent, null or `false` is set.
    pub fn flag(&self, key: &str) -> bool {
        !matches!(self.0.get(key), None | Some(Value::Null) | Some(Value::Bool(false)))
    }

    /// Textual value of an option, `None` when absent, blank, null or `false`.
    pub fn text(&self, key: &str) -> Option<String> {
        let text = match self.0.get(key)? {
            Value::Null | Value::Bool(false) => return None,
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_presentation_key(key: &str) -> bool {
        LABEL_OPTION_KEYS.contains(&key) || FIELD_OPTION_KEYS.contains(&key)
    }

    /// Split into label options, field options and pass-through options.
    ///
    /// The receiver is left intact, so every presentation value (the `label`
    /// override included) is read from the caller's original options.
    pub fn partition(&self) -> PartitionedOptions {
        let label = LabelOptions {
            colon: self.flag("colon"),
            required: self.flag("required"),
            label_for: self.text("label_for"),
        };

        let field = PresentationOptions {
            label: self.text("label"),
            required: self.flag("required"),
            description: self.text("description"),
            decoration: self.text("decoration"),
        };

        let passthrough = self
            .0
            .iter()
            .filter(|(key, _)| !Self::is_presentation_key(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        PartitionedOptions {
            label,
            field,
            passthrough: FieldOptions(passthrough),
        }
    }
}

impl From<Map<String, Value>> for FieldOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for FieldOptions {
    type Error = FormError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(FormError::InvalidOptions(format!(
                "expected an object of field options, got {}",
                other
            ))),
        }
    }
}

/// Options read by the label deriver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelOptions {
    pub colon: bool,
    pub required: bool,
    pub label_for: Option<String>,
}

/// Options read by the shell builder itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentationOptions {
    pub label: Option<String>,
    pub required: bool,
    pub description: Option<String>,
    pub decoration: Option<String>,
}

/// The three disjoint views produced by [`FieldOptions::partition`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionedOptions {
    pub label: LabelOptions,
    pub field: PresentationOptions,
    pub passthrough: FieldOptions,
}
