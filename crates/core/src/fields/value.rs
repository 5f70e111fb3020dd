//! Typed custom-field values.
//!
//! Records in the surrounding application carry user-defined fields whose
//! values arrive as arbitrary JSON. Each value is checked against its field
//! definition and turned into one variant per field type.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use lancamento_shared::types::parse_amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::FieldError;

/// Declared type of a custom field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text.
    Text,
    /// Decimal number.
    Number,
    /// Calendar date.
    Date,
    /// Yes/no.
    Boolean,
    /// One of a fixed list of options.
    Select,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Select => "select",
        };
        write!(f, "{name}")
    }
}

/// A custom field as configured by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Key under which the value is stored.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Declared type.
    pub field_type: FieldType,
    /// Whether a value must be present.
    #[serde(default)]
    pub required: bool,
    /// Allowed values for `Select` fields.
    #[serde(default)]
    pub options: Vec<String>,
}

/// A checked custom-field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    /// Free text.
    Text(String),
    /// Decimal number.
    Number(Decimal),
    /// Calendar date.
    Date(NaiveDate),
    /// Yes/no.
    Boolean(bool),
    /// Chosen option.
    Select(String),
}

impl FieldValue {
    /// The type this value belongs to.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Text(_) => FieldType::Text,
            Self::Number(_) => FieldType::Number,
            Self::Date(_) => FieldType::Date,
            Self::Boolean(_) => FieldType::Boolean,
            Self::Select(_) => FieldType::Select,
        }
    }

    /// Plain JSON form, as the backend stores it.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(text) | Self::Select(text) => Value::String(text.clone()),
            Self::Number(number) => Value::String(number.to_string()),
            Self::Date(date) => Value::String(date.format("%Y-%m-%d").to_string()),
            Self::Boolean(flag) => Value::Bool(*flag),
        }
    }
}

impl FieldDefinition {
    /// Checks a raw value against this definition.
    ///
    /// `null` and blank strings count as "no value".
    pub fn parse(&self, raw: &Value) -> Result<Option<FieldValue>, FieldError> {
        if is_blank(raw) {
            return if self.required {
                Err(FieldError::Required(self.key.clone()))
            } else {
                Ok(None)
            };
        }

        let value = match (self.field_type, raw) {
            (FieldType::Text, Value::String(text)) => Some(FieldValue::Text(text.trim().to_string())),
            (FieldType::Number, Value::Number(number)) => {
                parse_amount(&number.to_string()).map(FieldValue::Number)
            }
            (FieldType::Number, Value::String(text)) => parse_amount(text).map(FieldValue::Number),
            (FieldType::Date, Value::String(text)) => parse_date(text).map(FieldValue::Date),
            (FieldType::Boolean, Value::Bool(flag)) => Some(FieldValue::Boolean(*flag)),
            (FieldType::Boolean, Value::String(text)) => match text.trim() {
                "true" => Some(FieldValue::Boolean(true)),
                "false" => Some(FieldValue::Boolean(false)),
                _ => None,
            },
            (FieldType::Select, Value::String(text)) => {
                let choice = text.trim();
                if !self.options.iter().any(|option| option == choice) {
                    return Err(FieldError::UnknownOption {
                        field: self.key.clone(),
                        value: choice.to_string(),
                    });
                }
                Some(FieldValue::Select(choice.to_string()))
            }
            _ => None,
        };

        value.map(Some).ok_or_else(|| FieldError::TypeMismatch {
            field: self.key.clone(),
            expected: self.field_type,
        })
    }
}

/// Checks every defined field of a raw record, collecting all problems.
///
/// Keys without a definition are ignored.
pub fn parse_fields(
    definitions: &[FieldDefinition],
    raw: &Map<String, Value>,
) -> Result<BTreeMap<String, FieldValue>, Vec<FieldError>> {
    let mut values = BTreeMap::new();
    let mut errors = Vec::new();

    for definition in definitions {
        let raw_value = raw.get(&definition.key).unwrap_or(&Value::Null);
        match definition.parse(raw_value) {
            Ok(Some(value)) => {
                values.insert(definition.key.clone(), value);
            }
            Ok(None) => {}
            Err(err) => errors.push(err),
        }
    }

    if errors.is_empty() { Ok(values) } else { Err(errors) }
}

fn is_blank(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time part.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let date_part = text.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
