//! Per-field validation rules

use std::collections::BTreeMap;

use regex::Regex;
use serde_json::Value;
use shared_types::{ContractField, ContractTemplate, FieldType, FormValues};

use crate::values::{as_number, is_empty_value};
use crate::visibility::is_field_visible;

/// Validation messages keyed by field name
pub type FieldErrors = BTreeMap<String, String>;

/// Validate one field's value, returning the first failing rule's message.
///
/// Rules run in order: required, allowed options, pattern (string values),
/// numeric parse, min, max. An empty optional field passes.
pub fn validate_field(field: &ContractField, value: Option<&Value>) -> Option<String> {
    if is_empty_value(value) {
        return field
            .required
            .then(|| format!("{} is required", field.label));
    }
    let value = value?;
    let custom = field.validation.as_ref().and_then(|v| v.message.clone());

    if let Some(message) = check_options(field, value) {
        return Some(message);
    }

    if let Some(pattern) = field.validation.as_ref().and_then(|v| v.pattern.as_deref()) {
        if let Value::String(s) = value {
            match Regex::new(pattern) {
                Ok(re) if !re.is_match(s) => {
                    return Some(custom.unwrap_or_else(|| format!("{} format is invalid", field.label)));
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Skipping invalid pattern on field '{}': {}", field.id, e);
                }
            }
        }
    }

    if field.field_type == FieldType::Number {
        let Some(number) = as_number(value) else {
            return Some(format!("{} must be a number", field.label));
        };
        if let Some(validation) = &field.validation {
            if let Some(min) = validation.min {
                if number < min {
                    return Some(custom.unwrap_or_else(|| format!("{} must be at least {}", field.label, min)));
                }
            }
            if let Some(max) = validation.max {
                if number > max {
                    return Some(custom.unwrap_or_else(|| format!("{} must be at most {}", field.label, max)));
                }
            }
        }
    }

    None
}

fn check_options(field: &ContractField, value: &Value) -> Option<String> {
    let options = field.options.as_ref()?;
    let allowed = |v: &Value| matches!(v, Value::String(s) if options.contains(s));
    let valid = match (field.field_type, value) {
        (FieldType::MultiSelect, Value::Array(items)) => items.iter().all(allowed),
        (FieldType::Select | FieldType::Radio, v) => allowed(v),
        _ => true,
    };
    (!valid).then(|| format!("{} has an invalid selection", field.label))
}

/// Validate every visible field; hidden fields are never validated or required
pub fn validate_all(template: &ContractTemplate, values: &FormValues) -> FieldErrors {
    template
        .fields
        .iter()
        .filter(|f| is_field_visible(template, f, values))
        .filter_map(|f| validate_field(f, values.get(&f.name)).map(|e| (f.name.clone(), e)))
        .collect()
}
