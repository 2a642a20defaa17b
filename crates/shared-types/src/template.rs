//! Contract template schema: the static description of a contract type

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::jurisdiction::JurisdictionCode;

/// User-entered form data keyed by `ContractField::name`
pub type FormValues = HashMap<String, Value>;

/// Broad grouping used by the template picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Business,
    Employment,
    RealEstate,
    Freelance,
    IntellectualProperty,
    Personal,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Employment => "employment",
            Category::RealEstate => "real-estate",
            Category::Freelance => "freelance",
            Category::IntellectualProperty => "intellectual-property",
            Category::Personal => "personal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

/// Input widget type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Text,
    Textarea,
    Select,
    MultiSelect,
    Radio,
    Number,
    Date,
    Checkbox,
}

impl FieldType {
    /// Whether the field picks from a fixed list of `options`
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            FieldType::Select | FieldType::MultiSelect | FieldType::Radio
        )
    }
}

/// Optional constraints on a field's value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Regular expression the (string) value must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Replaces the default pattern/min/max message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Accepted value(s) of a dependency; a scalar behaves as a one-element set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyValue {
    Any(Vec<Value>),
    One(Value),
}

impl DependencyValue {
    pub fn contains(&self, value: &Value) -> bool {
        match self {
            DependencyValue::Any(values) => values.iter().any(|v| v == value),
            DependencyValue::One(v) => v == value,
        }
    }
}

/// Makes a field visible only while another field holds a matching value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDependency {
    /// `id` of the referenced field
    pub field: String,
    pub value: DependencyValue,
}

/// A single input of a template's dynamic form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractField {
    pub id: String,
    /// Key into the form data
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<FieldDependency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

impl ContractField {
    pub fn new(id: &str, label: &str, field_type: FieldType) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            label: label.to_string(),
            field_type,
            required: false,
            options: None,
            validation: None,
            depends_on: None,
            placeholder: None,
            help_text: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = Some(options.iter().map(|o| o.to_string()).collect());
        self
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        let validation = self.validation.get_or_insert_with(FieldValidation::default);
        validation.min = min;
        validation.max = max;
        self
    }

    pub fn with_pattern(mut self, pattern: &str, message: Option<&str>) -> Self {
        let validation = self.validation.get_or_insert_with(FieldValidation::default);
        validation.pattern = Some(pattern.to_string());
        validation.message = message.map(str::to_string);
        self
    }

    pub fn depends_on(mut self, field: &str, value: DependencyValue) -> Self {
        self.depends_on = Some(FieldDependency {
            field: field.to_string(),
            value,
        });
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn with_help(mut self, help: &str) -> Self {
        self.help_text = Some(help.to_string());
        self
    }
}

/// Static description of a contract type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub complexity: Complexity,
    pub estimated_pages: u32,
    pub jurisdictions: Vec<JurisdictionCode>,
    pub fields: Vec<ContractField>,
    #[serde(default)]
    pub risk_areas: Vec<String>,
}

impl ContractTemplate {
    /// Look up a field by its `id`
    pub fn field(&self, id: &str) -> Option<&ContractField> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Look up a field by its form-data key
    pub fn field_by_name(&self, name: &str) -> Option<&ContractField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn supports(&self, jurisdiction: JurisdictionCode) -> bool {
        self.jurisdictions.contains(&jurisdiction)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &ContractField> {
        self.fields.iter().filter(|f| f.required)
    }
}
