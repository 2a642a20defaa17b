//! Structural validation of template field schemas

use std::collections::{HashMap, HashSet};

use regex::Regex;
use shared_types::ContractTemplate;
use thiserror::Error;

/// A structural defect in a template definition
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("template has no jurisdictions")]
    NoJurisdictions,

    #[error("estimated pages must be positive")]
    ZeroPages,

    #[error("duplicate field id: {0}")]
    DuplicateFieldId(String),

    #[error("duplicate field name: {0}")]
    DuplicateFieldName(String),

    #[error("field '{0}' is a choice field without options")]
    MissingOptions(String),

    #[error("field '{0}' has options but is not a choice field")]
    UnexpectedOptions(String),

    #[error("field '{field}' depends on unknown field '{target}'")]
    UnknownDependency { field: String, target: String },

    #[error("field '{0}' depends on itself")]
    DependencyCycle(String),

    #[error("field '{field}' has an invalid pattern: {reason}")]
    InvalidPattern { field: String, reason: String },

    #[error("field '{0}' has min greater than max")]
    InvertedRange(String),
}

/// Check a template against the catalog invariants, reporting every violation
pub fn validate_template(template: &ContractTemplate) -> Result<(), Vec<SchemaViolation>> {
    let mut violations = Vec::new();

    if template.jurisdictions.is_empty() {
        violations.push(SchemaViolation::NoJurisdictions);
    }
    if template.estimated_pages == 0 {
        violations.push(SchemaViolation::ZeroPages);
    }

    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for field in &template.fields {
        if !ids.insert(field.id.as_str()) {
            violations.push(SchemaViolation::DuplicateFieldId(field.id.clone()));
        }
        if !names.insert(field.name.as_str()) {
            violations.push(SchemaViolation::DuplicateFieldName(field.name.clone()));
        }

        let has_options = field.options.as_ref().is_some_and(|o| !o.is_empty());
        if field.field_type.is_choice() && !has_options {
            violations.push(SchemaViolation::MissingOptions(field.id.clone()));
        }
        if !field.field_type.is_choice() && field.options.is_some() {
            violations.push(SchemaViolation::UnexpectedOptions(field.id.clone()));
        }

        if let Some(validation) = &field.validation {
            if let Some(pattern) = &validation.pattern {
                if let Err(e) = Regex::new(pattern) {
                    violations.push(SchemaViolation::InvalidPattern {
                        field: field.id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
            if let (Some(min), Some(max)) = (validation.min, validation.max) {
                if min > max {
                    violations.push(SchemaViolation::InvertedRange(field.id.clone()));
                }
            }
        }
    }

    violations.extend(check_dependencies(template));

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_dependencies(template: &ContractTemplate) -> Vec<SchemaViolation> {
    let edges: HashMap<&str, &str> = template
        .fields
        .iter()
        .filter_map(|f| f.depends_on.as_ref().map(|d| (f.id.as_str(), d.field.as_str())))
        .collect();

    let mut violations = Vec::new();
    for (&field, &target) in &edges {
        if template.field(target).is_none() {
            violations.push(SchemaViolation::UnknownDependency {
                field: field.to_string(),
                target: target.to_string(),
            });
            continue;
        }

        // Each field has at most one dependency, so following the chain either
        // ends, reaches a known cycle elsewhere, or comes back to `field`.
        let mut seen = HashSet::from([field]);
        let mut current = target;
        loop {
            if current == field {
                violations.push(SchemaViolation::DependencyCycle(field.to_string()));
                break;
            }
            if !seen.insert(current) {
                break;
            }
            match edges.get(current) {
                Some(&next) => current = next,
                None => break,
            }
        }
    }
    violations.sort_by_key(|v| v.to_string());
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use shared_types::{
        Category, Complexity, ContractField, DependencyValue, FieldType, JurisdictionCode,
    };

    fn template(fields: Vec<ContractField>) -> ContractTemplate {
        ContractTemplate {
            id: "t".to_string(),
            name: "Test".to_string(),
            description: String::new(),
            category: Category::Business,
            complexity: Complexity::Simple,
            estimated_pages: 1,
            jurisdictions: vec![JurisdictionCode::US],
            fields,
            risk_areas: vec![],
        }
    }

    fn dep() -> DependencyValue {
        DependencyValue::One(json!("x"))
    }

    #[test]
    fn test_accepts_valid_template() {
        let t = template(vec![
            ContractField::new("a", "A", FieldType::Select).with_options(&["x", "y"]),
            ContractField::new("b", "B", FieldType::Text).depends_on("a", dep()),
        ]);
        assert_eq!(validate_template(&t), Ok(()));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let t = template(vec![
            ContractField::new("a", "A", FieldType::Text),
            ContractField::new("a", "A again", FieldType::Text),
        ]);
        let violations = validate_template(&t).unwrap_err();
        assert!(violations.contains(&SchemaViolation::DuplicateFieldId("a".to_string())));
    }

    #[test]
    fn test_options_iff_choice_field() {
        let t = template(vec![
            ContractField::new("pick", "Pick", FieldType::Radio),
            ContractField::new("name", "Name", FieldType::Text).with_options(&["x"]),
        ]);
        let violations = validate_template(&t).unwrap_err();
        assert!(violations.contains(&SchemaViolation::MissingOptions("pick".to_string())));
        assert!(violations.contains(&SchemaViolation::UnexpectedOptions("name".to_string())));
    }

    #[test]
    fn test_rejects_unknown_dependency() {
        let t = template(vec![
            ContractField::new("b", "B", FieldType::Text).depends_on("ghost", dep())
        ]);
        assert_eq!(
            validate_template(&t),
            Err(vec![SchemaViolation::UnknownDependency {
                field: "b".to_string(),
                target: "ghost".to_string(),
            }])
        );
    }

    #[test]
    fn test_rejects_self_dependency() {
        let t = template(vec![
            ContractField::new("a", "A", FieldType::Text).depends_on("a", dep())
        ]);
        assert_eq!(
            validate_template(&t),
            Err(vec![SchemaViolation::DependencyCycle("a".to_string())])
        );
    }

    #[test]
    fn test_rejects_transitive_cycle() {
        let t = template(vec![
            ContractField::new("a", "A", FieldType::Text).depends_on("c", dep()),
            ContractField::new("b", "B", FieldType::Text).depends_on("a", dep()),
            ContractField::new("c", "C", FieldType::Text).depends_on("b", dep()),
        ]);
        let violations = validate_template(&t).unwrap_err();
        assert_eq!(violations.len(), 3);
        assert!(violations
            .iter()
            .all(|v| matches!(v, SchemaViolation::DependencyCycle(_))));
    }

    #[test]
    fn test_chain_into_cycle_only_flags_cycle_members() {
        let t = template(vec![
            ContractField::new("a", "A", FieldType::Text).depends_on("b", dep()),
            ContractField::new("b", "B", FieldType::Text).depends_on("a", dep()),
            ContractField::new("tail", "Tail", FieldType::Text).depends_on("a", dep()),
        ]);
        let violations = validate_template(&t).unwrap_err();
        assert_eq!(
            violations,
            vec![
                SchemaViolation::DependencyCycle("a".to_string()),
                SchemaViolation::DependencyCycle("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_rejects_bad_pattern_and_inverted_range() {
        let t = template(vec![
            ContractField::new("p", "P", FieldType::Text).with_pattern("([a-z", None),
            ContractField::new("n", "N", FieldType::Number).with_range(Some(10.0), Some(1.0)),
        ]);
        let violations = validate_template(&t).unwrap_err();
        assert!(violations
            .iter()
            .any(|v| matches!(v, SchemaViolation::InvalidPattern { field, .. } if field == "p")));
        assert!(violations.contains(&SchemaViolation::InvertedRange("n".to_string())));
    }

    #[test]
    fn test_rejects_empty_jurisdictions_and_zero_pages() {
        let mut t = template(vec![]);
        t.jurisdictions.clear();
        t.estimated_pages = 0;
        assert_eq!(
            validate_template(&t),
            Err(vec![SchemaViolation::NoJurisdictions, SchemaViolation::ZeroPages])
        );
    }
}
