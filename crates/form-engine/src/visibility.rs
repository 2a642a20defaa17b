//! Field visibility from `dependsOn` declarations

use serde_json::Value;
use shared_types::{ContractField, ContractTemplate, FormValues};

/// Whether `field` is shown for the current values.
///
/// A field without a dependency is always visible. Otherwise the referenced
/// field must itself be visible and hold an accepted value; when that value
/// is a list (multi-select), any accepted element is enough.
pub fn is_field_visible(template: &ContractTemplate, field: &ContractField, values: &FormValues) -> bool {
    let mut current = field;
    // Bounded by the field count so a malformed (cyclic) schema can't loop.
    for _ in 0..=template.fields.len() {
        let Some(dependency) = &current.depends_on else {
            return true;
        };
        let Some(referenced) = template.field(&dependency.field) else {
            return false;
        };
        let satisfied = match values.get(&referenced.name) {
            Some(Value::Array(items)) => items.iter().any(|item| dependency.value.contains(item)),
            Some(value) => dependency.value.contains(value),
            None => false,
        };
        if !satisfied {
            return false;
        }
        current = referenced;
    }
    false
}

/// The fields currently shown, in schema order
pub fn visible_fields<'t>(template: &'t ContractTemplate, values: &FormValues) -> Vec<&'t ContractField> {
    template
        .fields
        .iter()
        .filter(|f| is_field_visible(template, f, values))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared_types::{Category, Complexity, DependencyValue, FieldType, JurisdictionCode};

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

    fn values(pairs: &[(&str, Value)]) -> FormValues {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_field_without_dependency_is_visible() {
        let t = template(vec![ContractField::new("a", "A", FieldType::Text)]);
        assert!(is_field_visible(&t, &t.fields[0], &FormValues::new()));
    }

    #[test]
    fn test_scalar_dependency() {
        let t = template(vec![
            ContractField::new("x", "X", FieldType::Radio).with_options(&["a", "b"]),
            ContractField::new("y", "Y", FieldType::Text)
                .depends_on("x", DependencyValue::One(json!("a"))),
        ]);
        let y = &t.fields[1];
        assert!(!is_field_visible(&t, y, &FormValues::new()));
        assert!(!is_field_visible(&t, y, &values(&[("x", json!("b"))])));
        assert!(is_field_visible(&t, y, &values(&[("x", json!("a"))])));
    }

    #[test]
    fn test_list_dependency() {
        let t = template(vec![
            ContractField::new("x", "X", FieldType::Select).with_options(&["a", "b", "c"]),
            ContractField::new("y", "Y", FieldType::Text)
                .depends_on("x", DependencyValue::Any(vec![json!("a"), json!("b")])),
        ]);
        let y = &t.fields[1];
        assert!(is_field_visible(&t, y, &values(&[("x", json!("b"))])));
        assert!(!is_field_visible(&t, y, &values(&[("x", json!("c"))])));
    }

    #[test]
    fn test_multi_select_value_matches_any_element() {
        let t = template(vec![
            ContractField::new("benefits", "Benefits", FieldType::MultiSelect)
                .with_options(&["health", "equity"]),
            ContractField::new("vesting", "Vesting", FieldType::Text)
                .depends_on("benefits", DependencyValue::One(json!("equity"))),
        ]);
        let vesting = &t.fields[1];
        assert!(is_field_visible(&t, vesting, &values(&[("benefits", json!(["health", "equity"]))])));
        assert!(!is_field_visible(&t, vesting, &values(&[("benefits", json!(["health"]))])));
    }

    #[test]
    fn test_visibility_is_transitive() {
        let t = template(vec![
            ContractField::new("a", "A", FieldType::Checkbox),
            ContractField::new("b", "B", FieldType::Radio)
                .with_options(&["x", "y"])
                .depends_on("a", DependencyValue::One(json!(true))),
            ContractField::new("c", "C", FieldType::Text)
                .depends_on("b", DependencyValue::One(json!("x"))),
        ]);
        let c = &t.fields[2];
        // `b` keeps a stale value after `a` is unticked; `c` must still hide.
        let stale = values(&[("a", json!(false)), ("b", json!("x"))]);
        assert!(!is_field_visible(&t, c, &stale));

        let live = values(&[("a", json!(true)), ("b", json!("x"))]);
        assert!(is_field_visible(&t, c, &live));
    }

    #[test]
    fn test_cyclic_schema_is_hidden_not_looping() {
        let t = template(vec![
            ContractField::new("a", "A", FieldType::Text)
                .depends_on("b", DependencyValue::One(json!("1"))),
            ContractField::new("b", "B", FieldType::Text)
                .depends_on("a", DependencyValue::One(json!("1"))),
        ]);
        let v = values(&[("a", json!("1")), ("b", json!("1"))]);
        assert!(!is_field_visible(&t, &t.fields[0], &v));
    }

    #[test]
    fn test_visible_fields_preserves_order() {
        let t = template(vec![
            ContractField::new("a", "A", FieldType::Checkbox),
            ContractField::new("b", "B", FieldType::Text)
                .depends_on("a", DependencyValue::One(json!(true))),
            ContractField::new("c", "C", FieldType::Text),
        ]);
        let ids: Vec<_> = visible_fields(&t, &FormValues::new()).iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
