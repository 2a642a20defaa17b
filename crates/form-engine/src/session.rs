//! Form state for one generation session

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{ContractTemplate, FormValues};
use thiserror::Error;

use crate::completion::compute_completion;
use crate::validate::{validate_all, FieldErrors};
use crate::values::is_empty_value;
use crate::visibility::{is_field_visible, visible_fields};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Why a form could not be submitted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Form is {completion}% complete")]
    Incomplete { completion: u8, errors: FieldErrors },

    #[error("Form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),
}

impl SubmitError {
    pub fn errors(&self) -> &FieldErrors {
        match self {
            SubmitError::Incomplete { errors, .. } => errors,
            SubmitError::Invalid(errors) => errors,
        }
    }
}

/// Values entered so far plus the errors from the last validation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub values: FormValues,
    pub errors: FieldErrors,
}

/// Snapshot handed to the generation orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub template_id: String,
    /// Non-empty values of the fields visible at submission time
    pub values: FormValues,
}

/// Interactive form over a single template.
///
/// Created empty when a template is selected; dropped once submitted or when
/// the user picks another template.
#[derive(Debug, Clone)]
pub struct FormSession<'t> {
    template: &'t ContractTemplate,
    state: FormState,
}

impl<'t> FormSession<'t> {
    pub fn new(template: &'t ContractTemplate) -> Self {
        Self {
            template,
            state: FormState::default(),
        }
    }

    /// Resume a session from previously captured values (a saved draft)
    pub fn with_values(template: &'t ContractTemplate, values: FormValues) -> Self {
        Self {
            template,
            state: FormState {
                values,
                errors: FieldErrors::new(),
            },
        }
    }

    pub fn template(&self) -> &'t ContractTemplate {
        self.template
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn values(&self) -> &FormValues {
        &self.state.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.state.errors
    }

    /// Set a field's value.
    ///
    /// Any error shown for the field is cleared straight away; errors are only
    /// recomputed by [`FormSession::validate`].
    pub fn set_value(&mut self, name: &str, value: Value) -> Result<(), FormError> {
        if self.template.field_by_name(name).is_none() {
            return Err(FormError::UnknownField(name.to_string()));
        }
        self.state.values.insert(name.to_string(), value);
        self.state.errors.remove(name);
        Ok(())
    }

    pub fn clear_value(&mut self, name: &str) {
        self.state.values.remove(name);
        self.state.errors.remove(name);
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.template
            .field_by_name(name)
            .is_some_and(|f| is_field_visible(self.template, f, &self.state.values))
    }

    /// Run validation over the visible fields and store the result
    pub fn validate(&mut self) -> &FieldErrors {
        self.state.errors = validate_all(self.template, &self.state.values);
        &self.state.errors
    }

    pub fn completion(&self) -> u8 {
        compute_completion(self.template, &self.state.values)
    }

    /// Completion and validation are independent gates; both must pass
    pub fn can_submit(&self) -> bool {
        self.completion() == 100 && validate_all(self.template, &self.state.values).is_empty()
    }

    /// Validate and, if the form is complete and valid, snapshot it
    pub fn submit(&mut self) -> Result<FormSubmission, SubmitError> {
        let errors = self.validate().clone();
        let completion = self.completion();
        if completion < 100 {
            return Err(SubmitError::Incomplete { completion, errors });
        }
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }

        let values = visible_fields(self.template, &self.state.values)
            .into_iter()
            .filter_map(|f| {
                let value = self.state.values.get(&f.name);
                (!is_empty_value(value))
                    .then(|| value.map(|v| (f.name.clone(), v.clone())))
                    .flatten()
            })
            .collect();

        tracing::debug!("Form for template '{}' submitted", self.template.id);
        Ok(FormSubmission {
            template_id: self.template.id.clone(),
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use shared_types::{
        Category, Complexity, ContractField, DependencyValue, FieldType, JurisdictionCode,
    };

    /// Two required fields, `amount` at least 1000, plus an optional phone
    fn scenario_template() -> ContractTemplate {
        ContractTemplate {
            id: "service".to_string(),
            name: "Service".to_string(),
            description: String::new(),
            category: Category::Business,
            complexity: Complexity::Medium,
            estimated_pages: 5,
            jurisdictions: vec![JurisdictionCode::US],
            fields: vec![
                ContractField::new("company_name", "Company name", FieldType::Text).required(),
                ContractField::new("amount", "Amount", FieldType::Number)
                    .required()
                    .with_range(Some(1000.0), None),
                ContractField::new("phone", "Phone", FieldType::Text).with_pattern(r"^\+?[0-9 ]{7,}$", None),
                ContractField::new("has_deposit", "Deposit", FieldType::Checkbox),
                ContractField::new("deposit", "Deposit amount", FieldType::Number)
                    .required()
                    .depends_on("has_deposit", DependencyValue::One(json!(true))),
            ],
            risk_areas: vec![],
        }
    }

    #[test]
    fn test_amount_below_minimum_then_fixed() {
        let template = scenario_template();
        let mut form = FormSession::new(&template);
        form.set_value("company_name", json!("Acme")).unwrap();
        form.set_value("amount", json!(500)).unwrap();

        let errors = form.validate().clone();
        assert_eq!(
            errors,
            FieldErrors::from([("amount".to_string(), "Amount must be at least 1000".to_string())])
        );
        // Completion counts filled values; validity is checked separately.
        assert_eq!(form.completion(), 100);
        assert!(!form.can_submit());

        form.set_value("amount", json!(1500)).unwrap();
        assert!(form.validate().is_empty());
        assert_eq!(form.completion(), 100);
        assert!(form.can_submit());
    }

    #[test]
    fn test_half_complete_form() {
        let template = scenario_template();
        let mut form = FormSession::new(&template);
        form.set_value("company_name", json!("Acme")).unwrap();
        assert_eq!(form.completion(), 50);
    }

    #[test]
    fn test_set_value_clears_field_error_only() {
        let template = scenario_template();
        let mut form = FormSession::new(&template);
        form.validate();
        assert!(form.errors().contains_key("company_name"));
        assert!(form.errors().contains_key("amount"));

        form.set_value("amount", json!(1)).unwrap();
        // Cleared optimistically even though 1 is still below the minimum.
        assert!(!form.errors().contains_key("amount"));
        assert!(form.errors().contains_key("company_name"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let template = scenario_template();
        let mut form = FormSession::new(&template);
        assert_eq!(
            form.set_value("nope", json!(1)),
            Err(FormError::UnknownField("nope".to_string()))
        );
    }

    #[test]
    fn test_invalid_optional_field_blocks_submission() {
        let template = scenario_template();
        let mut form = FormSession::new(&template);
        form.set_value("company_name", json!("Acme")).unwrap();
        form.set_value("amount", json!(2000)).unwrap();
        form.set_value("phone", json!("call me")).unwrap();

        assert_eq!(form.completion(), 100);
        match form.submit() {
            Err(SubmitError::Invalid(errors)) => {
                assert_eq!(errors.get("phone").map(String::as_str), Some("Phone format is invalid"));
            }
            other => panic!("expected invalid submission, got {:?}", other),
        }
    }

    #[test]
    fn test_incomplete_submission_reports_completion() {
        let template = scenario_template();
        let mut form = FormSession::new(&template);
        form.set_value("company_name", json!("Acme")).unwrap();

        let err = form.submit().unwrap_err();
        assert!(matches!(err, SubmitError::Incomplete { completion: 50, .. }));
        assert!(err.errors().contains_key("amount"));
        assert_eq!(form.errors(), err.errors());
    }

    #[test]
    fn test_submission_drops_hidden_and_empty_values() {
        let template = scenario_template();
        let mut form = FormSession::new(&template);
        form.set_value("company_name", json!("Acme")).unwrap();
        form.set_value("amount", json!(1500)).unwrap();
        form.set_value("phone", json!("")).unwrap();
        form.set_value("has_deposit", json!(false)).unwrap();
        // Stale value from when the deposit box was ticked.
        form.set_value("deposit", json!(300)).unwrap();

        let submission = form.submit().unwrap();
        assert_eq!(submission.template_id, "service");
        assert_eq!(
            submission.values,
            FormValues::from([
                ("company_name".to_string(), json!("Acme")),
                ("amount".to_string(), json!(1500)),
            ])
        );
    }

    #[test]
    fn test_dependent_required_field_counts_once_visible() {
        let template = scenario_template();
        let mut form = FormSession::new(&template);
        form.set_value("company_name", json!("Acme")).unwrap();
        form.set_value("amount", json!(1500)).unwrap();
        form.set_value("has_deposit", json!(true)).unwrap();
        assert!(form.is_visible("deposit"));
        assert_eq!(form.completion(), 66);

        form.set_value("deposit", json!(200)).unwrap();
        assert_eq!(form.completion(), 100);
    }

    #[test]
    fn test_bundled_service_template_scenario() {
        let template = contract_catalog::get_template("service_agreement").unwrap();
        let mut form = FormSession::new(template);
        form.set_value("company_name", json!("Acme")).unwrap();
        form.set_value("amount", json!(500)).unwrap();
        assert_eq!(
            form.validate().get("amount").map(String::as_str),
            Some("Contract amount must be at least 1000")
        );
    }
}
