//! Template registry and metadata

use once_cell::sync::Lazy;
use serde_json::json;
use shared_types::{
    Category, Complexity, ContractField, ContractTemplate, DependencyValue, FieldType,
    JurisdictionCode,
};

use crate::error::CatalogError;

use FieldType::*;
use JurisdictionCode::*;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const PHONE_PATTERN: &str = r"^\+?[0-9 ()\-]{7,20}$";

fn when(value: serde_json::Value) -> DependencyValue {
    DependencyValue::One(value)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn mutual_nda() -> ContractTemplate {
    ContractTemplate {
        id: "nda".to_string(),
        name: "Non-Disclosure Agreement".to_string(),
        description: "Mutual or one-way confidentiality agreement for sharing business information"
            .to_string(),
        category: Category::Business,
        complexity: Complexity::Simple,
        estimated_pages: 3,
        jurisdictions: JurisdictionCode::ALL.to_vec(),
        fields: vec![
            ContractField::new("disclosing_party", "Disclosing party", Text)
                .required()
                .with_placeholder("Acme Corp."),
            ContractField::new("receiving_party", "Receiving party", Text).required(),
            ContractField::new("purpose", "Purpose of disclosure", Textarea)
                .required()
                .with_help("What the confidential information will be used for"),
            ContractField::new("nda_type", "Agreement type", Radio)
                .required()
                .with_options(&["mutual", "one-way"]),
            ContractField::new("duration_years", "Confidentiality period (years)", Number)
                .required()
                .with_range(Some(1.0), Some(10.0)),
            ContractField::new("effective_date", "Effective date", Date).required(),
            ContractField::new("includes_non_solicit", "Include non-solicitation", Checkbox),
            ContractField::new("non_solicit_months", "Non-solicitation period (months)", Number)
                .required()
                .with_range(Some(1.0), Some(24.0))
                .depends_on("includes_non_solicit", when(json!(true))),
            ContractField::new("governing_region", "Governing state or region", Text),
        ],
        risk_areas: strings(&[
            "Overly broad definition of confidential information",
            "Missing carve-outs for independently developed information",
            "Unenforceable duration for trade secrets",
        ]),
    }
}

fn employment_agreement() -> ContractTemplate {
    ContractTemplate {
        id: "employment".to_string(),
        name: "Employment Agreement".to_string(),
        description: "Employment contract covering role, compensation, benefits and restrictive covenants"
            .to_string(),
        category: Category::Employment,
        complexity: Complexity::Complex,
        estimated_pages: 8,
        jurisdictions: vec![US, UK, CA, AU, DE],
        fields: vec![
            ContractField::new("employer_name", "Employer", Text).required(),
            ContractField::new("employee_name", "Employee", Text).required(),
            ContractField::new("employee_email", "Employee email", Text)
                .with_pattern(EMAIL_PATTERN, Some("Enter a valid email address")),
            ContractField::new("job_title", "Job title", Text).required(),
            ContractField::new("employment_type", "Employment type", Select)
                .required()
                .with_options(&["full-time", "part-time", "fixed-term"]),
            ContractField::new("start_date", "Start date", Date).required(),
            ContractField::new("end_date", "End date", Date)
                .required()
                .depends_on("employment_type", when(json!("fixed-term"))),
            ContractField::new("annual_salary", "Annual salary", Number)
                .required()
                .with_range(Some(1.0), None),
            ContractField::new("probation_months", "Probation period (months)", Number)
                .with_range(Some(0.0), Some(12.0)),
            ContractField::new("benefits", "Benefits", MultiSelect).with_options(&[
                "health",
                "dental",
                "retirement",
                "equity",
                "remote-stipend",
            ]),
            ContractField::new("non_compete", "Include non-compete", Checkbox),
            ContractField::new("non_compete_months", "Non-compete period (months)", Number)
                .required()
                .with_range(Some(1.0), Some(24.0))
                .depends_on("non_compete", when(json!(true))),
        ],
        risk_areas: strings(&[
            "Misclassification of employee status",
            "Unenforceable non-compete scope or duration",
            "Missing statutory leave and notice entitlements",
            "Ambiguous termination for cause definition",
        ]),
    }
}

fn service_agreement() -> ContractTemplate {
    ContractTemplate {
        id: "service_agreement".to_string(),
        name: "Service Agreement".to_string(),
        description: "Agreement for the provision of professional services to a client".to_string(),
        category: Category::Business,
        complexity: Complexity::Medium,
        estimated_pages: 5,
        jurisdictions: vec![US, UK, CA, AU, SG],
        fields: vec![
            ContractField::new("company_name", "Company name", Text).required(),
            ContractField::new("client_name", "Client name", Text).required(),
            ContractField::new("scope", "Scope of services", Textarea).required(),
            ContractField::new("amount", "Contract amount", Number)
                .required()
                .with_range(Some(1000.0), None),
            ContractField::new("payment_schedule", "Payment schedule", Select)
                .required()
                .with_options(&["upfront", "milestones", "monthly"]),
            ContractField::new("milestone_count", "Number of milestones", Number)
                .required()
                .with_range(Some(2.0), Some(12.0))
                .depends_on("payment_schedule", when(json!("milestones"))),
            ContractField::new("start_date", "Start date", Date).required(),
            ContractField::new("contact_phone", "Contact phone", Text)
                .with_pattern(PHONE_PATTERN, None),
            ContractField::new("late_fee_percent", "Late payment fee (%)", Number)
                .with_range(Some(0.0), Some(25.0)),
        ],
        risk_areas: strings(&[
            "Undefined acceptance criteria for deliverables",
            "Uncapped liability and indemnities",
            "Scope creep without change-order process",
        ]),
    }
}

fn residential_lease() -> ContractTemplate {
    ContractTemplate {
        id: "residential_lease".to_string(),
        name: "Residential Lease".to_string(),
        description: "Lease of a residential property between landlord and tenant".to_string(),
        category: Category::RealEstate,
        complexity: Complexity::Complex,
        estimated_pages: 10,
        jurisdictions: vec![US, UK, CA, AU, DE, FR, ES],
        fields: vec![
            ContractField::new("landlord_name", "Landlord", Text).required(),
            ContractField::new("tenant_name", "Tenant", Text).required(),
            ContractField::new("property_address", "Property address", Textarea).required(),
            ContractField::new("monthly_rent", "Monthly rent", Number)
                .required()
                .with_range(Some(1.0), None),
            ContractField::new("security_deposit", "Security deposit", Number)
                .with_range(Some(0.0), None),
            ContractField::new("lease_term", "Lease term", Radio)
                .required()
                .with_options(&["fixed", "month-to-month"]),
            ContractField::new("lease_start", "Lease start", Date).required(),
            ContractField::new("lease_end", "Lease end", Date)
                .required()
                .depends_on("lease_term", when(json!("fixed"))),
            ContractField::new("furnished", "Furnished", Radio).with_options(&["yes", "no"]),
            ContractField::new("pets_allowed", "Pets allowed", Checkbox),
            ContractField::new("pet_deposit", "Pet deposit", Number)
                .with_range(Some(0.0), None)
                .depends_on("pets_allowed", when(json!(true))),
            ContractField::new("utilities_included", "Utilities included", MultiSelect)
                .with_options(&["water", "electricity", "gas", "internet", "trash"]),
        ],
        risk_areas: strings(&[
            "Deposit amount or return period exceeding statutory limits",
            "Missing mandatory disclosures",
            "Unlawful waiver of tenant rights",
            "Unclear maintenance and repair responsibilities",
        ]),
    }
}

fn freelance_agreement() -> ContractTemplate {
    ContractTemplate {
        id: "freelance".to_string(),
        name: "Independent Contractor Agreement".to_string(),
        description: "Engagement of a freelancer for a defined project".to_string(),
        category: Category::Freelance,
        complexity: Complexity::Simple,
        estimated_pages: 4,
        jurisdictions: vec![US, UK, CA, AU, DE, FR, SG, ZA],
        fields: vec![
            ContractField::new("client_name", "Client", Text).required(),
            ContractField::new("contractor_name", "Contractor", Text).required(),
            ContractField::new("contractor_email", "Contractor email", Text)
                .with_pattern(EMAIL_PATTERN, Some("Enter a valid email address")),
            ContractField::new("project_description", "Project description", Textarea).required(),
            ContractField::new("rate_type", "Rate type", Radio)
                .required()
                .with_options(&["hourly", "fixed"]),
            ContractField::new("hourly_rate", "Hourly rate", Number)
                .required()
                .with_range(Some(1.0), None)
                .depends_on("rate_type", when(json!("hourly"))),
            ContractField::new("fixed_fee", "Fixed fee", Number)
                .required()
                .with_range(Some(1.0), None)
                .depends_on("rate_type", when(json!("fixed"))),
            ContractField::new("deadline", "Delivery deadline", Date),
            ContractField::new("ip_ownership", "IP ownership", Select)
                .required()
                .with_options(&["client", "contractor", "shared"]),
        ],
        risk_areas: strings(&[
            "Worker misclassification",
            "Intellectual property not assigned",
            "No payment terms for rejected work",
        ]),
    }
}

static TEMPLATES: Lazy<Vec<ContractTemplate>> = Lazy::new(|| {
    vec![
        mutual_nda(),
        employment_agreement(),
        service_agreement(),
        residential_lease(),
        freelance_agreement(),
    ]
});

/// List all available templates
pub fn list_templates() -> &'static [ContractTemplate] {
    &TEMPLATES
}

/// Get a template by id
pub fn get_template(id: &str) -> Result<&'static ContractTemplate, CatalogError> {
    TEMPLATES
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| CatalogError::TemplateNotFound(id.to_string()))
}

/// Templates that can be generated for a jurisdiction
pub fn templates_for_jurisdiction(code: JurisdictionCode) -> Vec<&'static ContractTemplate> {
    TEMPLATES.iter().filter(|t| t.supports(code)).collect()
}

pub fn templates_by_category(category: Category) -> Vec<&'static ContractTemplate> {
    TEMPLATES.iter().filter(|t| t.category == category).collect()
}
