//! Data model shared by the contract generation workflow crates
//!
//! Templates and jurisdictions are static reference data; contracts,
//! subscriptions, collaborators and risk assessments are the mutable
//! artifacts the workflow produces and gates.

pub mod collaborator;
pub mod contract;
pub mod jurisdiction;
pub mod money;
pub mod risk;
pub mod subscription;
pub mod template;
pub mod user;

pub use collaborator::{Collaborator, Permissions, Role};
pub use contract::{
    ContractStatus, DownloadRecord, ExportFormat, GeneratedContract, Pricing, RiskSummary,
};
pub use jurisdiction::{Jurisdiction, JurisdictionCode, LegalSystem};
pub use money::Money;
pub use risk::{Extraction, RiskAssessment, RiskFinding, RiskLevel, Severity};
pub use subscription::{Plan, Subscription, SubscriptionStatus, UsagePeriod};
pub use template::{
    Category, Complexity, ContractField, ContractTemplate, DependencyValue, FieldDependency,
    FieldType, FieldValidation, FormValues,
};
pub use user::User;
