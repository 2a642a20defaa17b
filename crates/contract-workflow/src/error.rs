use contract_catalog::CatalogError;
use entitlement_gate::ExportDenied;
use shared_types::JurisdictionCode;
use thiserror::Error;

use crate::services::PaymentError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("No user is signed in")]
    NotSignedIn,

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Template {template} is not available in {jurisdiction}")]
    UnsupportedJurisdiction {
        template: String,
        jurisdiction: JurisdictionCode,
    },

    #[error("Form was filled for template {submitted}, not {template}")]
    SubmissionMismatch { template: String, submitted: String },

    #[error("Contract generation failed: {0}")]
    GenerationFailed(String),

    #[error("Document is empty")]
    EmptyDocument,

    #[error("Terms must be accepted before purchase")]
    TermsNotAccepted,

    #[error("Contract {0} has not been generated yet")]
    NotGenerated(String),

    #[error("Contract {0} is already purchased")]
    AlreadyPurchased(String),

    #[error("Contract {0} has not been purchased")]
    NotPurchased(String),

    #[error("User {user} is not entitled to export contract {contract}")]
    NotEntitled { user: String, contract: String },

    #[error("Payment failed: {0}")]
    PaymentFailed(#[from] PaymentError),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("{0} is already a collaborator")]
    DuplicateCollaborator(String),

    #[error("Collaborator not found: {0}")]
    CollaboratorNotFound(String),

    #[error("Export failed: {0}")]
    Export(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ExportDenied> for WorkflowError {
    fn from(denied: ExportDenied) -> Self {
        match denied {
            ExportDenied::NotPurchased(id) => WorkflowError::NotPurchased(id),
            ExportDenied::NotEntitled { user, contract } => WorkflowError::NotEntitled { user, contract },
        }
    }
}
