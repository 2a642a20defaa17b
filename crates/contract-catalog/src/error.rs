//! Error types for catalog lookups

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Unknown jurisdiction: {0}")]
    UnknownJurisdiction(String),
}
