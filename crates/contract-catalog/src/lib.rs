//! Static contract template catalog
//!
//! This crate provides the reference data the generation workflow is built
//! on:
//! - The bundled contract templates and their dynamic field schemas
//! - The jurisdiction table (legal system, currency, mandatory clauses)
//! - Schema validation for templates

pub mod error;
pub mod jurisdictions;
pub mod registry;
pub mod schema;

pub use error::CatalogError;
pub use jurisdictions::{find_jurisdiction, get_jurisdiction, list_jurisdictions};
pub use registry::{
    get_template, list_templates, templates_by_category, templates_for_jurisdiction,
};
pub use schema::{validate_template, SchemaViolation};
