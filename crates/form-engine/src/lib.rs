//! Dynamic form engine for contract templates
//!
//! Turns a template's field schema plus user input into validated form data:
//! - Field visibility from `dependsOn` declarations
//! - Per-field validation (first failing rule wins)
//! - Completion percentage over visible required fields
//! - Submission gating on completion and validation

pub mod completion;
pub mod session;
pub mod validate;
pub mod values;
pub mod visibility;

pub use completion::compute_completion;
pub use session::{FormError, FormSession, FormState, FormSubmission, SubmitError};
pub use validate::{validate_all, validate_field, FieldErrors};
pub use values::{as_number, display_value, is_empty_value};
pub use visibility::{is_field_visible, visible_fields};
