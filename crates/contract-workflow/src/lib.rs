//! Contract generation workflow
//!
//! Drives a filled-in form through AI generation, pricing, payment and export.
//! External systems (text generation, payments, identity, persistence) are
//! reached only through the traits in [`services`] and [`store`], so the
//! workflow runs the same against real providers or in-memory fakes.

pub mod config;
pub mod context;
pub mod error;
pub mod export;
pub mod orchestrator;
pub mod payment;
pub mod prompts;
pub mod risk;
pub mod services;
pub mod sharing;
pub mod store;

pub use config::WorkflowConfig;
pub use context::SessionContext;
pub use error::WorkflowError;
pub use export::{render_export, ExportedDocument};
pub use orchestrator::GenerationOrchestrator;
pub use payment::{mark_downloaded, DeliveryService, Export};
pub use risk::{parse_risk_summary, RiskAnalyzer, RiskSummaryUnavailable};
pub use services::{
    GeneratorError, IdentityProvider, PaymentError, PaymentGateway, PaymentMethod, PaymentReceipt,
    TextGenerator,
};
pub use sharing::{add_collaborator, change_role, remove_collaborator};
pub use store::{ContractStore, FallbackStore, MemoryStore, StoreError};
