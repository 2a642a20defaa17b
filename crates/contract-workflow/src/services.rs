//! External collaborators the workflow depends on

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{Money, User};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Text generation service unavailable: {0}")]
    Unavailable(String),

    #[error("Text generation rate limited")]
    RateLimited,

    #[error("Text generation timed out after {0}ms")]
    Timeout(u64),

    #[error("Text generation failed: {0}")]
    Provider(String),
}

/// Black-box text generation.
///
/// Calls are fallible and may take arbitrarily long; callers bound them with
/// a timeout and never retry on their own.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str, max_tokens: u32) -> Result<String, GeneratorError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Tokenized card from the payment form
    Card { token: String },
    /// Saved wallet or link-style payment
    Wallet { token: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub reference: String,
    pub amount: Money,
    pub charged_at: DateTime<Utc>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("Payment declined: {0}")]
    Declined(String),

    #[error("Payment provider unavailable: {0}")]
    Unavailable(String),
}

/// Opaque payment provider; a charge either fully succeeds or fails
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, amount: Money, method: &PaymentMethod) -> Result<PaymentReceipt, PaymentError>;
}

/// Snapshot of who is signed in
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<User>;
}
