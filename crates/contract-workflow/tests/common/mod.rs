//! Scripted collaborators for workflow tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use contract_workflow::{
    ContractStore, GeneratorError, MemoryStore, PaymentError, PaymentGateway, PaymentMethod, PaymentReceipt,
    StoreError, TextGenerator,
};
use shared_types::{GeneratedContract, Money, RiskAssessment, Subscription, UsagePeriod};

pub const CONTRACT_BODY: &str = "MUTUAL SERVICE AGREEMENT\n\n1. Services. The provider shall deliver the services.\n2. Fees. The client shall pay the fees.";

pub const RISK_SUMMARY_JSON: &str = r#"```json
{
  "purpose": "Defines services and payment terms",
  "commonMistakes": ["No acceptance criteria"],
  "keyClausesToReview": ["Fees", "Termination"],
  "jurisdictionRisks": ["Implied terms may apply"],
  "disclaimer": "This is not legal advice"
}
```"#;

/// Answers body and risk-summary prompts from separate scripts
pub struct ScriptedGenerator {
    content: Result<String, GeneratorError>,
    risk: Result<String, GeneratorError>,
    content_delay: Duration,
    risk_delay: Duration,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(content: Result<&str, GeneratorError>, risk: Result<&str, GeneratorError>) -> Self {
        Self {
            content: content.map(str::to_string),
            risk: risk.map(str::to_string),
            content_delay: Duration::ZERO,
            risk_delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn ok() -> Self {
        Self::new(Ok(CONTRACT_BODY), Ok(RISK_SUMMARY_JSON))
    }

    pub fn with_delays(mut self, content: Duration, risk: Duration) -> Self {
        self.content_delay = content;
        self.risk_delay = risk;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate_text(&self, prompt: &str, _max_tokens: u32) -> Result<String, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let is_risk = prompt.contains("commonMistakes");
        let (delay, answer) = if is_risk {
            (self.risk_delay, self.risk.clone())
        } else {
            (self.content_delay, self.content.clone())
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        answer
    }
}

/// Returns a fixed answer to every prompt
pub struct FixedGenerator(pub Result<String, GeneratorError>);

#[async_trait]
impl TextGenerator for FixedGenerator {
    async fn generate_text(&self, _prompt: &str, _max_tokens: u32) -> Result<String, GeneratorError> {
        self.0.clone()
    }
}

/// Payment gateway that records every charge
pub struct RecordingGateway {
    outcome: Mutex<Result<(), PaymentError>>,
    charges: Mutex<Vec<Money>>,
}

impl RecordingGateway {
    pub fn approving() -> Self {
        Self {
            outcome: Mutex::new(Ok(())),
            charges: Mutex::new(Vec::new()),
        }
    }

    pub fn declining(reason: &str) -> Self {
        Self {
            outcome: Mutex::new(Err(PaymentError::Declined(reason.to_string()))),
            charges: Mutex::new(Vec::new()),
        }
    }

    pub fn start_approving(&self) {
        *self.outcome.lock().unwrap() = Ok(());
    }

    pub fn charges(&self) -> Vec<Money> {
        self.charges.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    async fn charge(&self, amount: Money, _method: &PaymentMethod) -> Result<PaymentReceipt, PaymentError> {
        let outcome = self.outcome.lock().unwrap().clone();
        outcome?;
        let mut charges = self.charges.lock().unwrap();
        charges.push(amount);
        Ok(PaymentReceipt {
            reference: format!("pay_{}", charges.len()),
            amount,
            charged_at: Utc::now(),
        })
    }
}

/// Memory store whose usage reads and/or writes can be made to fail
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_usage: bool,
    pub fail_writes: bool,
}

fn outage() -> StoreError {
    StoreError::Unavailable("database offline".to_string())
}

impl FlakyStore {
    fn check_writes(&self) -> Result<(), StoreError> {
        if self.fail_writes {
            Err(outage())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ContractStore for FlakyStore {
    async fn create_contract(&self, contract: &GeneratedContract) -> Result<(), StoreError> {
        self.check_writes()?;
        self.inner.create_contract(contract).await
    }
    async fn get_contract(&self, id: &str) -> Result<Option<GeneratedContract>, StoreError> {
        self.inner.get_contract(id).await
    }
    async fn list_contracts(&self, user_id: &str) -> Result<Vec<GeneratedContract>, StoreError> {
        self.inner.list_contracts(user_id).await
    }
    async fn update_contract(&self, contract: &GeneratedContract) -> Result<(), StoreError> {
        self.check_writes()?;
        self.inner.update_contract(contract).await
    }
    async fn delete_contract(&self, id: &str) -> Result<bool, StoreError> {
        self.check_writes()?;
        self.inner.delete_contract(id).await
    }
    async fn save_assessment(&self, assessment: &RiskAssessment) -> Result<(), StoreError> {
        self.check_writes()?;
        self.inner.save_assessment(assessment).await
    }
    async fn list_assessments(&self, user_id: &str) -> Result<Vec<RiskAssessment>, StoreError> {
        self.inner.list_assessments(user_id).await
    }
    async fn get_subscription(&self, user_id: &str) -> Result<Option<Subscription>, StoreError> {
        self.inner.get_subscription(user_id).await
    }
    async fn put_subscription(&self, subscription: &Subscription) -> Result<(), StoreError> {
        self.check_writes()?;
        self.inner.put_subscription(subscription).await
    }
    async fn usage(&self, user_id: &str, period: UsagePeriod) -> Result<u32, StoreError> {
        if self.fail_usage {
            return Err(outage());
        }
        self.inner.usage(user_id, period).await
    }
    async fn record_generation(&self, user_id: &str, period: UsagePeriod) -> Result<u32, StoreError> {
        self.check_writes()?;
        self.inner.record_generation(user_id, period).await
    }
}

pub fn card() -> PaymentMethod {
    PaymentMethod::Card {
        token: "tok_visa".to_string(),
    }
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
