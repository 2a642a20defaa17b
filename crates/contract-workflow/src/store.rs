//! Persistence for contracts, assessments, subscriptions and usage

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{GeneratedContract, RiskAssessment, Subscription, UsagePeriod};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// CRUD over the workflow's entities.
///
/// Every method may fail; the workflow treats persistence as best-effort and
/// never assumes a write landed.
#[async_trait]
pub trait ContractStore: Send + Sync {
    async fn create_contract(&self, contract: &GeneratedContract) -> Result<(), StoreError>;

    async fn get_contract(&self, id: &str) -> Result<Option<GeneratedContract>, StoreError>;

    /// Contracts owned by `user_id`, newest first
    async fn list_contracts(&self, user_id: &str) -> Result<Vec<GeneratedContract>, StoreError>;

    /// Replace a stored contract; fails with `NotFound` if it doesn't exist
    async fn update_contract(&self, contract: &GeneratedContract) -> Result<(), StoreError>;

    /// Returns whether anything was deleted
    async fn delete_contract(&self, id: &str) -> Result<bool, StoreError>;

    async fn save_assessment(&self, assessment: &RiskAssessment) -> Result<(), StoreError>;

    async fn list_assessments(&self, user_id: &str) -> Result<Vec<RiskAssessment>, StoreError>;

    async fn get_subscription(&self, user_id: &str) -> Result<Option<Subscription>, StoreError>;

    async fn put_subscription(&self, subscription: &Subscription) -> Result<(), StoreError>;

    /// Generations recorded for `user_id` in `period`
    async fn usage(&self, user_id: &str, period: UsagePeriod) -> Result<u32, StoreError>;

    /// Count one generation and return the new total for the period
    async fn record_generation(&self, user_id: &str, period: UsagePeriod) -> Result<u32, StoreError>;
}

/// Process-local store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    contracts: Arc<RwLock<HashMap<String, GeneratedContract>>>,
    assessments: Arc<RwLock<Vec<RiskAssessment>>>,
    subscriptions: Arc<RwLock<HashMap<String, Subscription>>>,
    usage: Arc<RwLock<HashMap<(String, UsagePeriod), u32>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContractStore for MemoryStore {
    async fn create_contract(&self, contract: &GeneratedContract) -> Result<(), StoreError> {
        let mut contracts = self.contracts.write().await;
        contracts.insert(contract.id.clone(), contract.clone());
        Ok(())
    }

    async fn get_contract(&self, id: &str) -> Result<Option<GeneratedContract>, StoreError> {
        Ok(self.contracts.read().await.get(id).cloned())
    }

    async fn list_contracts(&self, user_id: &str) -> Result<Vec<GeneratedContract>, StoreError> {
        let contracts = self.contracts.read().await;
        let mut owned: Vec<GeneratedContract> = contracts
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
        Ok(owned)
    }

    async fn update_contract(&self, contract: &GeneratedContract) -> Result<(), StoreError> {
        let mut contracts = self.contracts.write().await;
        match contracts.get_mut(&contract.id) {
            Some(existing) => {
                *existing = contract.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(contract.id.clone())),
        }
    }

    async fn delete_contract(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.contracts.write().await.remove(id).is_some())
    }

    async fn save_assessment(&self, assessment: &RiskAssessment) -> Result<(), StoreError> {
        self.assessments.write().await.push(assessment.clone());
        Ok(())
    }

    async fn list_assessments(&self, user_id: &str) -> Result<Vec<RiskAssessment>, StoreError> {
        let assessments = self.assessments.read().await;
        Ok(assessments
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_subscription(&self, user_id: &str) -> Result<Option<Subscription>, StoreError> {
        Ok(self.subscriptions.read().await.get(user_id).cloned())
    }

    async fn put_subscription(&self, subscription: &Subscription) -> Result<(), StoreError> {
        let mut subscriptions = self.subscriptions.write().await;
        subscriptions.insert(subscription.user_id.clone(), subscription.clone());
        Ok(())
    }

    async fn usage(&self, user_id: &str, period: UsagePeriod) -> Result<u32, StoreError> {
        let usage = self.usage.read().await;
        Ok(usage.get(&(user_id.to_string(), period)).copied().unwrap_or(0))
    }

    async fn record_generation(&self, user_id: &str, period: UsagePeriod) -> Result<u32, StoreError> {
        let mut usage = self.usage.write().await;
        let count = usage.entry((user_id.to_string(), period)).or_insert(0);
        *count += 1;
        Ok(*count)
    }
}

/// A primary store backed by a session-local [`MemoryStore`].
///
/// Writes go to both; reads prefer the primary and fall back to the local
/// copy when it fails. Usage reads fall back to the session counter, which
/// may lag the primary and let one extra included generation through.
pub struct FallbackStore<P> {
    primary: P,
    local: MemoryStore,
}

impl<P: ContractStore> FallbackStore<P> {
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            local: MemoryStore::new(),
        }
    }

    pub fn local(&self) -> &MemoryStore {
        &self.local
    }
}

fn log_fallback(operation: &str, error: &StoreError) {
    tracing::warn!("Primary store {} failed, using session store: {}", operation, error);
}

#[async_trait]
impl<P: ContractStore> ContractStore for FallbackStore<P> {
    async fn create_contract(&self, contract: &GeneratedContract) -> Result<(), StoreError> {
        self.local.create_contract(contract).await?;
        if let Err(e) = self.primary.create_contract(contract).await {
            log_fallback("create_contract", &e);
        }
        Ok(())
    }

    async fn get_contract(&self, id: &str) -> Result<Option<GeneratedContract>, StoreError> {
        match self.primary.get_contract(id).await {
            Ok(Some(contract)) => Ok(Some(contract)),
            Ok(None) => self.local.get_contract(id).await,
            Err(e) => {
                log_fallback("get_contract", &e);
                self.local.get_contract(id).await
            }
        }
    }

    async fn list_contracts(&self, user_id: &str) -> Result<Vec<GeneratedContract>, StoreError> {
        match self.primary.list_contracts(user_id).await {
            Ok(contracts) => Ok(contracts),
            Err(e) => {
                log_fallback("list_contracts", &e);
                self.local.list_contracts(user_id).await
            }
        }
    }

    async fn update_contract(&self, contract: &GeneratedContract) -> Result<(), StoreError> {
        // Upsert locally: the contract may predate this session.
        self.local.create_contract(contract).await?;
        if let Err(e) = self.primary.update_contract(contract).await {
            log_fallback("update_contract", &e);
        }
        Ok(())
    }

    async fn delete_contract(&self, id: &str) -> Result<bool, StoreError> {
        let local = self.local.delete_contract(id).await?;
        match self.primary.delete_contract(id).await {
            Ok(primary) => Ok(primary || local),
            Err(e) => {
                log_fallback("delete_contract", &e);
                Ok(local)
            }
        }
    }

    async fn save_assessment(&self, assessment: &RiskAssessment) -> Result<(), StoreError> {
        self.local.save_assessment(assessment).await?;
        if let Err(e) = self.primary.save_assessment(assessment).await {
            log_fallback("save_assessment", &e);
        }
        Ok(())
    }

    async fn list_assessments(&self, user_id: &str) -> Result<Vec<RiskAssessment>, StoreError> {
        match self.primary.list_assessments(user_id).await {
            Ok(assessments) => Ok(assessments),
            Err(e) => {
                log_fallback("list_assessments", &e);
                self.local.list_assessments(user_id).await
            }
        }
    }

    async fn get_subscription(&self, user_id: &str) -> Result<Option<Subscription>, StoreError> {
        match self.primary.get_subscription(user_id).await {
            Ok(subscription) => Ok(subscription),
            Err(e) => {
                log_fallback("get_subscription", &e);
                self.local.get_subscription(user_id).await
            }
        }
    }

    async fn put_subscription(&self, subscription: &Subscription) -> Result<(), StoreError> {
        self.local.put_subscription(subscription).await?;
        if let Err(e) = self.primary.put_subscription(subscription).await {
            log_fallback("put_subscription", &e);
        }
        Ok(())
    }

    async fn usage(&self, user_id: &str, period: UsagePeriod) -> Result<u32, StoreError> {
        match self.primary.usage(user_id, period).await {
            Ok(usage) => Ok(usage),
            Err(e) => {
                log_fallback("usage", &e);
                self.local.usage(user_id, period).await
            }
        }
    }

    async fn record_generation(&self, user_id: &str, period: UsagePeriod) -> Result<u32, StoreError> {
        let local = self.local.record_generation(user_id, period).await?;
        match self.primary.record_generation(user_id, period).await {
            Ok(total) => Ok(total),
            Err(e) => {
                log_fallback("record_generation", &e);
                Ok(local)
            }
        }
    }
}
