use chrono::{DateTime, Utc};
use shared_types::{Plan, Subscription, User};

use crate::error::WorkflowError;
use crate::services::IdentityProvider;
use crate::store::ContractStore;

/// Who is acting, and under which subscription.
///
/// Built once per request; every workflow operation takes one explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub user: User,
    pub subscription: Option<Subscription>,
}

impl SessionContext {
    pub fn new(user: User, subscription: Option<Subscription>) -> Self {
        Self { user, subscription }
    }

    /// Resolve the signed-in user and their stored subscription.
    ///
    /// A failed subscription lookup leaves the user on the free plan.
    pub async fn load(identity: &dyn IdentityProvider, store: &dyn ContractStore) -> Result<Self, WorkflowError> {
        let user = identity.current_user().ok_or(WorkflowError::NotSignedIn)?;
        let subscription = match store.get_subscription(&user.id).await {
            Ok(subscription) => subscription,
            Err(e) => {
                tracing::warn!("Could not load subscription for {}: {}", user.id, e);
                None
            }
        };
        Ok(Self { user, subscription })
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    pub fn plan_at(&self, now: DateTime<Utc>) -> Plan {
        entitlement_gate::effective_plan(self.subscription.as_ref(), now)
    }
}
