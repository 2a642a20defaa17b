//! Purchase and delivery transitions
//!
//! `draft -> generated -> purchased -> downloaded`. Transitions return an
//! updated copy; the input contract is never modified, so a failed payment
//! leaves the caller holding the unchanged `generated` contract.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared_types::{ContractStatus, DownloadRecord, ExportFormat, GeneratedContract};

use crate::context::SessionContext;
use crate::error::WorkflowError;
use crate::export::{render_export, ExportedDocument};
use crate::services::{PaymentGateway, PaymentMethod};
use crate::store::ContractStore;

/// Record a download.
///
/// Allowed from `purchased` (moving to `downloaded`) and from `downloaded`
/// (repeat downloads are appended).
pub fn mark_downloaded(
    contract: &GeneratedContract,
    format: ExportFormat,
    at: DateTime<Utc>,
) -> Result<GeneratedContract, WorkflowError> {
    if !contract.status.is_purchased() {
        return Err(WorkflowError::NotPurchased(contract.id.clone()));
    }
    let mut updated = contract.clone();
    updated.status = ContractStatus::Downloaded;
    updated.downloads.push(DownloadRecord { format, at });
    Ok(updated)
}

/// A rendered download and the contract with the download recorded
#[derive(Debug, Clone)]
pub struct Export {
    pub contract: GeneratedContract,
    pub document: ExportedDocument,
}

pub struct DeliveryService {
    gateway: Arc<dyn PaymentGateway>,
    store: Arc<dyn ContractStore>,
}

impl DeliveryService {
    pub fn new(gateway: Arc<dyn PaymentGateway>, store: Arc<dyn ContractStore>) -> Self {
        Self { gateway, store }
    }

    /// Pay for a generated contract.
    ///
    /// Only `generated` contracts can be bought; anything already paid for is
    /// rejected without charging again. Contracts covered by the plan's
    /// allowance (price zero) skip the gateway.
    pub async fn purchase(
        &self,
        ctx: &SessionContext,
        contract: &GeneratedContract,
        method: &PaymentMethod,
        terms_accepted: bool,
    ) -> Result<GeneratedContract, WorkflowError> {
        match contract.status {
            ContractStatus::Draft => return Err(WorkflowError::NotGenerated(contract.id.clone())),
            ContractStatus::Purchased | ContractStatus::Downloaded => {
                return Err(WorkflowError::AlreadyPurchased(contract.id.clone()))
            }
            ContractStatus::Generated => {}
        }
        if !terms_accepted {
            return Err(WorkflowError::TermsNotAccepted);
        }

        let reference = if contract.price.is_zero() {
            tracing::info!("Contract {} is covered by the plan allowance", contract.id);
            None
        } else {
            let receipt = self.gateway.charge(contract.price, method).await.map_err(|e| {
                tracing::warn!("Payment for contract {} failed: {}", contract.id, e);
                WorkflowError::PaymentFailed(e)
            })?;
            tracing::info!(
                "Charged {} for contract {} (ref {})",
                receipt.amount,
                contract.id,
                receipt.reference
            );
            Some(receipt.reference)
        };

        let mut purchased = contract.clone();
        purchased.status = ContractStatus::Purchased;
        purchased.purchased_at = Some(Utc::now());
        purchased.purchased_by = Some(ctx.user_id().to_string());
        purchased.payment_reference = reference;

        self.persist(&purchased).await;
        Ok(purchased)
    }

    /// Check entitlement, record the download, then render.
    pub async fn export(
        &self,
        ctx: &SessionContext,
        contract: &GeneratedContract,
        format: ExportFormat,
    ) -> Result<Export, WorkflowError> {
        let now = Utc::now();
        entitlement_gate::can_export(ctx.subscription.as_ref(), contract, &ctx.user, now)?;

        let downloaded = mark_downloaded(contract, format, now)?;
        let document = render_export(&downloaded, format)?;
        self.persist(&downloaded).await;

        tracing::info!(
            "Exported contract {} as {} for {}",
            contract.id,
            format.extension(),
            ctx.user_id()
        );
        Ok(Export {
            contract: downloaded,
            document,
        })
    }

    async fn persist(&self, contract: &GeneratedContract) {
        if let Err(e) = self.store.update_contract(contract).await {
            tracing::warn!("Failed to persist contract {}: {}", contract.id, e);
        }
    }
}
