//! Export permission

use chrono::{DateTime, Utc};
use shared_types::{GeneratedContract, Subscription, User};
use thiserror::Error;

use crate::plan::has_active_paid_plan;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportDenied {
    #[error("Contract {0} has not been purchased")]
    NotPurchased(String),

    #[error("User {user} is not entitled to export contract {contract}")]
    NotEntitled { user: String, contract: String },
}

/// Whether `requester` may export `contract`.
///
/// The contract must be paid for first, and the requester must be related to
/// this document. The purchaser and collaborators whose role allows downloads
/// may always export. The owner may export someone else's purchase only while
/// on an active paid plan. A paid plan never opens documents the requester
/// has no link to.
pub fn can_export(
    subscription: Option<&Subscription>,
    contract: &GeneratedContract,
    requester: &User,
    now: DateTime<Utc>,
) -> Result<(), ExportDenied> {
    if !contract.is_purchased() {
        return Err(ExportDenied::NotPurchased(contract.id.clone()));
    }

    let purchaser = contract.purchased_by.as_deref() == Some(requester.id.as_str());
    let downloading_collaborator = contract
        .collaborators
        .iter()
        .any(|c| c.email.eq_ignore_ascii_case(&requester.email) && c.permissions().can_download);

    let subscribed_owner =
        contract.user_id == requester.id && has_active_paid_plan(subscription, now);

    if purchaser || downloading_collaborator || subscribed_owner {
        Ok(())
    } else {
        Err(ExportDenied::NotEntitled {
            user: requester.id.clone(),
            contract: contract.id.clone(),
        })
    }
}
