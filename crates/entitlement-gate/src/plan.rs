use chrono::{DateTime, Utc};
use shared_types::{Plan, Subscription};

/// The plan a user is treated as holding right now.
///
/// No subscription, an inactive one, or one past its expiry all count as `free`.
pub fn effective_plan(subscription: Option<&Subscription>, now: DateTime<Utc>) -> Plan {
    subscription
        .filter(|s| s.is_active_at(now))
        .map_or(Plan::Free, |s| s.plan_id)
}

pub fn has_active_paid_plan(subscription: Option<&Subscription>, now: DateTime<Utc>) -> bool {
    effective_plan(subscription, now).is_paid()
}
