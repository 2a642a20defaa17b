//! Subscription plans and monthly usage periods

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Subscription plan tiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Plan {
    #[default]
    Free,
    Basic,
    AiPlus,
    Team,
    Unlimited,
}

impl Plan {
    pub const ALL: [Plan; 5] = [
        Plan::Free,
        Plan::Basic,
        Plan::AiPlus,
        Plan::Team,
        Plan::Unlimited,
    ];

    /// Every tier except `free` is paid
    pub fn is_paid(&self) -> bool {
        !matches!(self, Plan::Free)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Basic => "basic",
            Plan::AiPlus => "ai-plus",
            Plan::Team => "team",
            Plan::Unlimited => "unlimited",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "free" => Some(Plan::Free),
            "basic" => Some(Plan::Basic),
            "ai-plus" | "ai_plus" | "aiplus" => Some(Plan::AiPlus),
            "team" => Some(Plan::Team),
            "unlimited" => Some(Plan::Unlimited),
            _ => None,
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Inactive,
}

/// A user's subscription record. At most one per user is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub user_id: String,
    pub plan_id: Plan,
    pub status: SubscriptionStatus,
    /// `None` for subscriptions without a fixed end
    pub expires_at: Option<DateTime<Utc>>,
}

impl Subscription {
    pub fn active(user_id: impl Into<String>, plan: Plan, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            user_id: user_id.into(),
            plan_id: plan,
            status: SubscriptionStatus::Active,
            expires_at,
        }
    }

    /// Active status and not past its expiry
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.status == SubscriptionStatus::Active && self.expires_at.map_or(true, |exp| exp > now)
    }
}

/// Calendar month that monthly generation quotas are counted against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UsagePeriod {
    pub year: i32,
    pub month: u32,
}

impl UsagePeriod {
    pub fn containing(at: DateTime<Utc>) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
        }
    }

    pub fn current() -> Self {
        Self::containing(Utc::now())
    }
}

impl std::fmt::Display for UsagePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
