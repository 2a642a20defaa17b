//! Monthly generation allowance and per-page pricing

use serde::{Deserialize, Serialize};
use shared_types::{Money, Plan, Pricing};

/// Baseline rate for users without an allowance: $0.80 per page
pub const PAY_PER_USE_PAGE_RATE: Money = Money::from_cents(80);

const AI_PLUS_PAGE_RATE: Money = Money::from_cents(60);
const TEAM_PAGE_RATE: Money = Money::from_cents(50);

/// A count of generations that may have no upper bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quota {
    Limited(u32),
    Unbounded,
}

impl Quota {
    pub fn has_remaining(&self) -> bool {
        match self {
            Quota::Limited(n) => *n > 0,
            Quota::Unbounded => true,
        }
    }
}

impl std::fmt::Display for Quota {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quota::Limited(n) => write!(f, "{}", n),
            Quota::Unbounded => f.write_str("unlimited"),
        }
    }
}

/// Generations each plan includes per calendar month
pub fn included_generations(plan: Plan) -> Quota {
    match plan {
        // Basic covers analysis only; generation is always paid per page.
        Plan::Free | Plan::Basic => Quota::Limited(0),
        Plan::AiPlus => Quota::Limited(5),
        Plan::Team => Quota::Limited(10),
        Plan::Unlimited => Quota::Unbounded,
    }
}

pub fn remaining_included_generations(plan: Plan, usage_this_month: u32) -> Quota {
    match included_generations(plan) {
        Quota::Limited(n) => Quota::Limited(n.saturating_sub(usage_this_month)),
        Quota::Unbounded => Quota::Unbounded,
    }
}

/// Per-page rate once the allowance is used up
pub fn marginal_page_rate(plan: Plan) -> Money {
    match plan {
        Plan::AiPlus => AI_PLUS_PAGE_RATE,
        Plan::Team => TEAM_PAGE_RATE,
        Plan::Free | Plan::Basic | Plan::Unlimited => PAY_PER_USE_PAGE_RATE,
    }
}

/// Price decision for one generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub price: Money,
    pub pricing: Pricing,
}

/// Price a generation of `pages` pages given this month's usage so far.
///
/// Running out of allowance is not an error; it just switches to the
/// plan's marginal rate.
pub fn quote_price(plan: Plan, usage_this_month: u32, pages: u32) -> PriceQuote {
    if remaining_included_generations(plan, usage_this_month).has_remaining() {
        return PriceQuote {
            price: Money::ZERO,
            pricing: Pricing::Included,
        };
    }
    let rate = marginal_page_rate(plan);
    PriceQuote {
        price: Money::per_page(rate, pages),
        pricing: Pricing::Marginal { rate },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_included_generations_table() {
        assert_eq!(included_generations(Plan::Free), Quota::Limited(0));
        assert_eq!(included_generations(Plan::Basic), Quota::Limited(0));
        assert_eq!(included_generations(Plan::AiPlus), Quota::Limited(5));
        assert_eq!(included_generations(Plan::Team), Quota::Limited(10));
        assert_eq!(included_generations(Plan::Unlimited), Quota::Unbounded);
    }

    #[test]
    fn test_remaining_never_underflows() {
        assert_eq!(remaining_included_generations(Plan::AiPlus, 2), Quota::Limited(3));
        assert_eq!(remaining_included_generations(Plan::AiPlus, 50), Quota::Limited(0));
        assert_eq!(remaining_included_generations(Plan::Unlimited, 10_000), Quota::Unbounded);
    }

    #[test]
    fn test_free_plan_pays_per_page() {
        let quote = quote_price(Plan::Free, 0, 5);
        assert_eq!(quote.price, Money::from_cents(400));
        assert_eq!(quote.price.to_string(), "$4.00");
        assert_eq!(quote.pricing, Pricing::Marginal { rate: PAY_PER_USE_PAGE_RATE });
    }

    #[test]
    fn test_team_within_allowance_is_free() {
        let quote = quote_price(Plan::Team, 3, 5);
        assert_eq!(quote.price, Money::ZERO);
        assert_eq!(quote.pricing, Pricing::Included);
    }

    #[test]
    fn test_ai_plus_fifth_and_sixth_generation() {
        // Four used: the fifth is still included.
        let fifth = quote_price(Plan::AiPlus, 4, 8);
        assert_eq!(fifth.price, Money::ZERO);

        let sixth = quote_price(Plan::AiPlus, 5, 8);
        assert_eq!(sixth.price, Money::from_cents(8 * 60));
        assert_eq!(sixth.pricing, Pricing::Marginal { rate: Money::from_cents(60) });
    }

    #[test]
    fn test_team_marginal_rate() {
        assert_eq!(quote_price(Plan::Team, 10, 4).price, Money::from_cents(200));
    }

    #[test]
    fn test_basic_never_includes_generation() {
        assert_eq!(quote_price(Plan::Basic, 0, 3).price, Money::from_cents(240));
    }

    #[test]
    fn test_unlimited_is_always_included() {
        assert_eq!(quote_price(Plan::Unlimited, u32::MAX, 40).pricing, Pricing::Included);
    }

    #[test]
    fn test_quota_display() {
        assert_eq!(Quota::Limited(3).to_string(), "3");
        assert_eq!(Quota::Unbounded.to_string(), "unlimited");
    }
}
