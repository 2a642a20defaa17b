//! Monetary amounts in integer cents

use serde::{Deserialize, Serialize};

/// An amount in US cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// `pages × rate`, saturating on overflow
    pub fn per_page(rate: Money, pages: u32) -> Self {
        Self(rate.0.saturating_mul(u64::from(pages)))
    }

    pub fn as_dollars(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_page() {
        assert_eq!(Money::per_page(Money::from_cents(80), 5), Money::from_cents(400));
        assert_eq!(Money::per_page(Money::from_cents(60), 0), Money::ZERO);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(400).to_string(), "$4.00");
        assert_eq!(Money::from_cents(1205).to_string(), "$12.05");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_per_page_saturates() {
        assert_eq!(
            Money::per_page(Money::from_cents(u64::MAX), 2),
            Money::from_cents(u64::MAX)
        );
    }
}
