//! Value objects shared across the storefront domain.

use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Money value object
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self { amount, currency: currency.to_string() }
    }
    pub fn usd(amount: Decimal) -> Self { Self::new(amount, "USD") }
    pub fn zero(currency: &str) -> Self { Self::new(Decimal::ZERO, currency) }
    pub fn amount(&self) -> Decimal { self.amount }
    pub fn currency(&self) -> &str { &self.currency }
    pub fn is_negative(&self) -> bool { self.amount.is_sign_negative() && !self.amount.is_zero() }
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency { return Err(MoneyError::CurrencyMismatch); }
        Ok(Money::new(self.amount + other.amount, &self.currency))
    }
    pub fn multiply(&self, qty: u32) -> Money {
        Money::new(self.amount * Decimal::from(qty), &self.currency)
    }
    /// Apply a signed adjustment, clamped at zero. Used for variant price deltas.
    pub fn offset(&self, delta: Decimal) -> Money {
        Money::new((self.amount + delta).max(Decimal::ZERO), &self.currency)
    }
}

impl Default for Money {
    fn default() -> Self { Self::zero("USD") }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum MoneyError {
    #[error("Currency mismatch")]
    CurrencyMismatch,
}

/// Quantity value object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: u32) -> Self { Self(value) }
    pub fn value(&self) -> u32 { self.0 }
    pub fn add(&self, other: u32) -> Self { Self(self.0.saturating_add(other)) }
    pub fn subtract(&self, other: u32) -> Option<Self> {
        if other > self.0 { None } else { Some(Self(self.0 - other)) }
    }
    pub fn is_zero(&self) -> bool { self.0 == 0 }
}

impl Default for Quantity {
    fn default() -> Self { Self(0) }
}

/// Human-facing order reference, e.g. `ORD-00482913`.
pub fn order_reference() -> String {
    format!("ORD-{:08}", rand::thread_rng().gen_range(0..100_000_000u32))
}

/// Human-facing support incident reference, e.g. `INC-004829`.
pub fn ticket_reference() -> String {
    format!("INC-{:06}", rand::thread_rng().gen_range(0..1_000_000u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_add() {
        let a = Money::usd(Decimal::new(100, 0));
        let b = Money::usd(Decimal::new(50, 0));
        assert_eq!(a.add(&b).unwrap().amount(), Decimal::new(150, 0));
    }

    #[test]
    fn test_money_offset_clamps_at_zero() {
        let price = Money::usd(Decimal::new(10, 0));
        assert_eq!(price.offset(Decimal::new(-25, 0)).amount(), Decimal::ZERO);
        assert_eq!(price.offset(Decimal::new(5, 0)).amount(), Decimal::new(15, 0));
    }

    #[test]
    fn test_references() {
        assert!(order_reference().starts_with("ORD-"));
        let inc = ticket_reference();
        assert!(inc.starts_with("INC-") && inc.len() == 10);
    }
}
