//! User: the fabricated session identity.
//!
//! Sign-in is a client-side simulation. Whatever the form submits becomes a
//! valid user; there is no credential store and nothing to verify against.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Fields a sign-in form submits. None of them are checked.
#[derive(Clone, Debug, Default)]
pub struct SignInProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    id: String,
    name: String,
    email: String,
    phone: String,
    address: String,
    saved_addresses: Vec<String>,
    is_admin: bool,
}

impl User {
    /// Build a session user from a submitted form, unverified.
    pub fn fabricate(profile: SignInProfile, is_admin: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: profile.name,
            email: profile.email,
            phone: profile.phone,
            address: profile.address,
            saved_addresses: vec![],
            is_admin,
        }
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn email(&self) -> &str { &self.email }
    pub fn phone(&self) -> &str { &self.phone }
    pub fn address(&self) -> &str { &self.address }
    pub fn saved_addresses(&self) -> &[String] { &self.saved_addresses }
    pub fn is_admin(&self) -> bool { self.is_admin }

    pub fn save_address(&mut self, address: impl Into<String>) {
        self.saved_addresses.push(address.into());
    }

    pub fn remove_saved_address(&mut self, index: usize) {
        if index < self.saved_addresses.len() {
            self.saved_addresses.remove(index);
        }
    }
}

/// Loyalty label derived from lifetime spend across non-cancelled orders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoyaltyTier {
    Bronze,
    Silver,
    Gold,
}

impl LoyaltyTier {
    pub fn for_spend(total: Decimal) -> Self {
        if total >= Decimal::new(1000, 0) {
            LoyaltyTier::Gold
        } else if total >= Decimal::new(250, 0) {
            LoyaltyTier::Silver
        } else {
            LoyaltyTier::Bronze
        }
    }
}

impl fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LoyaltyTier::Bronze => "Bronze",
            LoyaltyTier::Silver => "Silver",
            LoyaltyTier::Gold => "Gold",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fabricate_takes_form_as_is() {
        let user = User::fabricate(
            SignInProfile { name: "Ada".into(), email: "ada@example.com".into(), ..Default::default() },
            false,
        );
        assert_eq!(user.name(), "Ada");
        assert!(!user.is_admin());
    }

    #[test]
    fn test_saved_addresses() {
        let mut user = User::fabricate(SignInProfile::default(), false);
        user.save_address("1 Main St");
        user.save_address("2 Side St");
        user.remove_saved_address(0);
        assert_eq!(user.saved_addresses(), ["2 Side St".to_string()]);
        user.remove_saved_address(5); // out of range is a no-op
        assert_eq!(user.saved_addresses().len(), 1);
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(LoyaltyTier::for_spend(Decimal::ZERO), LoyaltyTier::Bronze);
        assert_eq!(LoyaltyTier::for_spend(Decimal::new(250, 0)), LoyaltyTier::Silver);
        assert_eq!(LoyaltyTier::for_spend(Decimal::new(1500, 0)), LoyaltyTier::Gold);
    }
}
