//! View router: the enum of top-level screens and the guard table that makes
//! every transition explicit.
//!
//! The storefront UI used to gate navigation with scattered conditionals
//! (checkout redirecting to auth, the admin screen checking a flag inline).
//! Here every target view maps to exactly one guard, and `Storefront::navigate`
//! is the only way to move between screens.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileTab {
    Overview,
    Orders,
    Addresses,
    Settings,
}

/// Every top-level screen. The router holds exactly one of these; there is no
/// history stack and no terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Home,
    Shop,
    Cart,
    Checkout,
    Profile(ProfileTab),
    Admin,
    OrderConfirmation,
    Auth,
    AdminAuth,
    About,
    Contact,
    Settings,
    Services,
    Faq,
    SupportTicket,
    Roadmap,
    SyncTerms,
    BiometricPolicy,
}

impl View {
    pub const fn initial() -> Self {
        View::Home
    }

    /// The total guard table: what it takes to land on each view.
    pub fn guard(self) -> Guard {
        match self {
            View::Home
            | View::Shop
            | View::Cart
            | View::Auth
            | View::AdminAuth
            | View::About
            | View::Contact
            | View::Settings
            | View::Services
            | View::Faq
            | View::SupportTicket
            | View::Roadmap
            | View::SyncTerms
            | View::BiometricPolicy => Guard::Always,
            View::Profile(_) => Guard::RequiresSession,
            View::Checkout => Guard::CheckoutReady,
            View::Admin => Guard::RequiresAdmin,
            View::OrderConfirmation => Guard::Internal,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Precondition for reaching a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    /// Reachable from anywhere.
    Always,
    /// Requires a signed-in session; blocked navigation redirects to `Auth`.
    RequiresSession,
    /// Requires an admin session; blocked navigation redirects to `AdminAuth`.
    RequiresAdmin,
    /// Requires a session and a non-empty cart.
    CheckoutReady,
    /// Never reachable by direct navigation; set only by the operation that
    /// owns it (order placement).
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_view_is_home() {
        assert_eq!(View::initial(), View::Home);
    }

    #[test]
    fn test_guard_table() {
        assert_eq!(View::Shop.guard(), Guard::Always);
        assert_eq!(View::Profile(ProfileTab::Orders).guard(), Guard::RequiresSession);
        assert_eq!(View::Checkout.guard(), Guard::CheckoutReady);
        assert_eq!(View::Admin.guard(), Guard::RequiresAdmin);
        assert_eq!(View::OrderConfirmation.guard(), Guard::Internal);
    }
}
