//! PRIMERSTORE commerce core
//!
//! The in-memory state machine behind a single-page storefront demo.
//!
//! ## Features
//! - Product catalog with variant axes, admin-only CRUD
//! - Cart with merge-by-product, floored quantities, derived totals
//! - Order ledger of frozen cart snapshots with a guarded status machine
//! - Support ticket workflow parallel to orders
//! - Mock session (fabricated users, no real credentials) and wishlist
//! - Explicitly guarded view router over the fixed set of screens
//! - Chat assistant seam over an external text-completion provider
//!
//! Everything lives in one [`store::Storefront`] owned by the caller and is
//! gone when it drops; there is no persistence, no server, and no real
//! payment or authentication.

use thiserror::Error;

pub mod chat;
pub mod config;
pub mod domain;
pub mod store;

pub use chat::{ChatAssistant, CompletionClient, FALLBACK_REPLY};
pub use config::ChatConfig;
pub use domain::aggregates::{
    Cart, CartError, CartLineItem, Category, ContactInfo, LoyaltyTier, OptionPatch, Order,
    OrderError, OrderStatus, Product, ProductDraft, ProductError, ProductPatch, SignInProfile,
    SupportTicket, TicketDraft, TicketError, TicketStatus, Urgency, User, Variant, VariantOption,
};
pub use domain::value_objects::{Money, Quantity};
pub use store::{Guard, ProfileTab, Storefront, View};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Ticket not found: {0}")]
    TicketNotFound(String),

    #[error("Sign in required")]
    NotSignedIn,

    #[error("Admin session required")]
    AdminRequired,

    #[error("Cannot open {target}; redirecting to {redirect}")]
    NavigationBlocked { target: View, redirect: View },

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Ticket(#[from] TicketError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
