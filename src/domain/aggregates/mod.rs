//! Aggregates module
pub mod cart;
pub mod order;
pub mod product;
pub mod ticket;
pub mod user;

pub use cart::{Cart, CartError, CartLineItem};
pub use order::{ContactInfo, Order, OrderError, OrderStatus};
pub use product::{
    Category, OptionPatch, Product, ProductDraft, ProductError, ProductPatch, Variant,
    VariantOption,
};
pub use ticket::{SupportTicket, TicketDraft, TicketError, TicketStatus, Urgency};
pub use user::{LoyaltyTier, SignInProfile, User};
