//! The application-state container.
//!
//! Every store the UI reads (catalog, session, cart, wishlist, order ledger,
//! ticket ledger, current view) lives in one `Storefront` owned by the caller.
//! Each operation mutates exactly one store; derived values (subtotals, counts,
//! tier labels, filtered lists) are recomputed on read. Nothing is persisted:
//! dropping the `Storefront` is the reload that resets the demo.

pub mod admin;
pub mod router;

use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

use crate::domain::aggregates::{
    Cart, CartLineItem, Category, ContactInfo, LoyaltyTier, Order, OrderStatus, Product,
    SignInProfile, SupportTicket, TicketDraft, User,
};
use crate::domain::events::DomainEvent;
use crate::{Result, StoreError};

pub use router::{Guard, ProfileTab, View};

const CURRENCY: &str = "USD";

pub struct Storefront {
    catalog: Vec<Product>,
    session: Option<User>,
    cart: Cart,
    wishlist: HashSet<String>,
    orders: Vec<Order>,
    tickets: Vec<SupportTicket>,
    view: View,
    events: Vec<DomainEvent>,
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new()
    }
}

impl Storefront {
    pub fn new() -> Self {
        Self {
            catalog: vec![],
            session: None,
            cart: Cart::new(CURRENCY),
            wishlist: HashSet::new(),
            orders: vec![],
            tickets: vec![],
            view: View::initial(),
            events: vec![],
        }
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    pub fn view(&self) -> View { self.view }
    pub fn session(&self) -> Option<&User> { self.session.as_ref() }
    pub fn catalog(&self) -> &[Product] { &self.catalog }
    pub fn cart(&self) -> &Cart { &self.cart }
    pub fn orders(&self) -> &[Order] { &self.orders }
    pub fn tickets(&self) -> &[SupportTicket] { &self.tickets }
    pub fn wishlist(&self) -> &HashSet<String> { &self.wishlist }

    pub fn product(&self, id: &str) -> Result<&Product> {
        self.catalog
            .iter()
            .find(|p| p.id() == id)
            .ok_or_else(|| StoreError::ProductNotFound(id.to_string()))
    }

    pub fn order(&self, id: &str) -> Result<&Order> {
        self.orders
            .iter()
            .find(|o| o.id() == id)
            .ok_or_else(|| StoreError::OrderNotFound(id.to_string()))
    }

    pub fn ticket(&self, id: &str) -> Result<&SupportTicket> {
        self.tickets
            .iter()
            .find(|t| t.id() == id)
            .ok_or_else(|| StoreError::TicketNotFound(id.to_string()))
    }

    pub fn products_by_category(&self, category: Category) -> Vec<&Product> {
        self.catalog.iter().filter(|p| p.category() == category).collect()
    }

    /// Loyalty label for the signed-in user, derived from lifetime spend over
    /// non-cancelled orders.
    pub fn loyalty_tier(&self) -> Option<LoyaltyTier> {
        self.session.as_ref()?;
        let spend: Decimal = self
            .orders
            .iter()
            .filter(|o| o.status() != OrderStatus::Cancelled)
            .map(|o| o.total().amount())
            .sum();
        Some(LoyaltyTier::for_spend(spend))
    }

    /// Catalog summary handed to the chat assistant as grounding context.
    pub fn catalog_context(&self) -> String {
        let mut out = String::from("Current catalog:\n");
        for p in &self.catalog {
            out.push_str(&format!(
                "- {} ({}): {}, {} in stock\n",
                p.name(),
                p.category(),
                p.price(),
                p.stock().value(),
            ));
        }
        out
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Move to a target view, enforcing its guard. A blocked navigation names
    /// the view the presentation layer should fall back to.
    pub fn navigate(&mut self, target: View) -> Result<()> {
        match target.guard() {
            Guard::Always => {}
            Guard::RequiresSession => {
                if self.session.is_none() {
                    return Err(StoreError::NavigationBlocked { target, redirect: View::Auth });
                }
            }
            Guard::RequiresAdmin => {
                if !self.session.as_ref().is_some_and(User::is_admin) {
                    return Err(StoreError::NavigationBlocked {
                        target,
                        redirect: View::AdminAuth,
                    });
                }
            }
            Guard::CheckoutReady => {
                if self.session.is_none() {
                    return Err(StoreError::NavigationBlocked { target, redirect: View::Auth });
                }
                if self.cart.is_empty() {
                    return Err(StoreError::NavigationBlocked { target, redirect: View::Cart });
                }
            }
            Guard::Internal => {
                return Err(StoreError::NavigationBlocked { target, redirect: View::Home });
            }
        }
        debug!(%target, "navigate");
        self.view = target;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    /// Customer sign-in: fabricates a user from the submitted form.
    pub fn sign_in(&mut self, profile: SignInProfile) -> &User {
        let user = User::fabricate(profile, false);
        info!(user = %user.name(), "signed in");
        self.session.insert(user)
    }

    /// Back-office sign-in: same fabrication, admin flag set. The progress
    /// animation the storefront plays first is presentation, not security.
    pub fn sign_in_admin(&mut self, profile: SignInProfile) -> &User {
        let user = User::fabricate(profile, true);
        info!(user = %user.name(), "admin signed in");
        self.session.insert(user)
    }

    /// Clears the session and everything scoped to it, then routes home.
    pub fn sign_out(&mut self) {
        info!("signed out");
        self.session = None;
        self.wishlist.clear();
        self.view = View::Home;
    }

    /// Account deletion. With no backing store this is sign-out plus clearing
    /// the cart, but it is a distinct, confirmation-gated action in the UI.
    pub fn delete_account(&mut self) {
        info!("account deleted");
        self.cart.clear();
        self.sign_out();
    }

    pub fn save_address(&mut self, address: impl Into<String>) -> Result<()> {
        let user = self.session.as_mut().ok_or(StoreError::NotSignedIn)?;
        user.save_address(address);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Cart and wishlist
    // ------------------------------------------------------------------

    /// Add a product to the cart, snapshotting its name and unit price (with
    /// any selected variant deltas applied). Merges by product id. No stock
    /// check is made here; inventory enforcement is out of scope.
    pub fn add_to_cart(
        &mut self,
        product_id: &str,
        quantity: u32,
        selections: BTreeMap<String, String>,
    ) -> Result<()> {
        let product = self.product(product_id)?;
        let item = CartLineItem {
            product_id: product.id().to_string(),
            name: product.name().to_string(),
            unit_price: product.price_for(&selections),
            quantity: quantity.max(1),
            selections,
        };
        debug!(product_id, quantity = item.quantity, "add to cart");
        self.cart.add_item(item);
        Ok(())
    }

    pub fn update_quantity(&mut self, product_id: &str, delta: i64) -> Result<()> {
        self.cart.update_quantity(product_id, delta)?;
        Ok(())
    }

    pub fn remove_from_cart(&mut self, product_id: &str) {
        self.cart.remove_item(product_id);
    }

    /// Toggle wishlist membership; returns whether the product is now wished.
    pub fn toggle_wishlist(&mut self, product_id: &str) -> bool {
        if self.wishlist.remove(product_id) {
            false
        } else {
            self.wishlist.insert(product_id.to_string());
            true
        }
    }

    // ------------------------------------------------------------------
    // Checkout and tickets
    // ------------------------------------------------------------------

    /// Commit the cart into an order: snapshot + total are frozen, the order
    /// is prepended to the ledger, the cart is cleared, and the view moves to
    /// the confirmation screen. The steps are sequential and single-threaded.
    pub fn place_order(&mut self, contact: ContactInfo) -> Result<String> {
        if self.session.is_none() {
            return Err(StoreError::NotSignedIn);
        }
        let mut order = Order::place(&self.cart, contact)?;
        let id = order.id().to_string();
        info!(order_id = %id, total = %order.total(), "order placed");
        self.events.extend(order.take_events());
        self.orders.insert(0, order);
        self.cart.clear();
        self.view = View::OrderConfirmation;
        Ok(id)
    }

    /// File a support incident from the submission form.
    pub fn submit_ticket(&mut self, draft: TicketDraft) -> Result<String> {
        let mut ticket = SupportTicket::open(draft)?;
        let id = ticket.id().to_string();
        info!(ticket_id = %id, urgency = %ticket.urgency(), "ticket opened");
        self.events.extend(ticket.take_events());
        self.tickets.push(ticket);
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn record_event(&mut self, event: DomainEvent) {
        self.events.push(event);
    }
}
