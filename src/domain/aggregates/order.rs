//! Order aggregate: an immutable record created by committing a cart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::domain::aggregates::cart::{Cart, CartLineItem};
use crate::domain::events::{DomainEvent, OrderEvent};
use crate::domain::value_objects::{order_reference, Money};

/// Shipping contact captured at checkout. All fields are required.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct ContactInfo {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Allowed-transition table. Delivered and Cancelled are terminal.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Processing)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                | (OrderStatus::Processing, OrderStatus::Delivered)
                | (OrderStatus::Processing, OrderStatus::Cancelled)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A frozen snapshot of a cart plus shipping contact and a guarded status.
///
/// Items, total, contact and placement date never change after creation; only
/// the status moves, and only along `OrderStatus::can_transition_to`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Order {
    id: String,
    items: Vec<CartLineItem>,
    total: Money,
    status: OrderStatus,
    placed_at: DateTime<Utc>,
    contact: ContactInfo,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl Order {
    /// Commit a cart into an order. Rejects an empty cart and blank contact
    /// fields instead of leaving those checks to the presentation layer.
    pub fn place(cart: &Cart, contact: ContactInfo) -> Result<Self, OrderError> {
        contact
            .validate()
            .map_err(|e| OrderError::InvalidContact(e.to_string()))?;
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let id = order_reference();
        let total = cart.subtotal().clone();
        let mut order = Self {
            id: id.clone(),
            items: cart.items().to_vec(),
            total: total.clone(),
            status: OrderStatus::Pending,
            placed_at: Utc::now(),
            contact,
            events: vec![],
        };
        order.raise_event(DomainEvent::Order(OrderEvent::Placed {
            order_id: id,
            total: total.amount(),
        }));
        Ok(order)
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn items(&self) -> &[CartLineItem] { &self.items }
    pub fn total(&self) -> &Money { &self.total }
    pub fn status(&self) -> OrderStatus { self.status }
    pub fn placed_at(&self) -> DateTime<Utc> { self.placed_at }
    pub fn contact(&self) -> &ContactInfo { &self.contact }

    /// Recompute the total from the frozen snapshot. Audit panels display
    /// this next to the stored total; it never overwrites it.
    pub fn audited_total(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(self.total.currency()), |acc, i| {
                acc.add(&i.line_total()).unwrap_or(acc)
            })
    }

    pub fn set_status(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidTransition { from: self.status, to: next });
        }
        let from = self.status;
        self.status = next;
        self.raise_event(DomainEvent::Order(OrderEvent::StatusChanged {
            order_id: self.id.clone(),
            from,
            to: next,
        }));
        Ok(())
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum OrderError {
    #[error("Cannot place an order from an empty cart")]
    EmptyCart,
    #[error("Invalid contact details: {0}")]
    InvalidContact(String),
    #[error("Order status cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    fn contact() -> ContactInfo {
        ContactInfo { name: "A".into(), address: "B".into(), phone: "C".into() }
    }

    fn cart_with(product_id: &str, price: i64, quantity: u32) -> Cart {
        let mut cart = Cart::new("USD");
        cart.add_item(CartLineItem {
            product_id: product_id.into(),
            name: "Widget".into(),
            unit_price: Money::usd(Decimal::new(price, 0)),
            quantity,
            selections: BTreeMap::new(),
        });
        cart
    }

    #[test]
    fn test_place_freezes_cart_snapshot() {
        let cart = cart_with("P1", 100, 2);
        let order = Order::place(&cart, contact()).unwrap();
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.total().amount(), Decimal::new(200, 0));
        assert_eq!(order.audited_total(), *order.total());
        assert!(order.id().starts_with("ORD-"));
    }

    #[test]
    fn test_place_rejects_empty_cart() {
        let cart = Cart::new("USD");
        assert!(matches!(Order::place(&cart, contact()), Err(OrderError::EmptyCart)));
    }

    #[test]
    fn test_place_rejects_blank_contact() {
        let cart = cart_with("P1", 10, 1);
        let blank = ContactInfo { name: String::new(), address: "B".into(), phone: "C".into() };
        assert!(matches!(Order::place(&cart, blank), Err(OrderError::InvalidContact(_))));
    }

    #[test]
    fn test_status_transition_table() {
        let cart = cart_with("P1", 10, 1);
        let mut order = Order::place(&cart, contact()).unwrap();

        assert!(matches!(
            order.set_status(OrderStatus::Delivered),
            Err(OrderError::InvalidTransition { .. })
        ));
        order.set_status(OrderStatus::Processing).unwrap();
        order.set_status(OrderStatus::Delivered).unwrap();

        // Delivered is terminal.
        assert!(order.set_status(OrderStatus::Pending).is_err());
        assert!(order.set_status(OrderStatus::Cancelled).is_err());
        assert_eq!(order.status(), OrderStatus::Delivered);
    }

    #[test]
    fn test_order_serializes_without_events() {
        let cart = cart_with("P1", 100, 2);
        let order = Order::place(&cart, contact()).unwrap();
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["status"], "Pending");
        assert!(json["items"].is_array());
        assert!(json.get("events").is_none());
    }

    #[test]
    fn test_cancel_from_pending_and_processing() {
        let cart = cart_with("P1", 10, 1);
        let mut a = Order::place(&cart, contact()).unwrap();
        a.set_status(OrderStatus::Cancelled).unwrap();

        let mut b = Order::place(&cart, contact()).unwrap();
        b.set_status(OrderStatus::Processing).unwrap();
        b.set_status(OrderStatus::Cancelled).unwrap();
        assert!(b.set_status(OrderStatus::Processing).is_err());
    }
}
