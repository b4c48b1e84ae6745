//! Admin console operations: catalog CRUD, order and ticket overrides.
//!
//! Every operation here requires an admin session. The confirmation prompts
//! that gate deletes in the UI are presentation-layer; the core exposes the
//! plain operations.

use tracing::info;

use crate::domain::aggregates::{
    OptionPatch, Order, OrderStatus, Product, ProductDraft, ProductPatch, SupportTicket,
    TicketStatus,
};
use crate::domain::events::{DomainEvent, OrderEvent, ProductEvent, TicketEvent};
use crate::store::Storefront;
use crate::{Result, StoreError};

impl Storefront {
    /// Name of the acting admin, or why there isn't one.
    fn acting_admin(&self) -> Result<String> {
        let user = self.session.as_ref().ok_or(StoreError::NotSignedIn)?;
        if !user.is_admin() {
            return Err(StoreError::AdminRequired);
        }
        Ok(user.name().to_string())
    }

    fn product_mut(&mut self, id: &str) -> Result<&mut Product> {
        self.catalog
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| StoreError::ProductNotFound(id.to_string()))
    }

    fn order_mut(&mut self, id: &str) -> Result<&mut Order> {
        self.orders
            .iter_mut()
            .find(|o| o.id() == id)
            .ok_or_else(|| StoreError::OrderNotFound(id.to_string()))
    }

    fn ticket_mut(&mut self, id: &str) -> Result<&mut SupportTicket> {
        self.tickets
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or_else(|| StoreError::TicketNotFound(id.to_string()))
    }

    // ------------------------------------------------------------------
    // Catalog CRUD
    // ------------------------------------------------------------------

    pub fn create_product(&mut self, draft: ProductDraft) -> Result<String> {
        self.acting_admin()?;
        let mut product = Product::create(draft)?;
        let id = product.id().to_string();
        info!(product_id = %id, name = %product.name(), "product created");
        let events = product.take_events();
        self.catalog.push(product);
        for e in events {
            self.record_event(e);
        }
        Ok(id)
    }

    pub fn update_product(&mut self, id: &str, patch: ProductPatch) -> Result<()> {
        self.acting_admin()?;
        let product = self.product_mut(id)?;
        product.apply(patch)?;
        let events = product.take_events();
        for e in events {
            self.record_event(e);
        }
        Ok(())
    }

    /// Remove a product from the catalog. Existing orders hold their own
    /// snapshots, so no referential check is needed.
    pub fn delete_product(&mut self, id: &str) -> Result<()> {
        self.acting_admin()?;
        let before = self.catalog.len();
        self.catalog.retain(|p| p.id() != id);
        if self.catalog.len() == before {
            return Err(StoreError::ProductNotFound(id.to_string()));
        }
        info!(product_id = %id, "product deleted");
        self.record_event(DomainEvent::Product(ProductEvent::Deleted {
            product_id: id.to_string(),
        }));
        Ok(())
    }

    // Variant editing is nested, index-based CRUD on a product.

    pub fn add_variant(&mut self, product_id: &str, axis: impl Into<String>) -> Result<()> {
        self.acting_admin()?;
        self.product_mut(product_id)?.add_variant(axis);
        Ok(())
    }

    pub fn remove_variant(&mut self, product_id: &str, index: usize) -> Result<()> {
        self.acting_admin()?;
        self.product_mut(product_id)?.remove_variant(index)?;
        Ok(())
    }

    pub fn add_option(
        &mut self,
        product_id: &str,
        variant: usize,
        label: impl Into<String>,
    ) -> Result<String> {
        self.acting_admin()?;
        let id = self.product_mut(product_id)?.add_option(variant, label)?;
        Ok(id)
    }

    pub fn remove_option(&mut self, product_id: &str, variant: usize, option: usize) -> Result<()> {
        self.acting_admin()?;
        self.product_mut(product_id)?.remove_option(variant, option)?;
        Ok(())
    }

    pub fn update_option(
        &mut self,
        product_id: &str,
        variant: usize,
        option: usize,
        patch: OptionPatch,
    ) -> Result<()> {
        self.acting_admin()?;
        self.product_mut(product_id)?.update_option(variant, option, patch)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Order ledger overrides
    // ------------------------------------------------------------------

    /// Move an order along its status machine. Transitions outside the
    /// allowed table are rejected rather than overwritten.
    pub fn update_order_status(&mut self, order_id: &str, status: OrderStatus) -> Result<()> {
        self.acting_admin()?;
        let order = self.order_mut(order_id)?;
        order.set_status(status)?;
        info!(order_id, status = %status, "order status updated");
        let events = order.take_events();
        for e in events {
            self.record_event(e);
        }
        Ok(())
    }

    pub fn delete_order(&mut self, order_id: &str) -> Result<()> {
        self.acting_admin()?;
        let before = self.orders.len();
        self.orders.retain(|o| o.id() != order_id);
        if self.orders.len() == before {
            return Err(StoreError::OrderNotFound(order_id.to_string()));
        }
        info!(order_id, "order deleted");
        self.record_event(DomainEvent::Order(OrderEvent::Deleted {
            order_id: order_id.to_string(),
        }));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Ticket workflow
    // ------------------------------------------------------------------

    /// Assign a ticket to the acting admin. Already-assigned tickets are
    /// left alone.
    pub fn assign_ticket(&mut self, ticket_id: &str) -> Result<()> {
        let assignee = self.acting_admin()?;
        let ticket = self.ticket_mut(ticket_id)?;
        ticket.assign(assignee)?;
        let events = ticket.take_events();
        for e in events {
            self.record_event(e);
        }
        Ok(())
    }

    pub fn update_ticket_status(&mut self, ticket_id: &str, status: TicketStatus) -> Result<()> {
        self.acting_admin()?;
        let ticket = self.ticket_mut(ticket_id)?;
        ticket.set_status(status)?;
        info!(ticket_id, status = %status, "ticket status updated");
        let events = ticket.take_events();
        for e in events {
            self.record_event(e);
        }
        Ok(())
    }

    pub fn delete_ticket(&mut self, ticket_id: &str) -> Result<()> {
        self.acting_admin()?;
        let before = self.tickets.len();
        self.tickets.retain(|t| t.id() != ticket_id);
        if self.tickets.len() == before {
            return Err(StoreError::TicketNotFound(ticket_id.to_string()));
        }
        info!(ticket_id, "ticket deleted");
        self.record_event(DomainEvent::Ticket(TicketEvent::Deleted {
            ticket_id: ticket_id.to_string(),
        }));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::{Category, SignInProfile, TicketDraft, Urgency};
    use crate::domain::value_objects::Money;
    use crate::store::View;
    use rust_decimal::Decimal;

    fn admin() -> SignInProfile {
        SignInProfile { name: "Morgan".into(), ..Default::default() }
    }

    fn draft(name: &str, price: i64) -> ProductDraft {
        ProductDraft {
            name: name.into(),
            price: Money::usd(Decimal::new(price, 0)),
            description: String::new(),
            image: "img/placeholder.webp".into(),
            category: Category::Electronics,
            stock: 3,
        }
    }

    fn ticket_draft() -> TicketDraft {
        TicketDraft {
            customer: "Ada".into(),
            subject: "Broken charger".into(),
            description: "Stopped charging after a week.".into(),
            category: "Product".into(),
            urgency: Urgency::Low,
        }
    }

    #[test]
    fn test_crud_requires_admin_session() {
        let mut store = Storefront::new();
        assert!(matches!(store.create_product(draft("Widget", 10)), Err(StoreError::NotSignedIn)));

        store.sign_in(SignInProfile { name: "Ada".into(), ..Default::default() });
        assert!(matches!(store.create_product(draft("Widget", 10)), Err(StoreError::AdminRequired)));

        store.sign_in_admin(admin());
        let id = store.create_product(draft("Widget", 10)).unwrap();
        assert_eq!(store.catalog().len(), 1);
        store.navigate(View::Admin).unwrap();
        store.delete_product(&id).unwrap();
        assert!(store.catalog().is_empty());
    }

    #[test]
    fn test_update_product_merges_patch() {
        let mut store = Storefront::new();
        store.sign_in_admin(admin());
        let id = store.create_product(draft("Widget", 10)).unwrap();
        store
            .update_product(
                &id,
                ProductPatch { stock: Some(0), name: Some("Widget Pro".into()), ..Default::default() },
            )
            .unwrap();
        let p = store.product(&id).unwrap();
        assert_eq!(p.name(), "Widget Pro");
        assert!(!p.is_in_stock());
        assert_eq!(p.price().amount(), Decimal::new(10, 0));
    }

    #[test]
    fn test_variant_admin_flow() {
        let mut store = Storefront::new();
        store.sign_in_admin(admin());
        let id = store.create_product(draft("Lamp", 40)).unwrap();
        store.add_variant(&id, "Color").unwrap();
        store.add_option(&id, 0, "Black").unwrap();
        store.add_option(&id, 0, "White").unwrap();
        store
            .update_option(&id, 0, 1, OptionPatch { price_delta: Some(Decimal::new(5, 0)), ..Default::default() })
            .unwrap();
        store.remove_option(&id, 0, 0).unwrap();
        assert_eq!(store.product(&id).unwrap().variants()[0].options.len(), 1);
        store.remove_variant(&id, 0).unwrap();
        assert!(store.product(&id).unwrap().variants().is_empty());
    }

    #[test]
    fn test_order_status_override_is_guarded() {
        let mut store = Storefront::new();
        store.sign_in_admin(admin());
        let id = store.create_product(draft("Widget", 10)).unwrap();
        store.add_to_cart(&id, 1, Default::default()).unwrap();
        let order_id = store
            .place_order(crate::domain::aggregates::ContactInfo {
                name: "A".into(),
                address: "B".into(),
                phone: "C".into(),
            })
            .unwrap();

        assert!(store.update_order_status(&order_id, OrderStatus::Delivered).is_err());
        store.update_order_status(&order_id, OrderStatus::Processing).unwrap();
        store.update_order_status(&order_id, OrderStatus::Delivered).unwrap();
        assert!(store.update_order_status(&order_id, OrderStatus::Pending).is_err());

        store.delete_order(&order_id).unwrap();
        assert!(store.orders().is_empty());
        assert!(matches!(store.delete_order(&order_id), Err(StoreError::OrderNotFound(_))));
    }

    #[test]
    fn test_ticket_assignment_uses_acting_admin_name() {
        let mut store = Storefront::new();
        let id = store.submit_ticket(ticket_draft()).unwrap();

        store.sign_in_admin(admin());
        store.assign_ticket(&id).unwrap();
        assert_eq!(store.ticket(&id).unwrap().assignee(), Some("Morgan"));
        assert!(matches!(
            store.assign_ticket(&id),
            Err(StoreError::Ticket(crate::domain::aggregates::TicketError::AlreadyAssigned))
        ));

        store.update_ticket_status(&id, TicketStatus::InProgress).unwrap();
        assert!(store.update_ticket_status(&id, TicketStatus::Open).is_err());
        store.update_ticket_status(&id, TicketStatus::Resolved).unwrap();
        store.delete_ticket(&id).unwrap();
        assert!(store.tickets().is_empty());
    }
}
