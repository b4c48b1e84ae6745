//! Domain events
use rust_decimal::Decimal;

use crate::domain::aggregates::order::OrderStatus;
use crate::domain::aggregates::ticket::TicketStatus;

#[derive(Clone, Debug)]
pub enum DomainEvent {
    Product(ProductEvent),
    Order(OrderEvent),
    Ticket(TicketEvent),
}

#[derive(Clone, Debug)]
pub enum ProductEvent {
    Created { product_id: String },
    Updated { product_id: String },
    Deleted { product_id: String },
}

#[derive(Clone, Debug)]
pub enum OrderEvent {
    Placed { order_id: String, total: Decimal },
    StatusChanged { order_id: String, from: OrderStatus, to: OrderStatus },
    Deleted { order_id: String },
}

#[derive(Clone, Debug)]
pub enum TicketEvent {
    Opened { ticket_id: String },
    Assigned { ticket_id: String, assignee: String },
    StatusChanged { ticket_id: String, from: TicketStatus, to: TicketStatus },
    Deleted { ticket_id: String },
}
