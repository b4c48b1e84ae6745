//! Support ticket aggregate: customer incidents tracked alongside orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::domain::events::{DomainEvent, TicketEvent};
use crate::domain::value_objects::ticket_reference;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    Low,
    #[default]
    Standard,
    Critical,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Urgency::Low => "Low",
            Urgency::Standard => "Standard",
            Urgency::Critical => "Critical",
        };
        write!(f, "{label}")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    /// Allowed-transition table. Closed is terminal; a Resolved ticket may be
    /// reopened.
    pub fn can_transition_to(self, next: TicketStatus) -> bool {
        matches!(
            (self, next),
            (TicketStatus::Open, TicketStatus::InProgress)
                | (TicketStatus::Open, TicketStatus::Resolved)
                | (TicketStatus::Open, TicketStatus::Closed)
                | (TicketStatus::InProgress, TicketStatus::Resolved)
                | (TicketStatus::InProgress, TicketStatus::Closed)
                | (TicketStatus::Resolved, TicketStatus::Closed)
                | (TicketStatus::Resolved, TicketStatus::Open)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "InProgress",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Submission form for a new incident.
#[derive(Clone, Debug, Validate)]
pub struct TicketDraft {
    #[validate(length(min = 1, message = "customer is required"))]
    pub customer: String,
    #[validate(length(min = 1, message = "subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    pub category: String,
    pub urgency: Urgency,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SupportTicket {
    id: String,
    customer: String,
    subject: String,
    description: String,
    category: String,
    urgency: Urgency,
    status: TicketStatus,
    assignee: Option<String>,
    opened_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl SupportTicket {
    pub fn open(draft: TicketDraft) -> Result<Self, TicketError> {
        draft
            .validate()
            .map_err(|e| TicketError::InvalidDraft(e.to_string()))?;
        let id = ticket_reference();
        let mut ticket = Self {
            id: id.clone(),
            customer: draft.customer,
            subject: draft.subject,
            description: draft.description,
            category: draft.category,
            urgency: draft.urgency,
            status: TicketStatus::Open,
            assignee: None,
            opened_at: Utc::now(),
            events: vec![],
        };
        ticket.raise_event(DomainEvent::Ticket(TicketEvent::Opened { ticket_id: id }));
        Ok(ticket)
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn customer(&self) -> &str { &self.customer }
    pub fn subject(&self) -> &str { &self.subject }
    pub fn description(&self) -> &str { &self.description }
    pub fn category(&self) -> &str { &self.category }
    pub fn urgency(&self) -> Urgency { self.urgency }
    pub fn status(&self) -> TicketStatus { self.status }
    pub fn assignee(&self) -> Option<&str> { self.assignee.as_deref() }
    pub fn opened_at(&self) -> DateTime<Utc> { self.opened_at }

    /// Assign the ticket. Reassignment is rejected; the storefront hides the
    /// assign control once a name is set and the core makes that guard real.
    pub fn assign(&mut self, assignee: impl Into<String>) -> Result<(), TicketError> {
        if self.assignee.is_some() {
            return Err(TicketError::AlreadyAssigned);
        }
        let assignee = assignee.into();
        self.assignee = Some(assignee.clone());
        self.raise_event(DomainEvent::Ticket(TicketEvent::Assigned {
            ticket_id: self.id.clone(),
            assignee,
        }));
        Ok(())
    }

    pub fn set_status(&mut self, next: TicketStatus) -> Result<(), TicketError> {
        if !self.status.can_transition_to(next) {
            return Err(TicketError::InvalidTransition { from: self.status, to: next });
        }
        let from = self.status;
        self.status = next;
        self.raise_event(DomainEvent::Ticket(TicketEvent::StatusChanged {
            ticket_id: self.id.clone(),
            from,
            to: next,
        }));
        Ok(())
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TicketError {
    #[error("Invalid ticket submission: {0}")]
    InvalidDraft(String),
    #[error("Ticket is already assigned")]
    AlreadyAssigned,
    #[error("Ticket status cannot move from {from} to {to}")]
    InvalidTransition { from: TicketStatus, to: TicketStatus },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TicketDraft {
        TicketDraft {
            customer: "cust-1".into(),
            subject: "Order arrived damaged".into(),
            description: "The box was crushed in transit.".into(),
            category: "Shipping".into(),
            urgency: Urgency::Standard,
        }
    }

    #[test]
    fn test_open_assigns_incident_reference() {
        let ticket = SupportTicket::open(draft()).unwrap();
        assert!(ticket.id().starts_with("INC-"));
        assert_eq!(ticket.status(), TicketStatus::Open);
        assert!(ticket.assignee().is_none());
    }

    #[test]
    fn test_open_rejects_blank_subject() {
        let mut d = draft();
        d.subject = String::new();
        assert!(matches!(SupportTicket::open(d), Err(TicketError::InvalidDraft(_))));
    }

    #[test]
    fn test_assign_once() {
        let mut ticket = SupportTicket::open(draft()).unwrap();
        ticket.assign("Morgan").unwrap();
        assert_eq!(ticket.assignee(), Some("Morgan"));
        assert!(matches!(ticket.assign("Riley"), Err(TicketError::AlreadyAssigned)));
        assert_eq!(ticket.assignee(), Some("Morgan"));
    }

    #[test]
    fn test_status_transition_table() {
        let mut ticket = SupportTicket::open(draft()).unwrap();
        ticket.set_status(TicketStatus::InProgress).unwrap();
        assert!(matches!(
            ticket.set_status(TicketStatus::Open),
            Err(TicketError::InvalidTransition { .. })
        ));
        ticket.set_status(TicketStatus::Resolved).unwrap();
        // A resolved ticket can reopen; a closed one is done.
        ticket.set_status(TicketStatus::Open).unwrap();
        ticket.set_status(TicketStatus::Closed).unwrap();
        assert!(ticket.set_status(TicketStatus::Open).is_err());
    }
}
