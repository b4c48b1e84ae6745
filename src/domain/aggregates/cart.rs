//! Cart aggregate: the mutable pre-purchase selection for the current session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::value_objects::Money;

/// A frozen product snapshot plus a quantity and the chosen variant options
/// (axis name -> option label).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CartLineItem {
    pub product_id: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub selections: BTreeMap<String, String>,
}

impl CartLineItem {
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLineItem>,
    subtotal: Money,
    currency: String,
    updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(currency: &str) -> Self {
        Self {
            items: vec![],
            subtotal: Money::zero(currency),
            currency: currency.to_string(),
            updated_at: Utc::now(),
        }
    }

    pub fn items(&self) -> &[CartLineItem] { &self.items }
    pub fn subtotal(&self) -> &Money { &self.subtotal }
    pub fn line_count(&self) -> usize { self.items.len() }
    pub fn unit_count(&self) -> u32 { self.items.iter().map(|i| i.quantity).sum() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Add a line, merging by product id.
    ///
    /// Merge identity is the product id alone; a line added with different
    /// variant selections folds into the existing line, which keeps that
    /// line's snapshot. That matches the storefront's behavior and is left
    /// as-is deliberately.
    pub fn add_item(&mut self, item: CartLineItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == item.product_id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            self.items.push(item);
        }
        self.recalculate();
    }

    /// Adjust a line's quantity by a signed delta, flooring at 1. A line never
    /// leaves the cart through this path, only through `remove_item`.
    pub fn update_quantity(&mut self, product_id: &str, delta: i64) -> Result<(), CartError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or_else(|| CartError::ItemNotFound(product_id.to_string()))?;
        // Clamp into u32 range before converting; a bare cast would wrap an
        // oversized delta back through zero.
        item.quantity = (i64::from(item.quantity).saturating_add(delta))
            .clamp(1, i64::from(u32::MAX)) as u32;
        self.recalculate();
        Ok(())
    }

    /// Remove a line. Removing an absent line is a no-op.
    pub fn remove_item(&mut self, product_id: &str) {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        if self.items.len() != before {
            self.recalculate();
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.recalculate();
    }

    fn recalculate(&mut self) {
        self.subtotal = self
            .items
            .iter()
            .fold(Money::zero(&self.currency), |acc, i| acc.add(&i.line_total()).unwrap_or(acc));
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CartError {
    #[error("No cart line for product {0}")]
    ItemNotFound(String),
}
