//! Product aggregate: catalog entries and their variant axes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use crate::domain::events::{DomainEvent, ProductEvent};
use crate::domain::value_objects::{Money, Quantity};

/// Fixed catalog taxonomy. The storefront never grows categories at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Audio,
    Wearables,
    Accessories,
    Home,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Electronics,
        Category::Audio,
        Category::Wearables,
        Category::Accessories,
        Category::Home,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Audio => "Audio",
            Category::Wearables => "Wearables",
            Category::Accessories => "Accessories",
            Category::Home => "Home",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One axis of product variation (e.g. "Color") and its ordered options.
///
/// Variants carry no stable id of their own; the admin console addresses them
/// by index. Only options have persistent ids.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Variant {
    pub axis: String,
    pub options: Vec<VariantOption>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariantOption {
    pub id: String,
    pub label: String,
    pub price_delta: Option<Decimal>,
    pub stock_delta: Option<i32>,
}

impl VariantOption {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            label: label.into(),
            price_delta: None,
            stock_delta: None,
        }
    }
}

/// Fields for creating a product through the admin console.
#[derive(Clone, Debug)]
pub struct ProductDraft {
    pub name: String,
    pub price: Money,
    pub description: String,
    pub image: String,
    pub category: Category,
    pub stock: u32,
}

/// Partial edit: `Some` fields overwrite, `None` fields are left alone.
#[derive(Clone, Debug, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<Category>,
    pub stock: Option<u32>,
}

/// Partial edit of a variant option.
#[derive(Clone, Debug, Default)]
pub struct OptionPatch {
    pub label: Option<String>,
    pub price_delta: Option<Decimal>,
    pub stock_delta: Option<i32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    id: String,
    name: String,
    price: Money,
    description: String,
    image: String,
    category: Category,
    stock: Quantity,
    variants: Vec<Variant>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl Product {
    pub fn create(draft: ProductDraft) -> Result<Self, ProductError> {
        if draft.name.trim().is_empty() {
            return Err(ProductError::MissingName);
        }
        if draft.price.is_negative() {
            return Err(ProductError::NegativePrice);
        }
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let mut product = Self {
            id: id.clone(),
            name: draft.name,
            price: draft.price,
            description: draft.description,
            image: draft.image,
            category: draft.category,
            stock: Quantity::new(draft.stock),
            variants: vec![],
            created_at: now,
            updated_at: now,
            events: vec![],
        };
        product.raise_event(DomainEvent::Product(ProductEvent::Created { product_id: id }));
        Ok(product)
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn price(&self) -> &Money { &self.price }
    pub fn description(&self) -> &str { &self.description }
    pub fn image(&self) -> &str { &self.image }
    pub fn category(&self) -> Category { self.category }
    pub fn stock(&self) -> Quantity { self.stock }
    pub fn variants(&self) -> &[Variant] { &self.variants }
    pub fn is_in_stock(&self) -> bool { !self.stock.is_zero() }

    /// Merge a partial edit into the product.
    pub fn apply(&mut self, patch: ProductPatch) -> Result<(), ProductError> {
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(ProductError::MissingName);
            }
            self.name = name;
        }
        if let Some(price) = patch.price {
            if price.is_negative() {
                return Err(ProductError::NegativePrice);
            }
            self.price = price;
        }
        if let Some(description) = patch.description { self.description = description; }
        if let Some(image) = patch.image { self.image = image; }
        if let Some(category) = patch.category { self.category = category; }
        if let Some(stock) = patch.stock { self.stock = Quantity::new(stock); }
        self.touch();
        self.raise_event(DomainEvent::Product(ProductEvent::Updated {
            product_id: self.id.clone(),
        }));
        Ok(())
    }

    pub fn add_variant(&mut self, axis: impl Into<String>) {
        self.variants.push(Variant { axis: axis.into(), options: vec![] });
        self.touch();
    }

    pub fn remove_variant(&mut self, index: usize) -> Result<(), ProductError> {
        if index >= self.variants.len() {
            return Err(ProductError::VariantOutOfRange(index));
        }
        self.variants.remove(index);
        self.touch();
        Ok(())
    }

    /// Append an option to a variant; returns the generated option id.
    pub fn add_option(&mut self, variant: usize, label: impl Into<String>) -> Result<String, ProductError> {
        let slot = self
            .variants
            .get_mut(variant)
            .ok_or(ProductError::VariantOutOfRange(variant))?;
        let option = VariantOption::new(label);
        let id = option.id.clone();
        slot.options.push(option);
        self.touch();
        Ok(id)
    }

    pub fn remove_option(&mut self, variant: usize, option: usize) -> Result<(), ProductError> {
        let slot = self
            .variants
            .get_mut(variant)
            .ok_or(ProductError::VariantOutOfRange(variant))?;
        if option >= slot.options.len() {
            return Err(ProductError::OptionOutOfRange(option));
        }
        slot.options.remove(option);
        self.touch();
        Ok(())
    }

    pub fn update_option(
        &mut self,
        variant: usize,
        option: usize,
        patch: OptionPatch,
    ) -> Result<(), ProductError> {
        let slot = self
            .variants
            .get_mut(variant)
            .ok_or(ProductError::VariantOutOfRange(variant))?;
        let target = slot
            .options
            .get_mut(option)
            .ok_or(ProductError::OptionOutOfRange(option))?;
        if let Some(label) = patch.label { target.label = label; }
        if let Some(delta) = patch.price_delta { target.price_delta = Some(delta); }
        if let Some(delta) = patch.stock_delta { target.stock_delta = Some(delta); }
        self.touch();
        Ok(())
    }

    /// Unit price for a set of variant selections (axis name -> option label).
    ///
    /// Unknown axes or labels contribute nothing; selections are advisory and
    /// the base price is the floor.
    pub fn price_for(&self, selections: &BTreeMap<String, String>) -> Money {
        let delta = self
            .variants
            .iter()
            .filter_map(|v| {
                let chosen = selections.get(&v.axis)?;
                let option = v.options.iter().find(|o| &o.label == chosen)?;
                option.price_delta
            })
            .sum::<Decimal>();
        self.price.offset(delta)
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
    fn touch(&mut self) { self.updated_at = Utc::now(); }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProductError {
    #[error("Product name is required")]
    MissingName,
    #[error("Product price cannot be negative")]
    NegativePrice,
    #[error("No variant at index {0}")]
    VariantOutOfRange(usize),
    #[error("No variant option at index {0}")]
    OptionOutOfRange(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, price: i64) -> ProductDraft {
        ProductDraft {
            name: name.into(),
            price: Money::usd(Decimal::new(price, 0)),
            description: String::new(),
            image: "img/placeholder.webp".into(),
            category: Category::Electronics,
            stock: 5,
        }
    }

    #[test]
    fn test_create_rejects_blank_name() {
        assert!(matches!(Product::create(draft("  ", 10)), Err(ProductError::MissingName)));
    }

    #[test]
    fn test_create_rejects_negative_price() {
        let mut d = draft("Widget", 10);
        d.price = Money::usd(Decimal::new(-1, 0));
        assert!(matches!(Product::create(d), Err(ProductError::NegativePrice)));
    }

    #[test]
    fn test_patch_merges_only_set_fields() {
        let mut p = Product::create(draft("Widget", 10)).unwrap();
        p.apply(ProductPatch { price: Some(Money::usd(Decimal::new(25, 0))), ..Default::default() })
            .unwrap();
        assert_eq!(p.name(), "Widget");
        assert_eq!(p.price().amount(), Decimal::new(25, 0));
    }

    #[test]
    fn test_variant_index_crud() {
        let mut p = Product::create(draft("Lamp", 40)).unwrap();
        p.add_variant("Color");
        let id = p.add_option(0, "Black").unwrap();
        p.add_option(0, "White").unwrap();
        assert_eq!(p.variants()[0].options.len(), 2);
        assert_eq!(p.variants()[0].options[0].id, id);

        p.update_option(0, 1, OptionPatch { price_delta: Some(Decimal::new(5, 0)), ..Default::default() })
            .unwrap();
        assert_eq!(p.variants()[0].options[1].price_delta, Some(Decimal::new(5, 0)));

        p.remove_option(0, 0).unwrap();
        assert_eq!(p.variants()[0].options.len(), 1);
        p.remove_variant(0).unwrap();
        assert!(p.variants().is_empty());
        assert!(matches!(p.remove_variant(0), Err(ProductError::VariantOutOfRange(0))));
    }

    #[test]
    fn test_price_for_applies_selected_deltas() {
        let mut p = Product::create(draft("Lamp", 40)).unwrap();
        p.add_variant("Size");
        p.add_option(0, "Large").unwrap();
        p.update_option(0, 0, OptionPatch { price_delta: Some(Decimal::new(10, 0)), ..Default::default() })
            .unwrap();

        let mut selections = BTreeMap::new();
        selections.insert("Size".to_string(), "Large".to_string());
        assert_eq!(p.price_for(&selections).amount(), Decimal::new(50, 0));

        selections.insert("Size".to_string(), "Unknown".to_string());
        assert_eq!(p.price_for(&selections).amount(), Decimal::new(40, 0));
    }
}
