//! # Domain Types
//!
//! Core domain types used throughout the grocery app.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌──────────────────────┐                   │
//! │  │    Product      │ 1    * │   GroceryListItem    │                   │
//! │  │  ─────────────  │◄───────│  ──────────────────  │                   │
//! │  │  id             │        │  id                  │                   │
//! │  │  name           │        │  grocery_list_id     │                   │
//! │  │  stock          │        │  product_id (FK)     │                   │
//! │  │  shelf_life     │        │  amount              │                   │
//! │  │  price (Money)  │        │  product: Option<    │                   │
//! │  └─────────────────┘        │    ProductSummary>   │                   │
//! │                             └──────────────────────┘                   │
//! │  ┌─────────────────┐                                                   │
//! │  │ ProductSummary  │  Joined snapshot: id, name, price only.           │
//! │  └─────────────────┘  Stock and shelf life are not carried.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Input Types
//! `NewProduct` and `NewGroceryListItem` carry no id: ids are always
//! assigned by the store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::DEFAULT_ITEM_AMOUNT;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier, assigned by the store.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Pieces in stock.
    pub stock: i64,

    /// Best-before date ("THT"), when known.
    #[ts(as = "Option<String>")]
    pub shelf_life: Option<NaiveDate>,

    /// Unit price.
    pub price: Money,
}

impl Product {
    /// Returns the product with its input fields replaced by `changes`.
    pub fn with_changes(&self, changes: NewProduct) -> Product {
        Product {
            id: self.id,
            name: changes.name,
            stock: changes.stock,
            shelf_life: changes.shelf_life,
            price: changes.price,
        }
    }

    /// Short form used when the product is embedded in a list item.
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
        }
    }
}

/// Input for adding a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub stock: i64,
    #[ts(as = "Option<String>")]
    pub shelf_life: Option<NaiveDate>,
    pub price: Money,
}

impl NewProduct {
    /// Creates the input for a product without a shelf-life date.
    pub fn new(name: impl Into<String>, stock: i64, price: Money) -> Self {
        NewProduct {
            name: name.into(),
            stock,
            shelf_life: None,
            price,
        }
    }

    /// Sets the shelf-life date.
    pub fn shelf_life(mut self, date: NaiveDate) -> Self {
        self.shelf_life = Some(date);
        self
    }

    /// Strips surrounding whitespace from the name.
    pub fn trimmed(mut self) -> Self {
        let trimmed = self.name.trim();
        if trimmed.len() != self.name.len() {
            self.name = trimmed.to_string();
        }
        self
    }

    /// Turns the input into a stored product with the given id.
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            stock: self.stock,
            shelf_life: self.shelf_life,
            price: self.price,
        }
    }
}

/// The part of a product that is joined onto a grocery list item.
///
/// Reflects name and price at read time; it is not a live reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    pub price: Money,
}

// =============================================================================
// Grocery List Item
// =============================================================================

/// A line on a grocery list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GroceryListItem {
    /// Unique identifier, assigned by the database.
    pub id: i64,

    /// The grocery list this line belongs to.
    pub grocery_list_id: i64,

    /// The referenced product.
    pub product_id: i64,

    /// Number of pieces.
    pub amount: i64,

    /// Joined product snapshot, `None` when the product row is missing.
    pub product: Option<ProductSummary>,
}

impl GroceryListItem {
    /// Price × amount, when the product snapshot is present and the
    /// total fits in cents.
    pub fn line_total(&self) -> Option<Money> {
        self.product
            .as_ref()
            .and_then(|p| p.price.checked_mul(self.amount))
    }
}

/// Input for adding a grocery list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewGroceryListItem {
    pub grocery_list_id: i64,
    pub product_id: i64,
    pub amount: i64,
}

impl NewGroceryListItem {
    /// Creates an item input with the default amount.
    pub fn new(grocery_list_id: i64, product_id: i64) -> Self {
        NewGroceryListItem {
            grocery_list_id,
            product_id,
            amount: DEFAULT_ITEM_AMOUNT,
        }
    }

    /// Sets the amount.
    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_defaults() {
        let input = NewProduct::new("Kaas", 5, Money::from_cents(350));
        assert_eq!(input.shelf_life, None);

        let date = NaiveDate::from_ymd_opt(2025, 9, 30).unwrap();
        let input = input.shelf_life(date);
        assert_eq!(input.shelf_life, Some(date));
    }

    #[test]
    fn test_trimmed_name() {
        let input = NewProduct::new("  Kaas \t", 5, Money::from_cents(350)).trimmed();
        assert_eq!(input.name, "Kaas");
        assert_eq!(NewProduct::new("Oude kaas", 1, Money::zero()).trimmed().name, "Oude kaas");
    }

    #[test]
    fn test_with_changes_keeps_id() {
        let product = NewProduct::new("Kaas", 5, Money::from_cents(350)).into_product(4);
        let changed = product.with_changes(NewProduct::new("Oude kaas", 2, Money::from_cents(400)));

        assert_eq!(changed.id, 4);
        assert_eq!(changed.name, "Oude kaas");
        assert_eq!(changed.price.cents(), 400);
    }

    #[test]
    fn test_summary_drops_stock() {
        let product = NewProduct::new("Melk", 10, Money::from_cents(119)).into_product(1);
        let summary = product.summary();
        assert_eq!(
            summary,
            ProductSummary {
                id: 1,
                name: "Melk".to_string(),
                price: Money::from_cents(119),
            }
        );
    }

    #[test]
    fn test_new_item_default_amount() {
        let item = NewGroceryListItem::new(1, 2);
        assert_eq!(item.amount, DEFAULT_ITEM_AMOUNT);
        assert_eq!(item.amount(4).amount, 4);
    }

    #[test]
    fn test_line_total() {
        let mut item = GroceryListItem {
            id: 1,
            grocery_list_id: 1,
            product_id: 1,
            amount: 3,
            product: None,
        };
        assert_eq!(item.line_total(), None);

        item.product = Some(ProductSummary {
            id: 1,
            name: "Melk".to_string(),
            price: Money::from_cents(119),
        });
        assert_eq!(item.line_total(), Some(Money::from_cents(357)));

        item.amount = i64::MAX;
        assert_eq!(item.line_total(), None);
    }

    #[test]
    fn test_product_json_shape() {
        let product = NewProduct::new("Melk", 10, Money::from_cents(119)).into_product(1);
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["shelfLife"], serde_json::Value::Null);
        assert_eq!(json["price"], 119);
    }
}
