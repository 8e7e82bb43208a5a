//! # CLI Commands Module
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs           ◄─── You are here (Output + rendering)
//! ├── product.rs       ◄─── grocery products ...   (ProductService)
//! └── grocery_list.rs  ◄─── grocery items ...      (GroceryListItemRepository)
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  grocery products show 1                                                │
//! │         │                                                               │
//! │         │ clap                                                          │
//! │         ▼                                                               │
//! │  ProductCommand::Show { id: 1 }                                         │
//! │         │                                                               │
//! │         │ product::execute(&app, cmd)                                   │
//! │         ▼                                                               │
//! │  Result<Output, CliError>                                               │
//! │         │                                                               │
//! │         │ Output::render(json)                                          │
//! │         ▼                                                               │
//! │  stdout: table, or JSON with --json                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod grocery_list;
pub mod product;

use serde::Serialize;
use std::fmt::Write as _;

use crate::error::CliError;
use grocery_core::{GroceryListItem, Product};

/// The result of a command, before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Products(Vec<Product>),
    Product(Product),
    Items(Vec<GroceryListItem>),
    Item(GroceryListItem),
}

impl Output {
    /// Renders the output as a table, or as pretty JSON.
    pub fn render(&self, json: bool) -> Result<String, CliError> {
        if json {
            return serde_json::to_string_pretty(self)
                .map_err(|e| CliError::internal(format!("Cannot encode output: {}", e)));
        }

        Ok(match self {
            Output::Products(products) => product_table(products),
            Output::Product(product) => product_table(std::slice::from_ref(product)),
            Output::Items(items) => item_table(items),
            Output::Item(item) => item_table(std::slice::from_ref(item)),
        })
    }
}

fn product_table(products: &[Product]) -> String {
    let mut out = format!(
        "{:>4}  {:<20} {:>6}  {:<10}  {:>9}\n",
        "ID", "NAME", "STOCK", "SHELF LIFE", "PRICE"
    );

    for p in products {
        let shelf_life = p
            .shelf_life
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:>4}  {:<20} {:>6}  {:<10}  {:>9}",
            p.id,
            p.name,
            p.stock,
            shelf_life,
            p.price.to_string()
        );
    }

    out
}

fn item_table(items: &[GroceryListItem]) -> String {
    let mut out = format!(
        "{:>4}  {:>4}  {:<20} {:>6}  {:>9}  {:>9}\n",
        "ID", "LIST", "PRODUCT", "AMOUNT", "PRICE", "TOTAL"
    );

    for item in items {
        let (name, price) = match &item.product {
            Some(p) => (p.name.clone(), p.price.to_string()),
            None => (format!("#{} (missing)", item.product_id), "-".to_string()),
        };
        let total = item
            .line_total()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:>4}  {:>4}  {:<20} {:>6}  {:>9}  {:>9}",
            item.id, item.grocery_list_id, name, item.amount, price, total
        );
    }

    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use grocery_core::{Money, NewProduct, ProductSummary};

    #[test]
    fn test_product_table() {
        let melk = NewProduct::new("Melk", 10, Money::from_cents(119)).into_product(1);
        let text = Output::Product(melk).render(false).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("SHELF LIFE"));
        assert!(lines[1].contains("Melk"));
        assert!(lines[1].contains("€1.19"));
    }

    #[test]
    fn test_item_table_shows_line_total() {
        let item = GroceryListItem {
            id: 1,
            grocery_list_id: 1,
            product_id: 3,
            amount: 4,
            product: Some(ProductSummary {
                id: 3,
                name: "Boter".to_string(),
                price: Money::from_cents(249),
            }),
        };
        let text = Output::Item(item).render(false).unwrap();
        assert!(text.contains("€9.96"));
    }

    #[test]
    fn test_json_output() {
        let melk = NewProduct::new("Melk", 10, Money::from_cents(119)).into_product(1);
        let text = Output::Products(vec![melk]).render(true).unwrap();

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json[0]["name"], "Melk");
        assert_eq!(json[0]["price"], 119);
    }
}
