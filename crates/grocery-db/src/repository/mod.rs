//! # Repository Module
//!
//! Database repository implementations for the grocery app.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  ProductService                    CLI `items` commands                │
//! │       │                                  │                              │
//! │       │ Arc<dyn ProductStore>            │ db.grocery_list_items()      │
//! │       ▼                                  ▼                              │
//! │  ProductRepository               GroceryListItemRepository             │
//! │  ├── get_all / get               ├── get_all                           │
//! │  ├── add / update                ├── get_all_on_grocery_list_id        │
//! │  └── delete (refuses when        ├── get / add / update                │
//! │       list items reference it)   └── delete                            │
//! │       │                                  │                              │
//! │       │  SQL, one pooled connection per call                           │
//! │       ▼                                  ▼                              │
//! │  products  ◄──── FOREIGN KEY ────  grocery_list_items                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows are read into private `FromRow` structs and converted into
//! grocery-core types; no SQL type escapes this module.

pub mod grocery_list_item;
pub mod product;
