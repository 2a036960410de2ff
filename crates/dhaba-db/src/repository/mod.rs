//! # Repository Module
//!
//! Database repository implementations for Dhaba POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Service call                                                          │
//! │       │                                                                 │
//! │       │  db.transactions().insert(&tx)                                  │
//! │       ▼                                                                 │
//! │  TransactionRepository                                                 │
//! │  ├── list_all(&self)                                                   │
//! │  ├── insert(&self, tx)                                                 │
//! │  ├── update(&self, tx)                                                 │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Can swap database implementations                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`menu::MenuRepository`] - Menu item CRUD
//! - [`transaction::TransactionRepository`] - Finalized bill storage
//! - [`order::OrderRepository`] - Kitchen orders + insert notifications

pub mod menu;
pub mod order;
pub mod transaction;
