//! # dhaba-db: Database Layer for Dhaba POS
//!
//! This crate provides database access for the Dhaba POS system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dhaba POS Data Flow                              │
//! │                                                                         │
//! │  Service call (finalize_bill, complete_order, ...)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     dhaba-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  menu.rs      │    │  (embedded)  │  │   │
//! │  │   │               │    │  transaction  │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  order.rs     │    │ 001_init.sql │  │   │
//! │  │   │ + order feed  │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (dhaba.db)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation, configuration, order feed
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (menu, transaction, order)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dhaba_db::{Database, DbConfig};
//!
//! let config = DbConfig::new("path/to/dhaba.db");
//! let db = Database::new(config).await?;
//!
//! let menu = db.menu_items().list_all().await?;
//! let mut feed = db.subscribe_orders();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::menu::MenuRepository;
pub use repository::order::OrderRepository;
pub use repository::transaction::TransactionRepository;
