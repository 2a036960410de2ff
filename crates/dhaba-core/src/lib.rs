//! # dhaba-core: Pure Business Logic for Dhaba POS
//!
//! This crate is the **heart** of Dhaba POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dhaba POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (web)                                │   │
//! │  │    Tables UI ──► Order UI ──► Bill UI ──► History / Kitchen    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    dhaba-service                                 │   │
//! │  │    BillingSession, FloorSession, KitchenFeed, MenuService       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dhaba-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ business  │  │ aggregate │  │ numbering │  │   floor   │  │   │
//! │  │   │   day     │  │DailyTotal │  │ bill/order│  │  25 tables│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    dhaba-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, BillLine, Transaction, Order, Table)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`businessday`] - 4 AM IST business-day calculator
//! - [`aggregate`] - Daily transaction aggregation and filtering
//! - [`numbering`] - Bill and order identifier generation
//! - [`floor`] - In-memory table/order state tracker
//! - [`bill`] - Billing cart and bill finalization
//! - [`export`] - CSV export rendering
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod bill;
pub mod businessday;
pub mod error;
pub mod export;
pub mod floor;
pub mod money;
pub mod numbering;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use dhaba_core::Money` instead of
// `use dhaba_core::money::Money`

pub use aggregate::{daily_totals, filter_daily, flatten_for_export, DailyTotal, DateRange, ExportRow};
pub use bill::{Bill, BillCart, RestaurantInfo, RESTAURANT_INFO};
pub use businessday::BusinessDay;
pub use error::{CoreError, ValidationError};
pub use floor::{generate_tables, FloorPlan};
pub use money::Money;
pub use numbering::{new_order_number, next_bill_number, order_number_at};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Hour (in IST) at which a new business day begins.
///
/// ## Business Reason
/// The restaurant trades past midnight; a bill settled at 01:30 belongs to
/// the previous evening's books. The operating day runs 4:00 AM to 3:59:59 AM.
pub const BUSINESS_DAY_START_HOUR: u32 = 4;

/// Table blocks on the floor. Five blocks of five tables each.
pub const TABLE_BLOCK_COUNT: usize = 5;

/// Tables per block.
pub const TABLES_PER_BLOCK: u8 = 5;

/// Maximum quantity for a single bill line.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum length of a menu item name.
pub const MAX_NAME_LENGTH: usize = 200;
