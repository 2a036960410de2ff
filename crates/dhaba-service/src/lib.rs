//! # dhaba-service: Stateful Application Services for Dhaba POS
//!
//! The layer between the web frontend and the pure core / database crates.
//! Each screen of the app has a dedicated session or service type that owns
//! that screen's state and sequences its database calls.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dhaba POS Services                               │
//! │                                                                         │
//! │  Frontend screen          Service (THIS CRATE)        Depends on       │
//! │  ───────────────          ────────────────────        ──────────       │
//! │  Billing / History   ──►  BillingSession          ──► core + db        │
//! │  Tables / Order      ──►  FloorSession            ──► core + db        │
//! │  Kitchen             ──►  KitchenFeed             ──► db (feed)        │
//! │  Menu admin          ──►  MenuService             ──► core + db        │
//! │                                                                         │
//! │  Shared rule: pure state changes commit only AFTER the database        │
//! │  write succeeds (persist-then-commit), so a failed save never          │
//! │  loses the operator's work.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`billing`] - Bill cart, transaction history, CSV export
//! - [`floor`] - Table selection and kitchen-order completion
//! - [`kitchen`] - Live pending-order feed with de-duplication
//! - [`menu`] - Menu CRUD with a read-through cache
//! - [`error`] - The error shape the frontend receives
//! - [`logging`] - Tracing subscriber setup

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod floor;
pub mod kitchen;
pub mod logging;
pub mod menu;

// =============================================================================
// Re-exports
// =============================================================================

pub use billing::BillingSession;
pub use error::{ErrorCode, ServiceError, ServiceResult};
pub use floor::FloorSession;
pub use kitchen::KitchenFeed;
pub use menu::MenuService;
