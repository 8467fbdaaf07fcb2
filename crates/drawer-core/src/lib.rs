//! # drawer-core: Pure Business Logic for the Cash Drawer
//!
//! This crate is the **heart** of the cash drawer. It contains the counting,
//! reconciliation and reporting rules as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cash Drawer Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser UI                                   │   │
//! │  │    Opening count ──► Live count ──► End shift ──► Reports       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               drawer-service (ShiftManager)                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ drawer-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  money   │ │  ledger  │ │ summary  │ │  report  │          │   │
//! │  │   │  Money   │ │  upsert  │ │summarize │ │ShiftRepo.│          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    drawer-db (Database Layer)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CashEntry, ShiftRecord, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`ledger`] - One entry per (kind, denomination), upsert semantics
//! - [`summary`] - Opening vs. closing reconciliation
//! - [`shift`] - Selection and close preview
//! - [`report`] - Shift and history report documents
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use drawer_core::ledger::{ledger_total, upsert};
//! use drawer_core::{CashKind, Money};
//!
//! let count = upsert(&[], CashKind::Bill, Money::from_dollars(20), 2).unwrap();
//! let count = upsert(&count, CashKind::Coin, Money::from_cents(25), 4).unwrap();
//!
//! assert_eq!(ledger_total(&count).to_string(), "$41.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod money;
pub mod report;
pub mod shift;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::Ledger;
pub use money::Money;
pub use report::{HistoryReport, ShiftReport};
pub use shift::{ClosePreview, ShiftBoard};
pub use summary::{Reconciliation, ReconciliationRow};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Key of the single organization-name record.
pub const DEFAULT_ORGANIZATION_KEY: &str = "default";

/// Maximum pieces on one entry line.
///
/// Nobody keeps 100,000 of anything in a till; larger numbers are typos.
pub const MAX_ENTRY_QUANTITY: i64 = 100_000;

/// Largest accepted denomination, in cents ($100,000).
///
/// Bills top out at $100; rolls and receipts stay well below this.
pub const MAX_DENOMINATION_CENTS: i64 = 10_000_000;

/// Maximum length of drawer numbers, cashier and organization names.
pub const MAX_NAME_LEN: usize = 100;
