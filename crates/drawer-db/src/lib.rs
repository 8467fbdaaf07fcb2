//! # drawer-db: Persistence Layer for the Cash Drawer
//!
//! Stores shift records and the organization name in SQLite, behind the
//! [`ShiftStore`] gateway trait.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cash Drawer Data Flow                            │
//! │                                                                         │
//! │  ShiftManager::update_live_entry                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     drawer-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  ShiftStore   │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │  (store.rs)   │    │ (shift.rs)    │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqliteStore ──┼───►│ ShiftRepo     │    │ 001_init.sql │  │   │
//! │  │   │ MemoryStore   │    │ Organization  │    │              │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │  Database (pool.rs)           │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   ▼                                     │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (drawer.db)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - SQL for shifts and the organization record
//! - [`store`] - The `ShiftStore` gateway and its two implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use drawer_db::{Database, DbConfig, ShiftStore, SqliteShiftStore};
//!
//! let db = Database::new(DbConfig::new("drawer.db")).await?;
//! let store = SqliteShiftStore::new(db);
//!
//! let shifts = store.get_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::{MemoryShiftStore, ShiftStore, SqliteShiftStore};

pub use repository::organization::OrganizationRepository;
pub use repository::shift::ShiftRepository;
