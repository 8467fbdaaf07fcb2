//! # drawer-service: Shift Lifecycle for the Cash Drawer
//!
//! The entry point for a UI. Combines the pure rules of `drawer-core`
//! with the storage of `drawer-db`.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. telemetry::init_tracing()      RUST_LOG or info,drawer=debug       │
//! │  2. DrawerConfig::load()           env > config.toml > defaults        │
//! │  3. ShiftManager::from_config()    SQLite + migrations + report dir    │
//! │  4. manager.load_shifts()          active / closed board for the UI    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`lifecycle`] - `ShiftManager`: start, count, close, history
//! - [`report`] - Report sinks (text files on disk)
//! - [`config`] - `DrawerConfig`
//! - [`error`] - `ServiceError` with UI error codes
//! - [`telemetry`] - Tracing subscriber setup
//!
//! ## Example
//!
//! ```rust,ignore
//! use drawer_service::{DrawerConfig, ShiftManager};
//! use drawer_core::{CashKind, Money};
//!
//! drawer_service::telemetry::init_tracing();
//! let config = DrawerConfig::load()?;
//! let manager = ShiftManager::from_config(&config).await?;
//!
//! let shift = manager.start_shift("5", "Dana", None, opening).await?;
//! let shift = manager
//!     .update_live_entry(&shift, CashKind::Coin, Money::from_cents(25), 4)
//!     .await?;
//! let closed = manager.end_shift(&shift, Money::from_dollars(10)).await?;
//! ```

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod report;
pub mod telemetry;

pub use config::{ConfigError, DrawerConfig};
pub use error::{ErrorCode, ServiceError, ServiceResult};
pub use lifecycle::{ClosedShift, ShiftManager};
pub use report::{DirectoryReportSink, ReportError, ReportSink};
