//! # Repository Module
//!
//! SQL lives here and nowhere else.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SqliteShiftStore (store.rs)                                           │
//! │       │                                                                 │
//! │       │  db.shifts().update(&record)                                   │
//! │       ▼                                                                 │
//! │  ShiftRepository                                                       │
//! │  ├── get_by_id / list_all / list_by_status                             │
//! │  ├── insert / update (version-checked)                                 │
//! │  └── delete_by_status                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ShiftRepository`](shift::ShiftRepository) - Shift records
//! - [`OrganizationRepository`](organization::OrganizationRepository) - Organization name

pub mod organization;
pub mod shift;
