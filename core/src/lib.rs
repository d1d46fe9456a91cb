//! salesdash-core: synthetic supermarket sales data, SQLite analytics,
//! and the textual dashboard report.
//!
//! Pipeline stages, always run in this order:
//!   1. generator — deterministic synthetic transactions + line items
//!   2. export    — flat CSV files (transactions, items, summary)
//!   3. store     — bulk load into SQLite (replace-entire-dataset)
//!   4. analytics — the fixed aggregation query set
//!   5. report    — rendered insights for the dashboard layer
//!
//! RULE: all randomness flows through an explicitly seeded SalesRng;
//! nothing in this crate calls a platform RNG.

pub mod analytics;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod model;
pub mod report;
pub mod rng;
pub mod store;
