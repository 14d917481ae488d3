//! stock_summary Library
//!
//! Inventory summaries: product totals by seller, provider and purchase.
//! Re-exports modules for integration testing and the binaries.

pub mod aggregation;
pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod store;
pub mod summary;

mod error;

pub use aggregation::{aggregate, filter_then_aggregate, AggregateResult};
pub use config::Config;
pub use domain::{Money, ProductRecord, RecordFilter, SellerFilter};
pub use error::{AppError, AppResult};
