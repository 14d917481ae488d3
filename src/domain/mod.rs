//! Domain module
//!
//! Core domain types: money, product records and record filters.

pub mod error;
pub mod filter;
pub mod money;
pub mod record;

pub use error::{FilterError, RecordError};
pub use filter::{RecordFilter, SellerFilter};
pub use money::{Money, MoneyError};
pub use record::ProductRecord;
