//! Summary module
//!
//! Read-side views over the product store: fetch the records a view needs,
//! apply the caller's filter, aggregate.

mod service;

pub use service::{Summary, SummaryService};
