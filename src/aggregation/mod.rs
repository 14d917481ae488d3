//! Aggregation module
//!
//! Pure, synchronous totals over product records. Every summary view
//! (global listing, seller detail, purchase detail) goes through here, so
//! they all share one set of semantics.

mod result;

pub use result::AggregateResult;

use crate::domain::ProductRecord;

/// Sum a collection of records in a single pass.
///
/// Never fails: an empty input yields all-zero totals, malformed
/// numbers were already coerced to zero when the records were built, and
/// totals saturate rather than overflow.
/// Stored profit values are summed as-is.
pub fn aggregate<'a, I>(records: I) -> AggregateResult
where
    I: IntoIterator<Item = &'a ProductRecord>,
{
    let mut drifted = 0usize;
    let totals = records.into_iter().fold(AggregateResult::zero(), |totals, record| {
        if record.has_profit_drift() {
            drifted += 1;
        }
        totals.apply(record)
    });

    if drifted > 0 {
        tracing::debug!(drifted, "Stored profit differs from sale minus purchase");
    }

    totals
}

/// Keep the records accepted by `predicate`, then aggregate them.
pub fn filter_then_aggregate<'a, I, P>(records: I, predicate: P) -> AggregateResult
where
    I: IntoIterator<Item = &'a ProductRecord>,
    P: Fn(&ProductRecord) -> bool,
{
    aggregate(records.into_iter().filter(|record| predicate(*record)))
}
