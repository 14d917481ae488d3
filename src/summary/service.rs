//! Summary Service
//!
//! One method per dashboard view. All of them filter first and then call
//! the same aggregation, so the totals agree across views.

use serde::Serialize;

use crate::aggregation::{filter_then_aggregate, AggregateResult};
use crate::domain::{ProductRecord, RecordFilter};
use crate::store::{ProductStore, StoreError};

/// Filtered records with their totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub products: Vec<ProductRecord>,
    pub totals: AggregateResult,
}

impl Summary {
    fn empty() -> Self {
        Self {
            products: Vec::new(),
            totals: AggregateResult::zero(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SummaryService {
    store: ProductStore,
}

impl SummaryService {
    pub fn new(store: ProductStore) -> Self {
        Self { store }
    }

    /// Apply a filter to already-fetched records and aggregate the survivors.
    pub fn summarize(records: Vec<ProductRecord>, filter: &RecordFilter) -> Summary {
        if records.is_empty() {
            return Summary::empty();
        }

        let totals = filter_then_aggregate(&records, |record| filter.matches(record));
        let products = if filter.is_empty() {
            records
        } else {
            records.into_iter().filter(|record| filter.matches(record)).collect()
        };

        Summary { products, totals }
    }

    /// Global product listing
    pub async fn product_summary(&self, filter: &RecordFilter) -> Result<Summary, StoreError> {
        let records = self.store.list_products().await?;
        let summary = Self::summarize(records, filter);

        tracing::debug!(
            backend = self.store.backend(),
            matched = summary.products.len(),
            total_quantity = summary.totals.total_quantity,
            "Product summary computed"
        );

        Ok(summary)
    }

    /// Seller detail view
    pub async fn seller_summary(&self, seller_id: &str, filter: &RecordFilter) -> Result<Summary, StoreError> {
        let records = self.store.list_by_seller(seller_id).await?;
        let summary = Self::summarize(records, filter);

        tracing::debug!(
            seller_id,
            matched = summary.products.len(),
            total_sale_value = %summary.totals.total_sale_value,
            "Seller summary computed"
        );

        Ok(summary)
    }

    /// Purchase detail view
    pub async fn purchase_summary(&self, purchase_id: &str, filter: &RecordFilter) -> Result<Summary, StoreError> {
        let records = self.store.list_by_purchase(purchase_id).await?;
        let summary = Self::summarize(records, filter);

        tracing::debug!(
            purchase_id,
            matched = summary.products.len(),
            total_purchase_value = %summary.totals.total_purchase_value,
            "Purchase summary computed"
        );

        Ok(summary)
    }

    pub async fn get_product(&self, id: &str) -> Result<Option<ProductRecord>, StoreError> {
        self.store.get_product(id).await
    }
}
