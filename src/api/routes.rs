//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregation::{filter_then_aggregate, AggregateResult};
use crate::domain::{FilterError, ProductRecord, RecordFilter};
use crate::error::{AppError, AppResult};
use crate::summary::{Summary, SummaryService};

// =========================================================================
// Request/Response types
// =========================================================================

/// Raw documents to aggregate, with an optional filter
#[derive(Debug, Serialize, Deserialize)]
pub struct AggregateRequest {
    pub records: Vec<Value>,
    #[serde(default)]
    pub filter: RecordFilter,
}

/// Filter query parameters shared by the listing and detail views
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SummaryQuery {
    /// Free text over description, size and code
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub unassigned_seller: bool,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub purchase: Option<String>,
}

impl SummaryQuery {
    pub fn into_filter(self) -> Result<RecordFilter, FilterError> {
        RecordFilter::from_parts(self.q, self.seller, self.unassigned_seller, self.provider, self.purchase)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SellerSummaryResponse {
    pub seller_id: String,
    pub product_count: usize,
    pub totals: AggregateResult,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PurchaseSummaryResponse {
    pub purchase_id: String,
    pub product_count: usize,
    pub totals: AggregateResult,
}

// =========================================================================
// Router
// =========================================================================

pub fn create_router() -> Router<SummaryService> {
    Router::new()
        .route("/aggregate", post(aggregate_records))
        .route("/products", get(list_products))
        .route("/products/summary", get(product_totals))
        .route("/products/:product_id", get(get_product))
        .route("/sellers/:seller_id/summary", get(seller_summary))
        .route("/purchases/:purchase_id/summary", get(purchase_summary))
}

// =========================================================================
// POST /aggregate
// =========================================================================

/// Aggregate caller-supplied documents without touching the store
async fn aggregate_records(Json(request): Json<AggregateRequest>) -> AppResult<Json<AggregateResult>> {
    let records = request
        .records
        .iter()
        .enumerate()
        .map(|(index, document)| {
            ProductRecord::from_document(document).map_err(|source| AppError::InvalidRecord { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let filter = request.filter;
    let totals = filter_then_aggregate(&records, |record| filter.matches(record));

    tracing::info!(
        records = records.len(),
        total_quantity = totals.total_quantity,
        total_sale_value = %totals.total_sale_value,
        "Aggregated submitted records"
    );

    Ok(Json(totals))
}

// =========================================================================
// GET /products
// =========================================================================

async fn list_products(
    State(summaries): State<SummaryService>,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<Summary>> {
    let filter = query.into_filter()?;
    let summary = summaries.product_summary(&filter).await?;
    Ok(Json(summary))
}

async fn product_totals(
    State(summaries): State<SummaryService>,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<AggregateResult>> {
    let filter = query.into_filter()?;
    let summary = summaries.product_summary(&filter).await?;
    Ok(Json(summary.totals))
}

async fn get_product(
    State(summaries): State<SummaryService>,
    Path(product_id): Path<String>,
) -> AppResult<Json<ProductRecord>> {
    let product = summaries.get_product(&product_id).await?;
    product.map(Json).ok_or(AppError::ProductNotFound(product_id))
}

// =========================================================================
// Detail views
// =========================================================================

async fn seller_summary(
    State(summaries): State<SummaryService>,
    Path(seller_id): Path<String>,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<SellerSummaryResponse>> {
    let filter = query.into_filter()?;
    let summary = summaries.seller_summary(&seller_id, &filter).await?;

    Ok(Json(SellerSummaryResponse {
        seller_id,
        product_count: summary.products.len(),
        totals: summary.totals,
    }))
}

async fn purchase_summary(
    State(summaries): State<SummaryService>,
    Path(purchase_id): Path<String>,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<PurchaseSummaryResponse>> {
    let filter = query.into_filter()?;
    let summary = summaries.purchase_summary(&purchase_id, &filter).await?;

    Ok(Json(PurchaseSummaryResponse {
        purchase_id,
        product_count: summary.products.len(),
        totals: summary.totals,
    }))
}
