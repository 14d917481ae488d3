//! Postgres Product Store
//!
//! Product documents live in a single JSONB table:
//!
//! ```sql
//! products(id TEXT PRIMARY KEY, document JSONB NOT NULL, created_at TIMESTAMPTZ)
//! ```
//!
//! Rows whose document fails the record boundary are skipped when listing,
//! so one bad row never breaks a summary view.

use serde_json::Value;
use sqlx::PgPool;

use crate::domain::ProductRecord;

use super::StoreError;

type DocumentRow = (String, Value);

#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn list_products(&self) -> Result<Vec<ProductRecord>, StoreError> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, document FROM products
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(into_records(rows))
    }

    /// Products assigned to a seller.
    ///
    /// The reference may be stored as a plain id or as `{ "id": ... }`.
    pub async fn list_by_seller(&self, seller_id: &str) -> Result<Vec<ProductRecord>, StoreError> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, document FROM products
            WHERE document->>'seller' = $1
               OR document->'seller'->>'id' = $1
               OR document->>'sellerId' = $1
               OR document->>'seller_id' = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(seller_id.trim())
        .fetch_all(&self.pool)
        .await?;

        let mut records = into_records(rows);
        records.retain(|record| record.seller.as_deref() == Some(seller_id.trim()));
        Ok(records)
    }

    /// Products that arrived with a purchase.
    pub async fn list_by_purchase(&self, purchase_id: &str) -> Result<Vec<ProductRecord>, StoreError> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, document FROM products
            WHERE document->>'purchase' = $1
               OR document->'purchase'->>'id' = $1
               OR document->>'purchaseId' = $1
               OR document->>'purchase_id' = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(purchase_id.trim())
        .fetch_all(&self.pool)
        .await?;

        let mut records = into_records(rows);
        records.retain(|record| record.purchase.as_deref() == Some(purchase_id.trim()));
        Ok(records)
    }

    pub async fn get_product(&self, id: &str) -> Result<Option<ProductRecord>, StoreError> {
        let row: Option<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, document FROM products WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((id, document)) => Ok(Some(ProductRecord::from_document(&with_row_id(id, document))?)),
            None => Ok(None),
        }
    }
}

/// Documents may omit their id; the row key fills it in.
fn with_row_id(id: String, mut document: Value) -> Value {
    if let Value::Object(fields) = &mut document {
        let missing = fields.get("id").map_or(true, Value::is_null);
        if missing {
            fields.insert("id".to_string(), Value::String(id));
        }
    }
    document
}

fn into_records(rows: Vec<DocumentRow>) -> Vec<ProductRecord> {
    rows.into_iter()
        .filter_map(|(id, document)| {
            match ProductRecord::from_document(&with_row_id(id.clone(), document)) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(product_id = %id, error = %e, "Skipping invalid product document");
                    None
                }
            }
        })
        .collect()
}
