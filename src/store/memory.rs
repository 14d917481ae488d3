//! In-memory Product Store
//!
//! Holds an immutable snapshot of records, optionally loaded from a JSON
//! file of product documents. Used when no database is configured and by tests.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::ProductRecord;

use super::StoreError;

#[derive(Debug, Clone, Default)]
pub struct InMemoryProductStore {
    records: Arc<Vec<ProductRecord>>,
}

impl InMemoryProductStore {
    pub fn new(records: Vec<ProductRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// Build from raw documents, skipping any that fail the record boundary.
    pub fn from_documents(documents: &[Value]) -> Self {
        let records = documents
            .iter()
            .enumerate()
            .filter_map(|(index, document)| match ProductRecord::from_document(document) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping invalid product document");
                    None
                }
            })
            .collect();

        Self::new(records)
    }

    /// Load a JSON array of product documents.
    pub async fn load_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| StoreError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let documents = match serde_json::from_str::<Value>(&raw)? {
            Value::Array(documents) => documents,
            _ => return Err(StoreError::NotAnArray(path.to_path_buf())),
        };

        let store = Self::from_documents(&documents);
        tracing::info!(
            path = %path.display(),
            documents = documents.len(),
            loaded = store.len(),
            "Loaded product documents"
        );
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn list_products(&self) -> Vec<ProductRecord> {
        self.records.to_vec()
    }

    pub fn list_by_seller(&self, seller_id: &str) -> Vec<ProductRecord> {
        self.select(|record| record.seller.as_deref() == Some(seller_id))
    }

    pub fn list_by_purchase(&self, purchase_id: &str) -> Vec<ProductRecord> {
        self.select(|record| record.purchase.as_deref() == Some(purchase_id))
    }

    pub fn get_product(&self, id: &str) -> Option<ProductRecord> {
        self.records.iter().find(|record| record.id == id).cloned()
    }

    fn select(&self, predicate: impl Fn(&ProductRecord) -> bool) -> Vec<ProductRecord> {
        self.records
            .iter()
            .filter(|record| predicate(*record))
            .cloned()
            .collect()
    }
}
