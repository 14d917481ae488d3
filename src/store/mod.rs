//! Store module
//!
//! Data-access layer for product documents. Documents become typed
//! `ProductRecord`s here, before anything is aggregated.

mod error;
mod memory;
mod postgres;

pub use error::StoreError;
pub use memory::InMemoryProductStore;
pub use postgres::PgProductStore;

use crate::domain::ProductRecord;

/// Product source selected at start-up
#[derive(Debug, Clone)]
pub enum ProductStore {
    Postgres(PgProductStore),
    Memory(InMemoryProductStore),
}

impl ProductStore {
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    pub async fn list_products(&self) -> Result<Vec<ProductRecord>, StoreError> {
        match self {
            Self::Postgres(store) => store.list_products().await,
            Self::Memory(store) => Ok(store.list_products()),
        }
    }

    pub async fn list_by_seller(&self, seller_id: &str) -> Result<Vec<ProductRecord>, StoreError> {
        match self {
            Self::Postgres(store) => store.list_by_seller(seller_id).await,
            Self::Memory(store) => Ok(store.list_by_seller(seller_id)),
        }
    }

    pub async fn list_by_purchase(&self, purchase_id: &str) -> Result<Vec<ProductRecord>, StoreError> {
        match self {
            Self::Postgres(store) => store.list_by_purchase(purchase_id).await,
            Self::Memory(store) => Ok(store.list_by_purchase(purchase_id)),
        }
    }

    pub async fn get_product(&self, id: &str) -> Result<Option<ProductRecord>, StoreError> {
        match self {
            Self::Postgres(store) => store.get_product(id).await,
            Self::Memory(store) => Ok(store.get_product(id)),
        }
    }
}

impl From<PgProductStore> for ProductStore {
    fn from(store: PgProductStore) -> Self {
        Self::Postgres(store)
    }
}

impl From<InMemoryProductStore> for ProductStore {
    fn from(store: InMemoryProductStore) -> Self {
        Self::Memory(store)
    }
}
