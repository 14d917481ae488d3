//! Common test utilities

#![allow(dead_code)]

use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};

/// Product documents shaped like the store's rows
pub fn sample_documents() -> Vec<Value> {
    vec![
        json!({
            "id": "p-1", "quantity": 2, "purchaseValue": 10, "saleValue": 15, "profitValue": 5,
            "sold": true, "seller": "ana", "provider": "factory-a", "purchase": "buy-1",
            "description": "Linen Shirt", "size": "M", "code": "LS-01"
        }),
        json!({
            "id": "p-2", "quantity": 1, "purchaseValue": "4.00", "saleValue": "6,00", "profitValue": 2,
            "sold": false, "seller": null, "provider": "factory-a", "purchase": "buy-1",
            "description": "Cotton Shirt", "size": "G"
        }),
        json!({
            "id": "p-3", "quantity": 5, "purchaseValue": 3.5, "saleValue": 7, "profitValue": 3.5,
            "sold": false, "seller": "none", "provider": { "id": "shopping-b" }, "purchase": "buy-2",
            "description": "Jeans", "code": "JN-77"
        }),
        json!({
            "id": "p-4", "quantity": "??", "purchaseValue": "abc", "saleValue": 9, "profitValue": 9,
            "sold": true, "seller": { "id": "ana" }, "provider": "shopping-b"
        }),
    ]
}

/// Setup test database - recreate the products table and seed sample documents
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    pool.execute(include_str!("../../migrations/0001_products.sql"))
        .await
        .expect("Failed to apply migrations");

    let mut tx = pool.begin().await.expect("Failed to begin transaction");

    sqlx::query("TRUNCATE TABLE products")
        .execute(&mut *tx)
        .await
        .expect("Failed to clean up DB");

    for (offset, document) in sample_documents().into_iter().enumerate() {
        let id = document["id"].as_str().expect("sample id").to_string();
        sqlx::query(
            r#"
            INSERT INTO products (id, document, created_at)
            VALUES ($1, $2, NOW() + make_interval(secs => $3))
            "#,
        )
        .bind(id)
        .bind(&document)
        .bind(offset as f64)
        .execute(&mut *tx)
        .await
        .expect("Failed to seed product");
    }

    // Malformed row: skipped when listing
    sqlx::query("INSERT INTO products (id, document) VALUES ('broken', '\"just a string\"')")
        .execute(&mut *tx)
        .await
        .expect("Failed to seed broken product");

    tx.commit().await.expect("Failed to commit transaction");

    pool
}
