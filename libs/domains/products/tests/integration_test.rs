//! Repository tests against a real PostgreSQL container
//!
//! Requires Docker.

use domain_products::*;
use rust_decimal::Decimal;
use serde_json::json;
use test_utils::assertions::{assert_product_matches, assert_some};
use test_utils::{TestDataBuilder, TestDatabase};

fn service(db: &TestDatabase) -> ProductService<PgProductRepository> {
    ProductService::new(PgProductRepository::new(db.connection()))
}

#[tokio::test]
async fn test_create_and_get_product() {
    let db = TestDatabase::new().await;
    let service = service(&db);
    let record = TestDataBuilder::from_test_name("pg_create").product("main");

    let created = service.create_product(&record).await.unwrap();
    assert!(created.id > 0);
    assert_product_matches(&created.serialize(), &record);

    let fetched = service.get_product(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_price_keeps_two_decimals() {
    let db = TestDatabase::new().await;
    let service = service(&db);
    let mut record = TestDataBuilder::from_test_name("pg_price").product("main");
    record["price"] = json!("999999999999.99");

    let created = service.create_product(&record).await.unwrap();
    let fetched = service.get_product(created.id).await.unwrap();

    assert_eq!(fetched.price, Decimal::new(99_999_999_999_999, 2));
    assert_eq!(fetched.serialize()["price"], "999999999999.99");
}

#[tokio::test]
async fn test_list_filters_and_orders_by_id() {
    let db = TestDatabase::new().await;
    let service = service(&db);
    let builder = TestDataBuilder::from_test_name("pg_list");

    let mut ids = Vec::new();
    for (suffix, category, available) in [
        ("a", "FOOD", true),
        ("b", "TOOLS", true),
        ("c", "FOOD", false),
    ] {
        let mut record = builder.product(suffix);
        record["category"] = json!(category);
        record["available"] = json!(available);
        ids.push(service.create_product(&record).await.unwrap().id);
    }

    let all = service.list_products(ProductFilter::default()).await.unwrap();
    assert_eq!(all.iter().map(|p| p.id).collect::<Vec<_>>(), ids);

    let food_in_stock = service
        .list_products(ProductFilter {
            category: Some("FOOD".to_string()),
            available: Some("true".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(food_in_stock.len(), 1);
    assert_eq!(food_in_stock[0].id, ids[0]);

    let by_name = service
        .list_products(ProductFilter {
            name: Some(all[1].name.clone()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_name, vec![all[1].clone()]);
}

#[tokio::test]
async fn test_update_and_delete_product() {
    let db = TestDatabase::new().await;
    let service = service(&db);
    let builder = TestDataBuilder::from_test_name("pg_update");

    let created = service.create_product(&builder.product("before")).await.unwrap();
    let replacement = builder.product("after");

    let updated = service.update_product(created.id, &replacement).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_product_matches(&updated.serialize(), &replacement);

    service.delete_product(created.id).await.unwrap();
    service.delete_product(created.id).await.unwrap();

    let result = service.get_product(created.id).await;
    assert!(matches!(result, Err(ProductError::NotFound(_))));
}

#[tokio::test]
async fn test_repository_update_missing_row_is_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let payload = ProductPayload::from_record(
        &TestDataBuilder::from_test_name("pg_missing").product("main"),
    )
    .unwrap();

    let result = repo.update(4242, payload).await;
    assert!(matches!(result, Err(ProductError::NotFound(4242))));
    assert!(!repo.delete(4242).await.unwrap());
}

#[tokio::test]
async fn test_ids_are_not_reused() {
    let db = TestDatabase::new().await;
    let service = service(&db);
    let builder = TestDataBuilder::from_test_name("pg_ids");

    let first = service.create_product(&builder.product("a")).await.unwrap();
    service.delete_product(first.id).await.unwrap();
    let second = service.create_product(&builder.product("b")).await.unwrap();

    assert!(second.id > first.id);
    assert_some(
        service
            .list_products(ProductFilter::default())
            .await
            .unwrap()
            .into_iter()
            .find(|p| p.id == second.id),
        "second product listed",
    );
}
