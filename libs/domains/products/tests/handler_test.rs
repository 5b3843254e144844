//! Handler tests for the products domain
//!
//! The router is mounted at its production prefix and backed by the
//! in-memory repository, so these run without Docker.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDataBuilder;
use test_utils::assertions::assert_product_matches;
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let service = ProductService::new(InMemoryProductRepository::new());
    Router::new().nest(PRODUCTS_PATH, handlers::router(service))
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn send(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn create(app: &Router, record: &Value) -> Value {
    let response = app
        .clone()
        .oneshot(send("POST", "/products", record))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_product_returns_201_with_location() {
    let app = app();
    let record = TestDataBuilder::from_test_name("handler_create_201").product("main");

    let response = app
        .clone()
        .oneshot(send("POST", "/products", &record))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let created: Value = json_body(response.into_body()).await;
    assert_product_matches(&created, &record);
    assert_eq!(location, format!("/products/{}", created["id"]));

    let fetched = app.oneshot(get(&location)).await.unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched: Value = json_body(fetched.into_body()).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let app = app();
    let mut record = TestDataBuilder::from_test_name("handler_client_id").product("main");
    record["id"] = json!(777);

    let created = create(&app, &record).await;
    assert_eq!(created["id"], 1);
}

#[tokio::test]
async fn test_price_is_serialized_as_two_decimal_string() {
    let app = app();
    let mut record = TestDataBuilder::from_test_name("handler_price").product("main");
    record["price"] = json!(7);

    let created = create(&app, &record).await;
    assert_eq!(created["price"], "7.00");
}

#[tokio::test]
async fn test_create_rejects_invalid_records() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("handler_invalid");

    let mut bad_category = builder.product("a");
    bad_category["category"] = json!("SHOES");
    let mut empty_name = builder.product("b");
    empty_name["name"] = json!("");

    for record in [json!({}), bad_category, empty_name, json!([1, 2])] {
        let response = app
            .clone()
            .oneshot(send("POST", "/products", &record))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", record);

        let body: ErrorBody = json_body(response.into_body()).await;
        assert_eq!(body.error, "VALIDATION_ERROR");
        assert!(body.message.contains("error"));
    }
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
    message: String,
}

#[tokio::test]
async fn test_create_with_empty_body_is_bad_request() {
    let request = Request::post("/products")
        .header("content-type", "application/json")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_with_malformed_json_is_bad_request() {
    let request = Request::post("/products")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_with_wrong_content_type_is_415() {
    let record = TestDataBuilder::from_test_name("handler_415").product("main");
    let request = Request::post("/products")
        .header("content-type", "text/plain")
        .body(Body::from(record.to_string()))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_get_missing_product_is_404() {
    let response = app().oneshot(get("/products/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: ErrorBody = json_body(response.into_body()).await;
    assert_eq!(body.error, "NOT_FOUND");
    assert!(body.message.contains("was not found"));
}

#[tokio::test]
async fn test_get_non_integer_id_is_404() {
    let response = app().oneshot(get("/products/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_filters_by_category_and_availability() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("handler_list");

    let mut first = builder.product("first");
    first["category"] = json!("TOOLS");
    first["available"] = json!(true);
    let mut second = builder.product("second");
    second["category"] = json!("TOOLS");
    second["available"] = json!(false);
    let mut third = builder.product("third");
    third["category"] = json!("FOOD");
    third["available"] = json!(true);

    for record in [&first, &second, &third] {
        create(&app, record).await;
    }

    let all: Vec<Value> = json_body(app.clone().oneshot(get("/products")).await.unwrap().into_body()).await;
    let ids: Vec<i64> = all.iter().map(|p| p["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let tools: Vec<Value> = json_body(
        app.clone()
            .oneshot(get("/products?category=TOOLS&available=TRUE"))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    assert_eq!(tools.len(), 1);
    assert_product_matches(&tools[0], &first);

    let unavailable: Vec<Value> = json_body(
        app.clone()
            .oneshot(get("/products?available=nope"))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    assert_eq!(unavailable.len(), 1);
    assert_product_matches(&unavailable[0], &second);
}

#[tokio::test]
async fn test_list_unknown_category_is_empty() {
    let app = app();
    create(&app, &TestDataBuilder::from_test_name("handler_unknown").product("a")).await;

    let response = app
        .oneshot(get("/products?category=INVALID_CATEGORY"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<Value> = json_body(response.into_body()).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_update_product_replaces_fields() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("handler_update");
    let created = create(&app, &builder.product("before")).await;
    let uri = format!("/products/{}", created["id"]);

    let replacement = builder.product("after");
    let response = app
        .clone()
        .oneshot(send("PUT", &uri, &replacement))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Value = json_body(response.into_body()).await;
    assert_eq!(updated["id"], created["id"]);
    assert_product_matches(&updated, &replacement);
}

#[tokio::test]
async fn test_update_missing_product_is_404_even_with_bad_body() {
    let response = app()
        .oneshot(send("PUT", "/products/9", &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_product_is_404_before_body_is_read() {
    let malformed = Request::put("/products/9")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let wrong_type = Request::put("/products/9")
        .header("content-type", "text/plain")
        .body(Body::from("{}"))
        .unwrap();

    for request in [malformed, wrong_type] {
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: ErrorBody = json_body(response.into_body()).await;
        assert!(body.message.contains("was not found"));
    }
}

#[tokio::test]
async fn test_update_existing_product_rejects_body_after_lookup() {
    let app = app();
    let created = create(&app, &TestDataBuilder::from_test_name("handler_put_body").product("a")).await;
    let uri = format!("/products/{}", created["id"]);

    let malformed = Request::put(uri.as_str())
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.clone().oneshot(malformed).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let wrong_type = Request::put(uri.as_str())
        .header("content-type", "text/plain")
        .body(Body::from("{}"))
        .unwrap();
    let response = app.oneshot(wrong_type).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_validation_failure_reports_field_details() {
    let mut record = TestDataBuilder::from_test_name("handler_details").product("a");
    record["name"] = json!("");

    let response = app()
        .oneshot(send("POST", "/products", &record))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"].get("name").is_some(), "{}", body);
}

#[tokio::test]
async fn test_update_existing_product_with_bad_body_is_400() {
    let app = app();
    let created = create(&app, &TestDataBuilder::from_test_name("handler_put_400").product("a")).await;

    let response = app
        .oneshot(send("PUT", &format!("/products/{}", created["id"]), &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let app = app();
    let created = create(&app, &TestDataBuilder::from_test_name("handler_delete").product("a")).await;
    let uri = format!("/products/{}", created["id"]);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(Request::delete(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.into_body().collect().await.unwrap().to_bytes().is_empty());
    }

    let response = app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
