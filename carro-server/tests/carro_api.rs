//! End-to-end tests for the `/carro` routes over the in-memory executor

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Datelike, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use carro_server::db::InMemoryExecutor;
use carro_server::http::{build_router, AppState, ServerConfig};
use carro_server::CarController;

fn app() -> Router {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let controller = CarController::new(Arc::new(InMemoryExecutor::new()));
    build_router(AppState { controller }, &ServerConfig::default()).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn corolla() -> Value {
    json!({
        "brand": "Toyota",
        "model": "Corolla",
        "year": 2020,
        "color": "red",
        "price": 15000.5
    })
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, car) = send(app, "POST", "/carro", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    car
}

#[tokio::test]
async fn create_echoes_fields_and_assigns_id() {
    let app = app();
    let car = create(&app, corolla()).await;

    assert!(car["id"].as_i64().unwrap() > 0);
    let mut expected = corolla();
    expected["id"] = car["id"].clone();
    assert_eq!(car, expected);
}

#[tokio::test]
async fn create_accepts_numeric_strings_and_long_prices() {
    let app = app();
    let mut body = corolla();
    body["year"] = json!("2020");
    body["price"] = json!(0.123456789012);

    let car = create(&app, body).await;
    assert_eq!(car["year"], 2020);
    assert_eq!(car["price"], 0.1234567890);

    let (_, fetched) = send(&app, "GET", &format!("/carro/{}", car["id"]), None).await;
    assert_eq!(fetched, car);
}

#[tokio::test]
async fn create_rejects_out_of_range_year() {
    let app = app();
    for year in [json!(1899), json!(Utc::now().year() + 1)] {
        let mut body = corolla();
        body["year"] = year;
        let (status, err) = send(&app, "POST", "/carro", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(err["error"].as_str().unwrap().contains("year"));
    }
}

#[tokio::test]
async fn create_rejects_each_missing_field() {
    let app = app();
    for field in ["brand", "model", "year", "color", "price"] {
        let mut body = corolla();
        body.as_object_mut().unwrap().remove(field);
        let (status, err) = send(&app, "POST", "/carro", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"], format!("\"{}\" is required", field));
    }
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/carro")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn get_missing_car_is_404() {
    let app = app();
    let (status, body) = send(&app, "GET", "/carro/999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Carro no encontrado."}));
}

#[tokio::test]
async fn get_returns_created_car() {
    let app = app();
    let car = create(&app, corolla()).await;
    let (status, fetched) = send(&app, "GET", &format!("/carro/{}", car["id"]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, car);
}

#[tokio::test]
async fn delete_lifecycle() {
    let app = app();
    let (status, body) = send(&app, "DELETE", "/carro/999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Carro no eliminado."}));

    let car = create(&app, corolla()).await;
    let uri = format!("/carro/{}", car["id"]);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_with_empty_body_is_400() {
    let app = app();
    let car = create(&app, corolla()).await;
    let (status, body) = send(&app, "PATCH", &format!("/carro/{}", car["id"]), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn update_changes_only_color() {
    let app = app();
    let car = create(&app, corolla()).await;
    let uri = format!("/carro/{}", car["id"]);

    let (status, updated) = send(&app, "PATCH", &uri, Some(json!({"color": "blue"}))).await;
    assert_eq!(status, StatusCode::OK);

    let mut expected = car.clone();
    expected["color"] = json!("blue");
    assert_eq!(updated, expected);

    let (_, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(fetched, expected);
}

#[tokio::test]
async fn update_accepts_put() {
    let app = app();
    let car = create(&app, corolla()).await;
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/carro/{}", car["id"]),
        Some(json!({"year": 2021})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["year"], 2021);
}

#[tokio::test]
async fn update_ignores_zero_price() {
    let app = app();
    let car = create(&app, corolla()).await;
    let uri = format!("/carro/{}", car["id"]);

    let (status, updated) = send(&app, "PATCH", &uri, Some(json!({"price": 0}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 15000.5);
}

#[tokio::test]
async fn update_missing_car_is_404() {
    let app = app();
    let (status, body) = send(&app, "PATCH", "/carro/77", Some(json!({"color": "blue"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Carro no encontrado"}));
}

#[tokio::test]
async fn list_shows_live_cars_only() {
    let app = app();
    let (status, body) = send(&app, "GET", "/carro", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let first = create(&app, corolla()).await;
    let mut civic = corolla();
    civic["brand"] = json!("Honda");
    civic["model"] = json!("Civic");
    let second = create(&app, civic).await;

    send(&app, "DELETE", &format!("/carro/{}", first["id"]), None).await;

    let (_, body) = send(&app, "GET", "/carro", None).await;
    assert_eq!(body, json!([second]));
}
