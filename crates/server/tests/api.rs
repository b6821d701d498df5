use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use migration::MigratorTrait;
use server::{ServerState, router};

const EMAIL: &str = "alice@example.com";
const PASSWORD: &str = "password123";

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    engine.create_user("Alice", EMAIL, PASSWORD).await.unwrap();
    engine
        .create_user("Bob", "bob@example.com", "password456")
        .await
        .unwrap();

    router(
        ServerState {
            engine: Arc::new(engine),
        },
        None,
    )
}

fn basic(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

async fn call_as(
    app: &Router,
    credentials: (&str, &str),
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, basic(credentials.0, credentials.1));
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    call_as(app, (EMAIL, PASSWORD), method, uri, body).await
}

#[tokio::test]
async fn health_is_public() {
    let app = app().await;
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_or_wrong_credentials_are_rejected() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(
            Request::get("/api/user/get/transaction")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let (status, _) = call_as(
        &app,
        (EMAIL, "not-the-password"),
        "GET",
        "/api/user/get/transaction",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn transaction_lifecycle() {
    let app = app().await;

    let (status, created) = call(
        &app,
        "POST",
        "/api/user/transaction",
        Some(json!({"date": "2025-01-05", "description": "groceries", "amount_minor": 4250})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["description"], "groceries");
    assert_eq!(created["amount_minor"], 4250);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, listed) = call(&app, "GET", "/api/user/get/transaction", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, updated) = call(
        &app,
        "PUT",
        &format!("/api/user/{id}"),
        Some(json!({"amount_minor": 3000})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["amount_minor"], 3000);
    assert_eq!(updated["date"], "2025-01-05");

    let (status, deleted) = call(&app, "DELETE", &format!("/api/user/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Transaction deleted successfully");

    let (status, _) = call(&app, "DELETE", &format!("/api/user/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn incomplete_transaction_is_a_bad_request() {
    let app = app().await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/user/transaction",
        Some(json!({"date": "2025-01-05", "amount_minor": 100})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("required"));
}

#[tokio::test]
async fn date_range_listing_requires_both_bounds() {
    let app = app().await;

    for (date, amount) in [("2025-01-01", 100), ("2025-01-31", 200), ("2025-02-01", 300)] {
        call(
            &app,
            "POST",
            "/api/user/transaction",
            Some(json!({"date": date, "description": "item", "amount_minor": amount})),
        )
        .await;
    }

    let (status, listed) = call(
        &app,
        "GET",
        "/api/user/date/transaction?start=2025-01-01&end=2025-01-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let amounts: Vec<i64> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|tx| tx["amount_minor"].as_i64().unwrap())
        .collect();
    assert_eq!(amounts, vec![100, 200]);

    let (status, _) = call(
        &app,
        "GET",
        "/api/user/date/transaction?start=2025-01-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn set_then_update_budget() {
    let app = app().await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/user/set-budget",
        Some(json!({"amount_minor": 500, "startDate": "2025-01-01", "endDate": "2025-01-31"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Budget set successfully!");
    assert_eq!(body["amount_minor"], 500);

    let (status, body) = call(
        &app,
        "POST",
        "/api/user/set-budget",
        Some(json!({"amount_minor": 700, "start_date": "2025-01-15", "end_date": "2025-02-15"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Budget updated successfully!");
    assert_eq!(body["amount_minor"], 700);

    let (_, profile) = call(&app, "GET", "/api/user/profile", None).await;
    let budgets = profile["budgets"].as_array().unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0]["amount_minor"], 700);
    assert_eq!(budgets[0]["end_date"], "2025-01-31");
}

#[tokio::test]
async fn invalid_budget_is_a_bad_request() {
    let app = app().await;

    let (status, _) = call(
        &app,
        "POST",
        "/api/user/set-budget",
        Some(json!({"amount_minor": 500, "start_date": "2025-01-31", "end_date": "2025-01-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        "POST",
        "/api/user/set-budget",
        Some(json!({"start_date": "2025-01-01", "end_date": "2025-01-31"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn check_budget_reports_status() {
    let app = app().await;

    call(
        &app,
        "POST",
        "/api/user/set-budget",
        Some(json!({"amount_minor": 200, "start_date": "2025-01-01", "end_date": "2025-01-10"})),
    )
    .await;
    for (date, amount) in [("2025-01-02", 100), ("2025-01-05", 50)] {
        call(
            &app,
            "POST",
            "/api/user/transaction",
            Some(json!({"date": date, "description": "food", "amount_minor": amount})),
        )
        .await;
    }

    let range = json!({"startDate": "2025-01-01", "endDate": "2025-01-10"});
    let (status, body) = call(&app, "POST", "/api/user/check-budget", Some(range.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Your budget is under control.");
    assert_eq!(body["total_spent_minor"], 150);
    assert_eq!(body["budget_minor"], 200);
    assert_eq!(body["status"], "on_track");

    call(
        &app,
        "POST",
        "/api/user/transaction",
        Some(json!({"date": "2025-01-06", "description": "food", "amount_minor": 100})),
    )
    .await;
    let (_, body) = call(&app, "POST", "/api/user/check-budget", Some(range)).await;
    assert_eq!(body["message"], "You have exceeded your budget!");
    assert_eq!(body["total_spent_minor"], 250);
    assert_eq!(body["status"], "exceeded");

    let (status, _) = call(
        &app,
        "POST",
        "/api/user/check-budget",
        Some(json!({"startDate": "2025-06-01", "endDate": "2025-06-30"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &app,
        "POST",
        "/api/user/check-budget",
        Some(json!({"startDate": "2025-06-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn other_users_cannot_touch_a_transaction() {
    let app = app().await;

    let (_, created) = call(
        &app,
        "POST",
        "/api/user/transaction",
        Some(json!({"date": "2025-01-05", "description": "rent", "amount_minor": 90000})),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();
    let bob = ("bob@example.com", "password456");

    let (status, _) = call_as(
        &app,
        bob,
        "PUT",
        &format!("/api/user/{id}"),
        Some(json!({"amount_minor": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call_as(&app, bob, "DELETE", &format!("/api/user/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = call(&app, "GET", "/api/user/get/transaction", None).await;
    assert_eq!(listed[0]["amount_minor"], 90000);
}

#[tokio::test]
async fn profile_edit_and_picture() {
    let app = app().await;

    let (status, profile) = call(
        &app,
        "PUT",
        "/api/user/edit",
        Some(json!({"name": "Alice L."})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["name"], "Alice L.");
    assert_eq!(profile["email"], EMAIL);

    let (status, _) = call(
        &app,
        "PUT",
        "/api/user/edit",
        Some(json!({"email": "bob@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, profile) = call(
        &app,
        "PUT",
        "/api/user/update",
        Some(json!({"profilePicture": "https://cdn.example.com/a.png"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["profile_picture"], "https://cdn.example.com/a.png");

    let (status, _) = call(&app, "PUT", "/api/user/update", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reversed_date_range_lists_nothing() {
    let app = app().await;

    call(
        &app,
        "POST",
        "/api/user/transaction",
        Some(json!({"date": "2025-01-05", "description": "item", "amount_minor": 100})),
    )
    .await;

    let (status, listed) = call(
        &app,
        "GET",
        "/api/user/date/transaction?start=2025-01-10&end=2025-01-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn malformed_transaction_id_is_not_found() {
    let app = app().await;

    let (status, body) = call(&app, "DELETE", "/api/user/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "\"transaction not exists\" key not found!");

    let (status, body) = call(
        &app,
        "PUT",
        "/api/user/not-a-uuid",
        Some(json!({"amount_minor": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}
