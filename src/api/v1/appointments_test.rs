//! Integration tests for Appointment API endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::{AppState, routes};
use crate::db::{Database, SqliteDatabase};

/// Create a test app with an in-memory database
async fn test_app() -> axum::Router {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    routes::create_router(AppState::new(db), false)
}

/// Helper to parse JSON response body
async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn william() -> Value {
    json!({
        "nomePessoa": "William Carvalho",
        "contatoTelefonico": "75991826988",
        "email": "willcarvalho@gmail.com",
        "dataAgendamento": "07/10/2024"
    })
}

async fn create(app: &axum::Router, uri: &str, body: Value) -> i64 {
    let response = app.clone().oneshot(with_json("POST", uri, body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await["id"].as_i64().unwrap()
}

// =============================================================================
// System routes
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn root_returns_welcome_message() {
    let app = test_app().await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], crate::welcome());
}

#[tokio::test(flavor = "multi_thread")]
async fn health_returns_ok() {
    let app = test_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test(flavor = "multi_thread")]
async fn docs_are_not_served_when_disabled() {
    let app = test_app().await;

    let response = app.oneshot(get("/docs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn docs_are_served_when_enabled() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    let app = routes::create_router(AppState::new(db), true);

    let response = app.oneshot(get("/docs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// POST /api/v1/agenda
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn create_then_get_appointment() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(with_json("POST", "/api/v1/agenda", william()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["message"], "created");
    let id = body["id"].as_i64().unwrap();
    assert!(id > 0);

    let response = app
        .oneshot(get(&format!("/api/v1/agenda/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["id_agenda"], id);
    assert_eq!(body["nome_pessoa"], "William Carvalho");
    assert_eq!(body["contato_telefonico"], "75991826988");
    assert_eq!(body["email"], "willcarvalho@gmail.com");
    assert_eq!(body["data_agendamento"], "2024-10-07");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_with_missing_field_returns_bad_request() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(with_json(
            "POST",
            "/api/v1/agenda",
            json!({
                "nomePessoa": "William Carvalho",
                "email": "willcarvalho@gmail.com",
                "dataAgendamento": "07/10/2024"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("phone contact"));

    // Nothing was persisted.
    let response = app.oneshot(get("/api/v1/agenda")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_with_bad_fields_returns_bad_request() {
    let app = test_app().await;

    for (field, value) in [
        ("email", "willcarvalho"),
        ("contatoTelefonico", "12345"),
        ("dataAgendamento", "2024-10-07"),
    ] {
        let mut body = william();
        body[field] = json!(value);
        let response = app
            .clone()
            .oneshot(with_json("POST", "/api/v1/agenda", body))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "expected 400 for {}={}",
            field,
            value
        );
    }
}

// =============================================================================
// GET /api/v1/agenda/{id}
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn get_nonexistent_appointment_returns_not_found() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/v1/agenda/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "No appointment found with ID: 999");
}

#[tokio::test(flavor = "multi_thread")]
async fn get_with_invalid_id_returns_bad_request() {
    let app = test_app().await;

    for id in ["abc", "0", "-3"] {
        let response = app
            .clone()
            .oneshot(get(&format!("/api/v1/agenda/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "id {}", id);
    }
}

// =============================================================================
// GET /api/v1/agenda/search and /range
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn search_by_name() {
    let app = test_app().await;
    create(&app, "/api/v1/agenda", william()).await;

    let response = app
        .clone()
        .oneshot(get("/api/v1/agenda/search?name=William%20Carvalho"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["nome_pessoa"], "William Carvalho");

    let response = app
        .clone()
        .oneshot(get("/api/v1/agenda/search?name=Nobody"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/api/v1/agenda/search")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn range_returns_ordered_rows() {
    let app = test_app().await;

    for (name, email, day) in [
        ("Ana Souza", "anasouza@gmail.com", "10/10/2024"),
        ("William Carvalho", "willcarvalho@gmail.com", "05/10/2024"),
        ("Carlos Silva", "carlos@gmail.com", "29/09/2024"),
    ] {
        create(
            &app,
            "/api/v1/agenda",
            json!({
                "nomePessoa": name,
                "contatoTelefonico": "75991826988",
                "email": email,
                "dataAgendamento": day
            }),
        )
        .await;
    }

    let response = app
        .clone()
        .oneshot(get("/api/v1/agenda/range?start=2024-10-01&end=2024-10-31"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["nome_pessoa"], "William Carvalho");
    assert_eq!(rows[0]["data_agendamento"], "2024-10-05");
    assert_eq!(rows[1]["nome_pessoa"], "Ana Souza");
    assert_eq!(rows[1]["data_agendamento"], "2024-10-10");

    let response = app
        .clone()
        .oneshot(get("/api/v1/agenda/range?start=2025-01-01&end=2025-01-31"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(get("/api/v1/agenda/range?start=2024-10-31&end=2024-10-01"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(get("/api/v1/agenda/range?start=01/10/2024&end=2024-10-31"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// PUT / DELETE /api/v1/agenda/{id}
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn update_appointment() {
    let app = test_app().await;
    let id = create(&app, "/api/v1/agenda", william()).await;

    let response = app
        .clone()
        .oneshot(with_json(
            "PUT",
            &format!("/api/v1/agenda/{}", id),
            json!({
                "nomePessoa": "William C. Santos",
                "contatoTelefonico": "75991820000",
                "email": "william@estetica.com",
                "dataAgendamento": "15/11/2024"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "updated");
    assert_eq!(body["rows_affected"], 1);

    let response = app
        .oneshot(get(&format!("/api/v1/agenda/{}", id)))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["nome_pessoa"], "William C. Santos");
    assert_eq!(body["data_agendamento"], "2024-11-15");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_nonexistent_appointment_returns_not_found() {
    let app = test_app().await;

    let response = app
        .oneshot(with_json("PUT", "/api/v1/agenda/999", william()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_appointment() {
    let app = test_app().await;
    let id = create(&app, "/api/v1/agenda", william()).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/agenda/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["message"], "deleted");

    let response = app
        .clone()
        .oneshot(get(&format!("/api/v1/agenda/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/agenda/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Table selection and storage faults
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn table_parameter_targets_fixture_table() {
    let app = test_app().await;
    let id = create(&app, "/api/v1/agenda?table=agenda_test", william()).await;

    let response = app
        .clone()
        .oneshot(get(&format!("/api/v1/agenda/{}?table=agenda_test", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get(&format!("/api/v1/agenda/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_table_returns_bad_request() {
    let app = test_app().await;

    let response = app
        .oneshot(get("/api/v1/agenda?table=users"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("unknown table"));
}

#[tokio::test(flavor = "multi_thread")]
async fn storage_failure_returns_generic_server_error() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    let state = AppState::new(db);
    let app = routes::create_router(state.clone(), false);

    state.db().close().await;

    let response = app.oneshot(get("/api/v1/agenda/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Database connection error");
}
