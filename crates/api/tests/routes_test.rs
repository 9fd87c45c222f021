//! Router integration tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use folio_api::{AppState, create_router};
use folio_ledger::Ledger;
use folio_shared::{AppConfig, TenantId};

fn test_app() -> Router {
    let config = AppConfig {
        server: folio_shared::config::ServerConfig::default(),
        ledger: folio_shared::config::LedgerConfig::default(),
    };
    let state = AppState {
        ledger: Arc::new(Ledger::new(&config.ledger)),
        config: Arc::new(config),
        default_chart: Arc::new(Vec::new()),
    };
    create_router(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn chart() -> Value {
    json!([
        { "code": "1", "name": "Activo", "account_type": "asset" },
        { "code": "11", "name": "Disponible", "account_type": "asset" },
        { "code": "1105", "name": "Caja", "account_type": "asset" },
        { "code": "4", "name": "Ingresos", "account_type": "income" },
        { "code": "41", "name": "Operacionales", "account_type": "income" },
        { "code": "4135", "name": "Comercio", "account_type": "income" },
    ])
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["currency"], "COP");
}

#[tokio::test]
async fn test_post_voucher_end_to_end() {
    let app = test_app();
    let tenant = TenantId::new();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/tenants/{tenant}/accounts/import"),
        Some(chart()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["created"], 6);

    let (status, voucher) = send(
        &app,
        "POST",
        &format!("/api/v1/tenants/{tenant}/vouchers"),
        Some(json!({
            "type": "journal_entry",
            "date": "2025-01-15",
            "description": "cash sale",
            "lines": [
                { "account_code": "1105", "debit": "1000000" },
                { "account_code": "4135", "credit": "1000000" },
            ],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{voucher}");
    assert_eq!(voucher["status"], "posted");
    assert_eq!(voucher["number"], 1);

    let (status, report) = send(
        &app,
        "GET",
        &format!("/api/v1/tenants/{tenant}/reports/ledger/1105?from=2025-01-01&to=2025-01-31"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["closing_balance"], "1000000.00");
}

#[tokio::test]
async fn test_unbalanced_voucher_maps_to_bad_request() {
    let app = test_app();
    let tenant = TenantId::new();
    send(
        &app,
        "POST",
        &format!("/api/v1/tenants/{tenant}/accounts/import"),
        Some(chart()),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/tenants/{tenant}/vouchers"),
        Some(json!({
            "type": "journal_entry",
            "date": "2025-01-15",
            "lines": [
                { "account_code": "1105", "debit": "100" },
                { "account_code": "4135", "credit": "99" },
            ],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "UNBALANCED_VOUCHER");
    assert_eq!(body["retryable"], false);
}

#[tokio::test]
async fn test_closed_period_maps_to_unprocessable() {
    let app = test_app();
    let tenant = TenantId::new();
    send(
        &app,
        "POST",
        &format!("/api/v1/tenants/{tenant}/accounts/import"),
        Some(chart()),
    )
    .await;

    let (status, period) = send(
        &app,
        "POST",
        &format!("/api/v1/tenants/{tenant}/fiscal-periods/2025/1/close"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(period["status"], "closed");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/tenants/{tenant}/vouchers"),
        Some(json!({
            "type": "journal_entry",
            "date": "2025-01-20",
            "lines": [
                { "account_code": "1105", "debit": "100" },
                { "account_code": "4135", "credit": "100" },
            ],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "PERIOD_CLOSED");
}

#[tokio::test]
async fn test_unknown_account_maps_to_not_found() {
    let app = test_app();
    let tenant = TenantId::new();
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/tenants/{tenant}/accounts/9999"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "UNKNOWN_ACCOUNT");
}
