//! Runs the real HTTP client against a local stand-in for Calendarific.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use holiday_core::FixedClock;
use holiday_tools::{CalendarificClient, HolidayLookup};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api/v2/holidays", addr)
}

fn lookup_for(url: &str) -> HolidayLookup {
    let client = CalendarificClient::with_base_url("secret-key", url).unwrap();
    HolidayLookup::new(Arc::new(client)).with_clock(Arc::new(FixedClock::year(2024)))
}

async fn holidays(
    State(seen): State<Seen>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    seen.lock().unwrap().push(params);
    Json(json!({
        "meta": {"code": 200},
        "response": {"holidays": [
            {"name": "New Year's Day", "date": {"iso": "2024-01-01"}},
            {"name": "Christmas", "date": {"iso": "2024-12-25"}}
        ]}
    }))
}

#[tokio::test]
async fn sends_key_country_and_year() {
    let seen: Seen = Arc::default();
    let router = Router::new()
        .route("/api/v2/holidays", get(holidays))
        .with_state(seen.clone());
    let url = serve(router).await;

    let text = lookup_for(&url).lookup("US, 2024").await;

    assert_eq!(text, "- New Year's Day (2024-01-01)\n- Christmas (2024-12-25)");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].get("api_key").map(String::as_str), Some("secret-key"));
    assert_eq!(seen[0].get("country").map(String::as_str), Some("US"));
    assert_eq!(seen[0].get("year").map(String::as_str), Some("2024"));
}

#[tokio::test]
async fn rejected_year_never_reaches_server() {
    let seen: Seen = Arc::default();
    let router = Router::new()
        .route("/api/v2/holidays", get(holidays))
        .with_state(seen.clone());
    let url = serve(router).await;

    let text = lookup_for(&url).lookup("US,2050").await;

    assert_eq!(text, "Error: Calendarific API only supports years up to 2049.");
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn non_2xx_status_is_transport_error() {
    let router = Router::new().route(
        "/api/v2/holidays",
        get(|| async { (StatusCode::UNAUTHORIZED, "nope") }),
    );
    let url = serve(router).await;

    let text = lookup_for(&url).lookup("US,2024").await;

    assert_eq!(
        text,
        "Error communicating with Calendarific API: HTTP status 401 Unauthorized"
    );
}

#[tokio::test]
async fn embedded_error_code_is_reported() {
    let router = Router::new().route(
        "/api/v2/holidays",
        get(|| async {
            Json(json!({
                "meta": {"code": 401, "error_type": "auth failed", "error_detail": "Missing or invalid api credentials."},
                "response": []
            }))
        }),
    );
    let url = serve(router).await;

    let text = lookup_for(&url).lookup("US,2024").await;

    assert_eq!(text, "API Error: 401 - auth failed");
}

#[tokio::test]
async fn connection_failure_does_not_leak_key() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = format!("http://{}/api/v2/holidays", addr);
    let text = lookup_for(&url).lookup("US,2024").await;

    assert!(text.starts_with("Error communicating with Calendarific API: "));
    assert!(!text.contains("secret-key"));
}
