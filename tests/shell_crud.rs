//! End-to-end exercises of the HTTP surface against an in-memory store.

use aas_repository::{
    common_routes, decode_id, docs_routes, encode_id, ensure_shell_table, shell_routes, AppState,
};
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    ensure_shell_table(&pool).await.unwrap();
    let state = AppState { pool };
    Router::new()
        .merge(docs_routes())
        .merge(common_routes(state.clone()))
        .merge(shell_routes(state))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|err| panic!("{} {} returned a non-JSON body: {}", method, uri, err));
    (status, value)
}

fn shell_body(aas_id: &str, id_short: &str) -> Value {
    json!({
        "aas_id": aas_id,
        "id_short": id_short,
        "asset_kind": "Instance",
        "global_asset_id": "https://example.com/ids/asset/0001",
    })
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let app = test_app().await;

    let mut body = shell_body("urn:aas:pump-1", "Pump_001_AAS");
    body["version"] = json!("1.0");
    body["description"] = json!("circulation pump");
    let (status, created) = send(&app, "POST", "/aas", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(created["id"].as_i64().unwrap() > 0);
    assert_eq!(created["aas_id"], "urn:aas:pump-1");
    assert_eq!(created["asset_kind"], "Instance");

    let uri = format!("/aas?aas_id={}", encode_id("urn:aas:pump-1"));
    let (status, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["id_short"], "Pump_001_AAS");
    assert_eq!(fetched["version"], "1.0");
    assert_eq!(fetched["description"], "circulation pump");
}

#[tokio::test]
async fn create_trims_whitespace_before_storing() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/aas",
        Some(shell_body("  urn:aas:padded  ", "  Padded_AAS ")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["aas_id"], "urn:aas:padded");
    assert_eq!(created["id_short"], "Padded_AAS");

    let uri = format!("/aas?aas_id={}", encode_id("urn:aas:padded"));
    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn duplicate_identifiers_conflict() {
    let app = test_app().await;
    send(&app, "POST", "/aas", Some(shell_body("urn:aas:1", "One_AAS"))).await;

    // Same aas_id, different id_short.
    let (status, body) = send(&app, "POST", "/aas", Some(shell_body("urn:aas:1", "Two_AAS"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        "Asset Administration Shell already exists with ID: urn:aas:1"
    );

    // Different aas_id, same id_short.
    let (status, body) = send(&app, "POST", "/aas", Some(shell_body("urn:aas:2", "One_AAS"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        "Asset Administration Shell already exists with Id Short: One_AAS"
    );
}

#[tokio::test]
async fn blank_required_fields_are_rejected() {
    let app = test_app().await;

    let (status, body) = send(&app, "POST", "/aas", Some(shell_body("   ", "Blank_AAS"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Fields 'aas_id', 'id_short', and 'global_asset_id' are required and cannot be empty"
    );

    // Missing fields deserialize to empty strings and fail the same check.
    let (status, _) = send(&app, "POST", "/aas", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Update applies the identical rule, even for an unknown target.
    let (status, body) = send(&app, "PUT", "/aas", Some(shell_body(" ", "Blank_AAS"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Fields 'aas_id', 'id_short', and 'global_asset_id' are required and cannot be empty"
    );
}

#[tokio::test]
async fn lookup_misses_and_undecodable_ids_are_not_found() {
    let app = test_app().await;

    let uri = format!("/aas?aas_id={}", encode_id("urn:aas:ghost"));
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Asset Administration Shell not found");

    // Not valid Base64 at all: same outcome, no server fault.
    let (status, body) = send(&app, "GET", "/aas?aas_id=!!!not-base64!!!", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Asset Administration Shell not found");
}

#[tokio::test]
async fn delete_removes_once_then_misses() {
    let app = test_app().await;
    send(&app, "POST", "/aas", Some(shell_body("urn:aas:gone", "Gone_AAS"))).await;

    let uri = format!("/aas?aas_id={}", encode_id("urn:aas:gone"));
    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Asset Administration Shell deleted");
    assert_eq!(body["aas_id"], "urn:aas:gone");

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        "Asset Administration Shell not found in database"
    );

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_rewrites_fields_wholesale() {
    let app = test_app().await;
    let mut body = shell_body("urn:aas:mut", "Mut_AAS");
    body["version"] = json!("1.0");
    body["description"] = json!("before");
    send(&app, "POST", "/aas", Some(body)).await;

    // No version/description in the update: they are cleared, not kept.
    let mut update = shell_body("urn:aas:mut", "Mut_v2_AAS");
    update["asset_kind"] = json!("Type");
    let (status, updated) = send(&app, "PUT", "/aas", Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id_short"], "Mut_v2_AAS");
    assert_eq!(updated["asset_kind"], "Type");
    assert!(updated["version"].is_null());
    assert!(updated["description"].is_null());
}

#[tokio::test]
async fn update_renames_through_update_aas_id() {
    let app = test_app().await;
    send(&app, "POST", "/aas", Some(shell_body("urn:aas:old", "Rename_AAS"))).await;

    let mut update = shell_body("urn:aas:old", "Rename_AAS");
    update["update_aas_id"] = json!("urn:aas:new");
    let (status, updated) = send(&app, "PUT", "/aas", Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["aas_id"], "urn:aas:new");

    let new_uri = format!("/aas?aas_id={}", encode_id("urn:aas:new"));
    let (status, _) = send(&app, "GET", &new_uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let old_uri = format!("/aas?aas_id={}", encode_id("urn:aas:old"));
    let (status, _) = send(&app, "GET", &old_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_conflicts_and_misses() {
    let app = test_app().await;
    send(&app, "POST", "/aas", Some(shell_body("urn:aas:a", "A_AAS"))).await;
    send(&app, "POST", "/aas", Some(shell_body("urn:aas:b", "B_AAS"))).await;

    // Unknown target.
    let (status, body) = send(&app, "PUT", "/aas", Some(shell_body("urn:aas:x", "X_AAS"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        "Asset Administration Shell not found in database"
    );

    // Taking b's id_short.
    let (status, body) = send(&app, "PUT", "/aas", Some(shell_body("urn:aas:a", "B_AAS"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        "Another Asset Administration Shell already exists with Id Short: B_AAS"
    );

    // Renaming a onto b's aas_id.
    let mut update = shell_body("urn:aas:a", "A_AAS");
    update["update_aas_id"] = json!("urn:aas:b");
    let (status, body) = send(&app, "PUT", "/aas", Some(update)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        "Another Asset Administration Shell already exists with ID: urn:aas:b"
    );

    // A record may keep its own id_short and aas_id.
    let mut update = shell_body("urn:aas:a", "A_AAS");
    update["update_aas_id"] = json!("urn:aas:a");
    let (status, _) = send(&app, "PUT", "/aas", Some(update)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn list_returns_spaced_key_and_insertion_order() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/aas_list", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Asset Administration Shells"], json!([]));

    send(&app, "POST", "/aas", Some(shell_body("urn:aas:1", "One_AAS"))).await;
    send(&app, "POST", "/aas", Some(shell_body("urn:aas:2", "Two_AAS"))).await;

    let (status, body) = send(&app, "GET", "/aas_list", None).await;
    assert_eq!(status, StatusCode::OK);
    let shells = body["Asset Administration Shells"].as_array().unwrap();
    assert_eq!(shells.len(), 2);
    assert_eq!(shells[0]["aas_id"], "urn:aas:1");
    assert_eq!(shells[1]["aas_id"], "urn:aas:2");
    assert!(shells[0]["id"].as_i64().unwrap() < shells[1]["id"].as_i64().unwrap());
}

#[tokio::test]
async fn generated_ids_round_trip_and_vary() {
    let app = test_app().await;

    let (status, first) = send(&app, "GET", "/generate_id?type_model=aas", None).await;
    assert_eq!(status, StatusCode::OK);
    let plain = first["decode_aas_id"].as_str().unwrap();
    let encoded = first["encode_aas_id"].as_str().unwrap();
    assert!(plain.starts_with("https://example.com/ids/aas/"));
    assert_eq!(decode_id(encoded).unwrap(), plain);

    let digits = plain.rsplit('/').next().unwrap();
    let groups: Vec<&str> = digits.split('_').collect();
    assert_eq!(groups.len(), 4);
    for g in groups {
        assert_eq!(g.len(), 4);
        assert!(g.chars().all(|c| c.is_ascii_digit()));
    }

    let (_, second) = send(&app, "GET", "/generate_id?type_model=aas", None).await;
    assert_ne!(first["decode_aas_id"], second["decode_aas_id"]);

    let (status, asset) = send(&app, "GET", "/generate_id?type_model=asset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(asset["decode_aas_id"]
        .as_str()
        .unwrap()
        .starts_with("https://example.com/ids/asset/"));
}

#[tokio::test]
async fn docs_and_probes_are_served() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(response.headers()[header::LOCATION], "/docs");

    let (status, doc) = send(&app, "GET", "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/aas"].is_object());
    assert!(doc["paths"]["/generate_id"].is_object());

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(std::str::from_utf8(&page).unwrap().contains("swagger-ui"));

    let (status, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");

    let (status, ready) = send(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ready["database"], "ok");

    let (status, version) = send(&app, "GET", "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(version["name"], "aas-repository");
    assert_eq!(version["version"], env!("CARGO_PKG_VERSION"));
}
