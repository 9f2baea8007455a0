//! Orders: client snapshot, partial patch, ordering and deletion.

use axum::http::StatusCode;
use serde_json::{Value, json};

use sugarbook_integration_tests::{Account, TestApp};

async fn client(app: &TestApp, account: &Account, name: &str) -> String {
    let response = app
        .post("/api/clients", &account.token, &json!({"name": name}))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    response.body["id"].as_str().unwrap_or_default().to_owned()
}

async fn order(app: &TestApp, account: &Account, client_id: &str, due: &str) -> Value {
    let response = app
        .post(
            "/api/orders",
            &account.token,
            &json!({
                "clientId": client_id,
                "item": "Wedding cake",
                "dueDate": due,
                "total": 120.0,
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    response.body
}

#[tokio::test]
async fn test_create_order_snapshots_client() {
    let app = TestApp::new();
    let account = app.signup("Ana", "ana@example.com").await;
    let client_id = client(&app, &account, "Bia").await;

    let created = order(&app, &account, &client_id, "2026-11-01").await;
    assert_eq!(created["status"], "New");
    assert_eq!(created["notes"], "");
    assert_eq!(created["client"], json!({"id": client_id, "name": "Bia"}));

    // Renaming the client leaves the snapshot alone.
    app.put(
        &format!("/api/clients/{client_id}"),
        &account.token,
        &json!({"name": "Beatriz"}),
    )
    .await;
    let orders = app.get("/api/orders", &account.token).await;
    assert_eq!(orders.body[0]["client"]["name"], "Bia");
}

#[tokio::test]
async fn test_partial_patch_changes_only_supplied_fields() {
    let app = TestApp::new();
    let account = app.signup("Ana", "ana@example.com").await;
    let client_id = client(&app, &account, "Bia").await;
    let created = order(&app, &account, &client_id, "2026-11-01").await;
    let id = created["id"].as_str().unwrap_or_default().to_owned();

    let patched = app
        .put(
            &format!("/api/orders/{id}"),
            &account.token,
            &json!({"status": "In Progress", "notes": null}),
        )
        .await;
    assert_eq!(patched.status, StatusCode::OK);
    assert_eq!(patched.body["status"], "In Progress");
    assert_eq!(patched.body["item"], "Wedding cake");
    assert_eq!(patched.body["dueDate"], "2026-11-01");
    assert_eq!(patched.body["notes"], "");
    assert_eq!(patched.body["createdAt"], created["createdAt"]);

    let other_client = client(&app, &account, "Caio").await;
    let moved = app
        .put(
            &format!("/api/orders/{id}"),
            &account.token,
            &json!({"clientId": other_client, "client": {"id": "x", "name": "Forged"}}),
        )
        .await;
    assert_eq!(moved.status, StatusCode::OK);
    assert_eq!(moved.body["clientId"], other_client.as_str());
    assert_eq!(moved.body["client"]["name"], "Caio");
    assert_eq!(moved.body["status"], "In Progress");
}

#[tokio::test]
async fn test_patch_with_unknown_client_fails() {
    let app = TestApp::new();
    let account = app.signup("Ana", "ana@example.com").await;
    let client_id = client(&app, &account, "Bia").await;
    let created = order(&app, &account, &client_id, "2026-11-01").await;
    let id = created["id"].as_str().unwrap_or_default().to_owned();

    let response = app
        .put(
            &format!("/api/orders/{id}"),
            &account.token,
            &json!({"clientId": "missing"}),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["detail"], "Client not found");
}

#[tokio::test]
async fn test_orders_listed_latest_due_first() {
    let app = TestApp::new();
    let account = app.signup("Ana", "ana@example.com").await;
    let client_id = client(&app, &account, "Bia").await;
    for due in ["2026-11-05", "2026-12-24", "2026-10-30"] {
        order(&app, &account, &client_id, due).await;
    }

    let orders = app.get("/api/orders", &account.token).await;
    let dues: Vec<&str> = orders
        .body
        .as_array()
        .map(|list| list.iter().filter_map(|o| o["dueDate"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(dues, ["2026-12-24", "2026-11-05", "2026-10-30"]);
}

#[tokio::test]
async fn test_repeated_delete() {
    let app = TestApp::new();
    let account = app.signup("Ana", "ana@example.com").await;
    let client_id = client(&app, &account, "Bia").await;
    let created = order(&app, &account, &client_id, "2026-11-01").await;
    let uri = format!("/api/orders/{}", created["id"].as_str().unwrap_or_default());

    let first = app.delete(&uri, &account.token).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["message"], "Order deleted");

    let second = app.delete(&uri, &account.token).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);
    assert_eq!(second.body["detail"], "Order not found");

    // Deleting a client keeps orders that reference it.
    let removed = app
        .delete(&format!("/api/clients/{client_id}"), &account.token)
        .await;
    assert_eq!(removed.body["message"], "Client deleted");
}
