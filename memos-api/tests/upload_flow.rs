// SPDX-License-Identifier: MIT
//! Exercises the two-step upload against a loopback fake Memos server.
//!
//! The fake records the order of incoming calls so the tests can pin down
//! the sequencing contract: the resource endpoint is only ever hit after a
//! successful memo creation.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use base64::{engine::general_purpose, Engine as _};
use memos_api::{ApiError, MemosClient, Visibility};
use serde_json::{json, Value};

#[derive(Default)]
struct FakeMemos {
    calls: Mutex<Vec<&'static str>>,
    auth_headers: Mutex<Vec<String>>,
    resource_body: Mutex<Option<Value>>,
    fail_memo: bool,
    omit_memo_name: bool,
    fail_resource: bool,
}

impl FakeMemos {
    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

async fn memos_handler(
    State(fake): State<Arc<FakeMemos>>,
    headers: HeaderMap,
    Json(_body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    fake.calls.lock().unwrap().push("memos");
    fake.auth_headers.lock().unwrap().push(auth_of(&headers));
    if fake.fail_memo {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})));
    }
    if fake.omit_memo_name {
        return (StatusCode::OK, Json(json!({})));
    }
    (StatusCode::OK, Json(json!({ "name": "memos/42" })))
}

async fn resources_handler(
    State(fake): State<Arc<FakeMemos>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    fake.calls.lock().unwrap().push("resources");
    fake.auth_headers.lock().unwrap().push(auth_of(&headers));
    if fake.fail_resource {
        return (StatusCode::BAD_GATEWAY, Json(json!({})));
    }
    let filename = body["filename"].clone();
    *fake.resource_body.lock().unwrap() = Some(body);
    (
        StatusCode::OK,
        Json(json!({ "name": "resources/7", "filename": filename })),
    )
}

fn auth_of(headers: &HeaderMap) -> String {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Serve the fake on an ephemeral port and return the memo endpoint URL.
async fn serve(fake: Arc<FakeMemos>) -> String {
    let app = Router::new()
        .route("/api/v1/memos", post(memos_handler))
        .route("/api/v1/resources", post(resources_handler))
        .with_state(fake);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/v1/memos", addr)
}

#[tokio::test]
async fn upload_runs_memo_then_resource() {
    let fake = Arc::new(FakeMemos::default());
    let url = serve(fake.clone()).await;
    let client = MemosClient::new(&url, "Bearer test-token");

    let resource = client
        .upload_image(
            b"fake webp",
            "20240101_pic.webp",
            "image/webp",
            "20240101_pic",
            false,
            Visibility::Public,
        )
        .await
        .unwrap();

    assert_eq!(fake.calls(), vec!["memos", "resources"]);
    assert_eq!(resource.name, "resources/7");
    assert_eq!(resource.filename, "20240101_pic.webp");

    // both calls carry the token verbatim
    let auths = fake.auth_headers.lock().unwrap().clone();
    assert_eq!(auths, vec!["Bearer test-token", "Bearer test-token"]);

    // resource body: base64 payload, stringified size, memo reference
    let body = fake.resource_body.lock().unwrap().clone().unwrap();
    assert_eq!(
        body["content"],
        general_purpose::STANDARD.encode(b"fake webp")
    );
    assert_eq!(body["size"], "9");
    assert_eq!(body["memo"], "memos/42");
    assert_eq!(body["type"], "image/webp");
    assert_eq!(body["externalLink"], "");
}

#[tokio::test]
async fn memo_failure_never_touches_resource_endpoint() {
    let fake = Arc::new(FakeMemos {
        fail_memo: true,
        ..FakeMemos::default()
    });
    let url = serve(fake.clone()).await;
    let client = MemosClient::new(&url, "Bearer test-token");

    let err = client
        .upload_image(b"x", "a.webp", "image/webp", "a", false, Visibility::Private)
        .await
        .unwrap_err();

    assert_eq!(fake.calls(), vec!["memos"]);
    match err {
        ApiError::Status { call, status } => {
            assert_eq!(call, "create memo");
            assert_eq!(status, 500);
        }
        other => panic!("expected status error, got {other}"),
    }
}

#[tokio::test]
async fn memo_without_name_aborts_before_resource_call() {
    let fake = Arc::new(FakeMemos {
        omit_memo_name: true,
        ..FakeMemos::default()
    });
    let url = serve(fake.clone()).await;
    let client = MemosClient::new(&url, "Bearer test-token");

    let err = client
        .upload_image(b"x", "a.webp", "image/webp", "a", false, Visibility::Private)
        .await
        .unwrap_err();

    assert_eq!(fake.calls(), vec!["memos"]);
    assert!(matches!(err, ApiError::MissingField { field: "name", .. }));
}

#[tokio::test]
async fn resource_failure_surfaces_status_after_both_calls() {
    let fake = Arc::new(FakeMemos {
        fail_resource: true,
        ..FakeMemos::default()
    });
    let url = serve(fake.clone()).await;
    let client = MemosClient::new(&url, "Bearer test-token");

    let err = client
        .upload_image(b"x", "a.webp", "image/webp", "a", true, Visibility::Public)
        .await
        .unwrap_err();

    assert_eq!(fake.calls(), vec!["memos", "resources"]);
    match err {
        ApiError::Status { call, status } => {
            assert_eq!(call, "upload resource");
            assert_eq!(status, 502);
        }
        other => panic!("expected status error, got {other}"),
    }
}
