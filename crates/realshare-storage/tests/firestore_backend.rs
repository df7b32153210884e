//! Integration tests for the Firestore REST backend.
//!
//! A `wiremock` server stands in for the Firestore API so the exact commit
//! request and the error mapping can be checked without network access.

#![cfg(feature = "firestore-backend")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use realshare_storage::{
    DocumentStore, FieldValue, Fields, FirestoreBackend, FirestoreSettings, StorageError,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMMIT_PATH: &str = "/v1/projects/realshare-landing/databases/(default)/documents:commit";

fn backend_for(server_uri: &str) -> FirestoreBackend {
    let settings = FirestoreSettings::new("realshare-landing")
        .with_api_key("test-key")
        .with_endpoint(server_uri);
    FirestoreBackend::new(settings).expect("valid settings")
}

fn signup_fields(email: &str) -> Fields {
    let mut fields = Fields::new();
    fields.insert("email".to_owned(), email.into());
    fields.insert("createdAt".to_owned(), FieldValue::ServerTimestamp);
    fields
}

#[tokio::test]
async fn add_sends_single_create_only_commit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "writes": [{
                "update": { "fields": { "email": { "stringValue": "investor@example.com" } } },
                "updateTransforms": [{
                    "fieldPath": "createdAt",
                    "setToServerValue": "REQUEST_TIME"
                }],
                "currentDocument": { "exists": false }
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "writeResults": [{ "updateTime": "2026-10-18T10:00:00Z" }],
            "commitTime": "2026-10-18T10:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server.uri());
    let id = backend
        .add("earlyAccess", signup_fields("investor@example.com"))
        .await
        .unwrap();

    assert_eq!(id.len(), 32);
    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let name = body["writes"][0]["update"]["name"].as_str().unwrap();
    assert_eq!(
        name,
        format!("projects/realshare-landing/databases/(default)/documents/earlyAccess/{id}")
    );
}

#[tokio::test]
async fn permission_denied_maps_to_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "Missing or insufficient permissions.",
                "status": "PERMISSION_DENIED"
            }
        })))
        .mount(&server)
        .await;

    let result = backend_for(&server.uri())
        .add("earlyAccess", signup_fields("a@b.com"))
        .await;

    match result {
        Err(StorageError::Rejected { status, reason, .. }) => {
            assert_eq!(status, 403);
            assert_eq!(reason, "Missing or insufficient permissions.");
        }
        other => unreachable!("expected rejected write, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_maps_to_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = backend_for(&server.uri())
        .add("earlyAccess", signup_fields("a@b.com"))
        .await;
    assert!(matches!(result, Err(StorageError::Unavailable { .. })));
}

#[tokio::test]
async fn unreachable_endpoint_maps_to_unavailable_without_leaking_key() {
    // Bind and release a port so nothing is listening on it.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let uri = format!("http://127.0.0.1:{port}");

    let err = backend_for(&uri)
        .add("earlyAccess", signup_fields("a@b.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Unavailable { .. }));
    assert!(!err.to_string().contains("test-key"));
}

#[tokio::test]
async fn invalid_collection_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = backend_for(&server.uri())
        .add("early/access", signup_fields("a@b.com"))
        .await;
    assert!(matches!(result, Err(StorageError::InvalidCollection { .. })));
}
