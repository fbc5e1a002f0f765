//! Integration tests for the authenticated pipeline: bearer injection,
//! single-flight refresh, retry-once, and session events.

use std::sync::Arc;

use certreq_client::api::IdentifierKind;
use certreq_client::auth::CredentialPair;
use certreq_client::{ApiClient, ApiConfig, ApiError, AuthenticatedClient, CredentialStore, SessionEvent};
use mockito::{Matcher, Server};
use serde_json::{Value, json};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("certreq_client=debug")
        .with_test_writer()
        .try_init();
}

fn api_client(server: &Server, store: Arc<CredentialStore>) -> ApiClient {
    ApiClient::new(ApiConfig::new(server.url()), store)
}

#[tokio::test]
async fn login_attaches_bearer_to_subsequent_requests() {
    init_tracing();
    let mut server = Server::new_async().await;

    let login_mock = server
        .mock("POST", "/api/token/")
        .match_body(Matcher::Json(json!({
            "username": "student",
            "password": "secret"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access": "T1", "refresh": "R1"}"#)
        .expect(1)
        .create_async()
        .await;

    let check_mock = server
        .mock("GET", "/api/check-student/40123456/")
        .match_header("authorization", "Bearer T1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"exists": true, "student_info": null}"#)
        .expect(1)
        .create_async()
        .await;

    let store = Arc::new(CredentialStore::in_memory());
    let api = api_client(&server, Arc::clone(&store));

    api.login("student", "secret").await.unwrap();
    assert_eq!(
        store.get(),
        Some(CredentialPair::new("T1", "R1")),
        "login should populate the credential store"
    );

    let response = api
        .check_student("40123456", IdentifierKind::StudentNumber)
        .await
        .unwrap();
    assert!(response.exists);

    login_mock.assert_async().await;
    check_mock.assert_async().await;
}

#[tokio::test]
async fn retries_once_with_refreshed_token_and_keeps_old_refresh_token() {
    init_tracing();
    let mut server = Server::new_async().await;

    let rejected = server
        .mock("GET", "/api/check-student/40123456/")
        .match_header("authorization", "Bearer T1")
        .with_status(401)
        .with_body(r#"{"detail": "token expired"}"#)
        .expect(1)
        .create_async()
        .await;

    // Refresh response deliberately omits a rotated refresh token.
    let refresh_mock = server
        .mock("POST", "/api/token/refresh/")
        .match_body(Matcher::Json(json!({"refresh": "R1"})))
        .with_status(200)
        .with_body(r#"{"access": "T2"}"#)
        .expect(1)
        .create_async()
        .await;

    let retried = server
        .mock("GET", "/api/check-student/40123456/")
        .match_header("authorization", "Bearer T2")
        .with_status(200)
        .with_body(r#"{"exists": true, "student_info": null}"#)
        .expect(1)
        .create_async()
        .await;

    let store = Arc::new(CredentialStore::in_memory());
    store.set(CredentialPair::new("T1", "R1"));
    let api = api_client(&server, Arc::clone(&store));

    let response = api
        .check_student("40123456", IdentifierKind::StudentNumber)
        .await
        .unwrap();
    assert!(response.exists);

    assert_eq!(
        store.get(),
        Some(CredentialPair::new("T2", "R1")),
        "access token replaced, refresh token retained"
    );

    rejected.assert_async().await;
    refresh_mock.assert_async().await;
    retried.assert_async().await;
}

#[tokio::test]
async fn concurrent_unauthorized_requests_trigger_exactly_one_refresh() {
    init_tracing();
    let mut server = Server::new_async().await;

    let rejected = server
        .mock("GET", "/api/check-student/40123456/")
        .match_header("authorization", "Bearer T1")
        .with_status(401)
        .with_body(r#"{"detail": "token expired"}"#)
        .expect(3)
        .create_async()
        .await;

    let refresh_mock = server
        .mock("POST", "/api/token/refresh/")
        .with_status(200)
        .with_body(r#"{"access": "T2", "refresh": "R2"}"#)
        .expect(1)
        .create_async()
        .await;

    let retried = server
        .mock("GET", "/api/check-student/40123456/")
        .match_header("authorization", "Bearer T2")
        .with_status(200)
        .with_body(r#"{"exists": true, "student_info": null}"#)
        .expect(3)
        .create_async()
        .await;

    let store = Arc::new(CredentialStore::in_memory());
    store.set(CredentialPair::new("T1", "R1"));
    let client = Arc::new(AuthenticatedClient::new(
        ApiConfig::new(server.url()),
        Arc::clone(&store),
    ));

    let url = client.config().check_student_url("40123456");
    let results = futures::future::join_all((0..3).map(|_| {
        let client = Arc::clone(&client);
        let url = url.clone();
        async move { client.get::<Value>(&url).await }
    }))
    .await;

    for result in results {
        assert!(result.is_ok(), "every caller settles on the one refresh");
    }
    assert_eq!(store.get(), Some(CredentialPair::new("T2", "R2")));

    rejected.assert_async().await;
    refresh_mock.assert_async().await;
    retried.assert_async().await;
}

#[tokio::test]
async fn refresh_failure_clears_credentials_and_signals_invalidation() {
    init_tracing();
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/api/check-student/40123456/")
        .match_header("authorization", "Bearer T1")
        .with_status(401)
        .with_body(r#"{"detail": "token expired"}"#)
        .create_async()
        .await;

    server
        .mock("POST", "/api/token/refresh/")
        .with_status(401)
        .with_body(r#"{"detail": "refresh token invalid"}"#)
        .create_async()
        .await;

    // Once the session is gone, requests go out unauthenticated.
    let anonymous = server
        .mock("GET", "/api/check-student/40123456/")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"exists": false, "student_info": null}"#)
        .expect(1)
        .create_async()
        .await;

    let store = Arc::new(CredentialStore::in_memory());
    store.set(CredentialPair::new("T1", "R1"));
    let api = api_client(&server, Arc::clone(&store));
    let mut events = api.subscribe();

    let err = api
        .check_student("40123456", IdentifierKind::StudentNumber)
        .await
        .unwrap_err();
    match err {
        ApiError::Authentication(normalized) => {
            // The original 401, not the refresh endpoint's payload.
            assert_eq!(normalized.primary_message, "token expired");
            assert_eq!(normalized.http_status, Some(401));
        }
        other => panic!("expected authentication error, got {other:?}"),
    }

    assert!(!store.is_authenticated(), "credentials cleared on refresh failure");
    assert_eq!(events.try_recv(), Ok(SessionEvent::SessionInvalidated));

    let response = api
        .check_student("40123456", IdentifierKind::StudentNumber)
        .await
        .unwrap();
    assert!(!response.exists);
    anonymous.assert_async().await;
}

#[tokio::test]
async fn missing_refresh_token_fails_without_calling_backend() {
    init_tracing();
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/api/check-student/40123456/")
        .with_status(401)
        .with_body(r#"{"detail": "authentication required"}"#)
        .create_async()
        .await;

    let refresh_mock = server
        .mock("POST", "/api/token/refresh/")
        .expect(0)
        .create_async()
        .await;

    let api = api_client(&server, Arc::new(CredentialStore::in_memory()));

    let err = api
        .check_student("40123456", IdentifierKind::StudentNumber)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Authentication(_)));

    refresh_mock.assert_async().await;
}

#[tokio::test]
async fn server_error_signals_service_unavailable() {
    init_tracing();
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/api/check-student/40123456/")
        .with_status(500)
        .with_body(r#"{"error": "database down"}"#)
        .create_async()
        .await;

    let api = api_client(&server, Arc::new(CredentialStore::in_memory()));
    let mut events = api.subscribe();

    let err = api
        .check_student("40123456", IdentifierKind::StudentNumber)
        .await
        .unwrap_err();
    match err {
        ApiError::Service(normalized) => {
            assert_eq!(normalized.primary_message, "database down");
            assert_eq!(normalized.http_status, Some(500));
        }
        other => panic!("expected service error, got {other:?}"),
    }
    assert_eq!(events.try_recv(), Ok(SessionEvent::ServiceUnavailable));
}

#[tokio::test]
async fn second_unauthorized_after_refresh_fails_fast() {
    init_tracing();
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/api/check-student/40123456/")
        .match_header("authorization", "Bearer T1")
        .with_status(401)
        .with_body(r#"{"detail": "token expired"}"#)
        .create_async()
        .await;

    // Exactly one refresh, even though the retried request is rejected too.
    let refresh_mock = server
        .mock("POST", "/api/token/refresh/")
        .with_status(200)
        .with_body(r#"{"access": "T2"}"#)
        .expect(1)
        .create_async()
        .await;

    server
        .mock("GET", "/api/check-student/40123456/")
        .match_header("authorization", "Bearer T2")
        .with_status(401)
        .with_body(r#"{"detail": "token rejected"}"#)
        .create_async()
        .await;

    let store = Arc::new(CredentialStore::in_memory());
    store.set(CredentialPair::new("T1", "R1"));
    let api = api_client(&server, Arc::clone(&store));

    let err = api
        .check_student("40123456", IdentifierKind::StudentNumber)
        .await
        .unwrap_err();
    match err {
        ApiError::Authentication(normalized) => {
            assert_eq!(normalized.primary_message, "token rejected");
        }
        other => panic!("expected authentication error, got {other:?}"),
    }

    assert!(
        !store.is_authenticated(),
        "a 401 that survives refresh tears the session down"
    );
    refresh_mock.assert_async().await;
}

#[tokio::test]
async fn logout_clears_session_even_when_backend_fails() {
    init_tracing();
    let mut server = Server::new_async().await;

    server
        .mock("DELETE", "/api/logout/")
        .with_status(500)
        .with_body(r#"{"error": "boom"}"#)
        .create_async()
        .await;

    let store = Arc::new(CredentialStore::in_memory());
    store.set(CredentialPair::new("T1", "R1"));
    let api = api_client(&server, Arc::clone(&store));

    api.logout().await;
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn validation_errors_never_reach_the_network() {
    init_tracing();
    let mut server = Server::new_async().await;

    let any_request = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let api = api_client(&server, Arc::new(CredentialStore::in_memory()));

    let err = api
        .check_student("   ", IdentifierKind::StudentNumber)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    let err = api
        .check_student("0012345678", IdentifierKind::NationalId)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    any_request.assert_async().await;
}
