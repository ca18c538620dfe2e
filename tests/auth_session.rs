mod common;

use common::mock_backend::{MockBackend, MockResponse};
use common::{ann, make_store, signed_in_store};
use picsilfy::session::SessionStore;
use picsilfy::store::auth::{AuthKind, AuthOperation};
use picsilfy::store::profile::ProfileOperation;
use picsilfy::store::{Status, Store};
use picsilfy::validation::{login_request, register_request};
use serde_json::json;
use std::sync::Arc;

fn ann_json() -> serde_json::Value {
    json!({ "_id": "u1", "name": "Ann", "username": "ann" })
}

#[tokio::test]
async fn login_persists_session() {
    let backend = MockBackend::start().await;
    let (mut store, session, dir) = make_store(&backend);
    assert!(!store.state().auth.is_authenticated);

    backend
        .enqueue_response(MockResponse::value(json!({ "token": "tok-new", "user": ann_json() })))
        .await;
    let request = login_request("ann", "secret").unwrap();
    store.run(AuthOperation::Login(request)).await.unwrap();

    assert!(store.state().auth.is_authenticated);
    assert_eq!(store.state().auth.username(), Some("ann"));
    assert!(session.is_signed_in());

    let reopened = SessionStore::open(dir.path().join("session.json")).unwrap();
    assert_eq!(reopened.user(), Some(ann()));

    let login = &backend.captured_requests().await[0];
    assert_eq!(login.path, "/auth/login");
    assert_eq!(login.header("authorization"), None);
    assert_eq!(login.json(), json!({ "username": "ann", "password": "secret" }));
}

#[tokio::test]
async fn token_is_sent_after_login() {
    let backend = MockBackend::start().await;
    let (mut store, _session, _dir) = make_store(&backend);

    backend
        .enqueue_response(MockResponse::value(json!({ "token": "tok-new", "user": ann_json() })))
        .await;
    store
        .run(AuthOperation::Login(login_request("ann", "secret").unwrap()))
        .await
        .unwrap();
    backend
        .enqueue_response(MockResponse::value(json!({ "user": ann_json() })))
        .await;
    store.run(ProfileOperation::Fetch).await.unwrap();

    let requests = backend.captured_requests().await;
    assert_eq!(requests[1].header("authorization"), Some("Bearer tok-new"));
}

#[tokio::test]
async fn token_is_sent_when_session_file_cannot_be_written() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocked");
    let session = Arc::new(SessionStore::open(blocker.join("session.json")).unwrap());
    std::fs::write(&blocker, "").unwrap();
    let mut store = Store::open(&backend.base_url(), session.clone()).unwrap();

    backend
        .enqueue_response(MockResponse::value(json!({ "token": "tok-new", "user": ann_json() })))
        .await;
    store
        .run(AuthOperation::Login(login_request("ann", "secret").unwrap()))
        .await
        .unwrap();
    assert!(store.state().auth.is_authenticated);
    assert!(session.is_signed_in());

    backend
        .enqueue_response(MockResponse::value(json!({ "user": ann_json() })))
        .await;
    store.run(ProfileOperation::Fetch).await.unwrap();

    let requests = backend.captured_requests().await;
    assert_eq!(requests[1].header("authorization"), Some("Bearer tok-new"));
}

#[tokio::test]
async fn failed_login_stays_signed_out() {
    let backend = MockBackend::start().await;
    let (mut store, session, _dir) = make_store(&backend);

    backend
        .enqueue_response(MockResponse::error(401, "Invalid credentials", "Unauthorized"))
        .await;
    let err = store
        .run(AuthOperation::Login(login_request("ann", "nope").unwrap()))
        .await
        .unwrap_err();

    assert_eq!(err.message, "Invalid credentials");
    assert!(!store.state().auth.is_authenticated);
    assert!(!session.is_signed_in());
    assert_eq!(store.state().auth.lifecycle.status, Status::Failed);
}

#[tokio::test]
async fn register_does_not_sign_in() {
    let backend = MockBackend::start().await;
    let (mut store, session, _dir) = make_store(&backend);

    backend
        .enqueue_response(MockResponse::value(json!({ "message": "User registered" })))
        .await;
    let request = register_request("Ann", "ann", "secret").unwrap();
    store.run(AuthOperation::Register(request)).await.unwrap();

    assert!(store.state().auth.registered);
    assert!(!store.state().auth.is_authenticated);
    assert!(!session.is_signed_in());
    assert!(store.state().auth.lifecycle.succeeded(AuthKind::Register));
}

#[tokio::test]
async fn logout_clears_session_and_state() {
    let backend = MockBackend::start().await;
    let (mut store, session, _dir) = signed_in_store(&backend);
    assert!(store.state().auth.is_authenticated);

    backend
        .enqueue_response(MockResponse::value(json!({ "albums": [common::album_json("a1", "Trip")] })))
        .await;
    store
        .run(picsilfy::store::album::AlbumOperation::FetchAll)
        .await
        .unwrap();

    backend
        .enqueue_response(MockResponse::value(json!({ "message": "Logged out" })))
        .await;
    store.run(AuthOperation::Logout).await.unwrap();

    assert!(!session.is_signed_in());
    assert!(!store.state().auth.is_authenticated);
    assert!(store.state().auth.user.is_none());
    assert!(store.state().album.albums.is_empty());
}

#[tokio::test]
async fn logout_succeeds_locally_when_backend_fails() {
    let backend = MockBackend::start().await;
    let (mut store, session, _dir) = signed_in_store(&backend);

    backend
        .enqueue_response(MockResponse::error(500, "Server error", "down"))
        .await;
    store.run(AuthOperation::Logout).await.unwrap();

    assert!(!session.is_signed_in());
    assert!(!store.state().auth.is_authenticated);
}

#[tokio::test]
async fn failed_restore_clears_session() {
    let backend = MockBackend::start().await;
    let (mut store, session, _dir) = signed_in_store(&backend);

    backend
        .enqueue_response(MockResponse::error(401, "Token expired", "jwt expired"))
        .await;
    assert!(store.run(AuthOperation::CurrentUser).await.is_err());

    assert!(!session.is_signed_in());
    assert!(!store.state().auth.is_authenticated);
    assert!(store.state().auth.user.is_none());
}

#[tokio::test]
async fn profile_update_refreshes_signed_in_user() {
    let backend = MockBackend::start().await;
    let (mut store, _session, _dir) = signed_in_store(&backend);

    backend
        .enqueue_response(MockResponse::value(json!({
            "user": { "_id": "u1", "name": "Annie", "username": "ann" }
        })))
        .await;
    let update = picsilfy::validation::profile_update("Annie", "").unwrap();
    store.run(ProfileOperation::Update(update)).await.unwrap();

    assert_eq!(
        store.state().auth.user.as_ref().map(|u| u.name.as_str()),
        Some("Annie")
    );
    assert_eq!(
        store.state().profile.message.as_deref(),
        Some(picsilfy::store::profile::PROFILE_UPDATED)
    );
}
