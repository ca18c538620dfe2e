//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use picsilfy::api::User;
use picsilfy::session::SessionStore;
use picsilfy::store::Store;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

use mock_backend::MockBackend;

/// Store wired to `backend`, with its session file in a temp dir.
///
/// Keep the `TempDir` alive for the duration of the test.
pub fn make_store(backend: &MockBackend) -> (Store, Arc<SessionStore>, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let session = Arc::new(
        SessionStore::open(dir.path().join("session.json")).expect("Failed to open session"),
    );
    let store = Store::open(&backend.base_url(), session.clone()).expect("Failed to build store");
    (store, session, dir)
}

/// Like [`make_store`], but already signed in as `ann`.
pub fn signed_in_store(backend: &MockBackend) -> (Store, Arc<SessionStore>, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("session.json");
    SessionStore::open(&path)
        .expect("Failed to open session")
        .save("tok-ann", &ann())
        .expect("Failed to save session");
    let session = Arc::new(SessionStore::open(path).expect("Failed to reopen session"));
    let store = Store::open(&backend.base_url(), session.clone()).expect("Failed to build store");
    (store, session, dir)
}

pub fn ann() -> User {
    User {
        id: "u1".to_string(),
        name: "Ann".to_string(),
        username: "ann".to_string(),
        profile_picture: None,
    }
}

pub fn album_json(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "description": "",
        "createdAt": "2025-03-04T10:00:00Z",
        "owner": "u1",
        "sharedUsers": [],
    })
}

pub fn image_json(id: &str, album_id: &str, favorite: bool) -> Value {
    json!({
        "_id": id,
        "albumId": album_id,
        "file": format!("https://cdn.example/{}.png", id),
        "name": format!("Image {}", id),
        "tags": ["beach"],
        "isFavorite": favorite,
        "comments": [],
    })
}
