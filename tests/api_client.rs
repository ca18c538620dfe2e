mod common;

use common::mock_backend::{MockBackend, MockResponse};
use common::{album_json, image_json};
use picsilfy::api::{ApiClient, ApiError, ImageUpload, SearchQuery};
use picsilfy::config::StaticCredentials;
use serde_json::json;
use std::sync::Arc;

fn client(backend: &MockBackend, token: Option<&str>) -> ApiClient {
    let credentials = match token {
        Some(token) => StaticCredentials::new(token),
        None => StaticCredentials::anonymous(),
    };
    ApiClient::new(backend.base_url(), Arc::new(credentials)).expect("client")
}

#[tokio::test]
async fn bearer_header_sent_only_with_token() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::value(json!({ "albums": [] })))
        .await;
    backend
        .enqueue_response(MockResponse::value(json!({ "albums": [] })))
        .await;

    client(&backend, Some("tok-1")).list_albums().await.unwrap();
    client(&backend, None).list_albums().await.unwrap();

    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].header("authorization"), Some("Bearer tok-1"));
    assert_eq!(requests[1].header("authorization"), None);
}

#[tokio::test]
async fn backend_error_payload_passes_through() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::error(404, "Album not found", "CastError"))
        .await;

    let err = client(&backend, Some("t")).get_album("a1").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    let payload = err.into_rejection("Failed to fetch album details");
    assert_eq!(payload.message, "Album not found");
    assert_eq!(payload.error.as_deref(), Some("CastError"));
}

#[tokio::test]
async fn missing_payload_uses_fallback_message() {
    let backend = MockBackend::start().await;
    let mut html = MockResponse::empty(502);
    html.body = b"<html>Bad gateway</html>".to_vec();
    backend.enqueue_response(html).await;

    let err = client(&backend, Some("t")).list_albums().await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 502, payload: None }));
    let payload = err.into_rejection("Failed to fetch albums");
    assert_eq!(payload.message, "Failed to fetch albums");
    assert!(payload.error.is_some());
}

#[tokio::test]
async fn unauthorized_is_an_auth_error() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::error(401, "Unauthorized", "jwt expired"))
        .await;

    let err = client(&backend, Some("stale")).current_user().await.unwrap_err();
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn album_crud_uses_expected_routes() {
    let backend = MockBackend::start().await;
    let api = client(&backend, Some("t"));
    backend
        .enqueue_response(MockResponse::value(json!({ "album": album_json("a1", "Trip") })))
        .await;
    backend
        .enqueue_response(MockResponse::value(json!({ "album": album_json("a1", "Trip 2") })))
        .await;
    backend
        .enqueue_response(MockResponse::value(json!({ "message": "Album deleted" })))
        .await;

    let draft = picsilfy::api::AlbumDraft {
        name: "Trip".into(),
        description: "Summer".into(),
        album_cover: String::new(),
    };
    api.create_album(&draft).await.unwrap();
    let updated = api.update_album("a1", &draft).await.unwrap();
    api.delete_album("a1").await.unwrap();
    assert_eq!(updated.name, "Trip 2");

    let requests = backend.captured_requests().await;
    let routes: Vec<(&str, &str)> = requests
        .iter()
        .map(|r| (r.method.as_str(), r.path.as_str()))
        .collect();
    assert_eq!(
        routes,
        vec![("POST", "/albums"), ("PUT", "/albums/a1"), ("DELETE", "/albums/a1")]
    );
    assert_eq!(
        requests[0].json(),
        json!({ "name": "Trip", "description": "Summer", "albumCover": "" })
    );
}

#[tokio::test]
async fn tag_filter_is_sent_only_when_set() {
    let backend = MockBackend::start().await;
    let api = client(&backend, Some("t"));
    for _ in 0..2 {
        backend
            .enqueue_response(MockResponse::value(
                json!({ "images": [image_json("i1", "a1", false)] }),
            ))
            .await;
    }

    api.list_images("a1", Some("beach")).await.unwrap();
    api.list_images("a1", Some("  ")).await.unwrap();

    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].path, "/albums/a1/images");
    assert_eq!(requests[0].query.as_deref(), Some("tags=beach"));
    assert_eq!(requests[1].query, None);
}

#[tokio::test]
async fn upload_sends_multipart_fields() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::value(json!({ "image": image_json("i9", "a1", true) })))
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("beach.png");
    std::fs::write(&path, b"\x89PNG fake").unwrap();
    let upload = ImageUpload {
        path,
        size: 9,
        file_name: "beach.png".into(),
        mime_type: "image/png",
        name: "Beach".into(),
        tags: "sun, sea".into(),
        person: "Bob".into(),
        is_favorite: true,
    };
    let image = client(&backend, Some("t"))
        .upload_image("a1", &upload)
        .await
        .unwrap();
    assert_eq!(image.id, "i9");

    let request = &backend.captured_requests().await[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/albums/a1/images");
    assert!(request
        .header("content-type")
        .unwrap_or_default()
        .starts_with("multipart/form-data"));
    let body = request.body_text();
    assert!(body.contains(r#"name="file"; filename="beach.png""#));
    assert!(body.to_ascii_lowercase().contains("content-type: image/png"));
    assert!(body.contains(r#"name="tags""#));
    assert!(body.contains("sun, sea"));
    assert!(body.contains(r#"name="isFavorite""#));
    assert!(body.contains("PNG fake"));
}

#[tokio::test]
async fn upload_of_vanished_file_sends_nothing() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let upload = ImageUpload {
        path: dir.path().join("gone.png"),
        size: 3,
        file_name: "gone.png".into(),
        mime_type: "image/png",
        name: "Gone".into(),
        tags: String::new(),
        person: String::new(),
        is_favorite: false,
    };

    let err = client(&backend, Some("t"))
        .upload_image("a1", &upload)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::File { .. }));
    assert!(backend.captured_requests().await.is_empty());
}

#[tokio::test]
async fn search_sends_only_non_empty_filters() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::value(json!({ "images": [] })))
        .await;

    let query = SearchQuery {
        query: "sunset".into(),
        tags: String::new(),
        person: String::new(),
        favorite: true,
    };
    client(&backend, Some("t")).search_images(&query).await.unwrap();

    let request = &backend.captured_requests().await[0];
    assert_eq!(request.path, "/search/images");
    assert_eq!(request.query.as_deref(), Some("query=sunset&favorite=true"));
}

#[tokio::test]
async fn invalid_id_never_reaches_the_backend() {
    let backend = MockBackend::start().await;
    let err = client(&backend, Some("t")).get_album("a/b").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidPath(_)));
    assert!(backend.captured_requests().await.is_empty());
}
