mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use common::{SESSION, TestApp, body_json, multipart_body};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot-really-a-png";

fn upload_request(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let (multipart_type, body) = multipart_body(field, filename, content_type, data);
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(header::COOKIE, SESSION)
        .header(header::CONTENT_TYPE, multipart_type)
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn image_is_stored_under_random_name() {
    let app = TestApp::new().await;
    let response = app
        .send(upload_request("file", "Avatar.PNG", "image/png", PNG))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    let filepath = body["filepath"].as_str().unwrap();
    let name = filepath.strip_prefix("/uploads/").unwrap();
    assert!(name.ends_with(".png"), "{name}");
    assert_ne!(name, "Avatar.png");

    let stored = std::fs::read(app.uploads_dir().join(name)).unwrap();
    assert_eq!(stored, PNG);

    // Served back publicly.
    let response = app
        .send(Request::builder().uri(filepath).body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
}

#[tokio::test]
async fn two_uploads_of_same_file_get_distinct_names() {
    let app = TestApp::new().await;
    let first = body_json(
        app.send(upload_request("file", "a.png", "image/png", PNG))
            .await,
    )
    .await;
    let second = body_json(
        app.send(upload_request("file", "a.png", "image/png", PNG))
            .await,
    )
    .await;
    assert_ne!(first["filepath"], second["filepath"]);
}

#[tokio::test]
async fn svg_without_extension_uses_mime_subtype() {
    let app = TestApp::new().await;
    let body = body_json(
        app.send(upload_request("file", "logo", "image/svg+xml", b"<svg/>"))
            .await,
    )
    .await;
    assert!(body["filepath"].as_str().unwrap().ends_with(".svg"));
}

#[tokio::test]
async fn non_image_is_rejected() {
    let app = TestApp::new().await;
    let response = app
        .send(upload_request("file", "notes.txt", "text/plain", b"hello"))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "File must be an image");
    assert!(!app.uploads_dir().exists());
}

#[tokio::test]
async fn missing_file_field_is_rejected() {
    let app = TestApp::new().await;
    let response = app
        .send(upload_request("other", "a.png", "image/png", PNG))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "No file provided");
}

#[tokio::test]
async fn upload_over_body_limit_is_413() {
    let app = TestApp::new().await;
    let big = vec![0u8; 200 * 1024];
    let response = app
        .send(upload_request("file", "huge.png", "image/png", &big))
        .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        body_json(response).await["error"],
        "Upload exceeds the size limit"
    );
    assert!(!app.uploads_dir().exists());
}

#[tokio::test]
async fn non_multipart_body_is_rejected() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(header::COOKIE, SESSION)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    assert_eq!(app.send(request).await.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_or_unsafe_file_is_404() {
    let app = TestApp::new().await;
    for uri in ["/uploads/missing.png", "/uploads/..%2Fcontent.json"] {
        let response = app
            .send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}
