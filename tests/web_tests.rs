//! End-to-end tests driving the HTTP surface against a temporary storage root.

use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use file_host::config::Config;
use file_host::store::FileStore;
use file_host::{api, AppState};
use serde_json::Value;

fn create_test_server(dir: &tempfile::TempDir) -> TestServer {
    let config = Config {
        bind_address: "127.0.0.1:0".to_string(),
        storage_root: dir.path().to_string_lossy().into_owned(),
        max_upload_size: 1024 * 1024,
    };
    let store = FileStore::new(dir.path()).expect("Failed to create test store");
    let state = Arc::new(AppState { config, store });

    TestServer::new(api::create_router(state)).expect("Failed to create test server")
}

fn upload_form(name: &str, content: &[u8]) -> MultipartForm {
    MultipartForm::new().add_part(
        "multipartFile",
        Part::bytes(content.to_vec())
            .file_name(name)
            .mime_type("text/plain"),
    )
}

#[tokio::test]
async fn test_index_redirects_to_files() {
    let dir = tempfile::tempdir().unwrap();
    let server = create_test_server(&dir);

    let response = server.get("/").await;
    response.assert_status(axum::http::StatusCode::FOUND);
    assert_eq!(response.header("location"), "/files");
}

#[tokio::test]
async fn test_listing_empty_root() {
    let dir = tempfile::tempdir().unwrap();
    let server = create_test_server(&dir);

    let response = server.get("/files").await;
    response.assert_status_ok();
    assert!(response.text().contains("Uploaded Files"));
}

#[tokio::test]
async fn test_upload_list_download_flow() {
    let dir = tempfile::tempdir().unwrap();
    let server = create_test_server(&dir);

    // Upload
    let upload = server
        .post("/upload")
        .multipart(upload_form("test.txt", b"Test file content"))
        .await;
    upload.assert_status(axum::http::StatusCode::FOUND);
    assert_eq!(upload.header("location"), "/files");

    // Listing shows the file with its byte size
    let listing = server.get("/files").await;
    listing.assert_status_ok();
    let page = listing.text();
    assert!(page.contains("test.txt"));
    assert!(page.contains("<td>17</td>"));

    // Download reproduces the bytes with an attachment header
    let download = server.get("/files/test.txt").await;
    download.assert_status_ok();
    assert_eq!(
        download.header("content-disposition"),
        "attachment; filename=\"test.txt\""
    );
    assert_eq!(download.header("content-length"), "17");
    assert_eq!(
        download.as_bytes().as_ref(),
        b"Test file content".as_slice()
    );
}

#[tokio::test]
async fn test_upload_collision_keeps_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let server = create_test_server(&dir);

    server
        .post("/upload")
        .multipart(upload_form("test.txt", b"first"))
        .await
        .assert_status(axum::http::StatusCode::FOUND);
    server
        .post("/upload")
        .multipart(upload_form("test.txt", b"second"))
        .await
        .assert_status(axum::http::StatusCode::FOUND);

    let page = server.get("/files").await.text();
    assert!(page.contains("test.txt"));
    assert!(page.contains("test-01.txt"));

    let original = server.get("/files/test.txt").await;
    assert_eq!(original.as_bytes().as_ref(), b"first".as_slice());
    let renamed = server.get("/files/test-01.txt").await;
    assert_eq!(renamed.as_bytes().as_ref(), b"second".as_slice());
}

#[tokio::test]
async fn test_upload_form_renders() {
    let dir = tempfile::tempdir().unwrap();
    let server = create_test_server(&dir);

    let response = server.get("/upload").await;
    response.assert_status_ok();
    let page = response.text();
    assert!(page.contains("multipartFile"));
    assert!(!page.contains("Please select valid file."));
}

#[tokio::test]
async fn test_upload_empty_file_rerenders_form() {
    let dir = tempfile::tempdir().unwrap();
    let server = create_test_server(&dir);

    let response = server
        .post("/upload")
        .multipart(upload_form("empty.txt", b""))
        .await;

    // Validation outcome, not an error: the form comes back with a message
    response.assert_status_ok();
    assert!(response.text().contains("Please select valid file."));

    let listing = server.get("/files").await.text();
    assert!(!listing.contains("empty.txt"));
}

#[tokio::test]
async fn test_upload_without_file_field_rerenders_form() {
    let dir = tempfile::tempdir().unwrap();
    let server = create_test_server(&dir);

    let form = MultipartForm::new().add_text("unrelated", "value");
    let response = server.post("/upload").multipart(form).await;

    response.assert_status_ok();
    assert!(response.text().contains("Please select valid file."));
}

#[tokio::test]
async fn test_download_missing_file_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let server = create_test_server(&dir);

    let response = server.get("/files/nope.txt").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
    assert!(response.text().contains("nope.txt"));
}

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let server = create_test_server(&dir);

    let response = server.get("/_internal/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
