use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use bytes::Bytes;
use tokio_util::io::ReaderStream;

use crate::api::response::ApiError;
use crate::api::views;
use crate::AppState;

/// GET / — the landing page just forwards to the listing.
pub async fn index() -> impl IntoResponse {
    redirect_to_listing()
}

/// GET /files
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ApiError> {
    let files = state.store.load_all().await?;
    Ok(Html(views::listing_page(&files)))
}

/// GET /files/:filename
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let resource = state.store.load_as_resource(&filename).await?;

    let mime_type = mime_guess::from_path(&resource.name).first_or_octet_stream();

    let headers = [
        (header::CONTENT_TYPE, mime_type.to_string()),
        (header::CONTENT_LENGTH, resource.size.to_string()),
        (
            header::CONTENT_DISPOSITION,
            content_disposition(&resource.name),
        ),
    ];

    let body = Body::from_stream(ReaderStream::new(resource.file));
    Ok((headers, body).into_response())
}

/// GET /upload
pub async fn upload_form() -> Html<String> {
    Html(views::upload_page(None))
}

/// POST /upload — multipart form with the file under `multipartFile`.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart data: {e}")))?
    {
        if field.name() == Some("multipartFile") {
            let filename = field.file_name().unwrap_or("").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("Failed to read file: {e}")))?;
            upload = Some((filename, data));
        }
        // Ignore unknown fields
    }

    match upload {
        Some((filename, data)) if !filename.is_empty() && !data.is_empty() => {
            let stored_name = state.store.store(&filename, data).await?;
            tracing::debug!(filename = %stored_name, "Stored uploaded file");
            Ok(redirect_to_listing().into_response())
        }
        _ => Ok(Html(views::upload_page(Some("Please select valid file."))).into_response()),
    }
}

fn redirect_to_listing() -> (StatusCode, [(header::HeaderName, &'static str); 1]) {
    (StatusCode::FOUND, [(header::LOCATION, "/files")])
}

/// Header injection is the only real concern here: names are single path
/// components, but quotes and control characters must not reach the header.
fn content_disposition(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            _ => c,
        })
        .collect();

    format!("attachment; filename=\"{sanitized}\"")
}
