//! file-host - a minimal self-hosted file upload and download service
//!
//! Uploaded files live as direct children of a single storage root on the
//! local filesystem. The HTTP layer serves server-rendered pages for listing
//! and uploading, and streams downloads with an attachment header. Filename
//! collisions are resolved by suffixing a zero-padded counter; existing
//! files are never overwritten.

pub mod api;
pub mod config;
pub mod store;

use config::Config;
use store::FileStore;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub store: FileStore,
}
