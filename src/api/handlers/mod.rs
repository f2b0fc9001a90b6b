mod admin;
mod files;

pub use admin::health;
pub use files::{download_file, index, list_files, upload_file, upload_form};
