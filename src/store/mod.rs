use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O failure or a filename that would resolve outside the root.
    #[error("{0}")]
    Storage(String),
    /// Requested file is absent or not readable.
    #[error("{0}")]
    NotFound(String),
}

/// Name and size of one stored file. Computed fresh on every listing,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
}

/// Readable handle to a stored file, streamed by the download handler.
pub struct StoredFile {
    pub name: String,
    pub size: u64,
    pub file: tokio::fs::File,
}

/// Flat-directory file store. Every stored file is a direct child of the
/// configured root; collisions are renamed, never overwritten.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create the storage root (and missing parents) if absent.
    /// Failure here is fatal to startup.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root).map_err(|e| {
            StoreError::Storage(format!("Could not initialize storage root: {e}"))
        })?;
        Ok(Self { root })
    }

    /// Store `data` under `filename`, picking a collision-free name when the
    /// destination already exists. Returns the name actually used.
    pub async fn store(&self, filename: &str, data: Bytes) -> Result<String, StoreError> {
        let mut destination = self.resolve(filename)?;
        let mut stored_name = filename.to_string();

        if destination.exists() {
            stored_name = self.unique_filename(filename);
            destination = self.root.join(&stored_name);
        }

        tokio::fs::write(&destination, &data)
            .await
            .map_err(|e| StoreError::Storage(format!("Failed to store file: {e}")))?;

        Ok(stored_name)
    }

    /// Snapshot of the regular files directly under the root, sorted by name.
    pub async fn load_all(&self) -> Result<Vec<FileInfo>, StoreError> {
        let read_failed = |e| StoreError::Storage(format!("Failed to read stored files: {e}"));

        let mut entries = tokio::fs::read_dir(&self.root).await.map_err(read_failed)?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(read_failed)? {
            let metadata = entry.metadata().await.map_err(read_failed)?;
            if !metadata.is_file() {
                continue;
            }
            files.push(FileInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                size: metadata.len(),
            });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    /// Open `name` for reading. Absent or unreadable files map to `NotFound`.
    pub async fn load_as_resource(&self, name: &str) -> Result<StoredFile, StoreError> {
        let path = self.resolve(name)?;

        let not_found = || StoreError::NotFound(format!("Failed to read file: {name}"));

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(m) if m.is_file() => m,
            Ok(_) => return Err(not_found()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(StoreError::Storage(format!("Failed to read file: {e}"))),
        };

        let file = match tokio::fs::File::open(&path).await {
            Ok(f) => f,
            Err(e)
                if e.kind() == std::io::ErrorKind::NotFound
                    || e.kind() == std::io::ErrorKind::PermissionDenied =>
            {
                return Err(not_found())
            }
            Err(e) => return Err(StoreError::Storage(format!("Failed to read file: {e}"))),
        };

        Ok(StoredFile {
            name: name.to_string(),
            size: metadata.len(),
            file,
        })
    }

    /// Resolve a client-supplied name to a path under the root. Anything
    /// other than a single normal path component would escape the flat
    /// directory and is rejected.
    fn resolve(&self, name: &str) -> Result<PathBuf, StoreError> {
        let mut components = Path::new(name).components();
        let single_normal = matches!(components.next(), Some(Component::Normal(_)))
            && components.next().is_none();

        if name.is_empty() || !single_normal {
            return Err(StoreError::Storage(format!("Invalid filename: {name}")));
        }

        Ok(self.root.join(name))
    }

    /// Probe `stem-NN<ext>` with a zero-padded counter until an unused name
    /// is found. The counter starts at 01 and widens naturally past 99.
    fn unique_filename(&self, filename: &str) -> String {
        let (stem, extension) = split_extension(filename);

        let mut count: u32 = 1;
        loop {
            let candidate = format!("{stem}-{count:02}{extension}");
            if !self.root.join(&candidate).exists() {
                return candidate;
            }
            count += 1;
        }
    }
}

/// Split at the last dot. A dot at position 0 is part of the name, not an
/// extension separator, so hidden files keep their full name as the stem.
fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => filename.split_at(idx),
        _ => (filename, ""),
    }
}
