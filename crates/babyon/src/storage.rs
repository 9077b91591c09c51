//! Object storage seam for uploaded media.

use std::time::Duration;

use bytes::Bytes;
use uuid::Uuid;

/// Write request handed to a [`BlobStore`].
#[derive(Debug, Clone, Copy)]
pub struct BlobUpload<'a> {
    pub data: &'a Bytes,
    pub content_type: &'a str,
    pub size_hint: u64,
    pub folder: &'a str,
    pub file_name: Option<&'a str>,
}

/// Opaque media storage (S3 or compatible). Implementations choose the object key and
/// return it; callers only keep the key and ask for time-limited read URLs later.
pub trait BlobStore: Send + Sync {
    fn put(&self, upload: BlobUpload<'_>) -> Result<String, StorageError>;
    fn presign_read(&self, key: &str, ttl: Duration) -> Result<String, StorageError>;
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Random object key under `folder`, keeping the extension of the uploaded file name.
pub fn object_key(folder: &str, file_name: Option<&str>) -> String {
    let extension = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();
    let folder = folder.trim_matches('/');
    format!("{folder}/{}{extension}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::object_key;

    #[test]
    fn object_key_keeps_extension_and_folder() {
        let key = object_key("sitter/7/ai-profile/intro", Some("My Clip.MP4"));
        assert!(key.starts_with("sitter/7/ai-profile/intro/"));
        assert!(key.ends_with(".mp4"));
    }

    #[test]
    fn object_key_drops_missing_or_odd_extensions() {
        let plain = object_key("/videos/", None);
        assert!(plain.starts_with("videos/"));
        assert!(!plain.contains('.'));

        let odd = object_key("videos", Some("clip.m p4"));
        assert!(!odd.ends_with(".m p4"));
    }
}
