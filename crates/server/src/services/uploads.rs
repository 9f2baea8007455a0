//! Uploaded image files.
//!
//! Files are written flat into one directory which is served back under
//! [`PUBLIC_PREFIX`]. Avatars are named after their owner so a new upload
//! replaces the old one; recipe images get a random name and are never
//! overwritten or cleaned up.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::instrument;

use sugarbook_core::UserId;

/// URL path the uploads directory is served under.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Longest original extension that is kept.
const MAX_EXTENSION_LEN: usize = 10;

/// Errors from receiving or storing an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Writing the file failed.
    #[error("upload io error: {0}")]
    Io(#[from] std::io::Error),

    /// The multipart body could not be read.
    #[error("invalid multipart body: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    /// The multipart body had no `file` field.
    #[error("missing file field")]
    MissingFile,
}

/// Writes uploaded files under a root directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory files are written to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Io` if the directory cannot be created.
    pub async fn ensure_root(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Store `user`'s avatar, replacing any previous one with the same
    /// extension. Returns the public URL.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Io` if the file cannot be written.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn save_avatar(
        &self,
        user: &UserId,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        let filename = with_extension(format!("avatar_{user}"), original_name);
        self.write(&filename, bytes).await
    }

    /// Store a recipe image under a fresh random name. Returns the public URL.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Io` if the file cannot be written.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn save_recipe_image(
        &self,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        let filename = with_extension(format!("recipe_{}", uuid::Uuid::new_v4()), original_name);
        self.write(&filename, bytes).await
    }

    async fn write(&self, filename: &str, bytes: &[u8]) -> Result<String, UploadError> {
        tokio::fs::write(self.root.join(filename), bytes).await?;
        tracing::debug!(filename, "stored upload");
        Ok(format!("{PUBLIC_PREFIX}/{filename}"))
    }
}

/// The final extension of `original_name`, if it is safe to reuse.
///
/// Only 1 to 10 ASCII alphanumerics are kept, so separators and dots can
/// never reach the stored filename.
#[must_use]
pub fn safe_extension(original_name: &str) -> Option<&str> {
    let (_, extension) = original_name.rsplit_once('.')?;
    let valid = !extension.is_empty()
        && extension.len() <= MAX_EXTENSION_LEN
        && extension.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then_some(extension)
}

fn with_extension(stem: String, original_name: Option<&str>) -> String {
    match original_name.and_then(safe_extension) {
        Some(extension) => format!("{stem}.{extension}"),
        None => stem,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_extension() {
        assert_eq!(safe_extension("cake.png"), Some("png"));
        assert_eq!(safe_extension("archive.tar.gz"), Some("gz"));
        assert_eq!(safe_extension("noext"), None);
        assert_eq!(safe_extension("trailing."), None);
        assert_eq!(safe_extension("x./../../etc/passwd"), None);
        assert_eq!(safe_extension("x.averyveryverylongone"), None);
        assert_eq!(safe_extension("x.pn g"), None);
    }

    #[tokio::test]
    async fn test_avatar_overwrites_previous() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        let user = UserId::new("u1");

        let first = store.save_avatar(&user, Some("me.png"), b"one").await.unwrap();
        let second = store.save_avatar(&user, Some("me2.png"), b"two").await.unwrap();

        assert_eq!(first, "/uploads/avatar_u1.png");
        assert_eq!(first, second);
        let on_disk = tokio::fs::read(dir.path().join("avatar_u1.png")).await.unwrap();
        assert_eq!(on_disk, b"two");
    }

    #[tokio::test]
    async fn test_recipe_images_get_unique_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let a = store.save_recipe_image(Some("cake.jpg"), b"a").await.unwrap();
        let b = store.save_recipe_image(Some("cake.jpg"), b"b").await.unwrap();

        assert_ne!(a, b);
        assert!(a.starts_with("/uploads/recipe_"));
        assert!(a.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn test_unsafe_name_drops_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let url = store
            .save_avatar(&UserId::new("u1"), Some("evil./../x"), b"x")
            .await
            .unwrap();
        assert_eq!(url, "/uploads/avatar_u1");
    }

    #[tokio::test]
    async fn test_ensure_root_creates_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("a").join("b"));
        store.ensure_root().await.unwrap();
        assert!(store.root().is_dir());
    }
}
