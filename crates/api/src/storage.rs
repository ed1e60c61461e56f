//! Uploaded-file storage.
//!
//! Files live under the configured upload root, one subdirectory per
//! attachment kind. Stored names are random UUIDs with the original
//! extension, so client-supplied names never reach the filesystem.
//!
//! Removal is best-effort: rows are the source of truth, so a failed unlink
//! is logged and skipped rather than failing the request that already
//! committed its database change.

use std::path::{Path, PathBuf};

use uuid::Uuid;
use warraq_core::attachments::StoredFile;

/// Upload kinds accepted by the upload endpoint, mapped to their storage
/// subdirectory. Anything else is rejected with 400.
pub const UPLOAD_KINDS: &[(&str, &str)] = &[
    ("profile", "profile"),
    ("author", "author"),
    ("publisher", "publisher"),
    ("category", "category"),
    ("book-pdf", "books/pdfs"),
    ("book-image", "books/images"),
    ("slide", "slides"),
    ("post", "posts"),
    ("notification", "notification"),
];

/// Resolve an upload kind to its storage subdirectory.
pub fn subdir_for_kind(kind: &str) -> Option<&'static str> {
    UPLOAD_KINDS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, subdir)| *subdir)
}

/// Filesystem-backed attachment storage rooted at the upload directory.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Storage { root: root.into() }
    }

    /// Absolute path of a stored file.
    pub fn path(&self, subdir: &str, name: &str) -> PathBuf {
        self.root.join(subdir).join(name)
    }

    /// Persist uploaded bytes under `subdir`, returning the stored name.
    ///
    /// The stored name is a fresh UUID carrying over the extension of the
    /// client filename, if any.
    pub async fn save(
        &self,
        subdir: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> std::io::Result<String> {
        let name = match Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext.to_lowercase()),
            None => Uuid::new_v4().to_string(),
        };
        let dir = self.root.join(subdir);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&name), bytes).await?;
        Ok(name)
    }

    /// Remove one stored file, logging instead of failing when the unlink
    /// does not succeed.
    pub async fn remove(&self, file: &StoredFile) {
        let path = self.path(file.subdir, &file.name);
        if let Err(err) = tokio::fs::remove_file(&path).await {
            tracing::warn!(path = %path.display(), error = %err, "Failed to remove stored file");
        }
    }

    /// Remove a batch of stored files, typically a cascade snapshot.
    pub async fn remove_all(&self, files: &[StoredFile]) {
        for file in files {
            self.remove(file).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(subdir_for_kind("book-pdf"), Some("books/pdfs"));
        assert_eq!(subdir_for_kind("profile"), Some("profile"));
        assert_eq!(subdir_for_kind("passwd"), None);
    }

    #[tokio::test]
    async fn test_save_uses_uuid_name_with_extension() {
        let dir = std::env::temp_dir().join(format!("warraq-storage-{}", Uuid::new_v4()));
        let storage = Storage::new(&dir);

        let name = storage
            .save("posts", "../../../etc/Evil Name.PNG", b"data")
            .await
            .unwrap();
        assert!(name.ends_with(".png"), "extension is kept, lowercased");
        assert!(!name.contains(".."), "client path components are discarded");
        assert!(tokio::fs::try_exists(storage.path("posts", &name)).await.unwrap());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_quiet() {
        let storage = Storage::new(std::env::temp_dir());
        // No panic, no error surfaced.
        storage
            .remove(&StoredFile::new("posts", "does-not-exist.png"))
            .await;
    }
}
