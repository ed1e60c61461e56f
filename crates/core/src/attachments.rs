//! Owned file attachments.
//!
//! Several entities own uploaded files whose lifecycle is bound to the row
//! (a book's pdf and cover, an author's portrait, a post's image). Each
//! entity declares its attachment columns once; the cascade engine snapshots
//! them before a delete, and the api storage service removes them from disk
//! after the row mutation has durably succeeded.

/// One file-bearing column of an entity, with the storage subdirectory its
/// files live under (relative to the upload root).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentField {
    pub column: &'static str,
    pub subdir: &'static str,
}

/// A concrete stored file scheduled for removal: `{upload_root}/{subdir}/{name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub subdir: &'static str,
    pub name: String,
}

impl StoredFile {
    pub fn new(subdir: &'static str, name: impl Into<String>) -> Self {
        StoredFile {
            subdir,
            name: name.into(),
        }
    }
}

/// Declared by every entity type that owns file attachments. Consumed by the
/// cascade engine and by update handlers replacing a file in place.
pub trait OwnedAttachments {
    /// The attachment columns of this entity.
    const FIELDS: &'static [AttachmentField];
}

/// If `new` replaces a different previous value, return the old file for
/// deletion. Never yields anything while `new` is unset or unchanged, so an
/// update that does not touch the field cannot destroy its file.
pub fn replaced_file(
    field: AttachmentField,
    old: Option<&str>,
    new: Option<&str>,
) -> Option<StoredFile> {
    match (old, new) {
        (Some(old), Some(new)) if old != new => Some(StoredFile::new(field.subdir, old)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: AttachmentField = AttachmentField {
        column: "image",
        subdir: "posts",
    };

    #[test]
    fn unchanged_value_yields_nothing() {
        assert_eq!(replaced_file(FIELD, Some("a.png"), Some("a.png")), None);
        assert_eq!(replaced_file(FIELD, Some("a.png"), None), None);
        assert_eq!(replaced_file(FIELD, None, Some("b.png")), None);
    }

    #[test]
    fn replacement_yields_old_file() {
        let file = replaced_file(FIELD, Some("a.png"), Some("b.png")).unwrap();
        assert_eq!(file, StoredFile::new("posts", "a.png"));
    }
}
