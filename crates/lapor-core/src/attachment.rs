//! Attachment payloads: raw bytes awaiting upload vs persisted references.

use serde::{Deserialize, Serialize};

/// A file picked locally, not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A stable reference the server already holds for an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    pub filename: String,
}

/// An announcement image at submission time.
///
/// The two shapes travel differently: pending payloads become multipart
/// upload parts, persisted references are listed so the server knows which
/// existing files to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageAttachment {
    Pending(PendingUpload),
    Persisted(ImageRef),
}

impl ImageAttachment {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

/// Split images into upload parts and keep-list references, preserving the
/// original order within each group.
pub fn partition(images: &[ImageAttachment]) -> (Vec<&PendingUpload>, Vec<&ImageRef>) {
    let mut pending = Vec::new();
    let mut persisted = Vec::new();
    for image in images {
        match image {
            ImageAttachment::Pending(upload) => pending.push(upload),
            ImageAttachment::Persisted(image_ref) => persisted.push(image_ref),
        }
    }
    (pending, persisted)
}
