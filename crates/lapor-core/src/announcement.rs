//! Announcement entity and editor draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attachment::{ImageAttachment, ImageRef};
use crate::error::ValidationError;
use crate::mirror::Identified;

/// A published announcement as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "judul")]
    pub title: String,
    #[serde(rename = "isi")]
    pub body: String,
    #[serde(rename = "imageUrls", default)]
    pub images: Vec<ImageRef>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Identified for Announcement {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Editor state for a new or edited announcement.
///
/// `images` mixes newly picked files with references kept from a previous
/// version. [`validate`](Self::validate) enforces the at-least-one-image rule
/// before anything touches the network — for edits as well as creates.
#[derive(Debug, Clone)]
pub struct AnnouncementDraft {
    pub title: String,
    pub body: String,
    pub images: Vec<ImageAttachment>,
}

impl AnnouncementDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingAnnouncementTitle);
        }
        if self.body.trim().is_empty() {
            return Err(ValidationError::MissingBody);
        }
        if self.images.is_empty() {
            return Err(ValidationError::NoImages);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::PendingUpload;

    fn draft() -> AnnouncementDraft {
        AnnouncementDraft {
            title: "Kerja Bakti Minggu Ini".into(),
            body: "Kerja bakti dimulai pukul 07.00 di lapangan desa.".into(),
            images: vec![ImageAttachment::Pending(PendingUpload {
                filename: "kerja-bakti.jpg".into(),
                bytes: vec![1, 2, 3],
            })],
        }
    }

    #[test]
    fn decodes_mongo_shaped_document() {
        let json = r#"{
            "_id": "665f1c2e8b3a4d0012ab34ce",
            "judul": "Kerja Bakti Minggu Ini",
            "isi": "Kerja bakti dimulai pukul 07.00.",
            "imageUrls": [{"url": "/uploads/kb.jpg", "filename": "kb.jpg"}],
            "createdAt": "2026-07-02T01:00:00Z"
        }"#;
        let announcement: Announcement = serde_json::from_str(json).unwrap();
        assert_eq!(announcement.id, "665f1c2e8b3a4d0012ab34ce");
        assert_eq!(announcement.images.len(), 1);
        assert_eq!(announcement.images[0].filename, "kb.jpg");
    }

    #[test]
    fn valid_draft_passes() {
        assert_eq!(draft().validate(), Ok(()));
    }

    #[test]
    fn zero_images_rejected_before_any_network_call() {
        let mut d = draft();
        d.images.clear();
        assert_eq!(d.validate(), Err(ValidationError::NoImages));
    }

    #[test]
    fn kept_references_satisfy_the_image_rule() {
        let mut d = draft();
        d.images = vec![ImageAttachment::Persisted(ImageRef {
            url: "/uploads/kb.jpg".into(),
            filename: "kb.jpg".into(),
        })];
        assert_eq!(d.validate(), Ok(()));
    }

    #[test]
    fn title_and_body_required() {
        let mut d = draft();
        d.title = " ".into();
        assert_eq!(d.validate(), Err(ValidationError::MissingAnnouncementTitle));

        let mut d = draft();
        d.body = String::new();
        assert_eq!(d.validate(), Err(ValidationError::MissingBody));
    }
}
