use thiserror::Error;

/// Client-side validation failures, raised before any network call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("reporter name is required unless the report is anonymous")]
    MissingName,

    #[error("report title is required")]
    MissingTitle,

    #[error("report description is required")]
    MissingDescription,

    #[error("announcement title is required")]
    MissingAnnouncementTitle,

    #[error("announcement body is required")]
    MissingBody,

    #[error("an announcement needs at least one image")]
    NoImages,
}
