pub mod announcement;
pub mod attachment;
pub mod error;
pub mod mirror;
pub mod notification;
pub mod report;

pub use announcement::{Announcement, AnnouncementDraft};
pub use attachment::{ImageAttachment, ImageRef, PendingUpload};
pub use error::ValidationError;
pub use mirror::{Identified, Mirror};
pub use notification::{Notification, NotificationStatus};
pub use report::{Report, ReportCategory, ReportDraft, ReportPriority, ReportStatus};
