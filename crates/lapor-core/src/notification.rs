//! Locally persisted notification entries, decoupled from backend state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::report::Report;

/// Status tag rendered next to a notification. Wire values predate the
/// English enum names and are kept for compatibility with existing ledgers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationStatus {
    #[serde(rename = "proses")]
    InProgress,
    #[serde(rename = "selesai")]
    Done,
}

/// A transient admin-facing event. Never round-trips to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Millisecond timestamp at creation; unique enough for a single operator.
    pub id: i64,
    pub title: String,
    pub message: String,
    pub status: NotificationStatus,
    pub time: DateTime<Utc>,
}

impl Notification {
    /// The review reminder synthesized after a report submission succeeds.
    pub fn report_received(report: &Report) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis(),
            title: "Laporan Baru Masuk".into(),
            message: format!(
                "Laporan \"{}\" dari {} perlu ditinjau.",
                report.title, report.name
            ),
            status: NotificationStatus::InProgress,
            time: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_notification_names_the_report_and_reporter() {
        let report: Report = serde_json::from_str(
            r#"{"_id":"a","nama":"Siti","kategori":"Kebersihan","judul":"Sampah menumpuk",
                "deskripsi":"d","createdAt":"2026-07-01T08:30:00Z"}"#,
        )
        .unwrap();
        let notification = Notification::report_received(&report);
        assert_eq!(notification.title, "Laporan Baru Masuk");
        assert!(notification.message.contains("Sampah menumpuk"));
        assert!(notification.message.contains("Siti"));
        assert_eq!(notification.status, NotificationStatus::InProgress);
    }

    #[test]
    fn status_tags_keep_their_wire_values() {
        let json = serde_json::to_string(&NotificationStatus::InProgress).unwrap();
        assert_eq!(json, r#""proses""#);
        let parsed: NotificationStatus = serde_json::from_str(r#""selesai""#).unwrap();
        assert_eq!(parsed, NotificationStatus::Done);
    }

    #[test]
    fn ledger_entry_roundtrip() {
        let notification = Notification {
            id: 1,
            title: "t".into(),
            message: "m".into(),
            status: NotificationStatus::Done,
            time: "2026-07-01T08:30:00Z".parse().unwrap(),
        };
        let json = serde_json::to_string(&notification).unwrap();
        let parsed: Notification = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, notification);
    }
}
