//! The portal context: remote client, local mirrors, session, and ledger.
//!
//! The remote store is authoritative for persistence; the mirrors are
//! authoritative for rendering. Mirrors are patched only from server
//! responses, after the response resolves — there is no speculative
//! pre-write and no rollback path, so a failed mutation leaves local state
//! exactly as it was.

use lapor_core::{
    Announcement, AnnouncementDraft, Mirror, Notification, Report, ReportDraft, ReportPriority,
    ReportStatus, ValidationError,
};
use lapor_store::{LocalStore, NotificationLedger, Session, StoreError};
use thiserror::Error;
use tracing::warn;

use crate::http::{ApiClient, ApiError};

#[derive(Error, Debug)]
pub enum PortalError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("admin login required")]
    NotLoggedIn,
}

/// Outcome of a mirror refresh. Reads never clear the mirror: a failed
/// refresh keeps the last-known copy and reports why it is stale.
#[derive(Debug)]
pub enum Refresh {
    /// Mirror reseeded with this many entities.
    Fresh(usize),
    /// Refresh failed; the previous mirror contents were kept.
    Stale(String),
}

/// Everything the UI renders from, in one explicit context object.
pub struct Portal {
    client: ApiClient,
    session: Session,
    ledger: NotificationLedger,
    reports: Mirror<Report>,
    announcements: Mirror<Announcement>,
}

impl Portal {
    /// Wire a portal from its parts, restoring the session and the
    /// notification ledger from the local store.
    pub fn open(client: ApiClient, store: LocalStore) -> Result<Self, StoreError> {
        Ok(Self {
            client,
            session: Session::load(store.clone())?,
            ledger: NotificationLedger::load(store)?,
            reports: Mirror::new(),
            announcements: Mirror::new(),
        })
    }

    // ── Rendering state ──

    pub fn reports(&self) -> &[Report] {
        self.reports.items()
    }

    pub fn announcements(&self) -> &[Announcement] {
        self.announcements.items()
    }

    pub fn notifications(&self) -> &[Notification] {
        self.ledger.notifications()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    fn token(&self) -> Result<&str, PortalError> {
        self.session.token().ok_or(PortalError::NotLoggedIn)
    }

    // ── Refresh ──

    /// Reseed the report mirror from the backend, degrading to the stale
    /// copy on any failure.
    pub async fn refresh_reports(&mut self) -> Refresh {
        match self.client.list_reports().await {
            Ok(reports) => {
                let count = reports.len();
                self.reports.seed(reports);
                Refresh::Fresh(count)
            }
            Err(err) => {
                warn!(%err, "report refresh failed, keeping stale mirror");
                Refresh::Stale(err.to_string())
            }
        }
    }

    /// Reseed the announcement mirror, degrading to stale on failure.
    pub async fn refresh_announcements(&mut self) -> Refresh {
        match self.client.list_announcements().await {
            Ok(announcements) => {
                let count = announcements.len();
                self.announcements.seed(announcements);
                Refresh::Fresh(count)
            }
            Err(err) => {
                warn!(%err, "announcement refresh failed, keeping stale mirror");
                Refresh::Stale(err.to_string())
            }
        }
    }

    // ── Citizen side ──

    /// Validate and submit a new report. On success the server's copy lands
    /// at the head of the mirror and a review notification is persisted.
    pub async fn submit_report(&mut self, draft: &ReportDraft) -> Result<Report, PortalError> {
        draft.validate()?;
        let report = self.client.create_report(draft).await?;
        self.ledger.add(Notification::report_received(&report))?;
        self.reports.prepend(report.clone());
        Ok(report)
    }

    // ── Admin: reports ──

    pub async fn delete_report(&mut self, id: &str) -> Result<(), PortalError> {
        let token = self.token()?;
        self.client.delete_report(id, token).await?;
        self.reports.remove(id);
        Ok(())
    }

    pub async fn set_report_status(
        &mut self,
        id: &str,
        status: ReportStatus,
    ) -> Result<(), PortalError> {
        let token = self.token()?;
        let updated = self.client.update_report_status(id, status, token).await?;
        self.reports.replace(updated);
        Ok(())
    }

    pub async fn set_report_priority(
        &mut self,
        id: &str,
        priority: ReportPriority,
    ) -> Result<(), PortalError> {
        let token = self.token()?;
        let updated = self
            .client
            .update_report_priority(id, priority, token)
            .await?;
        self.reports.replace(updated);
        Ok(())
    }

    // ── Admin: announcements ──

    pub async fn publish_announcement(
        &mut self,
        draft: &AnnouncementDraft,
    ) -> Result<Announcement, PortalError> {
        draft.validate()?;
        let token = self.token()?;
        let announcement = self.client.create_announcement(draft, token).await?;
        self.announcements.prepend(announcement.clone());
        Ok(announcement)
    }

    pub async fn edit_announcement(
        &mut self,
        id: &str,
        draft: &AnnouncementDraft,
    ) -> Result<(), PortalError> {
        draft.validate()?;
        let token = self.token()?;
        let updated = self.client.update_announcement(id, draft, token).await?;
        self.announcements.replace(updated);
        Ok(())
    }

    pub async fn delete_announcement(&mut self, id: &str) -> Result<(), PortalError> {
        let token = self.token()?;
        self.client.delete_announcement(id, token).await?;
        self.announcements.remove(id);
        Ok(())
    }

    // ── Session ──

    /// Exchange credentials for a session token. A failed login propagates
    /// the server's message and leaves any prior session untouched.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), PortalError> {
        let token = self.client.login(username, password).await?;
        self.session.set_token(token)?;
        Ok(())
    }

    /// Drop the session locally. Nothing is sent to the server.
    pub fn logout(&mut self) -> Result<(), PortalError> {
        self.session.clear()?;
        Ok(())
    }

    // ── Notifications ──

    pub fn dismiss_notification(&mut self, id: i64) -> Result<(), PortalError> {
        self.ledger.dismiss(id)?;
        Ok(())
    }

    pub fn clear_notifications(&mut self) -> Result<(), PortalError> {
        self.ledger.clear()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lapor_core::{ImageAttachment, PendingUpload, ReportCategory};

    /// A portal whose base URL can never be reached; only paths that fail
    /// before the network are exercised here.
    fn offline_portal(tmp: &tempfile::TempDir) -> Portal {
        let client = ApiClient::new("http://nonexistent.invalid".into());
        let store = LocalStore::open(tmp.path()).unwrap();
        Portal::open(client, store).unwrap()
    }

    fn report_draft() -> ReportDraft {
        ReportDraft {
            name: "Budi".into(),
            phone: None,
            category: ReportCategory::Other,
            title: "Judul".into(),
            description: "Deskripsi".into(),
            attachments: Vec::new(),
            anonymous: false,
        }
    }

    #[tokio::test]
    async fn invalid_draft_fails_before_any_network_or_state_change() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut portal = offline_portal(&tmp);
        let ledger_before = portal.notifications().to_vec();

        let mut draft = report_draft();
        draft.title = String::new();
        let result = portal.submit_report(&draft).await;
        assert!(matches!(
            result,
            Err(PortalError::Invalid(ValidationError::MissingTitle))
        ));
        assert!(portal.reports().is_empty());
        assert_eq!(portal.notifications(), ledger_before);
    }

    #[tokio::test]
    async fn imageless_announcement_is_rejected_before_the_session_gate() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut portal = offline_portal(&tmp);
        let draft = AnnouncementDraft {
            title: "t".into(),
            body: "b".into(),
            images: Vec::new(),
        };
        let result = portal.publish_announcement(&draft).await;
        assert!(matches!(
            result,
            Err(PortalError::Invalid(ValidationError::NoImages))
        ));
    }

    #[tokio::test]
    async fn privileged_operations_require_a_session() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut portal = offline_portal(&tmp);
        assert!(!portal.is_authenticated());

        let result = portal.delete_report("a").await;
        assert!(matches!(result, Err(PortalError::NotLoggedIn)));

        let result = portal.set_report_status("a", ReportStatus::Resolved).await;
        assert!(matches!(result, Err(PortalError::NotLoggedIn)));

        let draft = AnnouncementDraft {
            title: "t".into(),
            body: "b".into(),
            images: vec![ImageAttachment::Pending(PendingUpload {
                filename: "a.jpg".into(),
                bytes: vec![1],
            })],
        };
        let result = portal.publish_announcement(&draft).await;
        assert!(matches!(result, Err(PortalError::NotLoggedIn)));

        let result = portal.delete_announcement("a").await;
        assert!(matches!(result, Err(PortalError::NotLoggedIn)));
    }

    #[tokio::test]
    async fn failed_login_leaves_the_session_unset() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut portal = offline_portal(&tmp);
        let result = portal.login("admin", "rahasia").await;
        assert!(result.is_err());
        assert!(!portal.is_authenticated());
    }

    #[tokio::test]
    async fn refresh_failure_degrades_to_the_stale_mirror() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut portal = offline_portal(&tmp);
        match portal.refresh_reports().await {
            Refresh::Stale(reason) => assert!(!reason.is_empty()),
            Refresh::Fresh(_) => panic!("refresh cannot succeed offline"),
        }
        assert!(portal.reports().is_empty());
    }

    #[test]
    fn logout_is_local_and_unconditional() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut portal = offline_portal(&tmp);
        portal.logout().unwrap();
        assert!(!portal.is_authenticated());
    }

    #[test]
    fn notification_passthrough_mutates_the_ledger() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut portal = offline_portal(&tmp);
        assert!(!portal.notifications().is_empty());
        portal.clear_notifications().unwrap();
        assert!(portal.notifications().is_empty());
    }
}
