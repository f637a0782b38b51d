//! HTTP client for the portal's REST API.
//!
//! Success bodies arrive as `{ "data": <entity> }` for mutations and bare
//! arrays for lists; failures as `{ "error": <message> }` with a non-success
//! status. Attachment-carrying mutations go out as multipart form data,
//! attachment-free ones as JSON.

use lapor_core::attachment::{self, ImageRef};
use lapor_core::{Announcement, AnnouncementDraft, Report, ReportDraft, ReportPriority, ReportStatus};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("a privileged call needs a non-empty admin credential")]
    MissingCredential,
}

/// REST client for the portal API.
///
/// Reads are unauthenticated; every mutation of admin-owned state carries a
/// bearer credential. No retry, timeout, or backoff lives in this layer —
/// each failure is terminal for the one user action that triggered it.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

impl ApiClient {
    /// Create a client for the given base URL.
    ///
    /// `base_url` should be like `http://localhost:3001` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    // ── Reads ──

    /// Fetch all reports, in whatever order the backend returns them.
    pub async fn list_reports(&self) -> Result<Vec<Report>, ApiError> {
        let url = format!("{}/api/laporan", self.base_url);
        info!(url = %url, "listing reports");
        let resp = check(self.client.get(&url).send().await?).await?;
        let reports: Vec<Report> = resp.json().await?;
        info!(count = reports.len(), "listed reports");
        Ok(reports)
    }

    /// Fetch all announcements.
    pub async fn list_announcements(&self) -> Result<Vec<Announcement>, ApiError> {
        let url = format!("{}/api/pengumuman", self.base_url);
        info!(url = %url, "listing announcements");
        let resp = check(self.client.get(&url).send().await?).await?;
        let announcements: Vec<Announcement> = resp.json().await?;
        info!(count = announcements.len(), "listed announcements");
        Ok(announcements)
    }

    // ── Report mutations ──

    /// Submit a new report as multipart form data. No credential required;
    /// the citizen side is open.
    pub async fn create_report(&self, draft: &ReportDraft) -> Result<Report, ApiError> {
        let url = format!("{}/api/laporan", self.base_url);
        let mut form = Form::new()
            .text("nama", draft.reporter_name().to_string())
            .text("telepon", draft.reporter_phone().unwrap_or("").to_string())
            .text("kategori", draft.category.wire_label())
            .text("judul", draft.title.clone())
            .text("deskripsi", draft.description.clone());
        for upload in &draft.attachments {
            form = form.part(
                "files",
                Part::bytes(upload.bytes.clone()).file_name(upload.filename.clone()),
            );
        }

        info!(url = %url, attachments = draft.attachments.len(), "submitting report");
        let resp = check(self.client.post(&url).multipart(form).send().await?).await?;
        let created: Envelope<Report> = resp.json().await?;
        Ok(created.data)
    }

    pub async fn delete_report(&self, id: &str, token: &str) -> Result<(), ApiError> {
        let token = require_token(token)?;
        let url = format!("{}/api/laporan/{id}", self.base_url);
        info!(url = %url, "deleting report");
        check(self.client.delete(&url).bearer_auth(token).send().await?).await?;
        Ok(())
    }

    /// Update one report's status; returns the server's authoritative copy.
    pub async fn update_report_status(
        &self,
        id: &str,
        status: ReportStatus,
        token: &str,
    ) -> Result<Report, ApiError> {
        let token = require_token(token)?;
        let url = format!("{}/api/laporan/{id}", self.base_url);
        info!(url = %url, status = %status, "updating report status");
        let resp = check(
            self.client
                .put(&url)
                .bearer_auth(token)
                .json(&json!({ "status": status }))
                .send()
                .await?,
        )
        .await?;
        let updated: Envelope<Report> = resp.json().await?;
        Ok(updated.data)
    }

    /// Update one report's triage priority; returns the server's copy.
    pub async fn update_report_priority(
        &self,
        id: &str,
        priority: ReportPriority,
        token: &str,
    ) -> Result<Report, ApiError> {
        let token = require_token(token)?;
        let url = format!("{}/api/laporan/{id}", self.base_url);
        info!(url = %url, priority = %priority, "updating report priority");
        let resp = check(
            self.client
                .put(&url)
                .bearer_auth(token)
                .json(&json!({ "priority": priority }))
                .send()
                .await?,
        )
        .await?;
        let updated: Envelope<Report> = resp.json().await?;
        Ok(updated.data)
    }

    // ── Announcement mutations ──

    pub async fn create_announcement(
        &self,
        draft: &AnnouncementDraft,
        token: &str,
    ) -> Result<Announcement, ApiError> {
        let token = require_token(token)?;
        let url = format!("{}/api/pengumuman", self.base_url);
        let form = announcement_form(draft)?;
        info!(url = %url, "publishing announcement");
        let resp = check(
            self.client
                .post(&url)
                .bearer_auth(token)
                .multipart(form)
                .send()
                .await?,
        )
        .await?;
        let created: Envelope<Announcement> = resp.json().await?;
        Ok(created.data)
    }

    pub async fn update_announcement(
        &self,
        id: &str,
        draft: &AnnouncementDraft,
        token: &str,
    ) -> Result<Announcement, ApiError> {
        let token = require_token(token)?;
        let url = format!("{}/api/pengumuman/{id}", self.base_url);
        let form = announcement_form(draft)?;
        info!(url = %url, "updating announcement");
        let resp = check(
            self.client
                .put(&url)
                .bearer_auth(token)
                .multipart(form)
                .send()
                .await?,
        )
        .await?;
        let updated: Envelope<Announcement> = resp.json().await?;
        Ok(updated.data)
    }

    pub async fn delete_announcement(&self, id: &str, token: &str) -> Result<(), ApiError> {
        let token = require_token(token)?;
        let url = format!("{}/api/pengumuman/{id}", self.base_url);
        info!(url = %url, "deleting announcement");
        check(self.client.delete(&url).bearer_auth(token).send().await?).await?;
        Ok(())
    }

    // ── Auth ──

    /// Exchange admin credentials for an opaque bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let url = format!("{}/api/admin/login", self.base_url);
        info!(url = %url, "logging in");
        let resp = check(
            self.client
                .post(&url)
                .json(&json!({ "username": username, "password": password }))
                .send()
                .await?,
        )
        .await?;
        let login: LoginResponse = resp.json().await?;
        Ok(login.token)
    }
}

/// Build the multipart body shared by announcement create and update: new
/// uploads as parts under `imageUrls`, kept references JSON-encoded under
/// `existingFiles`. The keep-list is serialized even when empty so the server
/// always sees it explicitly.
fn announcement_form(draft: &AnnouncementDraft) -> Result<Form, ApiError> {
    let (uploads, kept) = attachment::partition(&draft.images);
    let mut form = Form::new()
        .text("judul", draft.title.clone())
        .text("isi", draft.body.clone())
        .text("existingFiles", existing_files_json(&kept)?);
    for upload in uploads {
        form = form.part(
            "imageUrls",
            Part::bytes(upload.bytes.clone()).file_name(upload.filename.clone()),
        );
    }
    Ok(form)
}

fn existing_files_json(kept: &[&ImageRef]) -> Result<String, ApiError> {
    Ok(serde_json::to_string(kept)?)
}

fn require_token(token: &str) -> Result<&str, ApiError> {
    if token.is_empty() {
        return Err(ApiError::MissingCredential);
    }
    Ok(token)
}

/// Pass a success response through; decode the error body otherwise.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.error)
        .unwrap_or(body);
    Err(ApiError::Server {
        status: status.as_u16(),
        message,
    })
}
