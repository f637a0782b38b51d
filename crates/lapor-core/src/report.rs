//! Report entity and submission draft.
//!
//! Reports are decoded from the API's MongoDB-shaped documents; the wire
//! field names are the portal's Indonesian labels and `_id` is the only
//! identity the client holds once a report is persisted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attachment::PendingUpload;
use crate::error::ValidationError;
use crate::mirror::Identified;

/// Reporter name substituted when a citizen submits anonymously.
pub const ANONYMOUS_REPORTER: &str = "Warga Anonim";

/// A citizen complaint as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "telepon", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "kategori")]
    pub category: ReportCategory,
    #[serde(rename = "judul")]
    pub title: String,
    #[serde(rename = "deskripsi")]
    pub description: String,
    /// Stable references returned by the server's upload handler.
    #[serde(rename = "files", default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub status: ReportStatus,
    /// Unset until an admin triages the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<ReportPriority>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Identified for Report {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Report lifecycle status. New reports start as `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            other => Err(format!("unknown report status: {other}")),
        }
    }
}

/// Triage priority, ordered low to high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPriority {
    Low,
    Medium,
    High,
}

impl ReportPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ReportPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown report priority: {other}")),
        }
    }
}

/// Complaint category. Wire labels are the portal's Indonesian names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportCategory {
    #[serde(rename = "Infrastruktur")]
    Infrastructure,
    #[serde(rename = "Kebersihan")]
    Sanitation,
    #[serde(rename = "Keamanan")]
    Security,
    #[serde(rename = "Pelayanan")]
    PublicService,
    #[serde(rename = "Sosial")]
    Social,
    #[serde(rename = "Lainnya")]
    Other,
}

impl ReportCategory {
    /// Label as it travels on the wire and appears in the portal UI.
    pub fn wire_label(&self) -> &'static str {
        match self {
            Self::Infrastructure => "Infrastruktur",
            Self::Sanitation => "Kebersihan",
            Self::Security => "Keamanan",
            Self::PublicService => "Pelayanan",
            Self::Social => "Sosial",
            Self::Other => "Lainnya",
        }
    }
}

impl fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_label())
    }
}

impl FromStr for ReportCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "infrastruktur" | "infrastructure" => Ok(Self::Infrastructure),
            "kebersihan" | "sanitation" => Ok(Self::Sanitation),
            "keamanan" | "security" => Ok(Self::Security),
            "pelayanan" | "service" => Ok(Self::PublicService),
            "sosial" | "social" => Ok(Self::Social),
            "lainnya" | "other" => Ok(Self::Other),
            other => Err(format!("unknown report category: {other}")),
        }
    }
}

/// Client-side draft of a new report.
///
/// Validated before any network call; an anonymous draft masks the name and
/// phone at submission time, the form fields themselves stay untouched.
#[derive(Debug, Clone)]
pub struct ReportDraft {
    pub name: String,
    pub phone: Option<String>,
    pub category: ReportCategory,
    pub title: String,
    pub description: String,
    pub attachments: Vec<PendingUpload>,
    pub anonymous: bool,
}

impl ReportDraft {
    /// Name as submitted: the placeholder when anonymous.
    pub fn reporter_name(&self) -> &str {
        if self.anonymous {
            ANONYMOUS_REPORTER
        } else {
            &self.name
        }
    }

    /// Phone as submitted: withheld entirely when anonymous.
    pub fn reporter_phone(&self) -> Option<&str> {
        if self.anonymous {
            None
        } else {
            self.phone.as_deref()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.anonymous && self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        Ok(())
    }
}
