use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use lapor_client::{ApiClient, Portal, Refresh};
use lapor_core::{
    AnnouncementDraft, ImageAttachment, ImageRef, PendingUpload, ReportCategory, ReportDraft,
    ReportPriority, ReportStatus,
};
use lapor_store::LocalStore;

mod display;

#[derive(Parser)]
#[command(name = "lapor", version, about = "Village report portal client")]
struct Cli {
    /// Base URL of the portal API.
    #[arg(long, env = "LAPOR_API_URL", default_value = "http://localhost:3001")]
    api_url: String,

    /// Directory holding the local slots (session, notifications).
    #[arg(long, env = "LAPOR_DATA_DIR", default_value = ".lapor")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in as the portal admin.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Drop the local admin session. No remote call is made.
    Logout,
    /// Citizen reports.
    #[command(subcommand)]
    Reports(ReportsCommand),
    /// Village announcements.
    #[command(subcommand)]
    Announcements(AnnouncementsCommand),
    /// Local admin notifications.
    #[command(subcommand)]
    Notifications(NotificationsCommand),
}

#[derive(Subcommand)]
enum ReportsCommand {
    /// List reports, newest first.
    List,
    /// Submit a new report.
    Submit {
        /// Reporter name; ignored with --anonymous.
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        phone: Option<String>,
        /// Category (Indonesian label or English keyword).
        #[arg(long)]
        category: ReportCategory,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Attachment file, repeatable.
        #[arg(long = "file")]
        files: Vec<PathBuf>,
        /// Withhold name and phone.
        #[arg(long)]
        anonymous: bool,
    },
    /// Set a report's status (admin).
    SetStatus { id: String, status: ReportStatus },
    /// Set a report's triage priority (admin).
    SetPriority { id: String, priority: ReportPriority },
    /// Delete a report (admin).
    Delete { id: String },
}

#[derive(Subcommand)]
enum AnnouncementsCommand {
    /// List announcements, newest first.
    List,
    /// Publish a new announcement (admin). At least one --image is required.
    Publish {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        /// Image file, repeatable.
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// Edit an announcement (admin). Kept images must be re-listed with
    /// --keep; anything not kept or re-uploaded is dropped by the server.
    Edit {
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        /// New image file, repeatable.
        #[arg(long = "image")]
        images: Vec<PathBuf>,
        /// Existing image to keep, as filename=url. Repeatable.
        #[arg(long = "keep")]
        keep: Vec<String>,
    },
    /// Delete an announcement (admin).
    Delete { id: String },
}

#[derive(Subcommand)]
enum NotificationsCommand {
    /// Show the local notification ledger.
    List,
    /// Dismiss one notification by id.
    Dismiss { id: i64 },
    /// Clear the whole ledger.
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("lapor v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let store = LocalStore::open(&cli.data_dir)?;
    let mut portal = Portal::open(ApiClient::new(cli.api_url), store)?;

    match cli.command {
        Command::Login { username, password } => {
            portal.login(&username, &password).await?;
            println!("Logged in.");
        }
        Command::Logout => {
            portal.logout()?;
            println!("Session cleared.");
        }
        Command::Reports(command) => run_reports(&mut portal, command).await?,
        Command::Announcements(command) => run_announcements(&mut portal, command).await?,
        Command::Notifications(command) => run_notifications(&mut portal, command)?,
    }

    Ok(())
}

async fn run_reports(portal: &mut Portal, command: ReportsCommand) -> anyhow::Result<()> {
    match command {
        ReportsCommand::List => {
            if let Refresh::Stale(reason) = portal.refresh_reports().await {
                eprintln!("warning: showing last-known reports ({reason})");
            }
            display::print_reports(portal.reports());
        }
        ReportsCommand::Submit {
            name,
            phone,
            category,
            title,
            description,
            files,
            anonymous,
        } => {
            let attachments = files
                .iter()
                .map(|path| read_upload(path))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let draft = ReportDraft {
                name,
                phone,
                category,
                title,
                description,
                attachments,
                anonymous,
            };
            let report = portal.submit_report(&draft).await?;
            println!("Report submitted: {}", report.id);
        }
        ReportsCommand::SetStatus { id, status } => {
            portal.set_report_status(&id, status).await?;
            println!("Report {id} set to {status}.");
        }
        ReportsCommand::SetPriority { id, priority } => {
            portal.set_report_priority(&id, priority).await?;
            println!("Report {id} priority set to {priority}.");
        }
        ReportsCommand::Delete { id } => {
            portal.delete_report(&id).await?;
            println!("Report {id} deleted.");
        }
    }
    Ok(())
}

async fn run_announcements(
    portal: &mut Portal,
    command: AnnouncementsCommand,
) -> anyhow::Result<()> {
    match command {
        AnnouncementsCommand::List => {
            if let Refresh::Stale(reason) = portal.refresh_announcements().await {
                eprintln!("warning: showing last-known announcements ({reason})");
            }
            display::print_announcements(portal.announcements());
        }
        AnnouncementsCommand::Publish {
            title,
            body,
            images,
        } => {
            let draft = AnnouncementDraft {
                title,
                body,
                images: image_attachments(&images, &[])?,
            };
            let announcement = portal.publish_announcement(&draft).await?;
            println!("Announcement published: {}", announcement.id);
        }
        AnnouncementsCommand::Edit {
            id,
            title,
            body,
            images,
            keep,
        } => {
            let draft = AnnouncementDraft {
                title,
                body,
                images: image_attachments(&images, &keep)?,
            };
            portal.edit_announcement(&id, &draft).await?;
            println!("Announcement {id} updated.");
        }
        AnnouncementsCommand::Delete { id } => {
            portal.delete_announcement(&id).await?;
            println!("Announcement {id} deleted.");
        }
    }
    Ok(())
}

fn run_notifications(portal: &mut Portal, command: NotificationsCommand) -> anyhow::Result<()> {
    match command {
        NotificationsCommand::List => display::print_notifications(portal.notifications()),
        NotificationsCommand::Dismiss { id } => {
            portal.dismiss_notification(id)?;
            println!("Notification {id} dismissed.");
        }
        NotificationsCommand::Clear => {
            portal.clear_notifications()?;
            println!("Notifications cleared.");
        }
    }
    Ok(())
}

fn read_upload(path: &Path) -> anyhow::Result<PendingUpload> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading attachment {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("attachment")
        .to_string();
    Ok(PendingUpload { filename, bytes })
}

/// Kept references first, then new uploads, mirroring the editor's list.
fn image_attachments(
    new_files: &[PathBuf],
    keep: &[String],
) -> anyhow::Result<Vec<ImageAttachment>> {
    let mut images = Vec::with_capacity(keep.len() + new_files.len());
    for raw in keep {
        images.push(ImageAttachment::Persisted(parse_keep(raw)?));
    }
    for path in new_files {
        images.push(ImageAttachment::Pending(read_upload(path)?));
    }
    Ok(images)
}

fn parse_keep(raw: &str) -> anyhow::Result<ImageRef> {
    let (filename, url) = raw
        .split_once('=')
        .with_context(|| format!("--keep expects filename=url, got {raw}"))?;
    Ok(ImageRef {
        filename: filename.to_string(),
        url: url.to_string(),
    })
}
