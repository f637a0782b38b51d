//! Plain-text card rendering for reports, announcements, and notifications.

use lapor_core::{Announcement, Notification, NotificationStatus, Report};

pub fn print_reports(reports: &[Report]) {
    if reports.is_empty() {
        println!("No reports.");
        return;
    }
    for report in reports {
        print_report(report);
    }
}

fn print_report(report: &Report) {
    println!("=== {} ===", report.id);
    println!("{}", report.title);
    println!("  {:<12} {}", "reporter", report.name);
    if let Some(phone) = &report.phone {
        println!("  {:<12} {}", "phone", phone);
    }
    println!("  {:<12} {}", "category", report.category);
    println!("  {:<12} {}", "status", report.status);
    if let Some(priority) = report.priority {
        println!("  {:<12} {}", "priority", priority);
    }
    println!(
        "  {:<12} {}",
        "created",
        report.created_at.format("%Y-%m-%d %H:%M")
    );
    if !report.attachments.is_empty() {
        println!("  {:<12} {}", "attachments", report.attachments.join(", "));
    }
    println!();
    println!("  {}", report.description);
    println!();
}

pub fn print_announcements(announcements: &[Announcement]) {
    if announcements.is_empty() {
        println!("No announcements.");
        return;
    }
    for announcement in announcements {
        println!("=== {} ===", announcement.id);
        println!("{}", announcement.title);
        println!(
            "  {:<12} {}",
            "created",
            announcement.created_at.format("%Y-%m-%d %H:%M")
        );
        println!("  {:<12} {}", "images", announcement.images.len());
        for image in &announcement.images {
            println!("    {:<24} {}", image.filename, image.url);
        }
        println!();
        println!("  {}", announcement.body);
        println!();
    }
}

pub fn print_notifications(notifications: &[Notification]) {
    if notifications.is_empty() {
        println!("No notifications.");
        return;
    }
    for notification in notifications {
        let marker = match notification.status {
            NotificationStatus::Done => "[selesai]",
            NotificationStatus::InProgress => "[proses] ",
        };
        println!(
            "{} {}  {}  ({})",
            marker,
            notification.id,
            notification.title,
            notification.time.format("%Y-%m-%d %H:%M")
        );
        println!("           {}", notification.message);
    }
}
