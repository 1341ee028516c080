//! Console output for collection results and wipe reports

use crate::api::{File, Message};
use crate::wipe::WipeReport;
use colored::*;

const PREVIEW_CHARS: usize = 60;

/// Print the outcome of a wipe, e.g. `✓ wiped 12 messages`
pub fn print_report(noun: &str, report: &WipeReport) {
    if report.is_success() {
        println!(
            "{} wiped {} {}",
            "✓".bright_green(),
            report.succeeded.to_string().bold(),
            noun
        );
    } else {
        println!(
            "{} wiped {} of {} {}, {} failed",
            "✗".bright_red(),
            report.succeeded,
            report.attempted,
            noun,
            report.failures.len().to_string().bright_red().bold()
        );
        for failure in report.failures.iter().take(5) {
            println!("  {} {}", "-".dimmed(), failure.to_string().red());
        }
        if report.failures.len() > 5 {
            println!("  {}", format!("... and {} more", report.failures.len() - 5).dimmed());
        }
        let rate_limited = report.rate_limited_count();
        if rate_limited > 0 {
            println!(
                "  {}",
                format!("{} calls were rate limited; run again to retry them", rate_limited)
                    .yellow()
            );
        }
    }

    if report.skipped > 0 {
        println!("  {}", format!("{} skipped (nothing to change)", report.skipped).dimmed());
    }
}

/// List messages that would be wiped
pub fn print_messages(messages: &[Message]) {
    for message in messages {
        let when = message
            .timestamp()
            .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| message.ts.clone());
        println!("  {} {}", when.dimmed(), preview(&message.text, PREVIEW_CHARS));
    }
}

/// List files that would be wiped
pub fn print_files(files: &[File]) {
    for file in files {
        let when = file
            .created_at()
            .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let name = file.title.as_deref().filter(|t| !t.is_empty()).unwrap_or(&file.name);
        println!("  {} {} {}", when.dimmed(), file.id.cyan(), name);
    }
}

/// First `limit` characters of `text` on one line
pub fn preview(text: &str, limit: usize) -> String {
    let single_line: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match single_line.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}…", &single_line[..idx]),
        None => single_line,
    }
}
