//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output leads with the image's identity (positional index + source name)
//! and shows everything derived from it as indented context lines: the
//! staged repo path, the delivery URLs, the thumbnail. Filesystem detail
//! stays secondary so a run reads as an upload inventory.
//!
//! # Output Format
//!
//! ## Process
//!
//! ```text
//! Preparing 3 images
//! 001 beach day.jpg
//!     Staged: images/2026/8/beach-day.jpg (214.5 KB)
//!     Raw: https://raw.githubusercontent.com/user/repo/main/images/2026/8/beach-day.jpg
//!     CDN: https://cdn.jsdelivr.net/gh/user/repo/images/2026/8/beach-day.jpg
//!     Thumbnail: images/2026/8/thumb_beach-day.jpg (18.2 KB)
//! 002 broken.jpg
//!     Failed: unreadable or unsupported image data
//!
//! Prepared 2 of 3 images (232.7 KB staged)
//! Failed:
//!     broken.jpg: unreadable or unsupported image data
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 a.jpg: ok
//! 002 notes.txt: not an image
//!
//! Checked 2 files, 1 ok, 1 rejected
//! ```
//!
//! # Architecture
//!
//! Each surface has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use std::path::{Path, PathBuf};

use crate::process::{ProcessEvent, ProcessReport};
use crate::upload::Published;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Human-readable byte count: `512 B`, `1.5 KB`, `2.3 MB`.
fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / MB)
    }
}

fn file_display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Process output
// ============================================================================

/// Format a single batch progress event as display lines.
///
/// `FileStarted` emits the header line; `FileDone` / `FileFailed` emit the
/// indented context under it, so streaming the events reproduces the full
/// inventory shown in the module docs.
pub fn format_process_event(event: &ProcessEvent<'_>) -> Vec<String> {
    match event {
        ProcessEvent::BatchStarted { total } => {
            vec![format!("Preparing {total} images")]
        }
        ProcessEvent::FileStarted { index, source, .. } => {
            vec![format!(
                "{} {}",
                format_index(index + 1),
                file_display_name(source)
            )]
        }
        ProcessEvent::FileDone {
            image, thumbnail, ..
        } => {
            let mut lines = published_lines(image);
            if let Some(thumb) = thumbnail {
                lines.push(format!(
                    "    Thumbnail: {} ({})",
                    thumb.path,
                    format_size(thumb.size)
                ));
            }
            lines
        }
        ProcessEvent::FileFailed { reason, .. } => {
            vec![format!("    Failed: {reason}")]
        }
    }
}

fn published_lines(published: &Published) -> Vec<String> {
    vec![
        format!(
            "    Staged: {} ({})",
            published.path,
            format_size(published.size)
        ),
        format!("    Raw: {}", published.raw_url),
        format!("    CDN: {}", published.cdn_url),
    ]
}

/// Print a batch progress event to stdout.
pub fn print_process_event(event: &ProcessEvent<'_>) {
    for line in format_process_event(event) {
        println!("{}", line);
    }
}

/// Format the end-of-run summary: counts, staged volume, failure recap.
pub fn format_run_summary(report: &ProcessReport) -> Vec<String> {
    let mut lines = vec![String::new()];

    let staged: u64 = report
        .succeeded
        .iter()
        .map(|f| f.image.size + f.thumbnail.as_ref().map_or(0, |t| t.size))
        .sum();
    lines.push(format!(
        "Prepared {} of {} images ({} staged)",
        report.succeeded.len(),
        report.total(),
        format_size(staged)
    ));

    if !report.failed.is_empty() {
        lines.push("Failed:".to_string());
        for failure in &report.failed {
            lines.push(format!(
                "    {}: {}",
                file_display_name(&failure.source),
                failure.reason
            ));
        }
    }

    lines
}

/// Print the end-of-run summary to stdout.
pub fn print_run_summary(report: &ProcessReport) {
    for line in format_run_summary(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format `check` results: one line per file plus a closing count.
pub fn format_check_output(results: &[(PathBuf, bool)]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, (path, ok)) in results.iter().enumerate() {
        let status = if *ok { "ok" } else { "not an image" };
        lines.push(format!(
            "{} {}: {}",
            format_index(i + 1),
            file_display_name(path),
            status
        ));
    }

    let ok_count = results.iter().filter(|(_, ok)| *ok).count();
    lines.push(String::new());
    lines.push(format!(
        "Checked {} files, {} ok, {} rejected",
        results.len(),
        ok_count,
        results.len() - ok_count
    ));
    lines
}

/// Print `check` results to stdout.
pub fn print_check_output(results: &[(PathBuf, bool)]) {
    for line in format_check_output(results) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
