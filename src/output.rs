//! CLI output formatting for the build pipeline.
//!
//! # Output Format
//!
//! Each stage prints a header followed by status lines in a fixed two-column
//! layout: a left-aligned label (60 columns) and a right-aligned status (20
//! columns), indented by two spaces.
//!
//! ```text
//! creating directory tree:
//!   Output dir already exists                                             [Ignoring]
//!   Collection dir 'beach' already exists                                 [Ignoring]
//!                                                                             [Done]
//! generating thumbnails:
//!   alps                                                                      [Done]
//!   beach                                                                     [Done]
//! generating HTML:
//!                                                                             [Done]
//! copying static content:
//!                                                                             [Done]
//! ```
//!
//! # Architecture
//!
//! Each event has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::pipeline::{BuildEvent, BuildReport};
use crate::scaffold::{DirRole, EnsureOutcome, ScaffoldReport};

const LABEL_WIDTH: usize = 60;
const STATUS_WIDTH: usize = 20;

const IGNORING: &str = "[Ignoring]";
const DONE: &str = "[Done]";

/// `label` padded to the label column, `status` right-aligned after it.
pub fn status_line(label: &str, status: &str) -> String {
    format!(
        "  {:<lw$}{:>sw$}",
        label,
        status,
        lw = LABEL_WIDTH,
        sw = STATUS_WIDTH
    )
}

/// Stage footer: `[Done]` right-aligned across both columns.
pub fn done_line() -> String {
    format!("  {:>w$}", DONE, w = LABEL_WIDTH + STATUS_WIDTH)
}

fn already_exists_label(role: &DirRole) -> String {
    match role {
        DirRole::OutputRoot => "Output dir already exists".to_string(),
        DirRole::GalleryBase => "Collection base dir already exists".to_string(),
        DirRole::Collection(name) => format!("Collection dir '{}' already exists", name),
        DirRole::Thumbnails(name) => {
            format!("Thumbnail dir for collection '{}' already exists", name)
        }
    }
}

/// Scaffold stage: one `[Ignoring]` line per pre-existing directory.
pub fn format_scaffold_report(report: &ScaffoldReport) -> Vec<String> {
    let mut lines = vec!["creating directory tree:".to_string()];
    lines.extend(
        report
            .entries
            .iter()
            .filter(|e| e.outcome == EnsureOutcome::AlreadyPresent)
            .map(|e| status_line(&already_exists_label(&e.role), IGNORING)),
    );
    lines.push(done_line());
    lines
}

/// Format a single build progress event as display lines.
pub fn format_build_event(event: &BuildEvent) -> Vec<String> {
    match event {
        BuildEvent::Scaffolded(report) => format_scaffold_report(report),
        BuildEvent::ThumbnailsStarted { .. } => vec!["generating thumbnails:".to_string()],
        BuildEvent::CollectionDone(report) => vec![status_line(&report.name, DONE)],
        BuildEvent::PageRendered(_) => vec!["generating HTML:".to_string(), done_line()],
        BuildEvent::AssetsPublished(_) => {
            vec!["copying static content:".to_string(), done_line()]
        }
    }
}

/// Closing summary after a successful build.
pub fn format_build_summary(report: &BuildReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Generated {} collections, {} photos \u{2192} {}",
        report.collections.len(),
        report.total_photos(),
        report.page.path.display()
    )];
    if report.page.default_descriptions > 0 {
        lines.push(format!(
            "  {} photos without an embedded description",
            report.page.default_descriptions
        ));
    }
    lines
}

pub fn print_build_event(event: &BuildEvent) {
    for line in format_build_event(event) {
        println!("{}", line);
    }
}

pub fn print_build_summary(report: &BuildReport) {
    for line in format_build_summary(report) {
        println!("{}", line);
    }
}
