//! Commit message rendering
//!
//! Titles and bodies are templates with `$added`, `$updated`, `$removed`,
//! `$total`, and `$path` placeholders, optionally followed by a naturally
//! sorted, human-readable list of changed files.

use curator_manifest::{DiffResult, EntryChange};

/// Default title when the diff is non-empty and no template was supplied.
pub const DEFAULT_TITLE: &str = "Imported $total changes to $path";

/// Inputs for one commit message.
#[derive(Debug, Clone, Default)]
pub struct MessageOptions {
    /// Title template; [`DEFAULT_TITLE`] when absent.
    pub title: Option<String>,
    /// Optional body paragraph template, inserted after the title.
    pub body: Option<String>,
    /// Suppress the file change list.
    pub exclude_file_list: bool,
}

/// Render the full commit message for a change report.
pub fn build_commit_message(diff: &DiffResult, dest: &str, options: &MessageOptions) -> String {
    let title = options
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TITLE);

    let mut parts = vec![substitute(title, diff, dest)];

    if let Some(body) = &options.body {
        parts.push(String::new());
        parts.push(substitute(body.trim(), diff, dest));
    }

    if !options.exclude_file_list {
        let change_list = build_file_change_list(diff);
        if !change_list.is_empty() {
            parts.push(String::new());
            parts.push(change_list);
        }
    }

    parts.join("\n")
}

/// Render the Added/Updated/Removed sections. Only non-empty sections
/// appear; each diff set is already naturally ordered.
pub fn build_file_change_list(diff: &DiffResult) -> String {
    let mut sections = Vec::new();

    if !diff.added.is_empty() {
        let lines: Vec<String> = diff.added.iter().map(added_line).collect();
        sections.push(format!("Added:\n{}", lines.join("\n")));
    }

    if !diff.updated.is_empty() {
        let lines: Vec<String> = diff.updated.iter().map(updated_line).collect();
        sections.push(format!("Updated:\n{}", lines.join("\n")));
    }

    if !diff.removed.is_empty() {
        let lines: Vec<String> = diff
            .removed
            .iter()
            .map(|c| format!("* {}", c.filename))
            .collect();
        sections.push(format!("Removed:\n{}", lines.join("\n")));
    }

    sections.join("\n\n")
}

fn added_line(change: &EntryChange) -> String {
    match change.new.as_ref().and_then(|e| e.version.as_deref()) {
        Some(version) => format!("* {} (v{version})", change.filename),
        None => format!("* {}", change.filename),
    }
}

/// Updated entries show the new version only when the version itself
/// changed; otherwise something else changed (fingerprint, format, mod) and
/// the bare filename is clearer.
fn updated_line(change: &EntryChange) -> String {
    let old_version = change.old.as_ref().and_then(|e| e.version.as_deref());
    let new_version = change.new.as_ref().and_then(|e| e.version.as_deref());
    match (old_version, new_version) {
        (old, Some(new)) if old != Some(new) => format!("* {} (v{new})", change.filename),
        _ => format!("* {}", change.filename),
    }
}

/// Expand the message placeholders. Longer names are replaced first so
/// `$updated` is never clipped by `$update`-style prefixes.
fn substitute(template: &str, diff: &DiffResult, dest: &str) -> String {
    template
        .replace("$updated", &diff.updated.len().to_string())
        .replace("$removed", &diff.removed.len().to_string())
        .replace("$added", &diff.added.len().to_string())
        .replace("$total", &diff.total().to_string())
        .replace("$path", dest)
}
