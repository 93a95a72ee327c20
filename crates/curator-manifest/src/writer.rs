//! Deterministic manifest serialization
//!
//! The rendered manifest is committed to version control, so two manifests
//! with identical logical content must serialize to byte-identical output.
//! Canonical form: tab indentation, LF line endings, entries in natural
//! filename order, and short entries collapsed onto a single line to keep
//! diffs compact.

use std::path::Path;

use serde_json::ser::PrettyFormatter;

use curator_fs::io::{remove_file, write_atomic};

use crate::entry::{Manifest, ManifestEntry};
use crate::{Error, Result};

/// An entry whose single-line rendering fits within this many columns
/// (including its key and indentation) is collapsed onto one line.
const INLINE_WIDTH: usize = 120;

/// Render a manifest to its canonical byte form.
///
/// The top-level object is laid out by hand: entries must appear in natural
/// filename order, which a sorted-key JSON map would not preserve.
pub fn render(manifest: &Manifest) -> Result<String> {
    let mut out = String::from("{\n");

    let entries = manifest.entries();
    for (index, entry) in entries.iter().enumerate() {
        let key = serde_json::to_string(&entry.filename)
            .map_err(|e| Error::parse(manifest.path(), e))?;

        let inline = render_inline(manifest, entry)?;
        let line = format!("\t{key}: {inline}");
        if line.len() <= INLINE_WIDTH {
            out.push_str(&line);
        } else {
            out.push_str(&format!("\t{key}: {}", render_expanded(manifest, entry)?));
        }

        if index + 1 < entries.len() {
            out.push(',');
        }
        out.push('\n');
    }

    out.push('}');
    Ok(out)
}

/// Persist a manifest: write its canonical form when non-empty, delete the
/// catalogue file when empty. Writes are atomic; a failure never leaves a
/// half-written manifest behind.
pub fn write(manifest: &Manifest) -> Result<()> {
    if manifest.is_empty() {
        return delete(&manifest.path());
    }
    let rendered = render(manifest)?;
    write_atomic(&manifest.path(), rendered.as_bytes())?;
    tracing::debug!(path = %manifest.path().display(), entries = manifest.len(), "manifest written");
    Ok(())
}

/// Remove a persisted manifest; an already-absent file is fine.
pub fn delete(path: &Path) -> Result<()> {
    remove_file(path)?;
    tracing::debug!(path = %path.display(), "manifest removed");
    Ok(())
}

fn render_inline(manifest: &Manifest, entry: &ManifestEntry) -> Result<String> {
    serde_json::to_string(entry).map_err(|e| Error::parse(manifest.path(), e))
}

/// Multi-line form: tab-indented, shifted one level to sit under the
/// top-level key.
fn render_expanded(manifest: &Manifest, entry: &ManifestEntry) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    serde::Serialize::serialize(entry, &mut serializer)
        .map_err(|e| Error::parse(manifest.path(), e))?;
    let pretty = String::from_utf8(buf).map_err(|e| Error::parse(manifest.path(), e))?;

    let mut lines = pretty.lines();
    let mut shifted = lines.next().unwrap_or("{").to_string();
    for line in lines {
        shifted.push_str("\n\t");
        shifted.push_str(line);
    }
    Ok(shifted)
}
