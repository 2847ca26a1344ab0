//! Rendering and saving a finished digest.

use std::{fs, io, path::Path};

use crate::Digest;

pub const DEFAULT_OUTPUT_FILE: &str = "content_summary.txt";

/// The summary, followed by its source when `include_metadata` is set
pub fn render(digest: &Digest, include_metadata: bool) -> String {
    let mut out = digest.summary.trim_end().to_string();
    if include_metadata {
        out.push_str("\n\nSource: ");
        out.push_str(&digest.source_label);
    }
    out
}

/// Writes the summary verbatim to `path`
pub fn save(digest: &Digest, path: &Path) -> io::Result<()> {
    fs::write(path, &digest.summary)?;
    tracing::info!(path = %path.display(), "Saved summary");
    Ok(())
}
