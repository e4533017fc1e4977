//! CSV tables.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::Result;

/// Write `rows` as CSV under an explicit header line.
///
/// The header is always written, so a run where every source was skipped
/// still produces a well-formed (empty) table. Parent directories are
/// created as needed.
pub fn write_csv<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = rows.len(), "Wrote CSV table");
    Ok(())
}
