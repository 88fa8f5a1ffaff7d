//! CSV output for extracted records.
//!
//! Each target page gets one `{name}.csv`. Rows are written to a temporary
//! file next to the destination and renamed into place only after the last
//! row is flushed, so a failed write never leaves a truncated catalog.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::ScrapeError;
use crate::models::{Record, CSV_HEADER};

/// Write `records` to `{dir}/{name}.csv`, replacing any existing file.
///
/// Returns the path of the written file.
pub fn write_records(dir: &Path, name: &str, records: &[Record]) -> Result<PathBuf, ScrapeError> {
    let path = dir.join(format!("{}.csv", name));
    let mut tmp = NamedTempFile::new_in(dir)?;

    write_csv(tmp.as_file_mut(), records)?;
    let perms = output_permissions(&path, tmp.as_file())?;
    tmp.as_file().set_permissions(perms)?;
    tmp.as_file().sync_all()?;
    tmp.persist(&path).map_err(|e| ScrapeError::Io(e.error))?;

    debug!("Wrote {} record(s) to {}", records.len(), path.display());
    Ok(path)
}

/// Permissions for the finished file: those of the file being replaced,
/// otherwise world-readable like a freshly created file.
fn output_permissions(path: &Path, tmp: &fs::File) -> Result<fs::Permissions, ScrapeError> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.permissions()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => new_file_permissions(tmp),
        Err(e) => Err(e.into()),
    }
}

#[cfg(unix)]
fn new_file_permissions(_tmp: &fs::File) -> Result<fs::Permissions, ScrapeError> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions(tmp: &fs::File) -> Result<fs::Permissions, ScrapeError> {
    Ok(tmp.metadata()?.permissions())
}

/// Serialize the header and one row per record to `out`.
pub fn write_csv<W: Write>(out: W, records: &[Record]) -> Result<(), ScrapeError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(out);

    // Written explicitly so an empty page still gets its header.
    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
