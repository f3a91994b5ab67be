//! Snapshot file output
//!
//! The snapshot is fully encoded before anything touches the disk, then written
//! to a uniquely named temp file in the destination directory and persisted over
//! the destination. The temp file is removed on every failure path, so a failed
//! run never leaves a truncated snapshot behind.

use crate::model::GalaxySnapshot;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Pretty-printed JSON bytes of the snapshot
pub fn encode_snapshot(snapshot: &GalaxySnapshot) -> Result<Vec<u8>, OutputError> {
    Ok(serde_json::to_vec_pretty(snapshot)?)
}

pub async fn write_snapshot(snapshot: &GalaxySnapshot, path: &Path) -> Result<(), OutputError> {
    let bytes = encode_snapshot(snapshot)?;
    let write_err = |source| OutputError::Write { path: path.to_path_buf(), source };

    let target = path.to_path_buf();
    tokio::task::spawn_blocking(move || persist_atomically(&bytes, &target))
        .await
        .map_err(io::Error::other)
        .and_then(|result| result)
        .map_err(write_err)?;

    info!("Snapshot with {} systems written to {}", snapshot.node_count, path.display());
    Ok(())
}

fn persist_atomically(bytes: &[u8], path: &Path) -> io::Result<()> {
    if path.file_name().is_none() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"));
    }
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // dropped (and deleted) on any early return below
    let mut tmp = tempfile::Builder::new().prefix(".galaxy-").suffix(".tmp").tempfile_in(dir)?;
    debug!("Writing {} bytes to {}", bytes.len(), tmp.path().display());
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    set_readable(&tmp)?;

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn set_readable(tmp: &NamedTempFile) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tmp.as_file().set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_readable(_tmp: &NamedTempFile) -> io::Result<()> {
    Ok(())
}
