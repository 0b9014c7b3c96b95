//! `.<name>.etag` marker files, the sole freshness signal for synced
//! assets.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{Error, Result};

/// Path of the marker belonging to `filename` inside `dir`.
pub fn marker_path(dir: &Path, filename: &str) -> PathBuf {
    dir.join(format!(".{filename}.etag"))
}

/// Last tag seen for `filename`, or the empty string when no marker
/// exists yet.
pub async fn load(dir: &Path, filename: &str) -> Result<String> {
    let path = marker_path(dir, filename);
    match fs::read_to_string(&path).await {
        Ok(tag) => Ok(tag),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(source) => Err(Error::ReadMarker { path, source }),
    }
}

/// Record `tag` as the last seen state of `filename`, replacing any
/// previous marker.
pub async fn store(dir: &Path, filename: &str, tag: &str) -> Result<()> {
    let path = marker_path(dir, filename);
    fs::write(&path, tag)
        .await
        .map_err(|source| Error::WriteMarker { path, source })
}
