//! Local filesystem writes: idempotent directories, JSON snapshots,
//! payload bytes. Nothing here ever deletes or prunes.

use std::path::Path;

use serde::Serialize;
use tokio::fs;

use crate::error::{Error, Result};

/// Create `dir` and any missing parents. A pre-existing directory is
/// fine; every other failure is fatal.
pub async fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .await
        .map_err(|source| Error::CreateDir {
            path: dir.to_owned(),
            source,
        })
}

/// Write `value` to `path` as pretty-printed JSON, replacing any
/// previous snapshot.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_vec_pretty(value).map_err(|source| Error::Json {
        path: path.to_owned(),
        source,
    })?;
    write_bytes(path, &body).await
}

/// Write raw bytes to `path`, replacing any previous content.
pub async fn write_bytes(path: &Path, body: &[u8]) -> Result<()> {
    fs::write(path, body)
        .await
        .map_err(|source| Error::WriteFile {
            path: path.to_owned(),
            source,
        })
}
