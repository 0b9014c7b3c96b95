//! The conditional-download primitive every synced file goes through.

use std::path::Path;

use lorimir_api::Session;
use tracing::debug;

use crate::error::{Error, Result};
use crate::{etag, fs};

/// Whether a sync wrote new bytes or the local copy was already current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Downloaded,
    Unmodified,
}

impl SyncStatus {
    pub fn downloaded(self) -> bool {
        matches!(self, Self::Downloaded)
    }
}

/// Last path segment of a server-relative link, i.e. the local filename.
pub(crate) fn link_basename(link: &str) -> Result<&str> {
    link.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::BadLink {
            link: link.to_owned(),
        })
}

/// Mirror one remote file into `dest_dir`.
///
/// Reads the `.<name>.etag` marker for the previous tag, issues a
/// conditional GET, writes the body on 200 and skips it on 304, then
/// rewrites the marker with the tag of this response either way. The
/// marker refresh on 304 is deliberate: the server still answered, so
/// the freshness signal is renewed even when no bytes moved.
pub async fn sync_file(session: &Session, link: &str, dest_dir: &Path) -> Result<SyncStatus> {
    let filename = link_basename(link)?;
    let prev = etag::load(dest_dir, filename).await?;
    let fetch = session.get_conditional(link, &prev).await?;

    let status = match &fetch.body {
        Some(body) => {
            fs::write_bytes(&dest_dir.join(filename), body).await?;
            SyncStatus::Downloaded
        }
        None => SyncStatus::Unmodified,
    };

    etag::store(dest_dir, filename, &fetch.etag).await?;
    debug!(file = filename, status = ?status, "synced");
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_takes_last_segment() {
        assert_eq!(
            link_basename("candidates/212111/PREBL00/images/scan.mnc").unwrap(),
            "scan.mnc"
        );
        assert_eq!(
            link_basename("participants.tsv").unwrap(),
            "participants.tsv"
        );
    }

    #[test]
    fn basename_ignores_trailing_slash() {
        assert_eq!(
            link_basename("bids/dataset_description.json/").unwrap(),
            "dataset_description.json"
        );
    }

    #[test]
    fn empty_link_is_rejected() {
        assert!(matches!(link_basename(""), Err(Error::BadLink { .. })));
        assert!(matches!(link_basename("///"), Err(Error::BadLink { .. })));
    }
}
