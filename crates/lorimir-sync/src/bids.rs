//! Flattened walk: one manifest call, then every file it names.

use std::collections::BTreeSet;
use std::path::Path;

use lorimir_api::Session;
use lorimir_api::records::BidsManifest;
use tracing::info;

use crate::error::Result;
use crate::fetch::{link_basename, sync_file};
use crate::fs;
use crate::options::{SyncEvent, SyncOptions};
use crate::report::SyncReport;

/// Mirror the BIDS release under `root` from the flattened manifest.
///
/// Sync order: the study-level slots into `root`, then each visit's
/// tabular pair into `root/<candidate>/<visit>/`, then each image (and
/// its companions) into `root/<candidate>/<visit>/<subfolder>/`. Images
/// whose scan type is not on the allow-list are never fetched.
pub async fn mirror_bids(
    session: &Session,
    root: &Path,
    options: &SyncOptions,
) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    let manifest: BidsManifest = session.get_json("bids").await?;
    info!(
        images = manifest.images.len(),
        sessions = manifest.session_files.len(),
        "manifest loaded"
    );
    options.emit(SyncEvent::ManifestLoaded {
        images: manifest.images.len(),
    });

    fs::ensure_dir(root).await?;
    let study_links = [
        manifest.dataset_description.link.as_str(),
        manifest.participants.tsv_link.as_str(),
        manifest.participants.json_link.as_str(),
        manifest.validator_config.link.as_str(),
    ];
    for link in study_links {
        sync_into(session, link, root, options, &mut report).await?;
    }

    let mut seen_candidates = BTreeSet::new();
    for files in &manifest.session_files {
        seen_candidates.insert(files.candidate.as_str());
        let dir = root.join(&files.candidate).join(&files.visit);
        fs::ensure_dir(&dir).await?;
        sync_into(session, &files.tsv_link, &dir, options, &mut report).await?;
        sync_into(session, &files.json_link, &dir, options, &mut report).await?;
        report.visits += 1;
    }
    report.candidates = seen_candidates.len();

    for image in &manifest.images {
        if !options.wants_scan_type(&image.scan_type) {
            report.filtered += 1;
            options.emit(SyncEvent::ImageFiltered {
                scan_type: image.scan_type.clone(),
            });
            continue;
        }

        let dir = root
            .join(&image.candidate)
            .join(&image.visit)
            .join(&image.subfolder);
        fs::ensure_dir(&dir).await?;
        for link in image.links() {
            sync_into(session, link, &dir, options, &mut report).await?;
        }
    }

    Ok(report)
}

async fn sync_into(
    session: &Session,
    link: &str,
    dir: &Path,
    options: &SyncOptions,
    report: &mut SyncReport,
) -> Result<()> {
    let filename = link_basename(link)?.to_owned();
    let status = sync_file(session, link, dir).await?;
    report.record(status);
    options.emit(SyncEvent::FileSynced {
        filename,
        downloaded: status.downloaded(),
    });
    Ok(())
}
