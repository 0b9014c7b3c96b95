//! Hierarchical walk: candidates, their visits, their image files.

use std::path::Path;

use lorimir_api::Session;
use lorimir_api::records::{CandidateList, ImageList, VisitList, VisitSession};
use tracing::info;

use crate::error::Result;
use crate::fetch::sync_file;
use crate::fs;
use crate::options::{SyncEvent, SyncOptions};
use crate::report::SyncReport;

/// Mirror the whole candidate hierarchy under `root`.
///
/// Per candidate: `candidate.json`, then every visit. Per visit:
/// `session.json`, the image files through the conditional-download
/// primitive, and a QC sidecar per image fetched only when absent.
pub async fn mirror_minc(
    session: &Session,
    root: &Path,
    options: &SyncOptions,
) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    let listing: CandidateList = session.get_json("candidates").await?;
    let total = listing.candidates.len();
    info!(candidates = total, "hierarchy walk started");
    options.emit(SyncEvent::CandidatesFound { total });

    let mut processed = 0;
    for candidate in &listing.candidates {
        options.emit(SyncEvent::CandidateStarted {
            cand_id: candidate.cand_id.clone(),
        });

        let cand_dir = root.join(&candidate.cand_id);
        fs::ensure_dir(&cand_dir).await?;
        fs::write_json(&cand_dir.join("candidate.json"), candidate).await?;

        let visits: VisitList = session
            .get_json(&format!("candidates/{}", candidate.cand_id))
            .await?;
        options.emit(SyncEvent::VisitsFound {
            cand_id: candidate.cand_id.clone(),
            total: visits.visits.len(),
        });

        for visit in &visits.visits {
            sync_visit(
                session,
                &candidate.cand_id,
                visit,
                &cand_dir,
                options,
                &mut report,
            )
            .await?;
        }

        report.candidates += 1;
        processed += 1;
        options.emit(SyncEvent::CandidateFinished { processed, total });
    }

    Ok(report)
}

async fn sync_visit(
    session: &Session,
    cand_id: &str,
    visit: &str,
    cand_dir: &Path,
    options: &SyncOptions,
    report: &mut SyncReport,
) -> Result<()> {
    let visit_dir = cand_dir.join(visit);
    fs::ensure_dir(&visit_dir).await?;

    let visit_base = format!("candidates/{cand_id}/{visit}");
    let session_meta: VisitSession = session.get_json(&visit_base).await?;
    fs::write_json(&visit_dir.join("session.json"), &session_meta.meta).await?;

    let listing: ImageList = session.get_json(&format!("{visit_base}/images")).await?;
    let found = listing.files.len();

    let mut downloaded = 0;
    let mut unmodified = 0;
    for image in &listing.files {
        let link = format!("{visit_base}/images/{}", image.filename);
        let status = sync_file(session, &link, &visit_dir).await?;
        if status.downloaded() {
            downloaded += 1;
        } else {
            unmodified += 1;
        }
        report.record(status);
        options.emit(SyncEvent::FileSynced {
            filename: image.filename.clone(),
            downloaded: status.downloaded(),
        });

        fetch_qc_if_absent(session, &visit_base, &image.filename, &visit_dir, report).await?;
    }

    report.visits += 1;
    options.emit(SyncEvent::VisitSynced {
        visit: visit.to_owned(),
        files: found,
        downloaded,
        unmodified,
    });
    Ok(())
}

/// QC records carry no entity tag, so the local sidecar's existence is
/// the only skip signal.
async fn fetch_qc_if_absent(
    session: &Session,
    visit_base: &str,
    filename: &str,
    visit_dir: &Path,
    report: &mut SyncReport,
) -> Result<()> {
    let qc_path = visit_dir.join(format!("{filename}.qc.json"));
    if tokio::fs::try_exists(&qc_path).await.unwrap_or(false) {
        return Ok(());
    }

    let body = session
        .get_bytes(&format!("{visit_base}/images/{filename}/qc"))
        .await?;
    fs::write_bytes(&qc_path, &body).await?;
    report.qc_fetched += 1;
    Ok(())
}
