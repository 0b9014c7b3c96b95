//! Wire records for the LORIS REST API (`v0.0.3-dev` payload shapes).
//!
//! Field names follow the server's JSON keys; records rename rather than
//! restyle them, so snapshots written back to disk stay faithful to the
//! wire.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Scan types the BIDS release labels its images with.
pub const SCAN_TYPES: &[&str] = &[
    "asl", "bold", "dwi65", "fieldmap", "FLAIR", "MP2RAGE", "qT1", "T1w", "T2star", "T2w",
];

/// Whether `tag` names a scan type the release publishes. Matching is
/// exact and case-sensitive.
pub fn is_known_scan_type(tag: &str) -> bool {
    SCAN_TYPES.contains(&tag)
}

/// `GET /candidates` reply.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateList {
    #[serde(rename = "Candidates")]
    pub candidates: Vec<Candidate>,
}

/// One candidate row. Only the identifier is typed; every other field
/// rides along untouched so `candidate.json` mirrors the server record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "CandID")]
    pub cand_id: String,
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

/// `GET /candidates/{candid}` reply; only the visit labels are needed.
#[derive(Debug, Clone, Deserialize)]
pub struct VisitList {
    #[serde(rename = "Visits")]
    pub visits: Vec<String>,
}

/// `GET /candidates/{candid}/{visit}` reply; `Meta` lands in
/// `session.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct VisitSession {
    #[serde(rename = "Meta")]
    pub meta: Value,
}

/// `GET /candidates/{candid}/{visit}/images` reply.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageList {
    #[serde(rename = "Files")]
    pub files: Vec<ImageEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageEntry {
    #[serde(rename = "Filename")]
    pub filename: String,
}

/// `GET /bids` reply: the flattened manifest of every downloadable file
/// in the BIDS release.
#[derive(Debug, Clone, Deserialize)]
pub struct BidsManifest {
    #[serde(rename = "DatasetDescription")]
    pub dataset_description: StudyFile,
    #[serde(rename = "BidsValidatorConfig")]
    pub validator_config: StudyFile,
    #[serde(rename = "Participants")]
    pub participants: TabularPair,
    #[serde(rename = "SessionFiles")]
    pub session_files: Vec<SessionFiles>,
    #[serde(rename = "Images")]
    pub images: Vec<BidsImage>,
}

/// Study-level file with a single download link.
#[derive(Debug, Clone, Deserialize)]
pub struct StudyFile {
    #[serde(rename = "Link")]
    pub link: String,
}

/// Tabular file split across a `.tsv` payload and its JSON data
/// dictionary.
#[derive(Debug, Clone, Deserialize)]
pub struct TabularPair {
    #[serde(rename = "TsvLink")]
    pub tsv_link: String,
    #[serde(rename = "JsonLink")]
    pub json_link: String,
}

/// Per-visit `scans.tsv`/`scans.json` pair.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionFiles {
    #[serde(rename = "Candidate")]
    pub candidate: String,
    #[serde(rename = "Visit")]
    pub visit: String,
    #[serde(rename = "TsvLink")]
    pub tsv_link: String,
    #[serde(rename = "JsonLink")]
    pub json_link: String,
}

/// One image of the BIDS manifest together with its companion files.
#[derive(Debug, Clone, Deserialize)]
pub struct BidsImage {
    #[serde(rename = "Candidate")]
    pub candidate: String,
    #[serde(rename = "Visit")]
    pub visit: String,
    #[serde(rename = "Subfolder")]
    pub subfolder: String,
    #[serde(rename = "LorisScanType")]
    pub scan_type: String,
    #[serde(rename = "NiftiLink")]
    pub nifti_link: String,
    #[serde(rename = "JsonLink")]
    pub json_link: String,
    #[serde(rename = "BvalLink", default)]
    pub bval_link: Option<String>,
    #[serde(rename = "BvecLink", default)]
    pub bvec_link: Option<String>,
    #[serde(rename = "EventLink", default)]
    pub event_link: Option<String>,
}

impl BidsImage {
    /// Every link of the image in sync order: payload, JSON companion,
    /// then whichever optional companions the manifest carries.
    pub fn links(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.nifti_link.as_str()),
            Some(self.json_link.as_str()),
            self.bval_link.as_deref(),
            self.bvec_link.as_deref(),
            self.event_link.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}
