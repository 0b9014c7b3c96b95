//! Incremental mirroring of a LORIS imaging archive onto local disk.
//!
//! # Architecture
//!
//! - `fetch.rs` - the conditional-download primitive (one marker per asset)
//! - `etag.rs` - `.<name>.etag` marker files
//! - `fs.rs` - idempotent directories, JSON snapshots, payload writes
//! - `minc.rs` - hierarchical walk (candidates → visits → files)
//! - `bids.rs` - flattened walk over the BIDS manifest
//! - `options.rs` / `report.rs` - event callback and run counters

pub use bids::mirror_bids;
pub use error::{Error, Result};
pub use fetch::{SyncStatus, sync_file};
pub use minc::mirror_minc;
pub use options::{EventFn, SyncEvent, SyncOptions};
pub use report::SyncReport;

mod bids;
mod error;
mod etag;
mod fetch;
mod fs;
mod minc;
mod options;
mod report;
