use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, ValueEnum};
use lorimir_api::records::{SCAN_TYPES, is_known_scan_type};

/// Mirror MRI images of the PREVENT-AD release onto local disk.
#[derive(Clone, Debug, Parser)]
#[command(name = "lorimir", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// Download directory; defaults to the current directory
    #[arg(short, long)]
    pub outputdir: Option<PathBuf>,

    /// Dataset layout to download
    #[arg(short = 't', long = "type", value_enum, default_value = "bids")]
    pub mode: Mode,

    /// Comma-separated scan types to keep (bids layout only)
    #[arg(short, long, value_delimiter = ',')]
    pub modalities: Option<Vec<String>>,

    /// Prompt for the download directory instead of reading --outputdir
    #[arg(short = 'f', long)]
    pub interactive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Flattened BIDS release, one manifest call
    Bids,
    /// Per-candidate MINC hierarchy
    Minc,
}

impl App {
    /// Reject unknown scan types before any network activity happens.
    pub fn validate_modalities(&self) -> anyhow::Result<()> {
        if let Some(tags) = &self.modalities {
            for tag in tags {
                if !is_known_scan_type(tag) {
                    bail!(
                        "unknown modality '{tag}' (known: {})",
                        SCAN_TYPES.join(" ")
                    );
                }
            }
        }
        Ok(())
    }

    pub fn modality_set(&self) -> Option<BTreeSet<String>> {
        self.modalities
            .as_ref()
            .map(|tags| tags.iter().cloned().collect())
    }
}
