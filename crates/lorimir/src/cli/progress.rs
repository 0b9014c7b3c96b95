//! Progress rendering on top of the sync event stream.

use std::sync::Mutex;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use lorimir_sync::{SyncEvent, SyncReport};
use once_cell::sync::Lazy;

use crate::cli::app::Mode;

const BAR_STYLE: &str = "{spinner:.blue} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len}";

const SPINNER_STYLE: &str = "{spinner:.blue} [{elapsed_precise}] {pos} files";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const BAR_CHARS: &str = "█▓▒░  ";

static BAR_TEMPLATE: Lazy<Option<ProgressStyle>> =
    Lazy::new(|| match ProgressStyle::with_template(BAR_STYLE) {
        Ok(bar) => Some(bar.tick_chars(TICK).progress_chars(BAR_CHARS)),
        Err(_) => None,
    });

static SPINNER_TEMPLATE: Lazy<Option<ProgressStyle>> =
    Lazy::new(|| match ProgressStyle::with_template(SPINNER_STYLE) {
        Ok(bar) => Some(bar.tick_chars(TICK)),
        Err(_) => None,
    });

fn candidate_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    if let Some(template) = BAR_TEMPLATE.as_ref() {
        bar.set_style(template.clone());
    }
    bar
}

fn file_spinner() -> ProgressBar {
    let bar = ProgressBar::no_length();
    if let Some(template) = SPINNER_TEMPLATE.as_ref() {
        bar.set_style(template.clone());
    }
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

fn print_over(slot: &Option<ProgressBar>, line: String) {
    match slot {
        Some(bar) => bar.println(line),
        None => println!("{line}"),
    }
}

/// Turns sync events into operator-facing output: per-step lines on
/// stdout plus one progress bar (candidates for the hierarchy walk, a
/// file spinner for the flattened one).
pub struct Renderer {
    bar: Mutex<Option<ProgressBar>>,
    mode: Mode,
}

impl Renderer {
    pub fn new(mode: Mode) -> Self {
        Self {
            bar: Mutex::new(None),
            mode,
        }
    }

    pub fn handle(&self, event: &SyncEvent) {
        let Ok(mut slot) = self.bar.lock() else {
            return;
        };

        match event {
            SyncEvent::CandidatesFound { total } => {
                println!("{total} candidates found");
                println!("-------------------------------------------\n");
                *slot = Some(candidate_bar(*total as u64));
            }
            SyncEvent::CandidateStarted { cand_id } => {
                print_over(&slot, format!("Processing candidate #{cand_id}\n"));
            }
            SyncEvent::VisitsFound { total, .. } => {
                print_over(&slot, format!("{total} sessions found\n"));
            }
            SyncEvent::VisitSynced {
                visit,
                files,
                downloaded,
                unmodified,
            } => {
                print_over(
                    &slot,
                    format!(
                        "{files} files found for session {visit} - {downloaded} downloaded, {unmodified} unmodified"
                    ),
                );
            }
            SyncEvent::CandidateFinished { processed, total } => {
                if let Some(bar) = slot.as_ref() {
                    bar.inc(1);
                }
                print_over(
                    &slot,
                    format!("{processed} out of {total} candidates processed\n"),
                );
            }
            SyncEvent::ManifestLoaded { images } => {
                println!("{images} images listed");
                *slot = Some(file_spinner());
            }
            SyncEvent::FileSynced { .. } => {
                if self.mode == Mode::Bids {
                    if let Some(bar) = slot.as_ref() {
                        bar.inc(1);
                    }
                }
            }
            SyncEvent::ImageFiltered { .. } => {}
        }
    }

    pub fn finish(&self, report: &SyncReport) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }

        println!();
        println!(
            "{} {} files checked, {} downloaded, {} unmodified",
            style("done:").green().bold(),
            report.files,
            report.downloaded,
            report.unmodified,
        );
        if report.qc_fetched > 0 {
            println!("      {} qc records fetched", report.qc_fetched);
        }
        if report.filtered > 0 {
            println!("      {} images filtered out", report.filtered);
        }
    }
}
