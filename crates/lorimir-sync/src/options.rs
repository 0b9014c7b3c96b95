//! Traversal options and the observational event stream.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Callback receiving progress events as a walk advances.
pub type EventFn = Arc<dyn Fn(&SyncEvent) + Send + Sync>;

/// What the walkers report while they run. Purely observational:
/// dropping every event changes nothing about what lands on disk.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// Candidate listing arrived (hierarchical walk).
    CandidatesFound { total: usize },
    CandidateStarted { cand_id: String },
    CandidateFinished { processed: usize, total: usize },
    VisitsFound { cand_id: String, total: usize },
    /// One visit fully synced, with its per-visit counters.
    VisitSynced {
        visit: String,
        files: usize,
        downloaded: usize,
        unmodified: usize,
    },
    /// Flattened manifest arrived (bids walk).
    ManifestLoaded { images: usize },
    FileSynced { filename: String, downloaded: bool },
    /// An image was skipped by the scan-type allow-list.
    ImageFiltered { scan_type: String },
}

#[derive(Clone, Default)]
pub struct SyncOptions {
    /// Allow-list of scan types for the flattened walk; `None` keeps
    /// everything.
    pub modalities: Option<BTreeSet<String>>,
    pub on_event: Option<EventFn>,
}

impl fmt::Debug for SyncOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncOptions")
            .field("modalities", &self.modalities)
            .field("on_event", &self.on_event.as_ref().map(|_| "Fn"))
            .finish()
    }
}

impl SyncOptions {
    pub fn modalities<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modalities = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn on_event(mut self, callback: EventFn) -> Self {
        self.on_event = Some(callback);
        self
    }

    /// Exact-membership check against the allow-list; everything passes
    /// when no list was supplied.
    pub fn wants_scan_type(&self, tag: &str) -> bool {
        self.modalities
            .as_ref()
            .is_none_or(|list| list.contains(tag))
    }

    pub(crate) fn emit(&self, event: SyncEvent) {
        if let Some(callback) = &self.on_event {
            callback(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn no_allow_list_keeps_everything() {
        let options = SyncOptions::default();
        assert!(options.wants_scan_type("T1w"));
        assert!(options.wants_scan_type("anything"));
    }

    #[test]
    fn allow_list_matches_exactly() {
        let options = SyncOptions::default().modalities(["T1w", "bold"]);
        assert!(options.wants_scan_type("T1w"));
        assert!(options.wants_scan_type("bold"));
        assert!(!options.wants_scan_type("T1"));
        assert!(!options.wants_scan_type("t1w"));
        assert!(!options.wants_scan_type("T2w"));
    }

    #[test]
    fn emit_reaches_the_callback() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let options = SyncOptions::default().on_event(Arc::new(move |_: &SyncEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        options.emit(SyncEvent::CandidatesFound { total: 3 });
        options.emit(SyncEvent::CandidateFinished {
            processed: 1,
            total: 3,
        });
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn emit_without_callback_is_a_no_op() {
        SyncOptions::default().emit(SyncEvent::ManifestLoaded { images: 0 });
    }
}
