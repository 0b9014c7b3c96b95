//! Monotonic counters summarizing one run.

use crate::fetch::SyncStatus;

/// Totals accumulated over a walk; purely informational.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub candidates: usize,
    pub visits: usize,
    pub files: usize,
    pub downloaded: usize,
    pub unmodified: usize,
    pub qc_fetched: usize,
    pub filtered: usize,
}

impl SyncReport {
    pub(crate) fn record(&mut self, status: SyncStatus) {
        self.files += 1;
        match status {
            SyncStatus::Downloaded => self.downloaded += 1,
            SyncStatus::Unmodified => self.unmodified += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_splits_by_status() {
        let mut report = SyncReport::default();
        report.record(SyncStatus::Downloaded);
        report.record(SyncStatus::Downloaded);
        report.record(SyncStatus::Unmodified);

        assert_eq!(report.files, 3);
        assert_eq!(report.downloaded, 2);
        assert_eq!(report.unmodified, 1);
        assert_eq!(report.filtered, 0);
    }
}
