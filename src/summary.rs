use crate::mutants::{DetectionStatus, MutationRecord};

/// Running tally of the mutations that went into a report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub batches: usize,
    pub total: usize,
    pub detected: usize,
    pub survived: usize,
    pub no_coverage: usize,
    pub timed_out: usize,
}

impl RunSummary {
    pub fn record_batch<'a>(&mut self, records: impl IntoIterator<Item = &'a MutationRecord>) {
        self.batches += 1;
        for record in records {
            self.record(record);
        }
    }

    pub fn record(&mut self, record: &MutationRecord) {
        self.total += 1;
        if record.detected() {
            self.detected += 1;
        } else {
            self.survived += 1;
        }
        match record.status {
            DetectionStatus::NoCoverage => self.no_coverage += 1,
            DetectionStatus::TimedOut => self.timed_out += 1,
            _ => {}
        }
    }

    /// Fraction of mutations detected; an empty run scores 1.0.
    pub fn score(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.detected as f64 / self.total as f64
        }
    }
}
