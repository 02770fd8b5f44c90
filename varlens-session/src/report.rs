//! Per-job report marks.
//!
//! A mark flags a variant position for inclusion in the clinical report of
//! the job it was set under. Marks for different jobs never interact.

use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Default)]
pub struct ReportMarks {
    jobs: HashMap<String, BTreeSet<u64>>,
}

impl ReportMarks {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Flip the mark on `position` for `job_id`. Returns whether the
    /// position is marked afterwards.
    ///
    pub fn toggle(&mut self, job_id: &str, position: u64) -> bool {
        let marks = self.jobs.entry(job_id.to_string()).or_default();
        if marks.remove(&position) {
            false
        } else {
            marks.insert(position);
            true
        }
    }

    pub fn is_marked(&self, job_id: &str, position: u64) -> bool {
        self.jobs
            .get(job_id)
            .is_some_and(|marks| marks.contains(&position))
    }

    /// Marked positions of one job, ascending.
    pub fn positions(&self, job_id: &str) -> Vec<u64> {
        self.jobs
            .get(job_id)
            .map(|marks| marks.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Replace the marks of `job_id`, e.g. with what a store returned.
    pub fn load(&mut self, job_id: &str, positions: impl IntoIterator<Item = u64>) {
        self.jobs
            .insert(job_id.to_string(), positions.into_iter().collect());
    }
}

///
/// Where report marks are saved after every toggle. Failures are reported
/// but never undo the in-memory toggle.
///
pub trait ReportStore: Send + Sync {
    fn save_marks(&self, job_id: &str, positions: &[u64]) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_toggle_twice_restores() {
        let mut marks = ReportMarks::new();
        assert!(marks.toggle("job-1", 100));
        assert!(marks.is_marked("job-1", 100));
        assert!(!marks.toggle("job-1", 100));
        assert!(!marks.is_marked("job-1", 100));
        assert!(marks.positions("job-1").is_empty());
    }

    #[rstest]
    fn test_jobs_are_independent() {
        let mut marks = ReportMarks::new();
        marks.toggle("job-1", 300);
        marks.toggle("job-1", 100);
        marks.toggle("job-2", 200);

        assert_eq!(marks.positions("job-1"), vec![100, 300]);
        assert_eq!(marks.positions("job-2"), vec![200]);
        assert!(!marks.is_marked("job-2", 100));
        assert!(marks.positions("job-3").is_empty());
    }

    #[rstest]
    fn test_load_replaces() {
        let mut marks = ReportMarks::new();
        marks.toggle("job-1", 5);
        marks.load("job-1", [9, 7]);
        assert_eq!(marks.positions("job-1"), vec![7, 9]);
    }
}
