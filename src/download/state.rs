//! Per-profile and run-wide statistics.

use crate::download::scheduler::BatchSummary;

/// Result of downloading one profile.
#[derive(Debug, Default)]
pub struct ProfileReport {
    pub profile: String,

    /// Summary per group, in the order the groups ran.
    pub groups: Vec<(String, BatchSummary)>,

    /// Groups that could not be enumerated, with the reason.
    pub enumeration_failures: Vec<(String, String)>,

    pub cancelled: bool,
}

impl ProfileReport {
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            ..Default::default()
        }
    }

    /// Record a finished group.
    pub fn add_group(&mut self, group: impl Into<String>, summary: BatchSummary) {
        self.cancelled |= summary.cancelled;
        self.groups.push((group.into(), summary));
    }

    /// Record a group whose listing failed; it counts as zero items.
    pub fn add_enumeration_failure(&mut self, group: impl Into<String>, reason: impl Into<String>) {
        self.enumeration_failures.push((group.into(), reason.into()));
    }

    pub fn submitted(&self) -> usize {
        self.groups.iter().map(|(_, s)| s.submitted).sum()
    }

    pub fn succeeded(&self) -> usize {
        self.groups.iter().map(|(_, s)| s.succeeded).sum()
    }

    pub fn failed(&self) -> usize {
        self.groups.iter().map(|(_, s)| s.failed).sum()
    }
}

/// Statistics across all profiles of a run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub profiles_processed: u64,
    pub profiles_failed: u64,
    pub submitted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub enumeration_failures: usize,
}

impl RunStats {
    /// Add statistics from a profile report.
    pub fn add_profile(&mut self, report: &ProfileReport) {
        self.profiles_processed += 1;
        self.submitted += report.submitted();
        self.succeeded += report.succeeded();
        self.failed += report.failed();
        self.enumeration_failures += report.enumeration_failures.len();
    }

    /// Mark a profile as failed.
    pub fn mark_profile_failed(&mut self) {
        self.profiles_failed += 1;
    }
}
