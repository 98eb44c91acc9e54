//! Bounded-concurrency, paced batch downloading.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::{JoinError, JoinSet};
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

use crate::download::downloader::{DownloadOutcome, Downloader};
use crate::media::MediaReference;
use crate::output::reporter::ProgressReporter;

/// Default number of simultaneous downloads.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Aggregate result of one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub submitted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// True when the batch stopped submitting early.
    pub cancelled: bool,
}

/// Counters for a running batch.
///
/// Only submission and `DownloadScheduler::record` mutate this, so
/// `completed + failed` never exceeds `submitted`.
#[derive(Debug, Default)]
pub struct BatchState {
    pub submitted: usize,
    pub completed: usize,
    pub failed: usize,
}

impl BatchState {
    fn finished(&self) -> usize {
        self.completed + self.failed
    }

    fn summary(&self, cancelled: bool) -> BatchSummary {
        BatchSummary {
            submitted: self.submitted,
            succeeded: self.completed,
            failed: self.failed,
            cancelled,
        }
    }
}

/// A batch in flight: its counters and the tasks still running.
struct RunningBatch<'a> {
    group: &'a str,
    total: usize,
    state: BatchState,
    tasks: JoinSet<DownloadOutcome>,
}

/// Drives groups of references through a [`Downloader`].
pub struct DownloadScheduler {
    downloader: Arc<Downloader>,
    reporter: Arc<dyn ProgressReporter>,
    concurrency_cap: usize,
    jitter: Duration,
    cancel: CancellationToken,
}

impl DownloadScheduler {
    pub fn new(
        downloader: Arc<Downloader>,
        reporter: Arc<dyn ProgressReporter>,
        concurrency_cap: usize,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            downloader,
            reporter,
            concurrency_cap: concurrency_cap.max(1),
            jitter: Duration::ZERO,
            cancel,
        }
    }

    /// Add a random delay of up to `jitter` after each submission.
    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn concurrency_cap(&self) -> usize {
        self.concurrency_cap
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Download one group of references.
    ///
    /// References are submitted in order, one permit each, waiting at least
    /// `min_interval` between submissions. Every submitted download is joined
    /// before returning; failures never stop the rest of the group.
    pub async fn run_batch(
        &self,
        group: &str,
        references: Vec<MediaReference>,
        min_interval: Duration,
    ) -> BatchSummary {
        let total = references.len();
        let permits = Arc::new(Semaphore::new(self.concurrency_cap));
        let mut batch = RunningBatch {
            group,
            total,
            state: BatchState::default(),
            tasks: JoinSet::new(),
        };
        let mut cancelled = false;

        self.reporter.group_started(group, total);
        tracing::info!("Starting {} ({} items)", group, total);

        for (index, reference) in references.into_iter().enumerate() {
            let Some(permit) = self.acquire(&permits, &mut batch).await else {
                cancelled = true;
                break;
            };

            batch.state.submitted += 1;
            self.reporter.item_submitted(&reference);
            tracing::info!(
                "Downloading {}: {}",
                reference.expected_kind(),
                reference.source_url()
            );

            let downloader = Arc::clone(&self.downloader);
            batch.tasks.spawn(async move {
                // Released when the task ends, however it ends.
                let _permit = permit;
                downloader.download(reference).await
            });

            if index + 1 < total && !self.pace(min_interval, &mut batch).await {
                cancelled = true;
                break;
            }
        }

        while let Some(result) = batch.tasks.join_next().await {
            self.record(group, total, &mut batch.state, result);
        }

        let summary = batch.state.summary(cancelled);
        tracing::info!(
            "Finished {}: {} submitted, {} succeeded, {} failed{}",
            group,
            summary.submitted,
            summary.succeeded,
            summary.failed,
            if cancelled { " (cancelled)" } else { "" }
        );
        self.reporter.group_finished(group, &summary);
        summary
    }

    /// Wait for a free slot, recording downloads that finish meanwhile.
    /// Returns `None` when cancelled.
    async fn acquire(
        &self,
        permits: &Arc<Semaphore>,
        batch: &mut RunningBatch<'_>,
    ) -> Option<OwnedSemaphorePermit> {
        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return None,
                Some(result) = batch.tasks.join_next(), if !batch.tasks.is_empty() => {
                    self.record(batch.group, batch.total, &mut batch.state, result);
                }
                permit = Arc::clone(permits).acquire_owned() => return permit.ok(),
            }
        }
    }

    /// Single mutation point for batch counters and group progress.
    fn record(
        &self,
        group: &str,
        total: usize,
        state: &mut BatchState,
        result: Result<DownloadOutcome, JoinError>,
    ) {
        match result {
            Ok(outcome) if outcome.is_success() => state.completed += 1,
            Ok(outcome) => {
                state.failed += 1;
                tracing::warn!("{}", outcome.describe());
            }
            Err(e) => {
                state.failed += 1;
                let reason = format!("download task failed: {}", e);
                tracing::error!("{}: {}", group, reason);
                self.reporter.item_lost(group, &reason);
            }
        }
        debug_assert!(state.finished() <= state.submitted);
        self.reporter.group_advanced(group, state.finished(), total);
    }

    /// Wait out the submission interval, recording downloads that finish
    /// meanwhile. Returns false when cancelled.
    async fn pace(&self, min_interval: Duration, batch: &mut RunningBatch<'_>) -> bool {
        let mut delay = min_interval;
        if !self.jitter.is_zero() {
            let extra = rand::thread_rng().gen_range(0..=self.jitter.as_millis() as u64);
            delay += Duration::from_millis(extra);
        }

        if delay.is_zero() {
            while let Some(result) = batch.tasks.try_join_next() {
                self.record(batch.group, batch.total, &mut batch.state, result);
            }
            return !self.cancel.is_cancelled();
        }

        let deadline = Instant::now() + delay;
        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return false,
                Some(result) = batch.tasks.join_next(), if !batch.tasks.is_empty() => {
                    self.record(batch.group, batch.total, &mut batch.state, result);
                }
                _ = sleep_until(deadline) => return true,
            }
        }
    }
}
