//! Progress reporting for downloads and groups.

use std::sync::Mutex;

use console::style;
use indicatif::ProgressBar;

use crate::download::{BatchSummary, DownloadOutcome};
use crate::media::MediaReference;
use crate::output::console::{print_success, print_warning};
use crate::output::progress::create_item_bar;

/// Receives progress notifications from the downloader and scheduler.
///
/// Implementations are shared between concurrent download tasks.
pub trait ProgressReporter: Send + Sync {
    /// A group of `total` items is about to be submitted.
    fn group_started(&self, group: &str, total: usize);

    /// A reference has been handed to the downloader.
    fn item_submitted(&self, _reference: &MediaReference) {}

    /// A download finished, successfully or not.
    fn item_finished(&self, outcome: &DownloadOutcome);

    /// A download task ended without producing an outcome.
    fn item_lost(&self, group: &str, reason: &str);

    /// `done` of `total` items in the group have finished.
    fn group_advanced(&self, group: &str, done: usize, total: usize);

    /// Every submitted item of the group has finished.
    fn group_finished(&self, group: &str, summary: &BatchSummary);
}

/// Reporter that prints styled lines above a per-group progress bar.
pub struct ConsoleReporter {
    show_downloads: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    pub fn new(show_downloads: bool) -> Self {
        Self {
            show_downloads,
            bar: Mutex::new(None),
        }
    }

    fn println(&self, line: String) {
        let bar = self.bar.lock().unwrap_or_else(|e| e.into_inner());
        match bar.as_ref() {
            Some(bar) => bar.println(line),
            None => println!("{}", line),
        }
    }
}

impl ProgressReporter for ConsoleReporter {
    fn group_started(&self, group: &str, total: usize) {
        let bar = create_item_bar(total as u64, &format!("Downloading {}", group));
        let mut current = self.bar.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = current.replace(bar) {
            previous.finish_and_clear();
        }
    }

    fn item_finished(&self, outcome: &DownloadOutcome) {
        if outcome.is_success() {
            if self.show_downloads {
                let line = outcome.describe();
                let (label, rest) = line
                    .split_once(": ")
                    .unwrap_or(("Downloaded", line.as_str()));
                self.println(format!(
                    "{} {}",
                    style(format!("{}:", label)).cyan().bold(),
                    style(rest).magenta()
                ));
            }
        } else {
            self.println(format!("{}", style(outcome.describe()).red()));
        }
    }

    fn item_lost(&self, group: &str, reason: &str) {
        self.println(format!("{}", style(format!("{}: {}", group, reason)).red()));
    }

    fn group_advanced(&self, _group: &str, done: usize, _total: usize) {
        let bar = self.bar.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(bar) = bar.as_ref() {
            bar.set_position(done as u64);
        }
    }

    fn group_finished(&self, group: &str, summary: &BatchSummary) {
        if let Some(bar) = self.bar.lock().unwrap_or_else(|e| e.into_inner()).take() {
            bar.finish_and_clear();
        }

        let line = format!(
            "{}: {} downloaded, {} failed",
            group, summary.succeeded, summary.failed
        );
        if summary.failed > 0 || summary.cancelled {
            print_warning(&line);
        } else {
            print_success(&line);
        }
    }
}
