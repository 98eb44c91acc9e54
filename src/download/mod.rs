//! Download module for content downloading.
//!
//! This module provides:
//! - Single file downloading with post-download inspection
//! - Bounded-concurrency, paced batch scheduling
//! - Per-profile orchestration of posts and highlights
//! - Download statistics

pub mod downloader;
pub mod profile;
pub mod scheduler;
pub mod state;

pub use downloader::{DownloadOutcome, DownloadStatus, Downloader};
pub use profile::download_profile;
pub use scheduler::{BatchState, BatchSummary, DownloadScheduler, DEFAULT_CONCURRENCY};
pub use state::{ProfileReport, RunStats};
