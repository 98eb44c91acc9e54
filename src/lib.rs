//! Profile Media Downloader - download posts and highlights media of profiles
//!
//! This library provides the download pipeline behind the CLI.
//!
//! # Features
//!
//! - Posts and story highlights, one batch per group
//! - Bounded concurrency with paced submission
//! - Atomic writes (temporary file, then rename)
//! - Image dimensions and video frame rate/duration reporting
//! - Per-profile log files
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use profile_media_downloader::{
//!     ConsoleReporter, DownloadScheduler, Downloader, MediaKind, MediaReference,
//!     NetworkConfig, ProgressReporter,
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let reporter: Arc<dyn ProgressReporter> = Arc::new(ConsoleReporter::new(true));
//!     let client = Downloader::build_client(&NetworkConfig::default())?;
//!     let downloader = Arc::new(Downloader::new(client, Arc::clone(&reporter)));
//!     let scheduler = DownloadScheduler::new(downloader, reporter, 4, CancellationToken::new());
//!
//!     let references = vec![MediaReference::new(
//!         "https://example.com/media/photo.jpg",
//!         "downloads",
//!         MediaKind::Image,
//!     )];
//!     let summary = scheduler
//!         .run_batch("posts", references, Duration::from_millis(200))
//!         .await;
//!     println!("{} downloaded", summary.succeeded);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;
pub mod source;

// Re-exports for convenience
pub use config::{Config, NetworkConfig};
pub use download::{
    download_profile, BatchSummary, DownloadOutcome, DownloadScheduler, DownloadStatus,
    Downloader, ProfileReport, RunStats,
};
pub use error::{Error, Result};
pub use media::{MediaKind, MediaMetadata, MediaReference};
pub use output::{ConsoleReporter, ProgressReporter};
pub use source::{ManifestSource, MediaGroup, ProfileSource, RemoteMedia};
