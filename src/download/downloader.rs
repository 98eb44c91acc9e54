//! Single media file downloading.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::config::NetworkConfig;
use crate::error::{Error, Result};
use crate::fs::naming::{derive_filename, partial_filename};
use crate::media::{inspect, MediaKind, MediaMetadata, MediaReference};
use crate::output::format::format_size;
use crate::output::reporter::ProgressReporter;

/// Terminal status of one download attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadStatus {
    Success,
    HttpError(u16),
    IoError(String),
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadStatus::Success => write!(f, "downloaded"),
            DownloadStatus::HttpError(code) => write!(f, "HTTP {}", code),
            DownloadStatus::IoError(message) => write!(f, "{}", message),
        }
    }
}

/// Result of attempting to download one reference.
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    pub reference: MediaReference,
    pub status: DownloadStatus,
    pub local_path: Option<PathBuf>,
    pub byte_size: Option<u64>,
    pub metadata: Option<MediaMetadata>,
    /// Set when the file was saved but its metadata could not be read.
    pub decode_error: Option<String>,
}

impl DownloadOutcome {
    fn failed(reference: MediaReference, status: DownloadStatus) -> Self {
        Self {
            reference,
            status,
            local_path: None,
            byte_size: None,
            metadata: None,
            decode_error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == DownloadStatus::Success
    }

    /// Filename of the saved file, or the URL's derived name.
    pub fn short_filename(&self) -> String {
        self.local_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .or_else(|| derive_filename(self.reference.source_url()).ok())
            .unwrap_or_else(|| self.reference.source_url().to_string())
    }

    /// Kind resolved from the saved filename, falling back to the hint.
    pub fn resolved_kind(&self) -> MediaKind {
        match self.local_path.as_deref().map(MediaKind::from_path) {
            Some(MediaKind::Unknown) | None => self.reference.expected_kind(),
            Some(kind) => kind,
        }
    }

    /// One-line human readable summary.
    pub fn describe(&self) -> String {
        match &self.status {
            DownloadStatus::Success => {
                let mut details = Vec::new();
                if let Some(metadata) = &self.metadata {
                    details.push(metadata.to_string());
                }
                if let Some(size) = self.byte_size {
                    details.push(format_size(size));
                }
                if let Some(error) = &self.decode_error {
                    details.push(format!("metadata unavailable: {}", error));
                }
                if details.is_empty() {
                    format!("Downloaded: {}", self.short_filename())
                } else {
                    format!(
                        "Downloaded: {} ({})",
                        self.short_filename(),
                        details.join(", ")
                    )
                }
            }
            failure => format!(
                "Failed to download {}: {}",
                self.reference.source_url(),
                failure
            ),
        }
    }
}

/// Fetches media references over HTTP and reports each outcome.
pub struct Downloader {
    client: Client,
    reporter: Arc<dyn ProgressReporter>,
}

impl Downloader {
    pub fn new(client: Client, reporter: Arc<dyn ProgressReporter>) -> Self {
        Self { client, reporter }
    }

    /// Build the HTTP client used for media requests.
    pub fn build_client(network: &NetworkConfig) -> Result<Client> {
        let mut builder = Client::builder().user_agent(&network.user_agent);
        if let Some(timeout) = network.request_timeout() {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| Error::Download(format!("Failed to create HTTP client: {}", e)))
    }

    /// Download one reference. Never fails: every error becomes an outcome.
    pub async fn download(&self, reference: MediaReference) -> DownloadOutcome {
        let outcome = match self.fetch(&reference).await {
            Ok((path, byte_size)) => {
                let (metadata, decode_error) = inspect_saved(&path).await;
                DownloadOutcome {
                    reference,
                    status: DownloadStatus::Success,
                    local_path: Some(path),
                    byte_size: Some(byte_size),
                    metadata,
                    decode_error,
                }
            }
            Err(Error::HttpStatus(code)) => {
                DownloadOutcome::failed(reference, DownloadStatus::HttpError(code))
            }
            Err(e) => DownloadOutcome::failed(reference, DownloadStatus::IoError(e.to_string())),
        };

        self.reporter.item_finished(&outcome);
        outcome
    }

    /// Stream the reference to disk. Returns the final path and its size.
    async fn fetch(&self, reference: &MediaReference) -> Result<(PathBuf, u64)> {
        let target_dir = reference.destination_dir();
        tokio::fs::create_dir_all(target_dir).await?;

        let filename = derive_filename(reference.source_url())?;
        let output_path = target_dir.join(&filename);

        let response = self.client.get(reference.source_url()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus(status.as_u16()));
        }

        let partial_path = target_dir.join(partial_filename(&filename));
        if let Err(e) = stream_to_file(response, &partial_path).await {
            let _ = tokio::fs::remove_file(&partial_path).await;
            return Err(e);
        }
        if let Err(e) = tokio::fs::rename(&partial_path, &output_path).await {
            let _ = tokio::fs::remove_file(&partial_path).await;
            return Err(e.into());
        }

        let byte_size = tokio::fs::metadata(&output_path).await?.len();
        tracing::info!(
            "Downloaded {} to {}",
            reference.source_url(),
            output_path.display()
        );

        Ok((output_path, byte_size))
    }
}

async fn stream_to_file(response: reqwest::Response, path: &Path) -> Result<()> {
    let mut file = File::create(path).await?;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    Ok(())
}

/// Run the inspector off the async runtime.
async fn inspect_saved(path: &Path) -> (Option<MediaMetadata>, Option<String>) {
    let owned = path.to_path_buf();
    match tokio::task::spawn_blocking(move || inspect(&owned)).await {
        Ok(Ok(metadata)) => (metadata, None),
        Ok(Err(e)) => {
            tracing::warn!("Cannot inspect {}: {}", path.display(), e);
            (None, Some(e.to_string()))
        }
        Err(e) => (None, Some(format!("inspection task failed: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ImageMetadata;

    fn reference() -> MediaReference {
        MediaReference::new(
            "https://cdn.example.com/p/photo.jpg?sig=1",
            "/tmp/out",
            MediaKind::Image,
        )
    }

    #[test]
    fn test_describe_image_success() {
        let outcome = DownloadOutcome {
            reference: reference(),
            status: DownloadStatus::Success,
            local_path: Some(PathBuf::from("/tmp/out/photo.jpg")),
            byte_size: Some(1536),
            metadata: Some(MediaMetadata::Image(ImageMetadata {
                width: 1080,
                height: 1350,
            })),
            decode_error: None,
        };
        assert!(outcome.is_success());
        assert_eq!(
            outcome.describe(),
            "Downloaded: photo.jpg (1080x1350px, 1.50 KB)"
        );
        assert_eq!(outcome.resolved_kind(), MediaKind::Image);
    }

    #[test]
    fn test_describe_decode_failure_keeps_success() {
        let outcome = DownloadOutcome {
            reference: reference(),
            status: DownloadStatus::Success,
            local_path: Some(PathBuf::from("/tmp/out/photo.jpg")),
            byte_size: Some(10),
            metadata: None,
            decode_error: Some("bad header".to_string()),
        };
        assert!(outcome.is_success());
        assert_eq!(
            outcome.describe(),
            "Downloaded: photo.jpg (10.00 B, metadata unavailable: bad header)"
        );
    }

    #[test]
    fn test_describe_http_failure() {
        let outcome = DownloadOutcome::failed(reference(), DownloadStatus::HttpError(404));
        assert!(!outcome.is_success());
        assert_eq!(outcome.short_filename(), "photo.jpg");
        assert_eq!(
            outcome.describe(),
            "Failed to download https://cdn.example.com/p/photo.jpg?sig=1: HTTP 404"
        );
    }

    #[test]
    fn test_resolved_kind_falls_back_to_hint() {
        let reference = MediaReference::new("https://x/a/blob", "/tmp", MediaKind::Video);
        let outcome = DownloadOutcome {
            local_path: Some(PathBuf::from("/tmp/blob")),
            ..DownloadOutcome::failed(reference, DownloadStatus::Success)
        };
        assert_eq!(outcome.resolved_kind(), MediaKind::Video);
    }
}
