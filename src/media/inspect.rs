//! Post-download inspection of image and video files.

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::media::video::{probe_avi, probe_mp4, VideoProbe};

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
}

/// Timing of a video.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoMetadata {
    pub fps: f64,
    pub frame_count: u64,
    pub duration_seconds: f64,
}

impl VideoMetadata {
    /// Derive the duration from a probe. A zero frame rate is a decode error.
    pub fn from_probe(probe: VideoProbe) -> Result<Self> {
        if !probe.fps.is_finite() || probe.fps <= 0.0 {
            return Err(Error::Decode(format!(
                "invalid frame rate {} ({} frames)",
                probe.fps, probe.frame_count
            )));
        }

        Ok(Self {
            fps: probe.fps,
            frame_count: probe.frame_count,
            duration_seconds: probe.frame_count as f64 / probe.fps,
        })
    }
}

/// Metadata read back from a downloaded file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaMetadata {
    Image(ImageMetadata),
    Video(VideoMetadata),
}

impl fmt::Display for MediaMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaMetadata::Image(image) => write!(f, "{}x{}px", image.width, image.height),
            MediaMetadata::Video(video) => write!(
                f,
                "FPS: {:.2}, Duration: {:.2}s",
                video.fps, video.duration_seconds
            ),
        }
    }
}

enum Probe {
    Image,
    Mp4,
    Avi,
}

fn probe_for(path: &Path) -> Option<Probe> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" | "jpg" | "jpeg" => Some(Probe::Image),
        "mp4" | "mov" => Some(Probe::Mp4),
        "avi" => Some(Probe::Avi),
        _ => None,
    }
}

/// Inspect a downloaded file.
///
/// Returns `Ok(None)` for extensions that are not inspected. Files that claim
/// a supported extension but cannot be parsed yield [`Error::Decode`].
pub fn inspect(path: &Path) -> Result<Option<MediaMetadata>> {
    let metadata = match probe_for(path) {
        None => return Ok(None),
        Some(Probe::Image) => {
            let (width, height) = image::image_dimensions(path)
                .map_err(|e| Error::Decode(format!("Failed to read image: {}", e)))?;
            MediaMetadata::Image(ImageMetadata { width, height })
        }
        Some(Probe::Mp4) => MediaMetadata::Video(VideoMetadata::from_probe(probe_mp4(path)?)?),
        Some(Probe::Avi) => MediaMetadata::Video(VideoMetadata::from_probe(probe_avi(path)?)?),
    };

    Ok(Some(metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::video::fixtures;

    #[test]
    fn test_inspect_png_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        image::RgbImage::new(7, 3)
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();

        let metadata = inspect(&path).unwrap();
        assert_eq!(
            metadata,
            Some(MediaMetadata::Image(ImageMetadata { width: 7, height: 3 }))
        );
        assert_eq!(metadata.unwrap().to_string(), "7x3px");
    }

    #[test]
    fn test_extension_dispatch_ignores_case() {
        assert!(matches!(probe_for(Path::new("A.JPEG")), Some(Probe::Image)));
        assert!(matches!(probe_for(Path::new("b.MoV")), Some(Probe::Mp4)));
        assert!(matches!(probe_for(Path::new("c.Avi")), Some(Probe::Avi)));
        assert!(probe_for(Path::new("d.gif")).is_none());
        assert!(probe_for(Path::new("noext")).is_none());
    }

    #[test]
    fn test_inspect_corrupt_image_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"<html>not an image</html>").unwrap();

        assert!(matches!(inspect(&path), Err(Error::Decode(_))));
    }

    #[test]
    fn test_inspect_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("story.webp");
        std::fs::write(&path, b"whatever").unwrap();

        assert_eq!(inspect(&path).unwrap(), None);
    }

    #[test]
    fn test_inspect_mp4_duration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reel.mp4");
        std::fs::write(&path, fixtures::mp4(600, 1200, 60)).unwrap();

        match inspect(&path).unwrap() {
            Some(MediaMetadata::Video(video)) => {
                assert!((video.fps - 30.0).abs() < 1e-9);
                assert!((video.duration_seconds - 2.0).abs() < 1e-9);
                assert_eq!(video.frame_count, 60);
            }
            other => panic!("unexpected metadata: {:?}", other),
        }
    }

    #[test]
    fn test_zero_fps_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("still.avi");
        std::fs::write(&path, fixtures::avi(0, 120)).unwrap();

        assert!(matches!(inspect(&path), Err(Error::Decode(_))));
    }

    #[test]
    fn test_video_display() {
        let metadata = MediaMetadata::Video(VideoMetadata {
            fps: 25.0,
            frame_count: 250,
            duration_seconds: 10.0,
        });
        assert_eq!(metadata.to_string(), "FPS: 25.00, Duration: 10.00s");
    }
}
