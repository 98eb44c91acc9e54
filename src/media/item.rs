//! Media reference representation.

use std::fmt;
use std::path::{Path, PathBuf};

use mime_guess::mime;

/// Kind of media asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaKind {
    Image,
    Video,
    #[default]
    Unknown,
}

impl MediaKind {
    /// Infer the kind from a filename or path extension.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match mime_guess::from_path(path).first() {
            Some(m) if m.type_() == mime::IMAGE => MediaKind::Image,
            Some(m) if m.type_() == mime::VIDEO => MediaKind::Video,
            _ => MediaKind::Unknown,
        }
    }

    /// Label used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Unknown => "media",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One unit of download work: a directly fetchable URL and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaReference {
    source_url: String,
    destination_dir: PathBuf,
    expected_kind: MediaKind,
}

impl MediaReference {
    pub fn new(
        source_url: impl Into<String>,
        destination_dir: impl Into<PathBuf>,
        expected_kind: MediaKind,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            destination_dir: destination_dir.into(),
            expected_kind,
        }
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn destination_dir(&self) -> &Path {
        &self.destination_dir
    }

    /// Kind hint given by the enumeration side. The resolved kind comes from
    /// the downloaded filename.
    pub fn expected_kind(&self) -> MediaKind {
        self.expected_kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(MediaKind::from_path("a/b/photo.JPG"), MediaKind::Image);
        assert_eq!(MediaKind::from_path("clip.mp4"), MediaKind::Video);
        assert_eq!(MediaKind::from_path("clip.mov"), MediaKind::Video);
        assert_eq!(MediaKind::from_path("notes.txt"), MediaKind::Unknown);
        assert_eq!(MediaKind::from_path("no_extension"), MediaKind::Unknown);
    }

    #[test]
    fn test_reference_accessors() {
        let reference = MediaReference::new("https://cdn/x.jpg", "/tmp/out", MediaKind::Image);
        assert_eq!(reference.source_url(), "https://cdn/x.jpg");
        assert_eq!(reference.destination_dir(), Path::new("/tmp/out"));
        assert_eq!(reference.expected_kind(), MediaKind::Image);
    }
}
