//! Profile enumeration.
//!
//! A [`ProfileSource`] lists the media of a profile as groups: all posts,
//! then one group per highlight collection. The download pipeline only sees
//! the URLs it produces.

pub mod manifest;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use crate::media::MediaKind;

pub use manifest::ManifestSource;

/// A directly fetchable media URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMedia {
    pub url: String,
    pub kind: MediaKind,
}

impl RemoteMedia {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: MediaKind::Image,
        }
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: MediaKind::Video,
        }
    }
}

/// A titled list of media, downloaded as one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaGroup {
    pub title: String,
    pub items: Vec<RemoteMedia>,
}

impl MediaGroup {
    pub fn new(title: impl Into<String>, items: Vec<RemoteMedia>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Lists the media of a profile.
///
/// Credentials, if an implementation needs them, belong to its constructor.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// All post media of the profile, sidecars flattened.
    async fn posts(&self, profile: &str) -> Result<MediaGroup>;

    /// One group per highlight collection.
    async fn highlights(&self, profile: &str) -> Result<Vec<MediaGroup>>;
}
