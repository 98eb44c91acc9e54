//! Manifest file type definitions.

use serde::Deserialize;

use crate::source::RemoteMedia;

/// Enumeration output for one profile.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileManifest {
    #[serde(default)]
    pub posts: Vec<PostEntry>,
    #[serde(default)]
    pub highlights: Option<Vec<HighlightEntry>>,
    /// Set when the enumerator could not list highlights (e.g. login required).
    #[serde(default)]
    pub highlights_error: Option<String>,
}

/// A post, typed the way the platform reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct PostEntry {
    pub typename: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub sidecar: Vec<SidecarNode>,
}

/// One slide of a multi-media post.
#[derive(Debug, Clone, Deserialize)]
pub struct SidecarNode {
    #[serde(default)]
    pub is_video: bool,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub display_url: Option<String>,
}

/// A highlight collection.
#[derive(Debug, Clone, Deserialize)]
pub struct HighlightEntry {
    pub title: String,
    #[serde(default)]
    pub items: Vec<StoryItem>,
}

/// One story inside a highlight.
#[derive(Debug, Clone, Deserialize)]
pub struct StoryItem {
    #[serde(default)]
    pub is_video: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

fn pick(url: &Option<String>, is_video: bool) -> Option<RemoteMedia> {
    url.as_ref().map(|url| {
        if is_video {
            RemoteMedia::video(url.clone())
        } else {
            RemoteMedia::image(url.clone())
        }
    })
}

impl PostEntry {
    /// Media of this post. `None` when the post type is not recognised.
    pub fn media(&self) -> Option<Vec<RemoteMedia>> {
        match self.typename.as_str() {
            "GraphImage" => Some(pick(&self.url, false).into_iter().collect()),
            "GraphVideo" => Some(pick(&self.video_url, true).into_iter().collect()),
            "GraphSidecar" => Some(self.sidecar.iter().filter_map(SidecarNode::media).collect()),
            _ => None,
        }
    }
}

impl SidecarNode {
    pub fn media(&self) -> Option<RemoteMedia> {
        if self.is_video {
            pick(&self.video_url, true)
        } else {
            pick(&self.display_url, false)
        }
    }
}

impl StoryItem {
    pub fn media(&self) -> Option<RemoteMedia> {
        if self.is_video {
            pick(&self.video_url, true)
        } else {
            pick(&self.url, false)
        }
    }
}
