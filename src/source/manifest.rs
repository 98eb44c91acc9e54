//! Profile source backed by JSON manifest files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::source::types::ProfileManifest;
use crate::source::{MediaGroup, ProfileSource};

/// Title of the posts group.
pub const POSTS_GROUP: &str = "posts";

/// Reads `<dir>/<profile>.json` manifests written by an external enumerator.
pub struct ManifestSource {
    dir: PathBuf,
}

impl ManifestSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn manifest_path(&self, profile: &str) -> PathBuf {
        self.dir.join(format!("{}.json", profile))
    }

    async fn load(&self, profile: &str) -> Result<ProfileManifest> {
        let path = self.manifest_path(profile);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| enumeration_error(&path, e))?;
        serde_json::from_str(&content).map_err(|e| enumeration_error(&path, e))
    }
}

fn enumeration_error(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::Enumeration(format!("{}: {}", path.display(), err))
}

#[async_trait]
impl ProfileSource for ManifestSource {
    async fn posts(&self, profile: &str) -> Result<MediaGroup> {
        let manifest = self.load(profile).await?;
        let mut items = Vec::new();

        for (index, post) in manifest.posts.iter().enumerate() {
            match post.media() {
                Some(media) if !media.is_empty() => items.extend(media),
                Some(_) => tracing::warn!("Post {} of {} has no media URL", index, profile),
                None => tracing::warn!(
                    "Skipping post {} of {}: unknown type {}",
                    index,
                    profile,
                    post.typename
                ),
            }
        }

        Ok(MediaGroup::new(POSTS_GROUP, items))
    }

    async fn highlights(&self, profile: &str) -> Result<Vec<MediaGroup>> {
        let manifest = self.load(profile).await?;

        if let Some(reason) = manifest.highlights_error {
            return Err(Error::Enumeration(reason));
        }

        Ok(manifest
            .highlights
            .unwrap_or_default()
            .into_iter()
            .map(|highlight| {
                let items = highlight.items.iter().filter_map(|item| item.media()).collect();
                MediaGroup::new(highlight.title, items)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RemoteMedia;

    const MANIFEST: &str = r#"{
        "posts": [
            {"typename": "GraphImage", "url": "https://cdn/p/1.jpg"},
            {"typename": "GraphVideo", "video_url": "https://cdn/p/2.mp4", "url": "https://cdn/p/2.jpg"},
            {"typename": "GraphSidecar", "sidecar": [
                {"is_video": false, "display_url": "https://cdn/p/3a.jpg"},
                {"is_video": true, "video_url": "https://cdn/p/3b.mp4", "display_url": "https://cdn/p/3b.jpg"}
            ]},
            {"typename": "GraphReel", "url": "https://cdn/p/4.jpg"},
            {"typename": "GraphImage"}
        ],
        "highlights": [
            {"title": "Trips", "items": [
                {"is_video": false, "url": "https://cdn/h/1.jpg"},
                {"is_video": true, "video_url": "https://cdn/h/2.mp4", "url": "https://cdn/h/2.jpg"}
            ]},
            {"title": "Empty"}
        ]
    }"#;

    fn write_manifest(dir: &Path, profile: &str, content: &str) {
        std::fs::write(dir.join(format!("{}.json", profile)), content).unwrap();
    }

    #[test]
    fn test_posts_flatten_sidecars() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), "someone", MANIFEST);
        let source = ManifestSource::new(dir.path());

        let posts = tokio_test::block_on(source.posts("someone")).unwrap();
        assert_eq!(posts.title, POSTS_GROUP);
        assert_eq!(
            posts.items,
            vec![
                RemoteMedia::image("https://cdn/p/1.jpg"),
                RemoteMedia::video("https://cdn/p/2.mp4"),
                RemoteMedia::image("https://cdn/p/3a.jpg"),
                RemoteMedia::video("https://cdn/p/3b.mp4"),
            ]
        );
    }

    #[test]
    fn test_highlights() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), "someone", MANIFEST);
        let source = ManifestSource::new(dir.path());

        let highlights = tokio_test::block_on(source.highlights("someone")).unwrap();
        assert_eq!(highlights.len(), 2);
        assert_eq!(highlights[0].title, "Trips");
        assert_eq!(
            highlights[0].items,
            vec![
                RemoteMedia::image("https://cdn/h/1.jpg"),
                RemoteMedia::video("https://cdn/h/2.mp4"),
            ]
        );
        assert!(highlights[1].is_empty());
    }

    #[test]
    fn test_highlights_error_is_enumeration_failure() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(
            dir.path(),
            "private",
            r#"{"posts": [], "highlights_error": "Login required"}"#,
        );
        let source = ManifestSource::new(dir.path());

        let result = tokio_test::block_on(source.highlights("private"));
        assert!(matches!(result, Err(Error::Enumeration(_))));
        let posts = tokio_test::block_on(source.posts("private")).unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_missing_or_broken_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), "broken", "{ not json");
        let source = ManifestSource::new(dir.path());

        assert!(matches!(
            tokio_test::block_on(source.posts("absent")),
            Err(Error::Enumeration(_))
        ));
        assert!(matches!(
            tokio_test::block_on(source.posts("broken")),
            Err(Error::Enumeration(_))
        ));
    }
}
