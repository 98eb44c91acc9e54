//! Filename derivation and validation.

use url::Url;

use crate::error::{Error, Result};

/// Derive the local filename for a media URL.
///
/// The name is the final path segment with any query string or fragment
/// removed. URLs differing only in their query map to the same name, so the
/// later download overwrites the earlier one.
pub fn derive_filename(source_url: &str) -> Result<String> {
    let segment = match Url::parse(source_url) {
        Ok(url) => url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string(),
        Err(_) => {
            let without_query = source_url.split(['?', '#']).next().unwrap_or_default();
            without_query
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string()
        }
    };

    sanitize_filename(&segment)
}

/// Validate and sanitize a filename by removing or replacing invalid characters.
///
/// Returns an error if the filename contains path traversal patterns.
pub fn sanitize_filename(name: &str) -> Result<String> {
    // Reject path traversal attempts
    if name == "." || name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Sanitize a path component (folder name) with less strict validation.
///
/// Used for profile names, where we want to replace rather than reject
/// separator characters.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Path component cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Name of the in-progress file a download streams into before it is
/// renamed onto `filename`.
pub fn partial_filename(filename: &str) -> String {
    format!(".{}.{}.part", filename, uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_filename_strips_query() {
        assert_eq!(
            derive_filename("https://x/a/video.mp4?sig=abc").unwrap(),
            "video.mp4"
        );
        assert_eq!(
            derive_filename("https://cdn.example.com/v/t51/12345_n.jpg?stp=dst&_nc_ht=x#frag")
                .unwrap(),
            "12345_n.jpg"
        );
    }

    #[test]
    fn test_derive_filename_is_pure() {
        let url = "https://x/a/b/c/photo.png?one=1";
        assert_eq!(derive_filename(url).unwrap(), derive_filename(url).unwrap());
        // Query-only variants collide
        assert_eq!(
            derive_filename("https://x/a/photo.png?v=1").unwrap(),
            derive_filename("https://x/a/photo.png?v=2").unwrap()
        );
    }

    #[test]
    fn test_derive_filename_without_scheme() {
        assert_eq!(derive_filename("x/a/clip.mov?t=1").unwrap(), "clip.mov");
    }

    #[test]
    fn test_derive_filename_rejects_directory_urls() {
        assert!(derive_filename("https://x/a/").is_err());
        assert!(derive_filename("https://x").is_err());
    }

    #[test]
    fn test_sanitize_filename() {
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename("a/b").is_err());
        assert_eq!(sanitize_filename("a:b.jpg").unwrap(), "a_b.jpg");
    }

    #[test]
    fn test_sanitize_path_component() {
        assert_eq!(sanitize_path_component("some/user").unwrap(), "some_user");
        assert!(sanitize_path_component("..").is_err());
        assert!(sanitize_path_component("  ").is_err());
    }

    #[test]
    fn test_partial_filename_is_hidden_and_unique() {
        let a = partial_filename("photo.jpg");
        let b = partial_filename("photo.jpg");
        assert!(a.starts_with(".photo.jpg."));
        assert!(a.ends_with(".part"));
        assert_ne!(a, b);
    }
}
