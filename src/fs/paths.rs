//! Path and directory management.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config::Config;
use crate::error::Result;
use crate::fs::naming::sanitize_path_component;

/// Name of the per-profile log directory.
const LOG_DIR_NAME: &str = "logs";

/// Get the media folder for a profile.
pub fn get_profile_folder(config: &Config, profile_name: &str) -> Result<PathBuf> {
    let base_dir = config.download_directory();
    let safe_name = sanitize_path_component(profile_name)?;

    Ok(base_dir.join(format!("{}{}", safe_name, config.options.folder_suffix)))
}

/// Get the log directory inside a profile folder.
pub fn get_log_dir(profile_folder: &Path) -> PathBuf {
    profile_folder.join(LOG_DIR_NAME)
}

/// Log filename for a profile on a given day, e.g. `someone_16-10-2026.log`.
pub fn log_filename(profile_name: &str, date: NaiveDate) -> String {
    format!("{}_{}.log", profile_name, date.format("%d-%m-%Y"))
}

/// Ensure a directory exists, creating it and its parents if necessary.
///
/// Safe to call repeatedly and from concurrent tasks.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_profile_folder() {
        let mut config = Config::default();
        config.options.download_directory = Some(PathBuf::from("/downloads"));

        let path = get_profile_folder(&config, "someone").unwrap();
        assert_eq!(path, PathBuf::from("/downloads/someone_media"));

        config.options.folder_suffix = String::new();
        let path = get_profile_folder(&config, "someone").unwrap();
        assert_eq!(path, PathBuf::from("/downloads/someone"));
    }

    #[test]
    fn test_log_filename() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(log_filename("someone", date), "someone_07-03-2026.log");
        assert_eq!(
            get_log_dir(Path::new("/m/someone_media")),
            PathBuf::from("/m/someone_media/logs")
        );
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a").join("b");

        ensure_dir(&target).unwrap();
        assert!(target.is_dir());
        ensure_dir(&target).unwrap();
        assert!(target.is_dir());
    }
}
