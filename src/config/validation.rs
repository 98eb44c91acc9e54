//! Configuration validation logic.

use regex::Regex;

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Upper bound on simultaneous downloads.
const MAX_CONCURRENCY: usize = 64;

/// Profile names: 1-30 chars of letters, digits, periods and underscores.
const PROFILE_PATTERN: &str = r"^[A-Za-z0-9._]{1,30}$";

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_profiles(&config.targets.profiles)?;
    validate_concurrency(config.network.concurrency)?;

    if !config.options.download_posts && !config.options.download_highlights {
        return Err(Error::ConfigValidation {
            field: "options".to_string(),
            message: "Both posts and highlights are disabled, nothing to download".to_string(),
        });
    }

    Ok(())
}

/// Validate the concurrency cap.
pub fn validate_concurrency(concurrency: usize) -> Result<()> {
    if concurrency == 0 || concurrency > MAX_CONCURRENCY {
        return Err(Error::ConfigValidation {
            field: "concurrency".to_string(),
            message: format!(
                "Concurrency must be between 1 and {} (got {})",
                MAX_CONCURRENCY, concurrency
            ),
        });
    }

    Ok(())
}

/// Normalize a profile name: trim whitespace and a leading `@`.
pub fn normalize_profile(name: &str) -> String {
    name.trim().trim_start_matches('@').to_string()
}

/// Split a comma-separated profile list, dropping empty entries.
pub fn parse_profile_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(normalize_profile)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Validate profile names.
pub fn validate_profiles<S: AsRef<str>, I: IntoIterator<Item = S>>(profiles: I) -> Result<()> {
    let profiles: Vec<_> = profiles.into_iter().collect();

    if profiles.is_empty() {
        return Err(Error::MissingConfig(
            "profiles (at least one profile name required)".to_string(),
        ));
    }

    let pattern = Regex::new(PROFILE_PATTERN)
        .map_err(|e| Error::Config(format!("Invalid profile pattern: {}", e)))?;

    for profile in profiles {
        let profile = profile.as_ref();
        if !pattern.is_match(profile) {
            return Err(Error::ConfigValidation {
                field: "profiles".to_string(),
                message: format!(
                    "Profile '{}' is invalid. Use 1-30 letters, digits, periods or underscores.",
                    profile
                ),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_profiles() {
        assert!(validate_profiles(["nat.geo"]).is_ok());
        assert!(validate_profiles(["some_user_123", "x"]).is_ok());
    }

    #[test]
    fn test_invalid_profiles() {
        assert!(validate_profiles(Vec::<String>::new()).is_err());
        assert!(validate_profiles(["has space"]).is_err());
        assert!(validate_profiles(["dash-name"]).is_err());
        assert!(validate_profiles(["a".repeat(31)]).is_err());
    }

    #[test]
    fn test_parse_profile_list() {
        assert_eq!(
            parse_profile_list(" first, @second ,,third"),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn test_concurrency_bounds() {
        assert!(validate_concurrency(0).is_err());
        assert!(validate_concurrency(1).is_ok());
        assert!(validate_concurrency(64).is_ok());
        assert!(validate_concurrency(65).is_err());
    }

    #[test]
    fn test_validate_config_requires_something_to_download() {
        let mut config = Config::default();
        config.targets.profiles = vec!["someone".to_string()];
        assert!(validate_config(&config).is_ok());

        config.options.download_posts = false;
        config.options.download_highlights = false;
        assert!(validate_config(&config).is_err());
    }
}
