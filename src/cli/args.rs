//! Command-line argument definitions using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{parse_profile_list, Config};

/// Profile media downloader CLI.
#[derive(Parser, Debug, Default)]
#[command(
    name = "profile-media-downloader",
    version,
    about = "Download posts and story highlights media of social profiles",
    long_about = "Downloads every image and video of one or more profiles into \
                  <media-root>/<profile>_media, four at a time by default.\n\n\
                  Profile contents are read from <profile>.json manifests written \
                  by an external enumerator."
)]
pub struct Args {
    /// Profile names, separated by commas.
    pub profiles: Option<String>,

    /// Base directory for media output.
    #[arg(short = 'd', long = "media-root", env = "PROFILE_MEDIA_ROOT")]
    pub media_root: Option<PathBuf>,

    /// Directory holding <profile>.json manifests (defaults to the media root).
    #[arg(short = 'm', long = "manifests")]
    pub manifest_directory: Option<PathBuf>,

    /// Do not download highlights.
    #[arg(long)]
    pub no_highlights: bool,

    /// Do not download posts.
    #[arg(long)]
    pub no_posts: bool,

    /// Maximum number of simultaneous downloads.
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Minimum milliseconds between two submitted downloads.
    #[arg(long = "interval-ms")]
    pub interval_ms: Option<u64>,

    /// Per-request timeout in seconds.
    #[arg(long = "timeout")]
    pub timeout_secs: Option<u64>,

    /// Path to configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only print failures and summaries.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging on the console.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Configuration file to read: `--config`, else the per-user default.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Config::default_path)
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(profiles) = self.profiles {
            config.targets.profiles = parse_profile_list(&profiles);
        } else {
            config.targets.profiles = config
                .targets
                .profiles
                .iter()
                .flat_map(|p| parse_profile_list(p))
                .collect();
        }

        if let Some(dir) = self.media_root {
            config.options.download_directory = Some(dir);
        }

        if let Some(dir) = self.manifest_directory {
            config.options.manifest_directory = Some(dir);
        }

        // Boolean flags (only override if set to non-default)
        if self.no_highlights {
            config.options.download_highlights = false;
        }

        if self.no_posts {
            config.options.download_posts = false;
        }

        if self.quiet {
            config.options.show_downloads = false;
        }

        if let Some(concurrency) = self.concurrency {
            config.network.concurrency = concurrency;
        }

        if let Some(interval) = self.interval_ms {
            config.network.post_interval_ms = interval;
            config.network.highlight_interval_ms = interval;
        }

        if let Some(timeout) = self.timeout_secs {
            config.network.request_timeout_secs = Some(timeout);
        }
    }
}
