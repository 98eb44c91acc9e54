//! Profile download logic: posts first, then each highlight.

use std::path::Path;
use std::time::Duration;

use crate::config::Config;
use crate::download::scheduler::DownloadScheduler;
use crate::download::state::ProfileReport;
use crate::error::Result;
use crate::fs::paths::{ensure_dir, get_log_dir, get_profile_folder, log_filename};
use crate::media::MediaReference;
use crate::output::console::{print_info, print_warning};
use crate::output::logging::LogSink;
use crate::source::manifest::POSTS_GROUP;
use crate::source::{MediaGroup, ProfileSource};

/// Label under which highlight listing failures are reported.
const HIGHLIGHTS_LABEL: &str = "highlights";

/// Download every enabled group of a profile.
///
/// Errors are returned only when the profile folder cannot be prepared.
/// A group that cannot be listed is reported and skipped.
pub async fn download_profile(
    source: &dyn ProfileSource,
    scheduler: &DownloadScheduler,
    config: &Config,
    log_sink: &LogSink,
    profile: &str,
) -> Result<ProfileReport> {
    let media_dir = get_profile_folder(config, profile)?;
    let log_dir = get_log_dir(&media_dir);
    ensure_dir(&media_dir)?;
    ensure_dir(&log_dir)?;

    let today = chrono::Local::now().date_naive();
    if let Err(e) = log_sink.switch_to(&log_dir.join(log_filename(profile, today))) {
        print_warning(&format!("Cannot open log file for {}: {}", profile, e));
    }

    let mut report = ProfileReport::new(profile);
    tracing::info!("Downloading profile {} into {}", profile, media_dir.display());

    let posts = if config.options.download_posts {
        match source.posts(profile).await {
            Ok(posts) => Some(posts),
            Err(e) => {
                tracing::error!("Error fetching posts of {}: {}", profile, e);
                print_warning(&format!("Error fetching posts: {}", e));
                report.add_enumeration_failure(POSTS_GROUP, e.to_string());
                None
            }
        }
    } else {
        None
    };

    let highlights = if config.options.download_highlights {
        match source.highlights(profile).await {
            Ok(highlights) => highlights,
            Err(e) => {
                tracing::error!("Error fetching highlights of {}: {}", profile, e);
                print_warning(&format!("Error fetching highlights: {}", e));
                report.add_enumeration_failure(HIGHLIGHTS_LABEL, e.to_string());
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    let total_posts = posts.as_ref().map(MediaGroup::len).unwrap_or(0);
    tracing::info!("Total post items: {}", total_posts);
    tracing::info!("Total highlights: {}", highlights.len());
    print_info(&format!("Total post items: {}", total_posts));
    print_info(&format!("Total highlights: {}", highlights.len()));

    if let Some(posts) = posts {
        run_group(
            scheduler,
            &mut report,
            posts,
            &media_dir,
            config.network.post_interval(),
        )
        .await;
    }

    for highlight in highlights {
        if scheduler.is_cancelled() {
            report.cancelled = true;
            break;
        }
        run_group(
            scheduler,
            &mut report,
            MediaGroup {
                title: format!("highlight {}", highlight.title),
                items: highlight.items,
            },
            &media_dir,
            config.network.highlight_interval(),
        )
        .await;
    }

    Ok(report)
}

async fn run_group(
    scheduler: &DownloadScheduler,
    report: &mut ProfileReport,
    group: MediaGroup,
    media_dir: &Path,
    interval: Duration,
) {
    let references = group
        .items
        .into_iter()
        .map(|item| MediaReference::new(item.url, media_dir, item.kind))
        .collect();

    let summary = scheduler.run_batch(&group.title, references, interval).await;
    report.add_group(group.title, summary);
}
