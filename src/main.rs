//! Profile Media Downloader - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use profile_media_downloader::{
    cli::Args,
    config::{validate_config, Config},
    download::{download_profile, DownloadScheduler, Downloader, RunStats},
    error::{exit_codes, Error, Result},
    fs::ensure_dir,
    output::{
        init_logging, print_banner, print_config_summary, print_error, print_info,
        print_profile_stats, print_run_stats, print_warning, ConsoleReporter, LogSink,
        ProgressReporter,
    },
    source::ManifestSource,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(result) if result.cancelled => ExitCode::from(exit_codes::ABORT as u8),
        Ok(_) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Io(_) | Error::InvalidFilename(_) => {
                    ExitCode::from(exit_codes::FILESYSTEM_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

struct RunResult {
    cancelled: bool,
}

async fn run() -> Result<RunResult> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_sink = LogSink::new();
    init_logging(args.debug, log_sink.clone())?;

    print_banner();

    // Load configuration
    let mut config = match args.config_path() {
        Some(path) => Config::load_or_default(&path)?,
        None => {
            print_warning("No configuration directory available, using defaults");
            Config::default()
        }
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    validate_config(&config)?;

    let media_root = config.download_directory();
    print_config_summary(
        &config.targets.profiles,
        &media_root,
        config.network.concurrency,
        config.options.download_posts,
        config.options.download_highlights,
    );

    // Failing to create the media root is the one fatal filesystem error
    ensure_dir(&media_root)?;

    let reporter: Arc<dyn ProgressReporter> =
        Arc::new(ConsoleReporter::new(config.options.show_downloads));
    let client = Downloader::build_client(&config.network)?;
    let downloader = Arc::new(Downloader::new(client, Arc::clone(&reporter)));

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let scheduler = DownloadScheduler::new(
        downloader,
        reporter,
        config.network.concurrency,
        cancel.clone(),
    )
    .with_jitter(config.network.jitter());

    let source = ManifestSource::new(config.manifest_directory());
    let mut stats = RunStats::default();

    for profile in &config.targets.profiles {
        if cancel.is_cancelled() {
            print_warning("Interrupted, skipping remaining profiles");
            break;
        }

        print_info(&format!("Profile name set to: {}", profile));

        match download_profile(&source, &scheduler, &config, &log_sink, profile).await {
            Ok(report) => {
                print_profile_stats(&report);
                stats.add_profile(&report);
            }
            Err(e) => {
                tracing::error!("Error fetching profile {}: {}", profile, e);
                print_error(&format!("Failed to process {}: {}", profile, e));
                stats.mark_profile_failed();
            }
        }
    }

    print_run_stats(&stats);
    log_sink.close()?;

    Ok(RunResult {
        cancelled: cancel.is_cancelled(),
    })
}

/// Cancel the run on Ctrl-C; in-flight downloads are allowed to finish.
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            print_warning("Interrupt received, finishing in-flight downloads...");
            cancel.cancel();
        }
    });
}
