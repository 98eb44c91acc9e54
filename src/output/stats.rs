//! Statistics reporting.

use console::style;

use crate::download::{ProfileReport, RunStats};

/// Print statistics for a single profile.
pub fn print_profile_stats(report: &ProfileReport) {
    println!();
    println!(
        "{}",
        style(format!("Statistics for {}:", report.profile)).bold()
    );
    for (group, summary) in &report.groups {
        println!(
            "  {:<24} {} downloaded, {} failed",
            group, summary.succeeded, summary.failed
        );
    }
    for (group, reason) in &report.enumeration_failures {
        println!("  {:<24} {}", group, style(format!("not listed: {}", reason)).red());
    }
    println!("  Total:    {} downloaded", report.succeeded());
    if report.failed() > 0 {
        println!("  Failed:   {}", style(report.failed()).red());
    }
}

/// Print statistics across all profiles.
pub fn print_run_stats(stats: &RunStats) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Run Statistics:").bold());
    println!("  Profiles processed: {}", stats.profiles_processed);
    if stats.profiles_failed > 0 {
        println!("  Profiles failed:    {}", style(stats.profiles_failed).red());
    }
    println!("  Submitted: {}", stats.submitted);
    println!("  Succeeded: {}", style(stats.succeeded).green());
    println!("  Failed:    {}", style(stats.failed).red());
    if stats.enumeration_failures > 0 {
        println!("  Unlisted groups: {}", stats.enumeration_failures);
    }
    println!("{}", style("═".repeat(50)).dim());
}
