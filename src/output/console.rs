//! Console output utilities.

use std::path::Path;

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Profile Media Downloader                          ║
║     Posts and highlights, straight to disk            ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(
    profiles: &[String],
    media_root: &Path,
    concurrency: usize,
    posts: bool,
    highlights: bool,
) {
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };

    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Profiles:    {}", profiles.join(", "));
    println!("  Directory:   {}", media_root.display());
    println!("  Concurrency: {}", concurrency);
    println!("  Posts:       {}", yes_no(posts));
    println!("  Highlights:  {}", yes_no(highlights));
    println!();
}
