//! Output module for console output, logging and progress.
//!
//! Provides:
//! - Colored console output
//! - Progress bars and the progress reporter
//! - Log file setup
//! - Statistics reporting

pub mod console;
pub mod format;
pub mod logging;
pub mod progress;
pub mod reporter;
pub mod stats;

pub use console::{
    print_banner, print_config_summary, print_error, print_info, print_success, print_warning,
};
pub use format::format_size;
pub use logging::{init_logging, LogSink};
pub use progress::create_item_bar;
pub use reporter::{ConsoleReporter, ProgressReporter};
pub use stats::{print_profile_stats, print_run_stats};
