//! Tracing setup: console output plus an append-only per-profile log file.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::error::{Error, Result};

/// Log file writer that can be pointed at a new file while the subscriber
/// is installed. Writes are dropped while no file is open.
#[derive(Clone, Default)]
pub struct LogSink {
    file: Arc<Mutex<Option<File>>>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append all further records to `path`, creating it if needed.
    pub fn switch_to(&self, path: &Path) -> Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut current = self.file.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = current.as_mut() {
            previous.flush()?;
        }
        *current = Some(file);
        Ok(())
    }

    /// Stop writing to the current file.
    pub fn close(&self) -> Result<()> {
        let mut current = self.file.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(mut file) = current.take() {
            file.flush()?;
        }
        Ok(())
    }
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut current = self.file.lock().unwrap_or_else(|e| e.into_inner());
        match current.as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut current = self.file.lock().unwrap_or_else(|e| e.into_inner());
        match current.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Install the global subscriber.
///
/// The console shows errors only (everything from `debug` with `debug`
/// set, or whatever `RUST_LOG` asks for); the log file receives `info` and
/// above.
pub fn init_logging(debug: bool, sink: LogSink) -> Result<()> {
    let console_level = if debug { "debug" } else { "error" };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(console_level));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(io::stderr)
        .with_filter(console_filter);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(move || sink.clone())
        .with_filter(LevelFilter::INFO);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))
}
