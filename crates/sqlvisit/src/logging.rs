//! Logging configuration for SQLVisit
//!
//! The traversal engine emits `tracing` events (subquery entered, subquery
//! skipped for lack of a select visitor). This module installs a subscriber
//! for them: level filter, stdout and/or daily rolling file output, pretty or
//! compact formatting.

use std::path::{Path, PathBuf};
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Error returned when the subscriber cannot be installed.
pub type LogInitError = Box<dyn std::error::Error + Send + Sync>;

const TRAVERSAL_TARGET: &str = "sqlvisit_core::visitor";
const DEFAULT_FILE_NAME: &str = "sqlvisit.log";

/// Log output destination
#[derive(Debug, Clone)]
pub enum LogOutput {
    /// Output to stdout
    Stdout,
    /// Output to a file with daily rotation
    File(PathBuf),
    /// Output to both stdout and file, same format on each
    Both(PathBuf),
}

/// Log format style
#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    /// Human-readable multi-line format (default)
    Pretty,
    /// Compact single-line format
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level filter, in `EnvFilter` syntax
    pub level: String,
    /// Output destination
    pub output: LogOutput,
    /// Format style
    pub format: LogFormat,
    /// Log every subquery the traversal enters at TRACE level
    pub trace_traversal: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output: LogOutput::Stdout,
            format: LogFormat::Pretty,
            trace_traversal: false,
        }
    }
}

impl LogConfig {
    /// Create config with info level and stdout output
    pub fn info() -> Self {
        Self::default()
    }

    /// Create config with debug level; reports skipped subqueries
    pub fn debug() -> Self {
        Self {
            level: "debug".to_string(),
            ..Default::default()
        }
    }

    /// Create config with warn level
    pub fn warn() -> Self {
        Self {
            level: "warn".to_string(),
            ..Default::default()
        }
    }

    /// Set log output to file with rotation
    pub fn with_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = LogOutput::File(path.into());
        self
    }

    /// Set log output to both stdout and file
    pub fn with_both<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = LogOutput::Both(path.into());
        self
    }

    /// Set log format, applied to every output
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set log level filter
    pub fn with_level<S: Into<String>>(mut self, level: S) -> Self {
        self.level = level.into();
        self
    }

    /// Enable or disable TRACE output for the traversal engine only
    pub fn with_traversal_tracing(mut self, enabled: bool) -> Self {
        self.trace_traversal = enabled;
        self
    }

    /// Filter directives this configuration installs.
    ///
    /// `RUST_LOG`, when set, replaces them entirely.
    pub fn directives(&self) -> String {
        if self.trace_traversal {
            format!("{},{}=trace", self.level, TRAVERSAL_TARGET)
        } else {
            self.level.clone()
        }
    }

    /// Initialize global logging with this configuration
    ///
    /// Returns a guard that must be kept alive while logging to a file.
    /// When the guard is dropped, buffered lines are flushed and the writer
    /// thread stops.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use sqlvisit::logging::LogConfig;
    ///
    /// let _guard = LogConfig::debug().init().expect("subscriber already set");
    /// ```
    pub fn init(self) -> Result<Option<WorkerGuard>, LogInitError> {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(self.directives())?,
        };

        let registry = tracing_subscriber::registry().with(env_filter);
        match self.output {
            LogOutput::Stdout => {
                registry
                    .with(format_layer(self.format, std::io::stdout, true))
                    .try_init()?;
                Ok(None)
            }
            LogOutput::File(path) => {
                let (writer, guard) = rolling_writer(&path);
                registry
                    .with(format_layer(self.format, writer, false))
                    .try_init()?;
                Ok(Some(guard))
            }
            LogOutput::Both(path) => {
                let (writer, guard) = rolling_writer(&path);
                registry
                    .with(format_layer(self.format, std::io::stdout, true))
                    .with(format_layer(self.format, writer, false))
                    .try_init()?;
                Ok(Some(guard))
            }
        }
    }
}

// Boxed so pretty and compact layers share one type.
fn format_layer<S, W>(
    format: LogFormat,
    writer: W,
    ansi: bool,
) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'span> LookupSpan<'span> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_writer(writer).with_ansi(ansi);
    match format {
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    }
}

fn rolling_writer(path: &Path) -> (NonBlocking, WorkerGuard) {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(DEFAULT_FILE_NAME);
    tracing_appender::non_blocking(tracing_appender::rolling::daily(directory, file_name))
}
