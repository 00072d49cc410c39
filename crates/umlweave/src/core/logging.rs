//! Tracing setup for the extraction pipeline
//!
//! Every stage logs through `tracing`: the matcher at `trace` (each pattern
//! attempt and phrase scan), bindings and assembler counters at `debug`,
//! stage boundaries at `info`, and skipped sentences, duplicate associations
//! and unreadable ground truth at `warn`.
//!
//! Events are written to stderr. Commands print fragments, models and
//! reports on stdout, and those stay parseable whatever the log level.
//!
//! Level and format come from the arguments first, then the environment
//! (`UMLWEAVE_LOG_LEVEL` or `RUST_LOG`, and `UMLWEAVE_LOG_FORMAT`), then
//! `info` and `compact`. A level may be any `EnvFilter` directive:
//!
//! ```bash
//! RUST_LOG="info,umlweave::extraction::matcher=trace" umlweave extract --sentence "The Car is a class."
//! ```

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::{
    fmt::{format::FmtSpan, layer},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One line per event, no targets or spans
    Compact,
    /// Multi-line, with targets, source locations and span activity
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        };
        f.write_str(name)
    }
}

impl LogFormat {
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Level directive and format after arguments, environment and defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
}

impl LogSettings {
    pub fn resolve(level: Option<&str>, format: Option<&str>) -> Result<Self, String> {
        let level = level
            .map(str::to_string)
            .or_else(|| std::env::var("UMLWEAVE_LOG_LEVEL").ok())
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "info".to_string());

        let format = format
            .map(str::to_string)
            .or_else(|| std::env::var("UMLWEAVE_LOG_FORMAT").ok())
            .unwrap_or_else(|| "compact".to_string());
        let format = format
            .parse()
            .map_err(|e| format!("Invalid log format: {}", e))?;

        Ok(Self { level, format })
    }

    /// The filter for this level; an unparsable directive falls back to `info`
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Install the global subscriber
///
/// Fails on an unknown format, or when a subscriber is already installed.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = LogSettings::resolve(level, format)?;

    let output = match settings.format {
        LogFormat::Compact => layer()
            .with_writer(std::io::stderr)
            .compact()
            .with_target(false)
            .with_span_events(FmtSpan::NONE)
            .boxed(),
        LogFormat::Pretty => layer()
            .with_writer(std::io::stderr)
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::ACTIVE)
            .boxed(),
        LogFormat::Json => layer()
            .with_writer(std::io::stderr)
            .json()
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::ACTIVE)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(settings.filter())
        .with(output)
        .try_init()?;
    Ok(())
}

pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}
