//! Structured logging on stderr.
//!
//! stdout carries the JSON-RPC stream, so every log line goes to stderr.
//!
//! - `LOG_LEVEL`: ERROR, WARN, INFO, DEBUG, TRACE (default INFO)
//! - `LOG_FORMAT`: json, pretty, compact (default compact)
//! - `RUST_LOG`: overrides the filter entirely

use std::env;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

fn build_filter(level: Level) -> EnvFilter {
    if let Ok(rust_log) = env::var("RUST_LOG")
        && let Ok(filter) = EnvFilter::try_new(rust_log)
    {
        return filter;
    }
    let level = level.as_str().to_ascii_lowercase();
    EnvFilter::new(format!("{level},hyper=warn,hyper_util=warn,reqwest=warn"))
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(level: Level, format: LogFormat) {
    let registry = tracing_subscriber::registry().with(build_filter(level));
    let result = match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_ansi(false).with_writer(std::io::stderr))
            .try_init(),
    };
    if result.is_err() {
        tracing::debug!("Global tracing subscriber already installed");
    }
}

pub fn init_from_env() {
    let level = env::var("LOG_LEVEL")
        .ok()
        .and_then(|s| Level::from_str(&s).ok())
        .unwrap_or(Level::INFO);
    let format = env::var("LOG_FORMAT")
        .map(|s| LogFormat::parse(&s))
        .unwrap_or(LogFormat::Compact);
    init_logging(level, format);
}
