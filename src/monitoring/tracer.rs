/*!
 * Structured Tracing
 * Subscriber setup and command spans using the tracing crate
 */

use crate::core::limits::ENV_TRACE_JSON;
use std::time::Instant;
use tracing::{debug, span, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize structured tracing on stderr
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: `default_level`)
/// - KERNEL_TRACE_JSON: Enable JSON output (default: false)
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let use_json = std::env::var(ENV_TRACE_JSON)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        // JSON output for production/parsing
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true)
                    .with_current_span(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        // Human-readable output for development
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        debug!(json = use_json, "Structured tracing initialized");
    }
}

/// Span covering one shell command
pub struct CommandSpan {
    span: tracing::Span,
    start: Instant,
}

impl CommandSpan {
    pub fn new(line_number: usize, command: &str) -> Self {
        let span = span!(
            Level::DEBUG,
            "command",
            line = line_number,
            command = command,
            duration_us = tracing::field::Empty,
            result = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
        }
    }

    /// Enter the span for the lifetime of the guard
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }

    /// Mark the command as successful
    pub fn success(&self) {
        self.finish("ok", None);
    }

    /// Mark the command as failed
    pub fn error(&self, error: &str) {
        self.finish("error", Some(error));
    }

    fn finish(&self, result: &str, error: Option<&str>) {
        self.span
            .record("duration_us", self.start.elapsed().as_micros() as u64);
        self.span.record("result", result);
        if let Some(error) = error {
            self.span.record("error", error);
        }
    }
}

/// Helper to create a command span
#[inline]
pub fn span_command(line_number: usize, command: &str) -> CommandSpan {
    CommandSpan::new(line_number, command)
}
