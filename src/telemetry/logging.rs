//! Subscriber construction for the configured log format.

use crate::error::{Error, Result};
use crate::telemetry::config::{LogFormat, LogLevel, LoggingConfig};
use tracing::Subscriber;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Builder for the global logging subscriber.
#[derive(Debug, Clone, Default)]
pub struct LoggingBuilder {
    config: LoggingConfig,
}

impl LoggingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: LoggingConfig) -> Self {
        Self { config }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn with_target(mut self, enabled: bool) -> Self {
        self.config.with_target = enabled;
        self
    }

    pub fn with_file(mut self, enabled: bool) -> Self {
        self.config.with_file = enabled;
        self
    }

    /// Drop configured filter directives, keeping only the level.
    pub fn without_filter(mut self) -> Self {
        self.config.filter = None;
        self
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Install the subscriber globally.
    ///
    /// Fails when a global subscriber is already set.
    pub fn init(self) -> Result<()> {
        let filter = self.build_filter();
        tracing_subscriber::registry()
            .with(self.build_layer())
            .with(filter)
            .try_init()
            .map_err(|e| Error::Config(format!("cannot install logger: {}", e)))
    }

    /// Filter from `RUST_LOG`, then the configured directives, then the level.
    pub fn build_filter(&self) -> EnvFilter {
        let level = self.config.level.as_str();
        EnvFilter::try_from_default_env()
            .or_else(|_| match &self.config.filter {
                Some(filter) => EnvFilter::try_new(filter),
                None => EnvFilter::try_new(level),
            })
            .unwrap_or_else(|_| EnvFilter::new(level))
    }

    /// Formatting layer writing to stderr.
    pub fn build_layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync + 'static>
    where
        S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync,
    {
        let config = &self.config;
        let spans = if config.with_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.with_target)
            .with_file(config.with_file)
            .with_line_number(config.with_file);

        match config.format {
            LogFormat::Pretty => layer
                .pretty()
                .with_ansi(config.ansi_colors)
                .with_span_events(spans)
                .boxed(),
            LogFormat::Compact => layer
                .compact()
                .with_ansi(config.ansi_colors)
                .with_span_events(spans)
                .boxed(),
            LogFormat::Json => layer
                .json()
                .with_ansi(false)
                .with_current_span(config.with_spans)
                .with_span_list(config.with_spans)
                .with_span_events(spans)
                .boxed(),
            LogFormat::Full => layer
                .with_ansi(config.ansi_colors)
                .with_span_events(FmtSpan::FULL)
                .boxed(),
        }
    }
}

/// Install a compact logger for a `-v` count, keeping the configured format.
pub fn init_from_verbosity(verbosity: u8, base: &LoggingConfig) -> Result<()> {
    let mut builder = LoggingBuilder::from_config(base.clone())
        .with_file(base.with_file || verbosity >= 3)
        .with_target(base.with_target || verbosity >= 2);
    if verbosity > 0 {
        // explicit -v wins over file directives
        builder = builder
            .with_level(LogLevel::from_verbosity(verbosity))
            .without_filter();
    }
    builder.init()
}
