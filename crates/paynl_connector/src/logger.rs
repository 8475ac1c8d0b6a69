//!
//! Logging subsystem.
//!

use error_stack::ResultExt;
use serde::Deserialize;
pub use tracing::{debug, error, info, instrument, warn, Level};
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::errors::{ApplicationError, CustomResult};

/// Log config settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Level of the watched crates.
    pub level: LogLevel,
    /// Console output format.
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn into_level_filter(self) -> LevelFilter {
        match self {
            Self::Trace => LevelFilter::TRACE,
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warn => LevelFilter::WARN,
            Self::Error => LevelFilter::ERROR,
            Self::Off => LevelFilter::OFF,
        }
    }
}

/// Telemetry / logging output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Default pretty log format.
    #[default]
    Default,
    /// JSON based structured logging format.
    Json,
}

///
/// Installs the global subscriber.
/// Events of `crates_to_watch` are printed at the configured level, everything else at `WARN`.
/// `RUST_LOG` overrides both.
///
pub fn setup<Str: AsRef<str>>(
    conf: &Log,
    crates_to_watch: &[Str],
) -> CustomResult<(), ApplicationError> {
    let level = conf.level.into_level_filter();
    let console_filter = crates_to_watch.iter().fold(
        Targets::new().with_default(LevelFilter::WARN),
        |filter, watched| filter.with_target(watched.as_ref().to_owned(), level),
    );

    let subscriber = tracing_subscriber::registry().with(
        EnvFilter::builder()
            .with_default_directive(LevelFilter::TRACE.into())
            .from_env_lossy(),
    );

    let initialized = match conf.log_format {
        LogFormat::Default => subscriber
            .with(
                fmt::layer()
                    .with_span_events(FmtSpan::CLOSE)
                    .pretty()
                    .with_filter(console_filter),
            )
            .try_init(),
        LogFormat::Json => subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_filter(console_filter),
            )
            .try_init(),
    };

    initialized.change_context(ApplicationError::LoggerSetupFailed)
}
