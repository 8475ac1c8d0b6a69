//!
//! Settings of the connector, read from `config/<env>.toml` and `PAYNL__` environment variables.
//!

use std::path::PathBuf;

use config::{Config, Environment, File};
use error_stack::{report, ResultExt};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
    errors::{ApplicationError, CustomResult},
    logger::Log,
};

/// Parent dir where Cargo.toml is stored
pub const CARGO_MANIFEST_DIR: &str = "CARGO_MANIFEST_DIR";
/// Env variable that sets Development/Sandbox/Production env
pub const RUN_ENV: &str = "RUN_ENV";
/// Prefix of environment variables overriding file settings.
pub const ENV_PREFIX: &str = "PAYNL";
/// Separator between nested keys in environment variables.
pub const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Env {
    #[default]
    Development,
    Sandbox,
    Production,
}

impl Env {
    /// Current environment, taken from `RUN_ENV`.
    pub fn which() -> Self {
        #[cfg(debug_assertions)]
        let default_env = Self::Development;
        #[cfg(not(debug_assertions))]
        let default_env = Self::Production;

        std::env::var(RUN_ENV).map_or(default_env, |env| env.parse().unwrap_or(default_env))
    }

    fn config_file_name(self) -> &'static str {
        match self {
            Self::Development => "development.toml",
            Self::Sandbox => "sandbox.toml",
            Self::Production => "production.toml",
        }
    }
}

/// Workspace root, where the `config/` directory lives regardless of which crate is run.
pub fn workspace_path() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var(CARGO_MANIFEST_DIR) {
        let mut path = PathBuf::from(manifest_dir);
        path.pop();
        path.pop();
        path
    } else {
        PathBuf::from(".")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub connector: ConnectorParams,
    pub log: Log,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConnectorParams {
    /// Provider REST base URL; endpoint paths are joined onto it.
    pub base_url: String,
}

impl Settings {
    pub fn new() -> CustomResult<Self, ApplicationError> {
        Self::with_config_path(Env::which(), None)
    }

    /// Loads `<config_dir>/<env>.toml` (optional, `<workspace>/config` by default) and applies
    /// `PAYNL__` environment overrides on top.
    pub fn with_config_path(
        environment: Env,
        config_dir: Option<PathBuf>,
    ) -> CustomResult<Self, ApplicationError> {
        let config_dir = config_dir.unwrap_or_else(|| workspace_path().join("config"));
        let config_file = config_dir.join(environment.config_file_name());

        Config::builder()
            .add_source(File::from(config_file).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR),
            )
            .build()
            .change_context(ApplicationError::ConfigurationError)?
            .try_deserialize()
            .change_context(ApplicationError::ConfigurationError)
            .attach_printable_lazy(|| format!("unable to deserialize settings for {environment}"))
    }

    pub fn validate(&self) -> CustomResult<(), ApplicationError> {
        self.connector.validate()
    }
}

impl ConnectorParams {
    pub fn validate(&self) -> CustomResult<(), ApplicationError> {
        if self.base_url.trim().is_empty() {
            return Err(report!(ApplicationError::InvalidConfigurationValueError(
                "connector base URL must not be empty".into(),
            )));
        }
        url::Url::parse(&self.base_url).change_context(
            ApplicationError::InvalidConfigurationValueError(
                "connector base URL must be an absolute URL".into(),
            ),
        )?;
        Ok(())
    }
}
