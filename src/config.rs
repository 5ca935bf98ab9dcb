//! Runtime settings loaded from the environment.
//!
//! Settings are read once at process init. A `.env` file is honoured when
//! present but never required; variables set externally always work.

use crate::{
    errors::{Error, Result},
    templates::TemplateRegistry,
};
use std::{env, path::PathBuf, time::Duration};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initializes the process-wide tracing subscriber, honouring `RUST_LOG`
/// and defaulting to `info`. Safe to call more than once; later calls are
/// no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

/// Optional path to a TOML file replacing the builtin certificate templates.
const TEMPLATE_FILE_VAR: &str = "PROGDESK_TEMPLATE_FILE";
/// Interval of the periodic claim-validation sweep, in seconds.
const VALIDATION_INTERVAL_VAR: &str = "PROGDESK_VALIDATION_INTERVAL_SECS";
/// Default sweep interval: every six hours.
const DEFAULT_VALIDATION_INTERVAL_SECS: u64 = 21_600;

/// Process-level runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Template file override, when configured
    pub template_file: Option<PathBuf>,
    /// Cadence of the periodic claim-validation sweep
    pub validation_interval: Duration,
}

impl Settings {
    /// Loads settings from the environment, reading `.env` first when one
    /// exists.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when a variable is present but malformed.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let template_file = env::var(TEMPLATE_FILE_VAR).ok().map(PathBuf::from);
        let validation_interval = parse_interval(env::var(VALIDATION_INTERVAL_VAR).ok())?;

        info!(
            template_file = ?template_file,
            interval_secs = validation_interval.as_secs(),
            "settings loaded"
        );
        Ok(Self {
            template_file,
            validation_interval,
        })
    }

    /// Builds the certificate template registry these settings describe:
    /// the configured file when one is set, otherwise the builtin set.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when the configured file cannot be read
    /// or parsed.
    pub fn load_registry(&self) -> Result<TemplateRegistry> {
        match &self.template_file {
            Some(path) => TemplateRegistry::from_file(path),
            None => TemplateRegistry::builtin(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template_file: None,
            validation_interval: Duration::from_secs(DEFAULT_VALIDATION_INTERVAL_SECS),
        }
    }
}

fn parse_interval(raw: Option<String>) -> Result<Duration> {
    match raw {
        None => Ok(Duration::from_secs(DEFAULT_VALIDATION_INTERVAL_SECS)),
        Some(value) => {
            let secs: u64 = value.trim().parse().map_err(|_| Error::Config {
                message: format!("{VALIDATION_INTERVAL_VAR} must be a whole number of seconds, got '{value}'"),
            })?;
            if secs == 0 {
                return Err(Error::Config {
                    message: format!("{VALIDATION_INTERVAL_VAR} must be greater than zero"),
                });
            }
            Ok(Duration::from_secs(secs))
        }
    }
}
