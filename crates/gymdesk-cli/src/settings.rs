use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use gymdesk_status::status::{StatusPolicy, EXPIRING_SOON_DAYS};

/// Backend address when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

fn default_expiring_soon_days() -> i64 {
    EXPIRING_SOON_DAYS
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_url: Option<String>,
    pub members_db: Option<String>,
    #[serde(default = "default_expiring_soon_days")]
    pub expiring_soon_days: i64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// log4rs configuration file
    pub log_config: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: None,
            members_db: None,
            expiring_soon_days: default_expiring_soon_days(),
            log_level: default_log_level(),
            log_config: None,
        }
    }
}

impl Settings {
    /// Load settings from an optional file, overridden by
    /// `GYMDESK_*` environment variables.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("GYMDESK").try_parsing(true))
            .build()?;

        config.try_deserialize()
    }

    pub fn policy(&self) -> StatusPolicy {
        StatusPolicy {
            expiring_soon_days: self.expiring_soon_days,
        }
    }
}
