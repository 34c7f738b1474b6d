//! Configuration loading and management for the quote sources.
//!
//! Settings are layered: built-in defaults, then `config/default.toml`, an
//! optional `config/local.toml`, and finally `USD_QUOTES__`-prefixed
//! environment variables. Everything is loaded once at startup and treated as
//! immutable afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::infrastructure::http_client::HttpClientConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {source}")]
    Load {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpClientConfig,
    pub slack: SlackSettings,
    pub logging: LoggingConfig,
    /// Argentina source (row-scan over the BNA history table).
    pub bna: SourceSettings,
    /// Mexico source (fixed cell offsets in the DOF indicator table).
    pub dof: SourceSettings,
}

/// Immutable extraction settings for one source portal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Endpoint the date query parameters are appended to.
    pub endpoint_url: String,

    /// Exact text expected in the quote table's heading cell.
    #[serde(default)]
    pub validation_label: String,

    /// Message surfaced when the portal reports no quote for the date.
    #[serde(default)]
    pub no_quote_message: String,

    /// Currency label stamped on every quote extracted from this source.
    pub currency_label: String,
}

/// Incoming-webhook target for structural-failure alerts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackSettings {
    #[serde(default)]
    pub webhook_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing directive; `RUST_LOG` wins when set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpClientConfig::default(),
            slack: SlackSettings {
                webhook_url: String::new(),
            },
            logging: LoggingConfig::default(),
            bna: SourceSettings {
                endpoint_url:
                    "https://www.bna.com.ar/Cotizador/HistoricoPrincipales?id=billetes&filtroDolar=1&filtroEuro=0"
                        .to_string(),
                validation_label: "Dolar U.S.A".to_string(),
                no_quote_message: "No hay cotizaciones pendientes para esa fecha.".to_string(),
                currency_label: "Peso Argentino".to_string(),
            },
            dof: SourceSettings {
                endpoint_url:
                    "https://www.dof.gob.mx/indicadores_detalle.php?cod_tipo_indicador=158"
                        .to_string(),
                validation_label: String::new(),
                no_quote_message: String::new(),
                currency_label: "Peso Mexicano".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Load the layered configuration from the working directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_file("config/default")
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("USD_QUOTES").separator("__"))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, source) in [("bna", &self.bna), ("dof", &self.dof)] {
            if Url::parse(&source.endpoint_url).is_err() {
                return Err(ConfigError::Validation {
                    message: format!(
                        "{name}.endpoint_url is not a valid URL: {}",
                        source.endpoint_url
                    ),
                });
            }
            if source.currency_label.is_empty() {
                return Err(ConfigError::Validation {
                    message: format!("{name}.currency_label must not be empty"),
                });
            }
        }
        Ok(())
    }
}
