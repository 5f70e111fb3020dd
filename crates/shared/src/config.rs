//! Application configuration management.
//!
//! The loaded `AppConfig` is built once at the composition root and passed
//! down explicitly; nothing reads configuration from globals.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Ledger entry form settings.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Ledger entry form settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Number of recent movements shown when an account is selected.
    #[serde(default = "default_movements_page_size")]
    pub movements_page_size: u32,
    /// Decimal places used when displaying totals and differences.
    #[serde(default = "default_amount_scale")]
    pub amount_scale: u32,
}

fn default_movements_page_size() -> u32 {
    5
}

fn default_amount_scale() -> u32 {
    2
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            movements_page_size: default_movements_page_size(),
            amount_scale: default_amount_scale(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "lancamento=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `LANCAMENTO__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("LANCAMENTO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
