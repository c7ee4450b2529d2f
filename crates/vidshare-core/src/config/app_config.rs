use crate::config::{ConfigError, ConfigSource};
use crate::logging::LoggingConfig;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::str::FromStr;

pub const ENV_ENVIRONMENT: &str = "VIDSHARE_ENV";
pub const ENV_DEBUG: &str = "VIDSHARE_DEBUG";
pub const ENV_LOG_LEVEL: &str = "VIDSHARE_LOG_LEVEL";
pub const ENV_SERVICE_NAME: &str = "VIDSHARE_SERVICE_NAME";
pub const ENV_DEFAULT_PAGE_SIZE: &str = "VIDSHARE_DEFAULT_PAGE_SIZE";
pub const ENV_MAX_PAGE_SIZE: &str = "VIDSHARE_MAX_PAGE_SIZE";
pub const ENV_MAX_SEARCH_RESULTS: &str = "VIDSHARE_MAX_SEARCH_RESULTS";

const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Loading and checking of process-wide configuration
pub trait AppConfigTrait: Sized {
    /// Build from `VIDSHARE_*` variables, falling back to defaults, then validate
    fn from_env() -> Result<Self, ConfigError>;

    fn validate(&self) -> Result<(), ConfigError>;

    /// Where each field's value came from, keyed by field name
    fn config_sources(&self) -> HashMap<String, ConfigSource>;
}

/// Deployment stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Testing,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Testing => "testing",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Debug output is on everywhere but production unless overridden
    pub fn debug_mode(&self) -> bool {
        !self.is_production()
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "testing" | "test" => Ok(Environment::Testing),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::invalid_value(
                "environment",
                s,
                "development, testing or production",
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application configuration shared by the use case layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub environment: Environment,
    pub debug: bool,
    pub log_level: String,
    pub service_name: String,
    /// Page size used when a list request does not ask for one
    pub default_page_size: usize,
    /// Upper bound applied to every requested page size
    pub max_page_size: usize,
    pub max_search_results: usize,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            environment: Environment::Development,
            debug: true,
            log_level: "info".to_string(),
            service_name: "vidshare".to_string(),
            default_page_size: 20,
            max_page_size: 100,
            max_search_results: 50,
        }
    }

    pub fn development() -> Self {
        Self {
            log_level: "debug".to_string(),
            ..Self::new()
        }
    }

    pub fn testing() -> Self {
        Self {
            environment: Environment::Testing,
            log_level: "warn".to_string(),
            default_page_size: 10,
            max_page_size: 25,
            max_search_results: 25,
            ..Self::new()
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            debug: false,
            ..Self::new()
        }
    }

    /// Clamp a requested page size into `1..=max_page_size`, defaulting when absent
    ///
    /// Never below 1, even for a hand-built config with `max_page_size == 0`.
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_size)
            .min(self.max_page_size)
            .max(1)
    }

    /// Logging setup matching this environment
    pub fn logging_config(&self) -> LoggingConfig {
        let base = match self.environment {
            Environment::Development => LoggingConfig::development(),
            Environment::Testing => LoggingConfig::test(),
            Environment::Production => LoggingConfig::production(),
        };
        base.with_level(&self.log_level)
            .with_service(&self.service_name, env!("CARGO_PKG_VERSION"))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// `Ok(None)` when `var` is unset
fn read_var(var: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(var) {
        Ok(raw) => Ok(Some(raw)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::EnvironmentError { var }),
    }
}

fn read_size(var: &'static str, field: &str) -> Result<Option<usize>, ConfigError> {
    read_var(var)?
        .map(|raw| {
            raw.trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::invalid_value(field, raw.as_str(), "a positive integer"))
        })
        .transpose()
}

fn source_of(var: &'static str, current: impl ToString) -> ConfigSource {
    match env::var(var) {
        Ok(raw) => ConfigSource::Environment { var, raw },
        Err(_) => ConfigSource::Default {
            var,
            value: current.to_string(),
        },
    }
}

impl AppConfigTrait for AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new();

        if let Some(raw) = read_var(ENV_ENVIRONMENT)? {
            config.environment = raw.parse()?;
        }

        config.debug = match read_var(ENV_DEBUG)? {
            Some(raw) => raw
                .trim()
                .parse::<bool>()
                .map_err(|_| ConfigError::invalid_value("debug", raw.as_str(), "true or false"))?,
            None => config.environment.debug_mode(),
        };

        if let Some(level) = read_var(ENV_LOG_LEVEL)? {
            config.log_level = level.trim().to_lowercase();
        }
        if let Some(name) = read_var(ENV_SERVICE_NAME)? {
            config.service_name = name;
        }
        if let Some(size) = read_size(ENV_DEFAULT_PAGE_SIZE, "default_page_size")? {
            config.default_page_size = size;
        }
        if let Some(size) = read_size(ENV_MAX_PAGE_SIZE, "max_page_size")? {
            config.max_page_size = size;
        }
        if let Some(limit) = read_size(ENV_MAX_SEARCH_RESULTS, "max_search_results")? {
            config.max_search_results = limit;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::invalid_value(
                "log_level",
                self.log_level.as_str(),
                VALID_LOG_LEVELS.join("|"),
            ));
        }

        if self.service_name.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "service_name".to_string(),
                env_var: ENV_SERVICE_NAME,
            });
        }

        for (field, value) in [
            ("default_page_size", self.default_page_size),
            ("max_page_size", self.max_page_size),
            ("max_search_results", self.max_search_results),
        ] {
            if value == 0 {
                return Err(ConfigError::invalid_value(field, "0", "a positive integer"));
            }
        }

        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::ValidationFailed {
                message: format!(
                    "default_page_size {} is above max_page_size {}",
                    self.default_page_size, self.max_page_size
                ),
            });
        }

        if self.environment.is_production() && self.debug {
            return Err(ConfigError::invalid_value(
                "debug",
                "true",
                "false when running in production",
            ));
        }

        Ok(())
    }

    fn config_sources(&self) -> HashMap<String, ConfigSource> {
        [
            ("environment", source_of(ENV_ENVIRONMENT, self.environment)),
            ("debug", source_of(ENV_DEBUG, self.debug)),
            ("log_level", source_of(ENV_LOG_LEVEL, &self.log_level)),
            ("service_name", source_of(ENV_SERVICE_NAME, &self.service_name)),
            ("default_page_size", source_of(ENV_DEFAULT_PAGE_SIZE, self.default_page_size)),
            ("max_page_size", source_of(ENV_MAX_PAGE_SIZE, self.max_page_size)),
            ("max_search_results", source_of(ENV_MAX_SEARCH_RESULTS, self.max_search_results)),
        ]
        .into_iter()
        .map(|(field, source)| (field.to_string(), source))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(AppConfig::development().validate().is_ok());
        assert!(AppConfig::testing().validate().is_ok());
        assert!(AppConfig::production().validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::new();
        config.log_level = "loud".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(err.field(), Some("log_level"));
        assert_eq!(
            err.to_string(),
            "log_level = 'loud' is invalid, expected error|warn|info|debug|trace"
        );
    }

    #[test]
    fn test_blank_service_name() {
        let mut config = AppConfig::new();
        config.service_name = "  ".to_string();
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "service_name must be set (via VIDSHARE_SERVICE_NAME)"
        );
    }

    #[test]
    fn test_page_size_bounds() {
        let mut config = AppConfig::new();
        config.default_page_size = 500;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationFailed { .. })));

        config.default_page_size = 0;
        assert_eq!(config.validate().unwrap_err().field(), Some("default_page_size"));
    }

    #[test]
    fn test_production_rejects_debug() {
        let mut config = AppConfig::production();
        config.debug = true;
        assert_eq!(config.validate().unwrap_err().field(), Some("debug"));
    }

    #[test]
    fn test_page_size_clamping() {
        let config = AppConfig::new();
        assert_eq!(config.page_size(None), 20);
        assert_eq!(config.page_size(Some(5)), 5);
        assert_eq!(config.page_size(Some(1_000)), 100);
        assert_eq!(config.page_size(Some(0)), 1);
    }

    #[test]
    fn test_page_size_with_zero_bounds() {
        let config = AppConfig {
            default_page_size: 0,
            max_page_size: 0,
            ..AppConfig::new()
        };
        assert_eq!(config.page_size(None), 1);
        assert_eq!(config.page_size(Some(40)), 1);
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!(" TEST ".parse::<Environment>().unwrap(), Environment::Testing);
        assert!("staging".parse::<Environment>().is_err());
        assert_eq!(Environment::Testing.to_string(), "testing");
    }

    #[test]
    fn test_logging_config_follows_environment() {
        let logging = AppConfig::production().logging_config();
        assert!(logging.json_format);
        assert_eq!(logging.service_name.as_deref(), Some("vidshare"));
    }
}
