//! Structured logging bootstrap
//!
//! Library code only emits `tracing` events; binaries and test harnesses call
//! [`init_logging`] once to install a subscriber.

use serde_json::Value;
use std::io;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How [`init_logging`] formats and filters events
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    /// One JSON object per event; wins over `pretty_print`
    pub json_format: bool,
    pub pretty_print: bool,
    /// Reported once in the startup event
    pub global_fields: serde_json::Map<String, Value>,
    /// Per-target directives such as `vidshare_catalog=debug`; replaces `level` when set
    pub env_filter: Option<String>,
    pub service_name: Option<String>,
    pub service_version: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_print: true,
            global_fields: serde_json::Map::new(),
            env_filter: None,
            service_name: None,
            service_version: None,
        }
    }
}

impl LoggingConfig {
    /// JSON lines, use case crates at `info`
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            json_format: true,
            pretty_print: false,
            env_filter: Some("vidshare_core=info,vidshare_catalog=info,vidshare_validation=warn".to_string()),
            ..Self::default()
        }
        .with_global_field("env", "production")
    }

    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            ..Self::default()
        }
        .with_global_field("env", "development")
    }

    /// Errors only, unadorned
    pub fn test() -> Self {
        Self {
            level: "error".to_string(),
            pretty_print: false,
            ..Self::default()
        }
        .with_global_field("env", "test")
    }

    pub fn with_global_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.global_fields.insert(key.into(), value.into());
        self
    }

    pub fn with_level(mut self, level: &str) -> Self {
        self.level = level.to_string();
        self
    }

    pub fn with_service(mut self, name: &str, version: &str) -> Self {
        self.service_name = Some(name.to_string());
        self.service_version = Some(version.to_string());
        self
    }

    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// The filter directive used when `RUST_LOG` is not set
    pub fn filter_directive(&self) -> &str {
        self.env_filter.as_deref().unwrap_or(&self.level)
    }
}

/// Install the global subscriber described by `config`
///
/// `RUST_LOG` takes precedence over the configured filter. Fails if a global
/// subscriber is already installed.
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(config.filter_directive()))?;

    if config.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stdout).json())
            .try_init()?;
    } else if config.pretty_print {
        tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stdout).pretty())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stdout))
            .try_init()?;
    }

    let global_fields = Value::Object(config.global_fields);
    tracing::info!(
        target: "vidshare::logging",
        level = %config.level,
        json = config.json_format,
        service = config.service_name.as_deref().unwrap_or("vidshare"),
        version = config.service_version.as_deref().unwrap_or(crate::VERSION),
        fields = %global_fields,
        "logging initialized"
    );
    Ok(())
}
