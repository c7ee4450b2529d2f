//! # vidshare-core
//!
//! Request outcome envelope, application configuration and logging bootstrap
//! shared by the vidshare use case layer.

pub mod config;
pub mod logging;
pub mod request_result;

pub use config::{AppConfig, AppConfigTrait, ConfigError, ConfigSource, Environment};
pub use logging::{init_logging, LoggingConfig};
pub use request_result::{
    EntityWarning, RequestResult, RequestStatus, UNSPECIFIED_ERROR, VALIDATION_FAILED,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
