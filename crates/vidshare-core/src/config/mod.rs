pub mod app_config;
pub mod error;
pub mod sources;

pub use app_config::*;
pub use error::ConfigError;
pub use sources::ConfigSource;
