use std::fmt;

/// Provenance of one configuration value, reported by `config_sources()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from `var`, whose raw text was `raw`
    Environment { var: &'static str, raw: String },
    /// `var` was unset; the built-in `value` applies
    Default { var: &'static str, value: String },
}

impl ConfigSource {
    pub fn is_env_var(&self) -> bool {
        matches!(self, ConfigSource::Environment { .. })
    }

    pub fn is_default(&self) -> bool {
        matches!(self, ConfigSource::Default { .. })
    }

    /// The environment variable consulted for this value
    pub fn variable(&self) -> &'static str {
        match self {
            ConfigSource::Environment { var, .. } | ConfigSource::Default { var, .. } => var,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Environment { var, raw } => write!(f, "{}={}", var, raw),
            ConfigSource::Default { var, value } => write!(f, "{} unset, default {}", var, value),
        }
    }
}
