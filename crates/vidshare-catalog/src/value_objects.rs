//! Value objects shared by catalog entities
//!
//! Each wraps a raw value without checking it; `validate` reports problems
//! against a caller-chosen field name so entity rules and request checks
//! share one definition.

use serde::{Deserialize, Serialize};
use std::fmt;
use vidshare_validation::{ValidationBuilder, ValidationResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    pub const MAX_LENGTH: usize = 100;

    /// Leading and trailing whitespace is dropped
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(value.as_ref().trim().to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn validate(&self, field: &str) -> ValidationResult {
        ValidationBuilder::new()
            .with_field(field, self.0.as_str())
            .not_empty()
            .max_length(Self::MAX_LENGTH)
            .build()
    }

    /// Case-insensitive comparison used for uniqueness checks
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    pub const MAX_LENGTH: usize = 150;

    pub fn new(value: impl AsRef<str>) -> Self {
        Self(value.as_ref().trim().to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn validate(&self, field: &str) -> ValidationResult {
        ValidationBuilder::new()
            .with_field(field, self.0.as_str())
            .not_empty()
            .max_length(Self::MAX_LENGTH)
            .build()
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Optional free text; blank input collapses to no description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Description(Option<String>);

impl Description {
    pub fn new(value: Option<&str>) -> Self {
        Self(
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        )
    }

    pub fn value(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn validate(&self, field: &str, max_length: usize) -> ValidationResult {
        ValidationBuilder::new()
            .with_field(field, self.0.as_deref())
            .max_length(max_length)
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoUrl(String);

impl VideoUrl {
    pub const MAX_LENGTH: usize = 2048;

    pub fn new(value: impl AsRef<str>) -> Self {
        Self(value.as_ref().trim().to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn validate(&self, field: &str) -> ValidationResult {
        ValidationBuilder::new()
            .with_field(field, self.0.as_str())
            .not_empty()
            .max_length(Self::MAX_LENGTH)
            .url()
            .build()
    }
}

/// Running time in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DurationSeconds(u32);

impl DurationSeconds {
    pub const MIN: u32 = 1;
    /// One day
    pub const MAX: u32 = 86_400;

    pub fn new(seconds: u32) -> Self {
        Self(seconds)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn validate(&self, field: &str) -> ValidationResult {
        ValidationBuilder::new()
            .with_field(field, self.0)
            .range(Self::MIN, Self::MAX)
            .build()
    }
}

impl fmt::Display for DurationSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hours, rest) = (self.0 / 3600, self.0 % 3600);
        let (minutes, seconds) = (rest / 60, rest % 60);
        if hours > 0 {
            write!(f, "{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            write!(f, "{}:{:02}", minutes, seconds)
        }
    }
}
