//! Formatting policy for guards.
//!
//! Two conventions exist for reporting rejected calls and for rendering state
//! names. Both are supported; a [`GuardConfig`] picks one and can be loaded
//! from JSON alongside the rest of an application's settings.

use crate::core::NameCase;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a [`StateError`](crate::core::StateError) message identifies the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStyle {
    /// Entity type name only.
    Entity,
    /// Entity type name and operation name.
    #[default]
    Operation,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid guard configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings applied to guards at build time.
///
/// # Example
///
/// ```rust
/// use transition_guard::config::{ErrorStyle, GuardConfig};
/// use transition_guard::core::NameCase;
///
/// let config = GuardConfig::from_json(r#"{ "error_style": "entity", "name_case": "upper" }"#).unwrap();
///
/// assert_eq!(config.error_style, ErrorStyle::Entity);
/// assert_eq!(config.name_case, Some(NameCase::Upper));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    pub error_style: ErrorStyle,

    /// Casing for state names in error messages. `None` keeps each domain's own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_case: Option<NameCase>,
}

impl GuardConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_error_style(mut self, style: ErrorStyle) -> Self {
        self.error_style = style;
        self
    }

    pub fn with_name_case(mut self, case: NameCase) -> Self {
        self.name_case = Some(case);
        self
    }
}
