//! Engine configuration
//!
//! Controls what the dispatcher does with a batch once it has run: whether
//! the structural validator runs, and whether any error rejects the batch.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// What to do with a batch that produced errors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationPolicy {
    /// Return the mutated graph alongside its errors; the caller decides
    #[default]
    Advisory,

    /// Return the input graph untouched when any error was produced
    RejectBatch,
}

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Handling of batches with errors
    pub violation_policy: ViolationPolicy,

    /// Run the structural validator after the batch
    pub validate: bool,

    /// Include remediation text in unknown-command errors
    pub remediation_hints: bool,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With violation policy
    #[inline]
    #[must_use]
    pub fn with_violation_policy(mut self, policy: ViolationPolicy) -> Self {
        self.violation_policy = policy;
        self
    }

    /// With or without the post-batch validator
    #[inline]
    #[must_use]
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// With or without remediation hints
    #[inline]
    #[must_use]
    pub fn with_remediation_hints(mut self, hints: bool) -> Self {
        self.remediation_hints = hints;
        self
    }

    /// Parse configuration from TOML; missing keys keep their defaults
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for invalid TOML or unknown values
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            violation_policy: ViolationPolicy::Advisory,
            validate: true,
            remediation_hints: true,
        }
    }
}
