//! Configuration loading via `ortho-config`.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::budget::TimeoutRules;

/// Polling configuration derived from environment variables, configuration
/// files, and CLI flags.
///
/// Timeout rules are grouped per resource kind: volumes and snapshots scale
/// with size between a min/max clamp, while server builds and load-balancer
/// activation carry flat budgets.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(prefix = "STAGEWATCH")]
pub struct PollingConfig {
    /// Token sent as `X-Auth-Token` on status requests, when required.
    pub auth_token: Option<String>,
    /// Sleep between status checks, in seconds.
    #[ortho_config(default = 5)]
    pub poll_rate_secs: u64,
    /// Status-fetch failures tolerated per stage before aborting.
    #[ortho_config(default = 3)]
    pub poll_failure_retry_limit: u32,
    /// Lower clamp for volume waits, in seconds.
    #[ortho_config(default = 120)]
    pub volume_min_timeout_secs: u64,
    /// Upper clamp for volume waits, in seconds.
    #[ortho_config(default = 3600)]
    pub volume_max_timeout_secs: u64,
    /// Wait granted per gigabyte of volume size, in seconds.
    #[ortho_config(default = 60)]
    pub volume_wait_per_gb_secs: u64,
    /// Lower clamp for snapshot waits, in seconds.
    #[ortho_config(default = 300)]
    pub snapshot_min_timeout_secs: u64,
    /// Upper clamp for snapshot waits, in seconds.
    #[ortho_config(default = 7200)]
    pub snapshot_max_timeout_secs: u64,
    /// Wait granted per gigabyte of the snapshot's source volume, in seconds.
    #[ortho_config(default = 120)]
    pub snapshot_wait_per_gb_secs: u64,
    /// Flat budget for server builds, in seconds.
    #[ortho_config(default = 600)]
    pub server_build_timeout_secs: u64,
    /// Flat budget for load-balancer activation, in seconds.
    #[ortho_config(default = 300)]
    pub load_balancer_active_timeout_secs: u64,
}

/// Metadata for a timeout-rule section, used to generate actionable error
/// messages.
struct SectionMetadata {
    section: &'static str,
    min_env: &'static str,
    max_env: &'static str,
}

impl SectionMetadata {
    const fn new(section: &'static str, min_env: &'static str, max_env: &'static str) -> Self {
        Self {
            section,
            min_env,
            max_env,
        }
    }
}

impl PollingConfig {
    /// Loads configuration using the `ortho-config` derive. Values merge
    /// defaults, configuration files, environment variables, and CLI flags
    /// in that order of precedence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the loader fails to merge sources.
    pub fn load_from_sources() -> Result<Self, ConfigError> {
        Self::load().map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Loads configuration without attempting to parse CLI arguments. Values
    /// still merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("stagewatch")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Returns the sleep between status checks.
    #[must_use]
    pub const fn poll_rate(&self) -> Duration {
        Duration::from_secs(self.poll_rate_secs)
    }

    /// Returns the timeout rules applied to volume waits.
    #[must_use]
    pub const fn volume_rules(&self) -> TimeoutRules {
        TimeoutRules {
            timeout: None,
            min_timeout: Some(Duration::from_secs(self.volume_min_timeout_secs)),
            max_timeout: Some(Duration::from_secs(self.volume_max_timeout_secs)),
            wait_per_unit: Some(Duration::from_secs(self.volume_wait_per_gb_secs)),
        }
    }

    /// Returns the timeout rules applied to snapshot waits.
    #[must_use]
    pub const fn snapshot_rules(&self) -> TimeoutRules {
        TimeoutRules {
            timeout: None,
            min_timeout: Some(Duration::from_secs(self.snapshot_min_timeout_secs)),
            max_timeout: Some(Duration::from_secs(self.snapshot_max_timeout_secs)),
            wait_per_unit: Some(Duration::from_secs(self.snapshot_wait_per_gb_secs)),
        }
    }

    /// Returns the timeout rules applied to server builds.
    #[must_use]
    pub const fn server_rules(&self) -> TimeoutRules {
        TimeoutRules {
            timeout: Some(Duration::from_secs(self.server_build_timeout_secs)),
            min_timeout: None,
            max_timeout: None,
            wait_per_unit: None,
        }
    }

    /// Returns the timeout rules applied to load-balancer activation.
    #[must_use]
    pub const fn load_balancer_rules(&self) -> TimeoutRules {
        TimeoutRules {
            timeout: Some(Duration::from_secs(self.load_balancer_active_timeout_secs)),
            min_timeout: None,
            max_timeout: None,
            wait_per_unit: None,
        }
    }

    /// Performs semantic validation on the timeout-rule sections. Error
    /// messages include guidance on how to correct values via environment
    /// variables or configuration files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBounds`] when a section's minimum
    /// timeout exceeds its maximum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::check_bounds(
            &self.volume_rules(),
            &SectionMetadata::new(
                "volume",
                "STAGEWATCH_VOLUME_MIN_TIMEOUT_SECS",
                "STAGEWATCH_VOLUME_MAX_TIMEOUT_SECS",
            ),
        )?;
        Self::check_bounds(
            &self.snapshot_rules(),
            &SectionMetadata::new(
                "snapshot",
                "STAGEWATCH_SNAPSHOT_MIN_TIMEOUT_SECS",
                "STAGEWATCH_SNAPSHOT_MAX_TIMEOUT_SECS",
            ),
        )?;
        Ok(())
    }

    fn check_bounds(rules: &TimeoutRules, metadata: &SectionMetadata) -> Result<(), ConfigError> {
        rules.validate().map_err(|err| ConfigError::InvalidBounds {
            section: metadata.section.to_owned(),
            message: format!(
                "{err}: adjust {} and {} or the matching keys in stagewatch.toml",
                metadata.min_env, metadata.max_env
            ),
        })
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a timeout section with inverted min/max bounds.
    #[error("invalid timeout bounds for {section} waits: {message}")]
    InvalidBounds {
        /// Resource section the bounds belong to.
        section: String,
        /// Explanation including the knobs to adjust.
        message: String,
    },
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}
