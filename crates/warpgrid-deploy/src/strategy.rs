//! Rollout strategies — recreate, rolling update, custom.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DeployError, DeployResult};

/// Default timeout for a recreate rollout that sets no `timeout_seconds`.
pub const DEFAULT_RECREATE_TIMEOUT_SECONDS: i64 = 30 * 60;

/// Default timeout for a rolling update that sets no `timeout_seconds`.
pub const DEFAULT_ROLLING_TIMEOUT_SECONDS: i64 = DEFAULT_RECREATE_TIMEOUT_SECONDS;

/// Timeout applied to custom rollouts, which have no timeout field.
pub const DEFAULT_CUSTOM_TIMEOUT_SECONDS: i64 = 10 * 60;

/// How a new generation replaces the old one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Strategy {
    /// Scale the old generation down to zero, then bring the new one up.
    Recreate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_seconds: Option<i64>,
    },
    /// Replace instances incrementally.
    Rolling {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_seconds: Option<i64>,
        #[serde(default = "default_update_period_seconds")]
        update_period_seconds: u64,
        #[serde(default = "default_interval_seconds")]
        interval_seconds: u64,
        #[serde(default = "default_max_surge")]
        max_surge: u32,
        #[serde(default)]
        max_unavailable: u32,
    },
    /// Hand the rollout to an external deployer image.
    Custom {
        image: String,
        #[serde(default)]
        command: Vec<String>,
        #[serde(default)]
        environment: BTreeMap<String, String>,
    },
}

fn default_update_period_seconds() -> u64 {
    1
}
fn default_interval_seconds() -> u64 {
    1
}
fn default_max_surge() -> u32 {
    1
}

impl Default for Strategy {
    fn default() -> Self {
        Self::rolling(None)
    }
}

/// Variant tag of a [`Strategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Recreate,
    Rolling,
    Custom,
}

impl StrategyKind {
    /// Compiled-in timeout for this kind of strategy.
    pub fn default_timeout_seconds(self) -> i64 {
        match self {
            StrategyKind::Recreate => DEFAULT_RECREATE_TIMEOUT_SECONDS,
            StrategyKind::Rolling => DEFAULT_ROLLING_TIMEOUT_SECONDS,
            StrategyKind::Custom => DEFAULT_CUSTOM_TIMEOUT_SECONDS,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::Recreate => "Recreate",
            StrategyKind::Rolling => "Rolling",
            StrategyKind::Custom => "Custom",
        };
        f.write_str(name)
    }
}

impl Strategy {
    /// A recreate strategy with an optional explicit timeout.
    pub fn recreate(timeout_seconds: Option<i64>) -> Self {
        Self::Recreate { timeout_seconds }
    }

    /// A rolling strategy with default pacing and an optional explicit timeout.
    pub fn rolling(timeout_seconds: Option<i64>) -> Self {
        Self::Rolling {
            timeout_seconds,
            update_period_seconds: default_update_period_seconds(),
            interval_seconds: default_interval_seconds(),
            max_surge: default_max_surge(),
            max_unavailable: 0,
        }
    }

    /// A custom strategy running `image` with no extra command or environment.
    pub fn custom(image: &str) -> Self {
        Self::Custom {
            image: image.to_string(),
            command: Vec::new(),
            environment: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Recreate { .. } => StrategyKind::Recreate,
            Strategy::Rolling { .. } => StrategyKind::Rolling,
            Strategy::Custom { .. } => StrategyKind::Custom,
        }
    }

    /// The timeout the user wrote down, if the variant carries one.
    pub fn explicit_timeout_seconds(&self) -> Option<i64> {
        match self {
            Strategy::Recreate { timeout_seconds } => *timeout_seconds,
            Strategy::Rolling { timeout_seconds, .. } => *timeout_seconds,
            Strategy::Custom { .. } => None,
        }
    }

    /// Reject strategies the materializer cannot turn into a rollout.
    pub fn validate(&self) -> DeployResult<()> {
        if let Some(t) = self.explicit_timeout_seconds() {
            if t < 0 {
                return Err(DeployError::InvalidStrategy(format!(
                    "{} timeout_seconds must not be negative, got {t}",
                    self.kind()
                )));
            }
        }
        match self {
            Strategy::Rolling {
                max_surge: 0,
                max_unavailable: 0,
                ..
            } => Err(DeployError::InvalidStrategy(
                "max_surge and max_unavailable cannot both be zero".to_string(),
            )),
            Strategy::Custom { image, .. } if image.trim().is_empty() => Err(
                DeployError::InvalidStrategy("custom strategy requires an image".to_string()),
            ),
            _ => Ok(()),
        }
    }
}
