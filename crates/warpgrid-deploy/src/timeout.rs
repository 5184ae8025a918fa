//! Rollout timeout evaluation.
//!
//! A rollout that has been alive longer than its strategy's timeout is
//! treated as stalled. The timeout is the strategy's explicit
//! `timeout_seconds` when set, otherwise the compiled-in default for the
//! strategy kind. A resolved timeout of zero disables detection.

use chrono::{DateTime, Utc};

use crate::config::RolloutConfig;
use crate::instance::RolloutInstance;
use crate::strategy::Strategy;

/// Timeout in seconds that applies to `strategy`.
pub fn timeout_seconds_for(strategy: &Strategy) -> i64 {
    strategy
        .explicit_timeout_seconds()
        .unwrap_or_else(|| strategy.kind().default_timeout_seconds())
}

/// Whether `instance` has outlived its timeout as of now.
pub fn has_exceeded_timeout(config: &RolloutConfig, instance: &RolloutInstance) -> bool {
    has_exceeded_timeout_at(config, instance, Utc::now())
}

/// Whether `instance` has outlived its timeout as of `now`.
///
/// Elapsed time is truncated to whole seconds and must strictly exceed the
/// timeout. An instance with no creation time has not timed out.
pub fn has_exceeded_timeout_at(
    config: &RolloutConfig,
    instance: &RolloutInstance,
    now: DateTime<Utc>,
) -> bool {
    let timeout = timeout_seconds_for(&config.strategy);
    if timeout <= 0 {
        return false;
    }
    let Some(created_at) = instance.created_at else {
        return false;
    };
    (now - created_at).num_seconds() > timeout
}
