//! Status conditions and the merge rules for writing them.
//!
//! Conditions are keyed by [`ConditionType`]; a status never holds two
//! entries of the same type. Writing a condition whose status and reason are
//! unchanged is a no-op, so repeated reconciliation does not churn
//! timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RolloutStatus;

/// Reason for a new rollout generation being created.
pub const NEW_ROLLOUT_CREATED: &str = "NewRolloutCreated";
/// Reason for a rollout whose new generation became available.
pub const ROLLOUT_AVAILABLE: &str = "NewRolloutAvailable";
/// Reason for a rollout that ran past its timeout.
pub const PROGRESS_DEADLINE_EXCEEDED: &str = "ProgressDeadlineExceeded";
pub const ROLLOUT_PAUSED: &str = "RolloutPaused";
pub const ROLLOUT_RESUMED: &str = "RolloutResumed";
pub const ROLLOUT_CANCELLED: &str = "RolloutCancelled";
/// Reason for an existing generation being updated in place.
pub const ROLLOUT_UPDATED: &str = "RolloutUpdated";
/// Reason for a failure to create the new generation.
pub const FAILED_ROLLOUT_CREATE: &str = "FailedRolloutCreate";

/// Kind of fact a condition records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionType {
    Available,
    Progressing,
    ReplicaFailure,
}

/// Tri-state truth value of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

/// A typed, timestamped status fact attached to a rollout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: ConditionType,
    pub status: ConditionStatus,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
    /// Last time the condition was written.
    #[serde(default)]
    pub last_update_time: Option<DateTime<Utc>>,
    /// Last time `status` changed.
    #[serde(default)]
    pub last_transition_time: Option<DateTime<Utc>>,
}

impl Condition {
    /// Build a condition stamped with the current time.
    pub fn new(
        condition_type: ConditionType,
        status: ConditionStatus,
        reason: &str,
        message: &str,
    ) -> Self {
        Self::at(condition_type, status, reason, message, Utc::now())
    }

    /// Build a condition stamped with `now`.
    pub fn at(
        condition_type: ConditionType,
        status: ConditionStatus,
        reason: &str,
        message: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            condition_type,
            status,
            reason: reason.to_string(),
            message: message.to_string(),
            last_update_time: Some(now),
            last_transition_time: Some(now),
        }
    }
}

/// The condition of type `condition_type`, if the status has one.
pub fn get_condition(status: &RolloutStatus, condition_type: ConditionType) -> Option<&Condition> {
    status
        .conditions
        .iter()
        .find(|c| c.condition_type == condition_type)
}

/// Upsert `condition` into `status`.
///
/// - No entry of that type: append it as given.
/// - Same status and reason as the stored entry: leave the entry untouched.
/// - Otherwise: replace the entry in place. `last_transition_time` keeps the
///   stored value unless `status` itself changed.
pub fn set_condition(status: &mut RolloutStatus, mut condition: Condition) {
    let Some(index) = status
        .conditions
        .iter()
        .position(|c| c.condition_type == condition.condition_type)
    else {
        debug!(
            condition = ?condition.condition_type,
            status = ?condition.status,
            reason = %condition.reason,
            "adding condition"
        );
        status.conditions.push(condition);
        return;
    };
    let existing = &mut status.conditions[index];

    if existing.status == condition.status && existing.reason == condition.reason {
        return;
    }

    if existing.status == condition.status {
        condition.last_transition_time = existing.last_transition_time;
    }

    debug!(
        condition = ?condition.condition_type,
        from = ?existing.status,
        to = ?condition.status,
        reason = %condition.reason,
        "updating condition"
    );
    *existing = condition;
}

/// Drop the condition of type `condition_type`. Absent types are ignored.
pub fn remove_condition(status: &mut RolloutStatus, condition_type: ConditionType) {
    status
        .conditions
        .retain(|c| c.condition_type != condition_type);
}
