//! Lifecycle phases of a rollout and the legal transitions between them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DeployError;
use crate::instance::RolloutInstance;
use crate::naming::PHASE_ANNOTATION;

/// Current phase of a rollout instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecyclePhase {
    /// Materialized, nothing started yet.
    New,
    /// The deployer has been requested but is not running.
    Pending,
    /// The deployer is running.
    Running,
    /// Finished successfully.
    Complete,
    /// Finished unsuccessfully.
    Failed,
}

impl LifecyclePhase {
    pub const ALL: [LifecyclePhase; 5] = [
        LifecyclePhase::New,
        LifecyclePhase::Pending,
        LifecyclePhase::Running,
        LifecyclePhase::Complete,
        LifecyclePhase::Failed,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, LifecyclePhase::Complete | LifecyclePhase::Failed)
    }

    pub fn is_complete(self) -> bool {
        self == LifecyclePhase::Complete
    }

    pub fn is_failed(self) -> bool {
        self == LifecyclePhase::Failed
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LifecyclePhase::New => "New",
            LifecyclePhase::Pending => "Pending",
            LifecyclePhase::Running => "Running",
            LifecyclePhase::Complete => "Complete",
            LifecyclePhase::Failed => "Failed",
        }
    }

    /// Position in forward lifecycle order.
    fn rank(self) -> u8 {
        match self {
            LifecyclePhase::New => 0,
            LifecyclePhase::Pending => 1,
            LifecyclePhase::Running => 2,
            LifecyclePhase::Complete | LifecyclePhase::Failed => 3,
        }
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecyclePhase {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LifecyclePhase::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DeployError::UnknownPhase(s.to_string()))
    }
}

/// Whether a rollout may move from `current` to `proposed`.
///
/// Only incomplete phases may move, and only forward. `X -> X` is never a
/// transition; callers detect "no change" themselves.
pub fn can_transition(current: LifecyclePhase, proposed: LifecyclePhase) -> bool {
    if current.is_terminal() || current == proposed {
        return false;
    }
    proposed.rank() > current.rank()
}

/// Phase recorded in the instance's phase annotation.
///
/// A missing or unreadable annotation reads as `New`.
pub fn phase_for(instance: &RolloutInstance) -> LifecyclePhase {
    instance
        .annotations
        .get(PHASE_ANNOTATION)
        .and_then(|value| value.parse().ok())
        .unwrap_or(LifecyclePhase::New)
}
