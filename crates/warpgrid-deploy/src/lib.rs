//! WarpGrid rollout lifecycle — phase transitions, status conditions, timeouts.
//!
//! This crate holds the decisions a rollout controller makes about a single
//! rollout: whether a phase change is legal, how status conditions merge
//! without churning timestamps, and whether a rollout has run past its time
//! budget. Every decision is a pure, synchronous function over data the
//! caller already holds; persistence, events, and the reconcile loop live
//! elsewhere.
//!
//! # Components
//!
//! - **`phase`** — Lifecycle phases and the transition validator
//! - **`condition`** — Condition lookup, merge-on-write, and removal
//! - **`timeout`** — Timeout resolution and the stalled-rollout check
//! - **`instance`** — Materializing a rollout generation from its config
//! - **`strategy`** — Recreate / Rolling / Custom strategies and default timeouts
//! - **`config`** — Rollout config and status, TOML loading
//! - **`naming`** — Deployer names, labels, annotation keys

pub mod condition;
pub mod config;
pub mod error;
pub mod instance;
pub mod naming;
pub mod phase;
pub mod strategy;
pub mod timeout;

pub use condition::{
    get_condition, remove_condition, set_condition, Condition, ConditionStatus, ConditionType,
};
pub use config::{ContainerSpec, RolloutConfig, RolloutStatus, WorkloadTemplate};
pub use error::{DeployError, DeployResult};
pub use instance::{make_rollout, RolloutInstance};
pub use naming::{deployer_name_for, rollout_name_for};
pub use phase::{can_transition, phase_for, LifecyclePhase};
pub use strategy::{
    Strategy, StrategyKind, DEFAULT_CUSTOM_TIMEOUT_SECONDS, DEFAULT_RECREATE_TIMEOUT_SECONDS,
    DEFAULT_ROLLING_TIMEOUT_SECONDS,
};
pub use timeout::{has_exceeded_timeout, has_exceeded_timeout_at, timeout_seconds_for};
