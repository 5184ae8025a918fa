//! Rollout instances — one materialized generation of a config.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::RolloutConfig;
use crate::error::{DeployError, DeployResult};
use crate::naming::{
    rollout_name_for, CONFIG_ANNOTATION, CONFIG_LABEL, ENCODED_CONFIG_ANNOTATION,
    PHASE_ANNOTATION, ROLLOUT_LABEL, VERSION_ANNOTATION,
};
use crate::phase::{can_transition, LifecyclePhase};

/// The running representation of one config generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloutInstance {
    pub name: String,
    pub namespace: String,
    pub version: u64,
    pub replicas: u32,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
    pub phase: LifecyclePhase,
    /// Stamped by the backing store on creation; `None` until then.
    pub created_at: Option<DateTime<Utc>>,
}

impl Default for RolloutInstance {
    fn default() -> Self {
        Self {
            name: String::new(),
            namespace: String::new(),
            version: 0,
            replicas: 0,
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
            phase: LifecyclePhase::New,
            created_at: None,
        }
    }
}

impl RolloutInstance {
    /// Move to `proposed` if the lifecycle allows it. Returns whether it did.
    pub fn transition_to(&mut self, proposed: LifecyclePhase) -> bool {
        if !can_transition(self.phase, proposed) {
            debug!(
                rollout = %self.name,
                from = %self.phase,
                to = %proposed,
                "phase transition rejected"
            );
            return false;
        }

        info!(
            rollout = %self.name,
            from = %self.phase,
            to = %proposed,
            "phase transition"
        );
        self.phase = proposed;
        self.annotations
            .insert(PHASE_ANNOTATION.to_string(), proposed.to_string());
        true
    }
}

/// Build the instance for `config.latest_version`.
///
/// The result is in phase `New` with no creation time. Malformed configs are
/// returned as errors without any further handling.
pub fn make_rollout(config: &RolloutConfig) -> DeployResult<RolloutInstance> {
    if config.name.trim().is_empty() {
        return Err(DeployError::InvalidConfig(
            "config name must not be empty".to_string(),
        ));
    }
    config.strategy.validate()?;

    let name = rollout_name_for(&config.name, config.latest_version);
    let encoded = serde_json::to_string(config)?;

    let mut labels = config.template.labels.clone();
    labels.insert(CONFIG_LABEL.to_string(), config.name.clone());
    labels.insert(ROLLOUT_LABEL.to_string(), name.clone());

    let annotations = BTreeMap::from([
        (CONFIG_ANNOTATION.to_string(), config.name.clone()),
        (VERSION_ANNOTATION.to_string(), config.latest_version.to_string()),
        (PHASE_ANNOTATION.to_string(), LifecyclePhase::New.to_string()),
        (ENCODED_CONFIG_ANNOTATION.to_string(), encoded),
    ]);

    debug!(
        rollout = %name,
        strategy = %config.strategy.kind(),
        replicas = config.replicas,
        "materialized rollout"
    );

    Ok(RolloutInstance {
        name,
        namespace: config.namespace.clone(),
        version: config.latest_version,
        replicas: config.replicas,
        labels,
        annotations,
        phase: LifecyclePhase::New,
        created_at: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::phase_for;
    use crate::strategy::Strategy;

    fn config() -> RolloutConfig {
        let mut config = RolloutConfig::new("api", "web");
        config.latest_version = 3;
        config.replicas = 2;
        config
            .template
            .labels
            .insert("app".to_string(), "api".to_string());
        config
    }

    #[test]
    fn materializes_named_generation() {
        let instance = make_rollout(&config()).unwrap();
        assert_eq!(instance.name, "api-3");
        assert_eq!(instance.namespace, "web");
        assert_eq!(instance.version, 3);
        assert_eq!(instance.replicas, 2);
        assert_eq!(instance.phase, LifecyclePhase::New);
        assert!(instance.created_at.is_none());
    }

    #[test]
    fn carries_labels_and_annotations() {
        let instance = make_rollout(&config()).unwrap();
        assert_eq!(instance.labels["app"], "api");
        assert_eq!(instance.labels[CONFIG_LABEL], "api");
        assert_eq!(instance.labels[ROLLOUT_LABEL], "api-3");
        assert_eq!(instance.annotations[VERSION_ANNOTATION], "3");
        assert_eq!(phase_for(&instance), LifecyclePhase::New);

        let decoded: RolloutConfig =
            serde_json::from_str(&instance.annotations[ENCODED_CONFIG_ANNOTATION]).unwrap();
        assert_eq!(decoded, config());
    }

    #[test]
    fn rejects_empty_name() {
        let err = make_rollout(&RolloutConfig::new("", "web")).unwrap_err();
        assert!(matches!(err, DeployError::InvalidConfig(_)));
    }

    #[test]
    fn propagates_strategy_errors() {
        let config = config().with_strategy(Strategy::custom(""));
        let err = make_rollout(&config).unwrap_err();
        assert!(matches!(err, DeployError::InvalidStrategy(_)));
    }

    #[test]
    fn transition_to_applies_legal_moves() {
        let mut instance = make_rollout(&config()).unwrap();
        assert!(instance.transition_to(LifecyclePhase::Pending));
        assert!(instance.transition_to(LifecyclePhase::Running));
        assert_eq!(phase_for(&instance), LifecyclePhase::Running);

        assert!(instance.transition_to(LifecyclePhase::Complete));
        assert!(!instance.transition_to(LifecyclePhase::Failed));
        assert_eq!(instance.phase, LifecyclePhase::Complete);
        assert_eq!(phase_for(&instance), LifecyclePhase::Complete);
    }

    #[test]
    fn transition_to_rejects_noop() {
        let mut instance = make_rollout(&config()).unwrap();
        assert!(!instance.transition_to(LifecyclePhase::New));
        assert_eq!(instance.phase, LifecyclePhase::New);
    }
}
