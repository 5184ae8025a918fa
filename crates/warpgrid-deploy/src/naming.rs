//! Deterministic names, labels, and annotation keys for rollouts.

/// Label carrying the owning config's name.
pub const CONFIG_LABEL: &str = "warpgrid.dev/deployment-config";

/// Label carrying the rollout instance's name.
pub const ROLLOUT_LABEL: &str = "warpgrid.dev/rollout";

/// Annotation recording which config an instance was materialized from.
pub const CONFIG_ANNOTATION: &str = "warpgrid.dev/deployment-config.name";

/// Annotation recording the config version an instance represents.
pub const VERSION_ANNOTATION: &str = "warpgrid.dev/deployment-config.version";

/// Annotation mirroring the instance's lifecycle phase.
pub const PHASE_ANNOTATION: &str = "warpgrid.dev/rollout.phase";

/// Annotation holding the JSON-encoded config snapshot.
pub const ENCODED_CONFIG_ANNOTATION: &str = "warpgrid.dev/encoded-deployment-config";

const DEPLOYER_SUFFIX: &str = "deploy";

/// Name of the process that drives the rollout of `base`.
///
/// `base` is already unique, so no collision handling is needed.
pub fn deployer_name_for(base: &str) -> String {
    format!("{base}-{DEPLOYER_SUFFIX}")
}

/// Name of generation `version` of the config `config_name`.
pub fn rollout_name_for(config_name: &str, version: u64) -> String {
    format!("{config_name}-{version}")
}
