//! Rollout configuration (desired state) and its status subresource.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::error::DeployResult;
use crate::strategy::Strategy;

/// User-authored desired state of a rolled-out workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloutConfig {
    pub name: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Generation counter; bumped by the controller for every new rollout.
    #[serde(default)]
    pub latest_version: u64,
    #[serde(default = "default_replicas")]
    pub replicas: u32,
    /// Labels selecting the instances this config owns.
    #[serde(default)]
    pub selector: BTreeMap<String, String>,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub template: WorkloadTemplate,
}

fn default_namespace() -> String {
    "default".to_string()
}

fn default_replicas() -> u32 {
    1
}

/// Template for the workload each generation runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkloadTemplate {
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub containers: Vec<ContainerSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Observed state of a config, written by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RolloutStatus {
    #[serde(default)]
    pub latest_version: u64,
    #[serde(default)]
    pub observed_generation: u64,
    /// Keyed by condition type, in insertion order.
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl RolloutConfig {
    /// A config with one replica, the default strategy, and an empty template.
    pub fn new(name: &str, namespace: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            latest_version: 0,
            replicas: default_replicas(),
            selector: BTreeMap::new(),
            strategy: Strategy::default(),
            template: WorkloadTemplate::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn from_file(path: &Path) -> DeployResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> DeployResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> DeployResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::StrategyKind;
    use std::io::Write;

    #[test]
    fn parse_minimal() {
        let config = RolloutConfig::from_toml_str(r#"name = "api""#).unwrap();
        assert_eq!(config.name, "api");
        assert_eq!(config.namespace, "default");
        assert_eq!(config.replicas, 1);
        assert_eq!(config.strategy.kind(), StrategyKind::Rolling);
    }

    #[test]
    fn parse_recreate_with_timeout() {
        let toml_str = r#"
name = "worker"
namespace = "jobs"
latest_version = 4
replicas = 3

[strategy]
type = "recreate"
timeout_seconds = 120

[template.labels]
app = "worker"

[[template.containers]]
name = "worker"
image = "registry.local/worker:4"
"#;
        let config = RolloutConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.latest_version, 4);
        assert_eq!(config.strategy, Strategy::recreate(Some(120)));
        assert_eq!(config.template.containers[0].image, "registry.local/worker:4");
        assert_eq!(config.template.labels["app"], "worker");
    }

    #[test]
    fn parse_custom_strategy() {
        let toml_str = r#"
name = "batch"

[strategy]
type = "custom"
image = "registry.local/deployer:1"
command = ["/bin/deploy", "--fast"]
"#;
        let config = RolloutConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.strategy.kind(), StrategyKind::Custom);
        assert_eq!(config.strategy.explicit_timeout_seconds(), None);
    }

    #[test]
    fn rejects_missing_name() {
        assert!(RolloutConfig::from_toml_str("replicas = 2").is_err());
    }

    #[test]
    fn toml_output_parses_back() {
        let config = RolloutConfig::new("api", "web").with_strategy(Strategy::rolling(Some(30)));
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("api"));
        assert_eq!(RolloutConfig::from_toml_str(&toml_str).unwrap(), config);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"from-disk\"\nlatest_version = 2").unwrap();

        let config = RolloutConfig::from_file(file.path()).unwrap();
        assert_eq!(config.name, "from-disk");
        assert_eq!(config.latest_version, 2);
    }
}
