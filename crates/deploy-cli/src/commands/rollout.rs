use std::path::Path;

use anyhow::{Context, Result};
use warpgrid_deploy::{make_rollout, RolloutConfig};

pub fn materialize(config_path: &str) -> Result<()> {
    let config = RolloutConfig::from_file(Path::new(config_path))
        .with_context(|| format!("loading {config_path}"))?;
    println!("{}", render(&config)?);
    Ok(())
}

fn render(config: &RolloutConfig) -> Result<String> {
    let instance = make_rollout(config)?;
    Ok(serde_json::to_string_pretty(&instance)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use warpgrid_deploy::Strategy;

    #[test]
    fn renders_instance_json() {
        let mut config = RolloutConfig::new("api", "web");
        config.latest_version = 2;
        let json: serde_json::Value = serde_json::from_str(&render(&config).unwrap()).unwrap();
        assert_eq!(json["name"], "api-2");
        assert_eq!(json["phase"], "New");
        assert!(json["created_at"].is_null());
    }

    #[test]
    fn surfaces_materializer_errors() {
        let config = RolloutConfig::new("api", "web").with_strategy(Strategy::custom(""));
        assert!(render(&config).is_err());
    }

    #[test]
    fn materializes_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"api\"").unwrap();
        assert!(materialize(file.path().to_str().unwrap()).is_ok());
        assert!(materialize("/nonexistent/rollout.toml").is_err());
    }
}
