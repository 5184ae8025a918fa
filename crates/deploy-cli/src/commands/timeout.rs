use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::debug;
use warpgrid_deploy::{
    has_exceeded_timeout_at, make_rollout, timeout_seconds_for, RolloutConfig,
};

pub fn check(config_path: &str, created_at: Option<&str>, now: Option<&str>) -> Result<()> {
    let config = RolloutConfig::from_file(Path::new(config_path))
        .with_context(|| format!("loading {config_path}"))?;
    let created_at = created_at.map(parse_time).transpose()?;
    let now = now.map(parse_time).transpose()?.unwrap_or_else(Utc::now);

    println!("{}", report(&config, created_at, now)?);
    Ok(())
}

fn parse_time(value: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("invalid RFC 3339 timestamp: {value}"))?;
    Ok(parsed.with_timezone(&Utc))
}

fn report(
    config: &RolloutConfig,
    created_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<String> {
    let mut instance = make_rollout(config)?;
    instance.created_at = created_at;

    let timeout = timeout_seconds_for(&config.strategy);
    let exceeded = has_exceeded_timeout_at(config, &instance, now);
    debug!(rollout = %instance.name, timeout, exceeded, "evaluated rollout timeout");

    let budget = if timeout <= 0 {
        "disabled".to_string()
    } else {
        format!("{timeout}s")
    };
    let verdict = if exceeded { "exceeded" } else { "within budget" };
    Ok(format!(
        "{} ({}): timeout {budget}, {verdict}",
        instance.name,
        config.strategy.kind()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use warpgrid_deploy::Strategy;

    fn now() -> DateTime<Utc> {
        parse_time("2024-05-01T12:00:00Z").unwrap()
    }

    #[test]
    fn reports_exceeded() {
        let config = RolloutConfig::new("api", "web").with_strategy(Strategy::recreate(Some(10)));
        let line = report(&config, Some(now() - Duration::seconds(20)), now()).unwrap();
        assert_eq!(line, "api-0 (Recreate): timeout 10s, exceeded");
    }

    #[test]
    fn reports_disabled_timeout() {
        let config = RolloutConfig::new("api", "web").with_strategy(Strategy::rolling(Some(0)));
        let line = report(&config, Some(now() - Duration::seconds(700)), now()).unwrap();
        assert_eq!(line, "api-0 (Rolling): timeout disabled, within budget");
    }

    #[test]
    fn rejects_bad_timestamp() {
        assert!(parse_time("yesterday").is_err());
    }
}
