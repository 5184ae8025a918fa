use anyhow::Result;
use warpgrid_deploy::{can_transition, LifecyclePhase};

pub fn transition(from: &str, to: &str) -> Result<()> {
    println!("{}", verdict(from.parse()?, to.parse()?));
    Ok(())
}

fn verdict(from: LifecyclePhase, to: LifecyclePhase) -> String {
    let word = if can_transition(from, to) { "allowed" } else { "denied" };
    format!("{from} -> {to}: {word}")
}
