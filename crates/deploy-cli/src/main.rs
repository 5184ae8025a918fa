use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "deployctl",
    about = "WarpGrid — rollout lifecycle decisions",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a rollout may move between two lifecycle phases
    Transition {
        /// Current phase (New, Pending, Running, Complete, Failed)
        from: String,
        /// Proposed phase
        to: String,
    },
    /// Check whether a rollout has run past its strategy timeout.
    ///
    /// The timeout is the strategy's timeout_seconds when set, otherwise the
    /// default for the strategy kind. A timeout of 0 disables the check.
    Timeout {
        /// Path to the rollout config (TOML)
        #[arg(short, long)]
        config: String,
        /// When the rollout instance was created (RFC 3339)
        #[arg(long)]
        created_at: Option<String>,
        /// Evaluate as of this time instead of now (RFC 3339)
        #[arg(long)]
        now: Option<String>,
    },
    /// Materialize the latest rollout generation and print it as JSON
    Materialize {
        /// Path to the rollout config (TOML)
        #[arg(short, long)]
        config: String,
    },
    /// Print the name of the process that drives a rollout
    DeployerName {
        /// Rollout instance name
        name: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("warpgrid_deploy=info".parse()?)
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Transition { from, to } => commands::phase::transition(&from, &to),
        Commands::Timeout {
            config,
            created_at,
            now,
        } => commands::timeout::check(&config, created_at.as_deref(), now.as_deref()),
        Commands::Materialize { config } => commands::rollout::materialize(&config),
        Commands::DeployerName { name } => {
            println!("{}", warpgrid_deploy::deployer_name_for(&name));
            Ok(())
        }
    }
}
