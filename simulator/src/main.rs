use anyhow::Context;
use clap::Parser;
use rollsim_simulator::{Config, Simulator};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play a seeded craps session.", long_about = None)]
struct Args {
    /// YAML session config.
    #[arg(short, long)]
    config: PathBuf,

    /// Override the configured number of rolls.
    #[arg(short, long)]
    rolls: Option<u64>,

    /// Override the configured seed.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Emit logs as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();

    // Load config
    let raw = std::fs::read_to_string(&args.config)
        .with_context(|| format!("could not read config file {}", args.config.display()))?;
    let mut config: Config = serde_yaml::from_str(&raw).context("could not parse config file")?;
    if let Some(rolls) = args.rolls {
        config.rolls = rolls;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.json_logs |= args.json;
    let config = config.validate().context("invalid config")?;

    // Create logger
    let logger = tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr);
    if config.json_logs {
        logger.json().init();
    } else {
        logger.init();
    }

    // Play the session
    let mut simulator = Simulator::new(config);
    let summary = simulator.run().context("session failed")?;
    let output = serde_json::to_string_pretty(&summary).context("failed to encode summary")?;
    println!("{output}");

    Ok(())
}
