//! Breakthrough session runner.
//!
//! Plays a session of episodes between two strategies and prints player 1's
//! wins and losses. Logs go to stderr; stdout carries only the summary line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use breakthrough::{SessionConfig, SessionRunner, StrategyKind, Team};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "breakthrough")]
#[command(version, about = "Run Breakthrough self-play sessions", long_about = None)]
struct Cli {
    /// JSON session config; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board size N (at least 2)
    #[arg(long, short = 'n')]
    size: Option<usize>,

    /// Number of episodes to play
    #[arg(long, short = 'e')]
    episodes: Option<usize>,

    /// Session seed
    #[arg(long)]
    seed: Option<u64>,

    /// Strategy for player 1 (Attacker)
    #[arg(long, value_enum)]
    attacker: Option<StrategyKind>,

    /// Strategy for player 2 (Defender)
    #[arg(long, value_enum)]
    defender: Option<StrategyKind>,

    /// Worker threads; more than one runs episodes in parallel
    #[arg(long, short = 't')]
    threads: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("failed to parse config {}", path.display()))?
            }
            None => SessionConfig::default(),
        };

        if let Some(size) = self.size {
            config.board_size = size;
        }
        if let Some(episodes) = self.episodes {
            config.episodes = episodes;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        let attacker = self.attacker.unwrap_or(config.attacker);
        let defender = self.defender.unwrap_or(config.defender);

        Ok(config.with_strategies(attacker, defender))
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Attach the error family as context.
fn with_family(err: breakthrough::Error) -> anyhow::Error {
    let family = if err.is_configuration() {
        "invalid session config"
    } else if err.is_internal() {
        "engine invariant violated"
    } else {
        "session failed"
    };
    anyhow::Error::new(err).context(family)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.session_config()?;
    let (attacker_kind, defender_kind, threads) = (config.attacker, config.defender, config.threads);
    let mut runner = SessionRunner::new(config).map_err(with_family)?;

    let tally = if threads > 1 {
        runner.run_parallel(|team| match team {
            Team::Attacker => attacker_kind.build(),
            Team::Defender => defender_kind.build(),
        })
    } else {
        let mut attacker = attacker_kind.build();
        let mut defender = defender_kind.build();
        runner.run(attacker.as_mut(), defender.as_mut())
    }
    .map_err(with_family)?;

    println!("{}", tally.summary_line());
    Ok(())
}
