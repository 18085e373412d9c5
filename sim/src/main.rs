//! stakepoll-sim — run poll scenarios and compute commitments.

use anyhow::Context;
use clap::Parser;
use stakepoll_crypto::{compute_commitment, generate_salt};
use stakepoll_sim::{run_scenario, write_events, write_snapshot, SimConfig};
use stakepoll_types::{Ballot, Salt, VoterAddress};
use stakepoll_utils::{init_logging, LogFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stakepoll-sim", about = "Staked poll scenario simulator")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Defaults to the scenario's `log_level`, or "info".
    #[arg(long, env = "STAKEPOLL_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "STAKEPOLL_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Replay a TOML scenario and print the result.
    Run {
        /// Path to the scenario file.
        #[arg(long)]
        scenario: PathBuf,

        /// Write the event stream here as JSON lines.
        #[arg(long)]
        events_out: Option<PathBuf>,

        /// Write a bincode snapshot of the final poll state here.
        #[arg(long)]
        snapshot_out: Option<PathBuf>,
    },
    /// Compute the commitment hash a voter submits for a ballot.
    Commitment {
        #[arg(long)]
        voter: String,

        /// Ballot: an integer value, or "true"/"false" for increment signals.
        #[arg(long, allow_hyphen_values = true)]
        ballot: String,

        /// 32-byte salt as hex. A fresh random salt is generated when omitted.
        #[arg(long)]
        salt: Option<String>,
    },
    /// Print a fresh random 32-byte salt as hex.
    Salt,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            scenario,
            events_out,
            snapshot_out,
        } => {
            let config = SimConfig::from_toml_file(&scenario)?;
            let level = cli.log_level.unwrap_or_else(|| config.log_level.clone());
            init_logging(cli.log_format.unwrap_or(config.log_format), &level);
            tracing::info!("Loaded scenario from {}", scenario.display());

            let (sim, report) = run_scenario(&config)?;
            if let Some(path) = events_out {
                write_events(&path, sim.controller())
                    .with_context(|| format!("writing events to {}", path.display()))?;
            }
            if let Some(path) = snapshot_out {
                write_snapshot(&path, sim.controller())
                    .with_context(|| format!("writing snapshot to {}", path.display()))?;
            }

            println!("phase: {}", report.phase);
            match report.result {
                Some(result) => println!("result: {result}"),
                None => println!("result: none"),
            }
            println!(
                "steps: {} ({} expected failures), events: {}",
                report.steps_run,
                report.expected_failures,
                report.events.len()
            );
        }
        Command::Commitment {
            voter,
            ballot,
            salt,
        } => {
            init_logging(
                cli.log_format.unwrap_or_default(),
                cli.log_level.as_deref().unwrap_or("warn"),
            );
            let voter = VoterAddress::parse(&voter)?;
            let ballot: Ballot = ballot.parse()?;
            let salt = match salt {
                Some(hex) => Salt::from_hex(&hex)?,
                None => generate_salt()?,
            };
            println!("salt: {}", salt.to_hex());
            println!("commitment: {}", compute_commitment(&voter, &ballot, &salt));
        }
        Command::Salt => {
            println!("{}", generate_salt()?.to_hex());
        }
    }
    Ok(())
}
