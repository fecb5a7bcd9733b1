//! Pairing CLI
//!
//! Plan the next round of a group and keep its standings up to date.

mod report;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use pairing_core::{plan_round, GroupSnapshot, PlanRequest, RoundConfig, RoundId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pairing")]
#[command(about = "Round pairing and standings for classroom chess groups", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Group snapshot (JSON)
    #[arg(short, long, env = "PAIRING_GROUP", default_value = "group.json")]
    group: PathBuf,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Pair the next round
    Pair {
        /// Round settings (TOML); group defaults apply to anything left out
        #[arg(long)]
        config: Option<PathBuf>,

        /// Seed for reproducible tie-breaking
        #[arg(long)]
        seed: Option<u64>,

        /// Write the planned round as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Append the planned round to the group snapshot
        #[arg(long)]
        save: bool,

        /// Name recorded on the round's creation audit event
        #[arg(long, env = "PAIRING_ACTOR", default_value = "organizer")]
        actor: String,
    },
    /// Recompute every player's totals and print the standings
    Totals {
        /// Write the recomputed totals back to the group snapshot
        #[arg(long)]
        save: bool,
    },
    /// Show what is still missing for a round
    Progress {
        round: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("pairing={},pairing_core={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut snapshot = load_group(&cli.group)?;

    match cli.command {
        Commands::Pair {
            config,
            seed,
            output,
            save,
            actor,
        } => run_pair(
            &mut snapshot,
            &cli.group,
            config.as_deref(),
            seed,
            output,
            save,
            &actor,
        ),
        Commands::Totals { save } => run_totals(&mut snapshot, &cli.group, save),
        Commands::Progress { round } => run_progress(&snapshot, RoundId(round)),
    }
}

fn load_group(path: &Path) -> Result<GroupSnapshot> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read group snapshot {}", path.display()))?;
    GroupSnapshot::from_json_str(&text)
        .with_context(|| format!("invalid group snapshot {}", path.display()))
}

fn save_group(snapshot: &GroupSnapshot, path: &Path) -> Result<()> {
    let text = snapshot.to_json_string()?;
    fs::write(path, text)
        .with_context(|| format!("failed to write group snapshot {}", path.display()))?;
    info!(path = %path.display(), "saved group snapshot");
    Ok(())
}

fn load_round_config(path: Option<&Path>, snapshot: &GroupSnapshot) -> Result<RoundConfig> {
    let Some(path) = path else {
        return Ok(snapshot.defaults.round_config());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read round config {}", path.display()))?;
    RoundConfig::from_toml_str(&text, &snapshot.defaults)
        .with_context(|| format!("invalid round config {}", path.display()))
}

fn run_pair(
    snapshot: &mut GroupSnapshot,
    group_path: &Path,
    config_path: Option<&Path>,
    seed: Option<u64>,
    output: Option<PathBuf>,
    save: bool,
    actor: &str,
) -> Result<()> {
    let config = load_round_config(config_path, snapshot)?;
    let round_id = snapshot.next_round_id();
    let attendance = snapshot.attendance_for(round_id);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let request = PlanRequest {
        round_id,
        group_id: snapshot.group_id,
        config: &config,
        players: &snapshot.players,
        attendance: &attendance,
        rounds: &snapshot.rounds,
        matches: &snapshot.matches,
        first_match_id: snapshot.next_match_id(),
        actor,
        now: Utc::now(),
    };
    let planned = plan_round(&request, &mut rng).context("failed to pair round")?;

    report::print_pairings(snapshot, &planned);

    if let Some(path) = output {
        let text = serde_json::to_string_pretty(&planned)?;
        fs::write(&path, text)
            .with_context(|| format!("failed to write planned round {}", path.display()))?;
        info!(path = %path.display(), "wrote planned round");
    }
    if save {
        snapshot.add_round(planned);
        save_group(snapshot, group_path)?;
    }
    Ok(())
}

fn run_totals(snapshot: &mut GroupSnapshot, group_path: &Path, save: bool) -> Result<()> {
    snapshot.recompute_totals();
    report::print_standings(snapshot)?;
    if save {
        save_group(snapshot, group_path)?;
    }
    Ok(())
}

fn run_progress(snapshot: &GroupSnapshot, round_id: RoundId) -> Result<()> {
    let Some(round) = snapshot.round(round_id) else {
        bail!("round {} not found in group {}", round_id, snapshot.group_id);
    };
    let matches: Vec<_> = snapshot.round_matches(round_id).into_iter().cloned().collect();
    report::print_progress(round, &matches);
    Ok(())
}
