// Argus CLI binary

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use argus_core::category::ALL_CATEGORIES;
use argus_core::config::DetectionConfig;
use argus_core::incident::LoggingSink;
use argus_core::simulate::{run_scenario, Scenario};
use argus_core::storage::SqliteIncidentLog;

#[derive(Parser)]
#[command(name = "argus")]
#[command(about = "Argus Core - CCTV anomaly monitoring decision layer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario file through a full detection session
    Simulate {
        /// Scenario JSON (one entry per clip)
        scenario: PathBuf,
        /// Detection config JSON (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// SQLite incident log to append to
        #[arg(long)]
        db: Option<PathBuf>,
        /// Uniform probability jitter, e.g. 0.05
        #[arg(long, default_value = "0.0")]
        jitter: f64,
    },

    /// List logged incidents
    Incidents {
        /// SQLite incident log path
        db: PathBuf,
        /// Maximum rows to show
        #[arg(long, default_value = "50")]
        limit: i64,
    },

    /// Print the monitored category vocabulary
    Categories,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Simulate {
            scenario,
            config,
            db,
            jitter,
        } => cmd_simulate(scenario, config, db, jitter),
        Commands::Incidents { db, limit } => cmd_incidents(db, limit),
        Commands::Categories => cmd_categories(),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<DetectionConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(&path)?;
            serde_json::from_str(&text)?
        }
        None => DetectionConfig::default(),
    };
    Ok(config)
}

fn cmd_simulate(
    scenario_path: PathBuf,
    config_path: Option<PathBuf>,
    db: Option<PathBuf>,
    jitter: f64,
) -> Result<()> {
    let config = load_config(config_path)?;
    config.validate()?;
    let scenario = Scenario::load(&scenario_path)?;

    eprintln!(
        "Replaying {} clips ({} frames per clip, threshold {}, min_hits {})",
        scenario.clips.len(),
        config.frames_per_clip,
        config.confidence_threshold,
        config.min_hits
    );

    let incident = match db {
        Some(db_path) => {
            let sink = SqliteIncidentLog::open(&db_path)?;
            run_scenario(config, &scenario, sink, jitter)?
        }
        None => run_scenario(config, &scenario, LoggingSink, jitter)?,
    };

    match incident {
        Some(incident) => {
            println!("Incident: {}", incident.summary());
            println!("  Location:    {}", incident.location);
            println!("  Peak:        {:.2}", incident.peak_confidence);
            println!("  Window:      {} .. {}", incident.started_at, incident.ended_at);
            println!(
                "  Evidence:    {} frames, fingerprint {}",
                incident.evidence.frame_count(),
                &incident.evidence.fingerprint[..16]
            );
        }
        None => println!("No alert-worthy anomalies detected in this session."),
    }
    Ok(())
}

fn cmd_incidents(db: PathBuf, limit: i64) -> Result<()> {
    let log = SqliteIncidentLog::open(&db)?;
    let rows = log.list(limit)?;

    if rows.is_empty() {
        println!("No incidents logged.");
        return Ok(());
    }

    for row in rows {
        println!(
            "#{:<4} {:<30} peak {:.2}  {}  [{} frames] {}",
            row.id, row.event_type, row.peak_confidence, row.started_at, row.frame_count, row.status
        );
    }
    Ok(())
}

fn cmd_categories() -> Result<()> {
    for category in ALL_CATEGORIES {
        let marker = if category.is_alertable() { "alertable" } else { "background" };
        println!("{:<14} {}", category.as_str(), marker);
    }
    Ok(())
}
