//! Wargame - Development Tools

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wargame_core::data::UnitDefaults;
use wargame_tools::scenario::{Scenario, ScenarioError};
use wargame_tools::validate::{validate_file, DataFile};

#[derive(Parser)]
#[command(name = "wargame-tools")]
#[command(about = "Development tools for the wargame combat rules")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a data file
    Validate {
        /// Path to the RON file
        path: PathBuf,
        /// What the file contains
        #[arg(long, value_enum, default_value_t = FileKind::Scenario)]
        kind: FileKind,
    },
    /// Run a scenario and report the outcome of each action
    Run {
        /// Path to the scenario RON file
        path: PathBuf,
        /// Unit defaults overriding the scenario's own
        #[arg(long)]
        defaults: Option<PathBuf>,
        /// Print the report as JSON instead of logging it
        #[arg(long)]
        json: bool,
        /// Write the final battlefield snapshot to this file
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FileKind {
    Scenario,
    Defaults,
}

impl From<FileKind> for DataFile {
    fn from(kind: FileKind) -> Self {
        match kind {
            FileKind::Scenario => DataFile::Scenario,
            FileKind::Defaults => DataFile::UnitDefaults,
        }
    }
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path, kind } => {
            tracing::info!("Validating data file: {}", path.display());
            match validate_file(&path, kind.into()) {
                Ok(()) => {
                    tracing::info!("Validation passed");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    tracing::error!("Validation failed: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Run {
            path,
            defaults,
            json,
            snapshot,
        } => match run(&path, defaults, json, snapshot) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("Scenario run failed: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run(
    path: &Path,
    defaults: Option<PathBuf>,
    json: bool,
    snapshot: Option<PathBuf>,
) -> Result<(), ScenarioError> {
    let scenario = Scenario::load(path)?;
    let defaults = defaults.map(UnitDefaults::load).transpose()?;
    tracing::info!("Running scenario: {}", scenario.name);

    let (report, field) = wargame_tools::runner::run(&scenario, defaults)?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        for unit in &report.units {
            tracing::info!(
                name = %unit.name,
                kind = %unit.kind,
                hit_points = unit.hit_points,
                alive = unit.alive,
                "Final unit state"
            );
        }
    }
    tracing::info!(
        actions = report.actions.len(),
        failures = report.failures(),
        "Scenario finished"
    );

    if let Some(snapshot) = snapshot {
        std::fs::write(&snapshot, field.snapshot()?)?;
        tracing::info!("Snapshot written to {}", snapshot.display());
    }
    Ok(())
}
