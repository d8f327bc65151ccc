#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that loads and validates Cell Society descriptors.

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use anyhow::{Context, Result};
use cell_society_descriptor::{
    RawDescriptor, SharedMessages, SimulationDescriptor, ValidatedSimulation,
};
use cell_society_messages::MessageBundle;
use cell_society_rules::RuleTable;
use cell_society_system_state_synthesizer::seeded_source;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,cell_society=info";

#[derive(Debug, Parser)]
#[command(name = "cell-society")]
#[command(about = "Validate a Cell Society simulation descriptor")]
struct Args {
    /// Path to the descriptor file (TOML).
    descriptor: PathBuf,

    /// Message bundle used for placeholders and failure messages.
    #[arg(long, value_name = "PATH")]
    messages: Option<PathBuf>,

    /// Seed for reproducible random initial states.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the raw field map before validating.
    #[arg(long)]
    dump: bool,
}

/// Entry point for the Cell Society command-line interface.
fn main() -> Result<ExitCode> {
    init_logging();
    let args = Args::parse();

    let raw = load_descriptor(&args.descriptor)?;
    let messages: SharedMessages = match &args.messages {
        Some(path) => Arc::new(MessageBundle::from_path(path)?),
        None => Arc::new(MessageBundle::english()),
    };
    let descriptor = SimulationDescriptor::from_raw(raw, &RuleTable::builtin(), messages)
        .with_context(|| format!("failed to load {}", args.descriptor.display()))?;

    if args.dump {
        print!("{descriptor}");
    }

    let outcome = match args.seed {
        Some(seed) => descriptor.validate(&mut seeded_source(seed)),
        None => descriptor.validate(&mut rand::thread_rng()),
    };
    match outcome {
        Ok(simulation) => {
            info!(
                path = %args.descriptor.display(),
                locale = descriptor.locale(),
                "descriptor accepted"
            );
            print!("{}", summary(&simulation));
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            error!(path = %args.descriptor.display(), "descriptor rejected");
            eprintln!("{failure}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_descriptor(path: &Path) -> Result<RawDescriptor> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read descriptor {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse descriptor {}", path.display()))
}

fn summary(simulation: &ValidatedSimulation) -> String {
    let mut lines = vec![
        format!("{} ({})", simulation.title, simulation.kind),
        format!("  author: {}", simulation.author),
        format!("  description: {}", simulation.description),
        format!(
            "  grid: {}x{} {} cells, {} edges, grid lines {}",
            simulation.columns,
            simulation.rows,
            simulation.shape,
            simulation.edge_policy,
            if simulation.grid_lines { "on" } else { "off" },
        ),
        format!("  colors: {}", simulation.colors.join(", ")),
        "  initial states:".to_owned(),
    ];
    lines.extend(simulation.initial_states.iter_rows().map(|row| {
        let cells: Vec<String> = row.iter().map(i32::to_string).collect();
        format!("    {}", cells.join(" "))
    }));
    lines.join("\n") + "\n"
}
