mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use monolith::config::MonolithConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "monolith", version, about = "Affective-state engine for persona chat simulations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create, list, or delete simulations
    Sim {
        #[command(subcommand)]
        action: SimAction,
    },
    /// Classify a stimulus without saving anything
    Probe {
        /// Stimulus text
        text: String,
        /// Score against this simulation's identity and scars
        #[arg(long, conflicts_with = "seed")]
        sim: Option<String>,
        /// Score against the identity of this seed phrase, with no scars
        #[arg(long)]
        seed: Option<String>,
    },
    /// Send one message to a simulation and print the reply
    Chat {
        /// Simulation ID
        id: String,
        /// Message text
        text: String,
    },
    /// Print a simulation's transcript
    History {
        /// Simulation ID
        id: String,
    },
    /// Print a simulation's scar ledger
    Scars {
        /// Simulation ID
        id: String,
    },
    /// Check database health
    Doctor,
}

#[derive(Subcommand)]
enum SimAction {
    /// Create a new simulation
    New {
        #[arg(long)]
        name: Option<String>,
        /// Seed phrase for the identity vector
        #[arg(long)]
        seed: Option<String>,
        /// Extra persona instructions
        #[arg(long)]
        instructions: Option<String>,
    },
    /// List simulations, most recently active first
    List,
    /// Delete a simulation with its scars and transcript
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = MonolithConfig::load()?;

    // Log to stderr so stdout stays clean for command output.
    let filter = EnvFilter::try_new(&config.logging.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Sim { action } => match action {
            SimAction::New {
                name,
                seed,
                instructions,
            } => cli::simulation::create(
                &config,
                name.as_deref(),
                seed.as_deref(),
                instructions.as_deref(),
            )?,
            SimAction::List => cli::simulation::list(&config)?,
            SimAction::Delete { id } => cli::simulation::delete(&config, &id)?,
        },
        Command::Probe { text, sim, seed } => {
            cli::probe::probe(&config, &text, sim.as_deref(), seed.as_deref())?
        }
        Command::Chat { id, text } => cli::chat::chat(&config, &id, &text).await?,
        Command::History { id } => cli::chat::history(&config, &id)?,
        Command::Scars { id } => cli::scars::scars(&config, &id)?,
        Command::Doctor => cli::doctor::doctor(&config)?,
    }

    Ok(())
}
