mod commands;
mod config;
mod console;

use clap::{Parser, Subcommand};
use fairplay_core::FairplayError;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fairplay")]
#[command(about = "Provably fair Rock-Paper-Scissors for any odd number of moves")]
#[command(version)]
struct Cli {
    /// Config file (JSON). Defaults to <config dir>/fairplay/config.json if present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer
    Play {
        /// Move names, e.g. Rock Paper Scissors Lizard Spock
        moves: Vec<String>,
        /// Hash algorithm for the commitment (sha3-256, sha256)
        #[arg(short, long)]
        algorithm: Option<String>,
        /// Number of rounds
        #[arg(short, long)]
        rounds: Option<u32>,
    },
    /// Check a revealed key against the digest shown before the round
    Verify {
        /// Revealed key (hex encoded)
        key: String,
        /// Digest shown before the round (hex encoded)
        digest: String,
        /// Hash algorithm used for the commitment
        #[arg(short, long)]
        algorithm: Option<String>,
        /// Move names of that game, to recompute the computer's move
        moves: Vec<String>,
    },
    /// Show who beats whom
    Table {
        /// Move names
        moves: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "fairplay={},fairplay_core={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = config::load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Play {
            moves,
            algorithm,
            rounds,
        } => commands::play(config, moves, algorithm.as_deref(), rounds),
        Commands::Verify {
            key,
            digest,
            algorithm,
            moves,
        } => commands::verify(&config, &key, &digest, algorithm.as_deref(), &moves),
        Commands::Table { moves } => commands::show_table(&config, &moves),
    });

    if let Err(e) = result {
        match e.downcast_ref::<FairplayError>() {
            Some(FairplayError::CryptoInit(msg)) => {
                eprintln!("Failed to initialize cryptography: {}", msg);
            }
            _ => {
                eprintln!("Error: {:#}", e);
            }
        }
        std::process::exit(1);
    }
}
