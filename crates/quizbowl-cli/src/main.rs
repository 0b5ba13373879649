//! quizbowl CLI — argument parsing and command dispatch.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod console;

#[derive(Parser)]
#[command(name = "quizbowl", version, about = "Terminal trivia game")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a trivia session from a question bank
    Play {
        /// Path to the question bank file
        bank: Option<PathBuf>,

        /// Player name, e.g. "Ada Lovelace" (prompted for when omitted)
        #[arg(long)]
        name: Option<String>,

        /// Number of questions to play (prompted for when omitted)
        #[arg(long)]
        questions: Option<usize>,

        /// Seed for the shuffle, for reproducible sessions
        #[arg(long)]
        seed: Option<u64>,

        /// Write a JSON transcript of the session to this path
        #[arg(long)]
        transcript: Option<PathBuf>,

        /// Path to the config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Parse question banks and report validation warnings
    Validate {
        /// Paths to question bank files
        #[arg(required = true)]
        banks: Vec<PathBuf>,
    },

    /// Create a sample config and starter question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizbowl=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            bank,
            name,
            questions,
            seed,
            transcript,
            config,
        } => commands::play::execute(bank, name, questions, seed, transcript, config),
        Commands::Validate { banks } => commands::validate::execute(&banks),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
