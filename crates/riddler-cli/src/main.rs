//! riddler CLI: play, extend and inspect a riddle bank from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "riddler",
    version,
    about = "Riddle quiz that judges free-text answers by similarity"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Riddle bank JSON file (overrides config)
    #[arg(long, global = true)]
    bank: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the quiz, reading answers from stdin
    Play {
        /// Category to draw from ("混合" or "mixed" for all)
        #[arg(long, default_value = "混合")]
        category: String,

        /// Random seed for a reproducible draw order
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Score one answer against a reference answer
    Check {
        /// Candidate answer
        #[arg(long)]
        answer: String,

        /// Reference answer
        #[arg(long)]
        reference: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Add a riddle to the bank
    Add {
        #[arg(long)]
        question: String,

        #[arg(long)]
        answer: String,

        #[arg(long, default_value = "")]
        explanation: String,

        /// Category label (defaults to "未分类")
        #[arg(long)]
        category: Option<String>,
    },

    /// List categories and their riddle counts
    Categories,

    /// Check the riddle bank for problems
    Validate,

    /// Create a starter config and sample riddle bank
    Init,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("riddler=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let global = commands::GlobalArgs {
        config: cli.config,
        bank: cli.bank,
    };

    let result = match cli.command {
        Commands::Play { category, seed } => commands::play::execute(&global, category, seed),
        Commands::Check {
            answer,
            reference,
            format,
        } => commands::check::execute(&global, answer, reference, format),
        Commands::Add {
            question,
            answer,
            explanation,
            category,
        } => commands::add::execute(&global, question, answer, explanation, category),
        Commands::Categories => commands::categories::execute(&global),
        Commands::Validate => commands::validate::execute(&global),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
