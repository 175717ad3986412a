#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use command::{
    AskInput, AskStrategy, CommandStrategy, InfoStrategy, InitStrategy, ListStrategy,
    VersionStrategy,
};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "faqbot")]
#[command(about = "E-commerce FAQ assistant", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/faqbot/config.json
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Log matching decisions to stderr
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question, or chat interactively
    Ask {
        /// Single message to answer
        #[arg(short = 'm', long)]
        message: Option<String>,

        /// Show the best scoring questions after the answer
        #[arg(short = 'e', long)]
        explain: bool,

        /// Number of candidates shown with --explain
        #[arg(short = 'n', long, default_value_t = 3)]
        top: usize,
    },
    /// List knowledge base categories and questions
    List,
    /// Show configuration
    Info,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config_path = cli.config;

    match cli.command {
        Commands::Ask {
            message,
            explain,
            top,
        } => AskStrategy.execute(AskInput {
            config_path,
            message,
            explain,
            top,
        }),
        Commands::List => ListStrategy.execute(config_path),
        Commands::Info => InfoStrategy.execute(config_path),
        Commands::Init => InitStrategy.execute(()),
        Commands::Version => VersionStrategy.execute(()),
    }
}
