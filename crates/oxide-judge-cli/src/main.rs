//! oxide-judge CLI
//!
//! Replays form validation scenarios and prints the resulting feedback.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_judge_cli::{build_page, render, replay, Scenario};

/// Live form validation, replayed from scenario files.
#[derive(Parser)]
#[command(name = "oxide-judge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario and report every step and final field states.
    Replay {
        /// Scenario file.
        #[arg(env = "OXIDE_JUDGE_SCENARIO")]
        scenario: PathBuf,

        /// Also print the final markup.
        #[arg(long)]
        html: bool,
    },

    /// Print the markup of a scenario's forms once validation is attached.
    Render {
        /// Scenario file.
        #[arg(env = "OXIDE_JUDGE_SCENARIO")]
        scenario: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Replay { scenario, html } => {
            info!(path = %scenario.display(), "replaying scenario");
            let report = replay(&Scenario::load(&scenario)?)?;
            print!("{report}");
            if html {
                println!("\n{}", report.html);
            }
        }

        Commands::Render { scenario } => {
            let page = build_page(&Scenario::load(&scenario)?)?;
            println!("{}", render(&page));
        }
    }

    Ok(())
}
