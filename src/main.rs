//! Deckweave - styled PowerPoint deck generator
//!
//! # Usage
//!
//! ```bash
//! # Build the research deck (styled_research_presentation.pptx)
//! deckweave
//!
//! # Build a deck described in YAML
//! deckweave generate --config deck.yaml --output out.pptx
//!
//! # Print the text of every shape of a saved deck
//! deckweave check research_presentation.pptx
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deckweave::deck::{self, DEFAULT_CHECK_PATH, DeckSpec, GenerateOptions, config, inspect};

/// Deckweave - styled PowerPoint deck generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a deck and save it (the default)
    Generate(GenerateArgs),
    /// Print the text of every shape of a saved deck
    Check {
        /// Presentation to read
        #[arg(value_name = "FILE", default_value = DEFAULT_CHECK_PATH)]
        path: PathBuf,
    },
    /// Print the built-in research deck as YAML
    Config,
}

#[derive(clap::Args, Debug, Default)]
struct GenerateArgs {
    /// YAML deck description; the built-in research deck when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output path, overriding the deck's own
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Leave out pictures whose file does not exist
    #[arg(long)]
    skip_missing_images: bool,
}

fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let spec = match args.config {
        Some(ref path) => config::load(path)
            .with_context(|| format!("Failed to load deck config {}", path.display()))?,
        None => DeckSpec::research_default(),
    };

    let options = GenerateOptions {
        skip_missing_images: args.skip_missing_images,
        output: args.output,
    };
    let (path, summary) = deck::generate(&spec, &options).context("Failed to generate deck")?;
    debug!(?summary, "generated deck");

    println!(
        "シンプルで見やすいデザインのPowerPointファイル '{}' が作成されました。",
        path.display()
    );
    Ok(())
}

fn run_check(path: PathBuf) -> anyhow::Result<()> {
    let slides = inspect::collect_text(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    for texts in slides {
        for text in texts {
            println!("{}", text);
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command.unwrap_or_else(|| Command::Generate(GenerateArgs::default())) {
        Command::Generate(args) => run_generate(args),
        Command::Check { path } => run_check(path),
        Command::Config => {
            print!("{}", config::to_yaml_string(&DeckSpec::research_default())?);
            Ok(())
        },
    }
}
