//! IGV track worker main executable

pub mod common;
pub mod err;
pub mod families;
pub mod igv;

use clap::{Args, Parser, Subcommand};
use console::{Emoji, Term};

/// CLI parser based on clap.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "igv.js track configuration for seqr families",
    long_about = "This tool derives the igv.js read viewer configuration from a family's sample files"
)]
struct Cli {
    /// Commonly used arguments
    #[command(flatten)]
    common: common::Args,

    /// The sub command to run
    #[command(subcommand)]
    command: Commands,
}

/// Enum supporting the parsing of top-level commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// igv.js related commands.
    Igv(Igv),
}

/// Parsing of "igv *" sub commands.
#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
struct Igv {
    /// The sub command to run
    #[command(subcommand)]
    command: IgvCommands,
}

/// Enum supporting the parsing of "igv *" sub commands.
#[derive(Debug, Subcommand)]
enum IgvCommands {
    Tracks(igv::cli::Args),
    Families(families::cli::Args),
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Build a tracing subscriber according to the configuration in `cli.common`.
    let collector = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(match cli.common.verbose.log_level() {
            Some(level) => match level {
                log::Level::Error => tracing::Level::ERROR,
                log::Level::Warn => tracing::Level::WARN,
                log::Level::Info => tracing::Level::INFO,
                log::Level::Debug => tracing::Level::DEBUG,
                log::Level::Trace => tracing::Level::TRACE,
            },
            None => tracing::Level::INFO,
        })
        .compact()
        .finish();

    // Install collector and go into sub commands.
    let term = Term::stderr();
    tracing::subscriber::with_default(collector, || {
        match &cli.command {
            Commands::Igv(igv) => match &igv.command {
                IgvCommands::Tracks(args) => igv::cli::run(&cli.common, args)?,
                IgvCommands::Families(args) => families::cli::run(&cli.common, args)?,
            },
        }

        Ok::<(), anyhow::Error>(())
    })?;
    term.write_line(&format!("All done. Have a nice day!{}", Emoji(" 😃", "")))?;

    Ok(())
}
