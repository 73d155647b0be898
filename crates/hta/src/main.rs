//! hta CLI - build-time `.htaccess` generator.
//!
//! Provides commands for:
//! - `build`: Generate `.htaccess` into a built site's output directory
//! - `check`: Print the directives a build would generate

mod commands;
mod error;
mod output;
mod routes;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CheckArgs};
use output::Output;

/// hta - build-time `.htaccess` generator.
#[derive(Parser)]
#[command(name = "hta", version, about)]
struct Cli {
    /// Enable verbose output (log rule counts and skipped routes).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate .htaccess for a built site.
    Build(BuildArgs),
    /// Print the directives without writing anything.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
