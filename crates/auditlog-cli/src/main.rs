//! auditlog CLI
//!
//! Command-line interface for auditlog marker files

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "auditlog")]
#[command(about = "auditlog - method-call instrumentation tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check a marker file and list the instrumented methods
    Validate(commands::validate::ValidateArgs),
    /// Run an instrumented sample call
    Demo(commands::demo::DemoArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Demo(args) => commands::demo::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
