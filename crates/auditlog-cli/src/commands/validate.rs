//! Validate command
//!
//! Usage: auditlog validate <FILE> [--json]

use auditlog_core::config::MarkerConfig;
use auditlog_core::{load_markers, MarkerSet, PhaseMarker};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Marker file (TOML)
    pub file: PathBuf,

    /// Print the normalised configuration as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute validate command
pub fn execute(args: ValidateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let registry = load_markers(&args.file)?;

    if args.json {
        let config = MarkerConfig::from_registry(&registry);
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    for (id, set) in registry.iter() {
        println!("{}: {}", id, describe(set));
    }
    println!(
        "✓ {} instrumented method(s) in {}",
        registry.len(),
        args.file.display()
    );
    Ok(())
}

/// One-line summary of the markers governing each phase
fn describe(set: &MarkerSet) -> String {
    let phase = |name: &str, marker: Option<&PhaseMarker>| match marker {
        Some(m) => format!(
            "{}[{}, {}, {}]",
            name, m.business_name, m.level, m.location
        ),
        None => format!("{}[-]", name),
    };

    let failure = match set.failure_business() {
        Some(business) => format!("failure[{}]", business),
        None => "failure[-]".to_string(),
    };
    format!(
        "{} {} {}",
        phase("entry", set.entry_marker()),
        phase("exit", set.exit_marker()),
        failure
    )
}
