//! Demo command
//!
//! Usage: auditlog demo [--markers <FILE>] [--profile <PROFILE>] [--fail]
//!
//! Runs `bank::Account::transfer` through the interceptor with the tracing
//! sink, so the records land on the configured log output.

use auditlog_core::logging_facility::{init, Profile};
use auditlog_core::{
    call_args, load_markers, method_debug_info, Call, CallSignature, DebugInfoTable, Interceptor,
    MarkerRegistry, Sensitive, TracingSink,
};
use clap::{Args, ValueEnum};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

const ACCOUNT: &str = "bank::Account";

/// Markers used when no marker file is given
const DEFAULT_MARKERS: &str = r#"
[[method]]
type = "bank::Account"
method = "transfer"

[method.composite]
business = "transfer"
level = "INFO"

[method.failure]
business = "transfer rejected"
"#;

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Marker file (default: built-in transfer markers)
    #[arg(short, long)]
    pub markers: Option<PathBuf>,

    /// Log output profile
    #[arg(short, long, value_enum, default_value_t = DemoProfile::Development)]
    pub profile: DemoProfile,

    /// Request more than the balance so the call fails
    #[arg(long)]
    pub fail: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoProfile {
    Development,
    Production,
}

impl From<DemoProfile> for Profile {
    fn from(profile: DemoProfile) -> Self {
        match profile {
            DemoProfile::Development => Profile::Development,
            DemoProfile::Production => Profile::Production,
        }
    }
}

#[derive(Debug)]
struct InsufficientFunds {
    balance: i64,
    requested: i64,
}

impl fmt::Display for InsufficientFunds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "insufficient funds: balance {}, requested {}",
            self.balance, self.requested
        )
    }
}

impl std::error::Error for InsufficientFunds {}

struct Account {
    balance: i64,
    interceptor: Interceptor,
    transfer_signature: CallSignature,
}

impl Account {
    fn new(balance: i64, interceptor: Interceptor) -> Self {
        Self {
            balance,
            interceptor,
            transfer_signature: CallSignature::new(ACCOUNT, "transfer")
                .with_parameter_names(["amount", "target", "pin"]),
        }
    }

    fn transfer(
        &mut self,
        amount: i64,
        target: &str,
        pin: Sensitive<String>,
    ) -> Result<i64, InsufficientFunds> {
        let args = call_args!(amount, target, pin);
        let Self {
            balance,
            interceptor,
            transfer_signature,
        } = self;
        interceptor.around(&Call::new(transfer_signature, &args), || {
            if amount > *balance {
                return Err(InsufficientFunds {
                    balance: *balance,
                    requested: amount,
                });
            }
            *balance -= amount;
            Ok(*balance)
        })
    }
}

/// Debug metadata for the demo account
///
/// The recorded line is this registration site, not the line of
/// `Account::transfer`, so demo records point here.
fn debug_table() -> Result<DebugInfoTable, Box<dyn std::error::Error>> {
    let mut table = DebugInfoTable::new();
    table.register(ACCOUNT, "transfer", method_debug_info!([amount, target, pin]))?;
    Ok(table)
}

/// Execute demo command
pub fn execute(args: DemoArgs) -> Result<(), Box<dyn std::error::Error>> {
    init(args.profile.into());

    let registry = match &args.markers {
        Some(path) => load_markers(path)?,
        None => MarkerRegistry::from_toml_str(DEFAULT_MARKERS)?,
    };
    let interceptor = Interceptor::new(
        Arc::new(TracingSink::new()),
        Arc::new(registry),
        Arc::new(debug_table()?),
    );

    let mut account = Account::new(100, interceptor);
    let amount = if args.fail { 250 } else { 40 };
    match account.transfer(amount, "A1", Sensitive::new("4321".to_string())) {
        Ok(balance) => println!("transfer ok: balance {}", balance),
        Err(e) => println!("transfer failed: {}", e),
    }
    Ok(())
}
