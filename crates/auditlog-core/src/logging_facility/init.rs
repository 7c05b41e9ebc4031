//! Logging initialization

use auditlog_core_types::schema::LOG_TARGET;
use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, call records from DEBUG up
    Development,
    /// JSON output, call records from INFO up
    Production,
    /// No output; tests install a capture layer instead
    Test,
}

impl Profile {
    /// Filter directive used when `RUST_LOG` is unset
    pub fn default_directive(&self) -> String {
        match self {
            Profile::Development => format!("{}=debug", LOG_TARGET),
            Profile::Production => format!("{}=info", LOG_TARGET),
            Profile::Test => "off".to_string(),
        }
    }
}

static INIT_ONCE: Once = Once::new();

fn env_filter(profile: Profile) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(profile.default_directive()))
}

/// Initialize the logging facility
///
/// Installs the global subscriber for `profile`. Only the first call has
/// an effect; later calls and calls made after another global subscriber
/// was installed are no-ops.
///
/// # Example
///
/// ```
/// use auditlog_core::logging_facility::{init, Profile};
///
/// init(Profile::Production);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(env_filter(profile))
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter(profile))
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
        // Losing the race to another subscriber leaves that one in place
        installed.ok();
    });
}
