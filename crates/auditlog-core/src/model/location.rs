use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a marker asks for source-line resolution of its call site
///
/// `Default` defers to the sink: precise resolution is used only while the
/// sink has DEBUG enabled. See [`crate::resolver::select_resolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationPolicy {
    #[serde(alias = "enabled")]
    Enabled,
    #[serde(alias = "disabled")]
    Disabled,
    #[default]
    #[serde(alias = "default")]
    Default,
}

impl LocationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationPolicy::Enabled => "ENABLED",
            LocationPolicy::Disabled => "DISABLED",
            LocationPolicy::Default => "DEFAULT",
        }
    }
}

impl fmt::Display for LocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
