//! Marker file configuration
//!
//! Marker files are TOML documents with one `[[method]]` table per
//! instrumented method:
//!
//! ```toml
//! [[method]]
//! type = "bank::Account"
//! method = "transfer"
//!
//! [method.composite]
//! business = "transfer"
//! level = "INFO"
//! location = "DEFAULT"
//!
//! [method.failure]
//! business = "transfer failed"
//! ```
//!
//! `level` defaults to `DEBUG` and `location` to `DEFAULT`. Failure markers
//! accept only `business`.

use crate::errors::{AuditLogError, Result};
use crate::model::{FailureMarker, Marker, PhaseMarker};
use crate::registry::MarkerRegistry;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parsed marker file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkerConfig {
    #[serde(default, rename = "method")]
    pub methods: Vec<MethodMarkers>,
}

/// Markers declared for one method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodMarkers {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(rename = "method")]
    pub method_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite: Option<PhaseMarker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<PhaseMarker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<PhaseMarker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureMarker>,
}

impl MethodMarkers {
    fn into_markers(self) -> Vec<Marker> {
        let mut markers = Vec::new();
        markers.extend(self.composite.map(Marker::Composite));
        markers.extend(self.entry.map(Marker::Entry));
        markers.extend(self.exit.map(Marker::Exit));
        markers.extend(self.failure.map(Marker::Failure));
        markers
    }
}

impl MarkerConfig {
    /// Parse a marker file
    ///
    /// # Errors
    ///
    /// `Config` on malformed TOML, unknown keys or unknown level/location
    /// names.
    pub fn parse(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| AuditLogError::Config {
            message: e.to_string(),
        })
    }

    /// Build a registry from the declared markers
    ///
    /// # Errors
    ///
    /// - `InvalidMarker` for a blank type or method name, or a method entry
    ///   that declares no marker
    /// - any error of [`MarkerRegistry::register`]
    pub fn into_registry(self) -> Result<MarkerRegistry> {
        let mut registry = MarkerRegistry::new();
        for entry in self.methods {
            let method = format!("{}.{}", entry.type_name, entry.method_name);
            if entry.type_name.trim().is_empty() || entry.method_name.trim().is_empty() {
                return Err(AuditLogError::InvalidMarker {
                    method,
                    reason: "type and method must be non-empty".to_string(),
                });
            }

            let type_name = entry.type_name.clone();
            let method_name = entry.method_name.clone();
            let markers = entry.into_markers();
            if markers.is_empty() {
                return Err(AuditLogError::InvalidMarker {
                    method,
                    reason: "no markers declared".to_string(),
                });
            }
            for marker in markers {
                registry.register(type_name.clone(), method_name.clone(), marker)?;
            }
        }
        Ok(registry)
    }

    /// Normalised configuration of a registry, with defaults spelled out
    pub fn from_registry(registry: &MarkerRegistry) -> Self {
        let methods = registry
            .iter()
            .into_iter()
            .map(|(id, set)| {
                let mut entry = MethodMarkers {
                    type_name: id.type_name.clone(),
                    method_name: id.method_name.clone(),
                    composite: None,
                    entry: None,
                    exit: None,
                    failure: None,
                };
                for marker in set.markers() {
                    match marker {
                        Marker::Composite(m) => entry.composite = Some(m),
                        Marker::Entry(m) => entry.entry = Some(m),
                        Marker::Exit(m) => entry.exit = Some(m),
                        Marker::Failure(m) => entry.failure = Some(m),
                    }
                }
                entry
            })
            .collect();
        Self { methods }
    }
}

impl MarkerRegistry {
    /// Build a registry from marker file contents
    ///
    /// # Errors
    ///
    /// See [`MarkerConfig::parse`] and [`MarkerConfig::into_registry`].
    pub fn from_toml_str(input: &str) -> Result<Self> {
        MarkerConfig::parse(input)?.into_registry()
    }
}

/// Load a marker file from disk
///
/// # Errors
///
/// `Io` if the file cannot be read, otherwise as
/// [`MarkerRegistry::from_toml_str`].
pub fn load_markers(path: impl AsRef<Path>) -> Result<MarkerRegistry> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| AuditLogError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    MarkerRegistry::from_toml_str(&contents)
}
