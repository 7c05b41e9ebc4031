//! Marker configuration
//!
//! A marker selects which phases of a call are logged, under which business
//! name, at which severity and with which location policy. Markers are pure
//! configuration: the interception core only reads them.

use crate::errors::{AuditLogError, Result};
use crate::model::{LocationPolicy, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration shared by the composite, entry-only and exit-only markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseMarker {
    #[serde(rename = "business")]
    pub business_name: String,
    #[serde(default)]
    pub level: Severity,
    #[serde(default)]
    pub location: LocationPolicy,
}

impl PhaseMarker {
    /// Create a marker with the default level (DEBUG) and location policy
    pub fn new(business_name: impl Into<String>) -> Self {
        Self {
            business_name: business_name.into(),
            level: Severity::default(),
            location: LocationPolicy::default(),
        }
    }

    pub fn with_level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    pub fn with_location(mut self, location: LocationPolicy) -> Self {
        self.location = location;
        self
    }
}

/// Failure-only marker
///
/// Carries no level or location: failures always log at ERROR with fast
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FailureMarker {
    #[serde(rename = "business")]
    pub business_name: String,
}

impl FailureMarker {
    pub fn new(business_name: impl Into<String>) -> Self {
        Self {
            business_name: business_name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Composite,
    Entry,
    Exit,
    Failure,
}

impl MarkerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerKind::Composite => "composite",
            MarkerKind::Entry => "entry",
            MarkerKind::Exit => "exit",
            MarkerKind::Failure => "failure",
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A marker attached to one method
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// Entry, exit and failure
    Composite(PhaseMarker),
    Entry(PhaseMarker),
    Exit(PhaseMarker),
    Failure(FailureMarker),
}

impl Marker {
    pub fn kind(&self) -> MarkerKind {
        match self {
            Marker::Composite(_) => MarkerKind::Composite,
            Marker::Entry(_) => MarkerKind::Entry,
            Marker::Exit(_) => MarkerKind::Exit,
            Marker::Failure(_) => MarkerKind::Failure,
        }
    }

    pub fn business_name(&self) -> &str {
        match self {
            Marker::Composite(m) | Marker::Entry(m) | Marker::Exit(m) => &m.business_name,
            Marker::Failure(m) => &m.business_name,
        }
    }
}

/// All markers registered for one method, at most one per kind
///
/// The phase accessors apply marker precedence: a specific marker overrides
/// the composite marker for its own phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerSet {
    composite: Option<PhaseMarker>,
    entry: Option<PhaseMarker>,
    exit: Option<PhaseMarker>,
    failure: Option<FailureMarker>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a marker
    ///
    /// # Errors
    ///
    /// - `InvalidMarker` if the business name is blank
    /// - `DuplicateMarker` if a marker of the same kind is already present
    pub fn insert(&mut self, method: &str, marker: Marker) -> Result<()> {
        if marker.business_name().trim().is_empty() {
            return Err(AuditLogError::InvalidMarker {
                method: method.to_string(),
                reason: format!("{} marker has an empty business name", marker.kind()),
            });
        }

        let kind = marker.kind();
        let occupied = match marker {
            Marker::Composite(m) => replace_empty(&mut self.composite, m),
            Marker::Entry(m) => replace_empty(&mut self.entry, m),
            Marker::Exit(m) => replace_empty(&mut self.exit, m),
            Marker::Failure(m) => replace_empty(&mut self.failure, m),
        };
        if occupied {
            return Err(AuditLogError::DuplicateMarker {
                method: method.to_string(),
                kind: kind.to_string(),
            });
        }
        Ok(())
    }

    /// Marker governing the entry phase
    pub fn entry_marker(&self) -> Option<&PhaseMarker> {
        self.entry.as_ref().or(self.composite.as_ref())
    }

    /// Marker governing the exit phase
    pub fn exit_marker(&self) -> Option<&PhaseMarker> {
        self.exit.as_ref().or(self.composite.as_ref())
    }

    /// Business name used for the failure phase
    pub fn failure_business(&self) -> Option<&str> {
        self.failure
            .as_ref()
            .map(|m| m.business_name.as_str())
            .or_else(|| self.composite.as_ref().map(|m| m.business_name.as_str()))
    }

    /// Markers in declaration-kind order
    pub fn markers(&self) -> Vec<Marker> {
        let mut markers = Vec::new();
        if let Some(m) = &self.composite {
            markers.push(Marker::Composite(m.clone()));
        }
        if let Some(m) = &self.entry {
            markers.push(Marker::Entry(m.clone()));
        }
        if let Some(m) = &self.exit {
            markers.push(Marker::Exit(m.clone()));
        }
        if let Some(m) = &self.failure {
            markers.push(Marker::Failure(m.clone()));
        }
        markers
    }

    pub fn is_empty(&self) -> bool {
        self.composite.is_none()
            && self.entry.is_none()
            && self.exit.is_none()
            && self.failure.is_none()
    }
}

/// Store `value` if the slot is empty; returns whether it was occupied
fn replace_empty<T>(slot: &mut Option<T>, value: T) -> bool {
    if slot.is_some() {
        return true;
    }
    *slot = Some(value);
    false
}
