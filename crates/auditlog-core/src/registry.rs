//! Marker registry
//!
//! Maps method identifiers to their markers. Populated once at start-up,
//! either in code through [`MarkerRegistry::register`] or from a marker file
//! (see [`crate::config`]), then shared read-only behind an `Arc`.

use crate::errors::Result;
use crate::model::{Marker, MarkerSet, MethodId};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MarkerRegistry {
    methods: HashMap<MethodId, MarkerSet>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a marker to a method
    ///
    /// # Errors
    ///
    /// - `InvalidMarker` if the business name is blank
    /// - `DuplicateMarker` if the method already has a marker of that kind
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        method_name: impl Into<String>,
        marker: Marker,
    ) -> Result<()> {
        let id = MethodId::new(type_name, method_name);
        let method = id.to_string();
        let set = self.methods.entry(id.clone()).or_default();
        let outcome = set.insert(&method, marker);
        if set.is_empty() {
            self.methods.remove(&id);
        }
        outcome
    }

    /// Markers of a method, if it is instrumented
    pub fn markers(&self, id: &MethodId) -> Option<&MarkerSet> {
        self.methods.get(id)
    }

    /// Registered methods sorted by type then method name
    pub fn iter(&self) -> Vec<(&MethodId, &MarkerSet)> {
        let mut entries: Vec<_> = self.methods.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AuditLogError;
    use crate::model::{FailureMarker, PhaseMarker};

    #[test]
    fn test_register_and_lookup() {
        let mut registry = MarkerRegistry::new();
        registry
            .register(
                "bank::Account",
                "transfer",
                Marker::Composite(PhaseMarker::new("transfer")),
            )
            .unwrap();
        registry
            .register(
                "bank::Account",
                "transfer",
                Marker::Failure(FailureMarker::new("transfer failed")),
            )
            .unwrap();

        let set = registry
            .markers(&MethodId::new("bank::Account", "transfer"))
            .unwrap();
        assert_eq!(set.markers().len(), 2);
        assert_eq!(registry.len(), 1);
        assert!(registry
            .markers(&MethodId::new("bank::Account", "close"))
            .is_none());
    }

    #[test]
    fn test_rejected_first_marker_leaves_no_entry() {
        let mut registry = MarkerRegistry::new();
        let err = registry
            .register("bank::Account", "close", Marker::Entry(PhaseMarker::new("")))
            .unwrap_err();

        assert!(matches!(err, AuditLogError::InvalidMarker { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_iter_is_sorted() {
        let mut registry = MarkerRegistry::new();
        for method in ["withdraw", "deposit", "close"] {
            registry
                .register("bank::Account", method, Marker::Entry(PhaseMarker::new(method)))
                .unwrap();
        }

        let methods: Vec<_> = registry
            .iter()
            .into_iter()
            .map(|(id, _)| id.method_name.as_str())
            .collect();
        assert_eq!(methods, vec!["close", "deposit", "withdraw"]);
    }
}
