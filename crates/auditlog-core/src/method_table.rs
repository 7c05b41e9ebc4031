//! Compiled-method metadata source for the precise resolver
//!
//! The precise resolver needs what the host knows about a method beyond its
//! runtime signature: the declared parameter names and the source line.
//! [`MethodTable`] is that lookup; [`DebugInfoTable`] is an in-memory table
//! populated at start-up, typically with [`crate::method_debug_info!`] so
//! the line is captured where the method is registered.

use crate::errors::{AuditLogError, Result};
use crate::model::MethodId;
use std::collections::HashMap;

/// Debug metadata of one method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDebugInfo {
    pub parameter_names: Vec<String>,
    pub line: u32,
}

impl MethodDebugInfo {
    pub fn new<I, S>(parameter_names: I, line: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parameter_names: parameter_names.into_iter().map(Into::into).collect(),
            line,
        }
    }
}

/// Lookup of method debug metadata by owner type and method name
pub trait MethodTable: Send + Sync {
    /// Find the debug metadata of a method
    ///
    /// # Errors
    ///
    /// `MethodNotFound` when the table has no entry for the method.
    fn lookup(&self, type_name: &str, method_name: &str) -> Result<MethodDebugInfo>;
}

/// In-memory method table, read-only once built
#[derive(Debug, Clone, Default)]
pub struct DebugInfoTable {
    methods: HashMap<MethodId, MethodDebugInfo>,
}

impl DebugInfoTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method's debug metadata
    ///
    /// # Errors
    ///
    /// `DuplicateMethod` if the method is already registered. Overloads are
    /// not distinguished by name, so each name may appear once per type.
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        method_name: impl Into<String>,
        info: MethodDebugInfo,
    ) -> Result<()> {
        let id = MethodId::new(type_name, method_name);
        if self.methods.contains_key(&id) {
            return Err(AuditLogError::DuplicateMethod {
                type_name: id.type_name,
                method_name: id.method_name,
            });
        }
        self.methods.insert(id, info);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl MethodTable for DebugInfoTable {
    fn lookup(&self, type_name: &str, method_name: &str) -> Result<MethodDebugInfo> {
        self.methods
            .get(&MethodId::new(type_name, method_name))
            .cloned()
            .ok_or_else(|| AuditLogError::MethodNotFound {
                type_name: type_name.to_string(),
                method_name: method_name.to_string(),
            })
    }
}
