use super::{ensure_arity, MetadataResolver};
use crate::errors::Result;
use crate::method_table::MethodTable;
use crate::model::{Call, CallMetadata, SourceLine};
use std::sync::Arc;

/// Resolution through the method table
///
/// Parameter names and the source line come from the table entry; the
/// signature's own parameter names are ignored. A missing entry or an
/// arity mismatch fails the resolution.
#[derive(Clone)]
pub struct PreciseResolver {
    table: Arc<dyn MethodTable>,
}

impl PreciseResolver {
    pub fn new(table: Arc<dyn MethodTable>) -> Self {
        Self { table }
    }
}

impl std::fmt::Debug for PreciseResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreciseResolver").finish_non_exhaustive()
    }
}

impl MetadataResolver for PreciseResolver {
    fn resolve(&self, call: &Call<'_>) -> Result<CallMetadata> {
        let signature = call.signature;
        let info = self
            .table
            .lookup(signature.type_name(), signature.method_name())?;
        ensure_arity(call, &info.parameter_names)?;

        Ok(CallMetadata {
            type_name: signature.id.type_name.clone(),
            simple_type_name: signature.simple_type_name.clone(),
            method_name: signature.id.method_name.clone(),
            parameter_names: info.parameter_names,
            source_line: SourceLine::Line(info.line),
        })
    }
}
