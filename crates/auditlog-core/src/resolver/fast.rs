use super::{ensure_arity, MetadataResolver};
use crate::errors::Result;
use crate::model::{Call, CallMetadata, SourceLine};

/// Resolution from the runtime signature alone
///
/// Never performs a lookup and always yields [`SourceLine::Local`]. When the
/// host supplies no parameter names, positional names `arg0..argN` stand in
/// for them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastResolver;

impl FastResolver {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataResolver for FastResolver {
    fn resolve(&self, call: &Call<'_>) -> Result<CallMetadata> {
        let signature = call.signature;
        let parameter_names = match &signature.parameter_names {
            Some(names) => names.clone(),
            None => (0..call.args.len()).map(|i| format!("arg{}", i)).collect(),
        };
        ensure_arity(call, &parameter_names)?;

        Ok(CallMetadata {
            type_name: signature.id.type_name.clone(),
            simple_type_name: signature.simple_type_name.clone(),
            method_name: signature.id.method_name.clone(),
            parameter_names,
            source_line: SourceLine::Local,
        })
    }
}
