//! Call-site metadata resolution
//!
//! Two strategies produce a [`CallMetadata`] for an intercepted call:
//!
//! - [`FastResolver`]: signature only, no source line
//! - [`PreciseResolver`]: consults a [`crate::MethodTable`] for declared
//!   parameter names and the source line
//!
//! [`select_resolver`] picks one from the sink's DEBUG state and the
//! marker's [`LocationPolicy`].

mod fast;
mod precise;

pub use fast::FastResolver;
pub use precise::PreciseResolver;

use crate::errors::{AuditLogError, Result};
use crate::model::{Call, CallMetadata, LocationPolicy};

/// Strategy producing call metadata
pub trait MetadataResolver: Send + Sync {
    /// Resolve the metadata of one call
    ///
    /// # Errors
    ///
    /// Any failure is a failure of the whole resolution; no partial
    /// metadata is returned.
    fn resolve(&self, call: &Call<'_>) -> Result<CallMetadata>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverKind {
    Fast,
    Precise,
}

/// Select the resolution strategy
///
/// | sink DEBUG | policy            | strategy |
/// |------------|-------------------|----------|
/// | on         | Default / Enabled | Precise  |
/// | on         | Disabled          | Fast     |
/// | off        | Enabled           | Precise  |
/// | off        | Default / Disabled| Fast     |
pub fn select_resolver(debug_enabled: bool, policy: LocationPolicy) -> ResolverKind {
    match (debug_enabled, policy) {
        (_, LocationPolicy::Enabled) => ResolverKind::Precise,
        (true, LocationPolicy::Default) => ResolverKind::Precise,
        (_, LocationPolicy::Disabled) | (false, LocationPolicy::Default) => ResolverKind::Fast,
    }
}

/// Both strategies must return as many parameter names as there are
/// argument values
fn ensure_arity(call: &Call<'_>, parameter_names: &[String]) -> Result<()> {
    if parameter_names.len() != call.args.len() {
        return Err(AuditLogError::ArityMismatch {
            method: call.signature.id.to_string(),
            expected: parameter_names.len(),
            actual: call.args.len(),
        });
    }
    Ok(())
}
