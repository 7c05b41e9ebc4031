//! Message assembly
//!
//! Every message starts with the same header:
//!
//! ```text
//! Method: [<location>], Business: [<business>],
//! ```
//!
//! where `<location>` is `type.method(Simple.rs:line)` for a resolved line
//! and `type.method` otherwise. The phase-specific payload follows.

use crate::errors::{AuditLogError, Result};
use crate::flatten::flatten;
use crate::model::{CallMetadata, Value};
use std::fmt::Write;

/// Parameter section rendered for a method without parameters
pub const EMPTY_PARAMS: &str = "{}";

/// Common header of all three message shapes
pub fn header(business: &str, meta: &CallMetadata) -> String {
    format!("Method: [{}], Business: [{}], ", meta, business)
}

/// Entry message: header plus `Params: [{name=value, ...}]`
///
/// Parameters appear in declaration order with array values flattened.
///
/// # Errors
///
/// `Assembly` when there are fewer argument values than parameter names.
pub fn entry_message(business: &str, meta: &CallMetadata, args: &[Value]) -> Result<String> {
    let assembly_error = || AuditLogError::Assembly {
        phase: "entry",
        method: meta.qualified_name(),
    };

    let mut message = header(business, meta);
    message.push_str("Params: [");
    if meta.parameter_names.is_empty() {
        message.push_str(EMPTY_PARAMS);
    } else {
        message.push('{');
        for (i, name) in meta.parameter_names.iter().enumerate() {
            let value = args.get(i).ok_or_else(assembly_error)?;
            if i > 0 {
                message.push_str(", ");
            }
            write!(message, "{}={}", name, flatten(value)).map_err(|_| assembly_error())?;
        }
        message.push('}');
    }
    message.push(']');
    Ok(message)
}

/// Exit message: header plus `Result: [<value>]`
pub fn exit_message(business: &str, meta: &CallMetadata, result: &Value) -> String {
    format!("{}Result: [{}]", header(business, meta), result)
}

/// Failure message: header plus `Exception: `
///
/// The error itself travels with the record as its cause.
pub fn failure_message(business: &str, meta: &CallMetadata) -> String {
    format!("{}Exception: ", header(business, meta))
}

/// Line written in place of a business record when instrumentation fails
pub fn fallback_message(type_name: &str, method_name: &str) -> String {
    format!("{}.{} instrumentation error", type_name, method_name)
}
