//! Host wiring macros
//!
//! Build the descriptors an instrumented method hands to the
//! [`crate::Interceptor`] without spelling out type names by hand.

/// Build a [`crate::CallSignature`] for a method of `Type`
///
/// The owner type name comes from [`std::any::type_name`], so it matches
/// registrations made with the same function.
///
/// # Example
///
/// ```
/// # use auditlog_core::call_signature;
/// struct Account;
///
/// let sig = call_signature!(Account, "transfer", [amount, target]);
/// assert_eq!(sig.method_name(), "transfer");
/// assert_eq!(sig.simple_type_name, "Account");
/// assert_eq!(
///     sig.parameter_names,
///     Some(vec!["amount".to_string(), "target".to_string()])
/// );
/// ```
#[macro_export]
macro_rules! call_signature {
    ($ty:ty, $method:expr) => {
        $crate::CallSignature::new(::std::any::type_name::<$ty>(), $method)
    };
    ($ty:ty, $method:expr, [$($param:ident),* $(,)?]) => {{
        let names: &[&str] = &[$(stringify!($param)),*];
        $crate::CallSignature::new(::std::any::type_name::<$ty>(), $method)
            .with_parameter_names(names.iter().copied())
    }};
}

/// Convert argument expressions into call values, in order
///
/// # Example
///
/// ```
/// # use auditlog_core::{call_args, Value};
/// let amount = 50i64;
/// let tags = vec!["a", "b"];
/// let args = call_args!(amount, tags);
/// assert_eq!(args[0], Value::I64(50));
/// assert!(args[1].is_array());
/// ```
#[macro_export]
macro_rules! call_args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::AsValue::as_value(&$arg)),+]
    };
}

/// Build a [`crate::MethodDebugInfo`] recording the invocation line
///
/// The line is the one the macro is invoked on. Invoke it next to the
/// method's declaration for records to point at the method; invoked in a
/// registration function it points at that function instead.
///
/// # Example
///
/// ```
/// # use auditlog_core::method_debug_info;
/// let info = method_debug_info!([amount]);
/// assert_eq!(info.parameter_names, vec!["amount"]);
/// assert_eq!(info.line, line!() - 2);
/// ```
#[macro_export]
macro_rules! method_debug_info {
    ([$($param:ident),* $(,)?]) => {{
        let names: &[&str] = &[$(stringify!($param)),*];
        $crate::MethodDebugInfo::new(names.iter().copied(), line!())
    }};
}

#[cfg(test)]
mod tests {
    use crate::model::Value;

    struct Ledger;

    #[test]
    fn test_signature_without_params() {
        let sig = call_signature!(Ledger, "close");
        assert_eq!(sig.type_name(), std::any::type_name::<Ledger>());
        assert!(sig.parameter_names.is_none());
    }

    #[test]
    fn test_signature_with_empty_param_list() {
        let sig = call_signature!(Ledger, "close", []);
        assert_eq!(sig.parameter_names, Some(Vec::new()));
    }

    #[test]
    fn test_call_args_empty() {
        let args = call_args!();
        assert!(args.is_empty());
    }

    #[test]
    fn test_call_args_keeps_order() {
        let args = call_args!(1i32, "two", 3.0f64);
        assert_eq!(
            args,
            vec![Value::I32(1), Value::Str("two".to_string()), Value::F64(3.0)]
        );
    }
}
