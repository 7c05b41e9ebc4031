use crate::model::Value;
use std::fmt;

/// Identifies a method by owner type name and method name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId {
    pub type_name: String,
    pub method_name: String,
}

impl MethodId {
    pub fn new(type_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            method_name: method_name.into(),
        }
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.method_name)
    }
}

/// Signature descriptor delivered by the host for an intercepted call
///
/// Usually built once per method with [`crate::call_signature!`] and reused
/// for every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSignature {
    pub id: MethodId,
    pub simple_type_name: String,
    /// Declared parameter names, when the host knows them
    pub parameter_names: Option<Vec<String>>,
}

impl CallSignature {
    pub fn new(type_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        let id = MethodId::new(type_name, method_name);
        let simple_type_name = simple_name(&id.type_name).to_string();
        Self {
            id,
            simple_type_name,
            parameter_names: None,
        }
    }

    pub fn with_parameter_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameter_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn type_name(&self) -> &str {
        &self.id.type_name
    }

    pub fn method_name(&self) -> &str {
        &self.id.method_name
    }
}

/// One intercepted call: its signature and actual argument values
#[derive(Debug, Clone, Copy)]
pub struct Call<'a> {
    pub signature: &'a CallSignature,
    pub args: &'a [Value],
}

impl<'a> Call<'a> {
    pub fn new(signature: &'a CallSignature, args: &'a [Value]) -> Self {
        Self { signature, args }
    }
}

/// Last path segment of a type name, ignoring generic arguments
///
/// `bank::Account` -> `Account`, `bank::Ledger<u64>` -> `Ledger`,
/// `com.bank.Account` -> `Account`.
fn simple_name(type_name: &str) -> &str {
    let base = type_name.split('<').next().unwrap_or(type_name);
    base.rsplit(|c: char| c == ':' || c == '.')
        .find(|segment| !segment.is_empty())
        .unwrap_or(base)
}
