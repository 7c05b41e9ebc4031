//! Generic values for call arguments and results
//!
//! The host converts arguments and return values into [`Value`] through
//! [`AsValue`]. Arrays keep their element kind in [`ArrayValue`] until the
//! message assembler flattens them (see [`crate::flatten`]).

use auditlog_core_types::{Sensitive, REDACTED};
use std::fmt;

/// A loggable argument or return value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(String),
    /// Pre-rendered representation of an arbitrary host value
    Object(String),
    /// A value wrapped in `Sensitive`
    Redacted,
    /// Ordered sequence, the output of flattening
    List(Vec<Value>),
    /// Raw array, rendered as `<element>[<len>]` until flattened
    Array(ArrayValue),
}

impl Value {
    /// Capture a host value through its `Debug` representation
    pub fn object<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Value::Object(format!("{:?}", value))
    }

    /// An array whose element kind the core does not classify
    ///
    /// Flattens to an empty sequence.
    pub fn opaque_array(element_type: impl Into<String>, len: usize) -> Self {
        Value::Array(ArrayValue::Other {
            element_type: element_type.into(),
            len,
        })
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Char(v) => write!(f, "{}", v),
            Value::I8(v) => write!(f, "{}", v),
            Value::I16(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::U8(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            // Debug keeps the fraction on whole numbers: 1.0, not 1
            Value::F32(v) => write!(f, "{:?}", v),
            Value::F64(v) => write!(f, "{:?}", v),
            Value::Str(s) | Value::Object(s) => f.write_str(s),
            Value::Redacted => f.write_str(REDACTED),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Array(array) => write!(f, "{}[{}]", array.element_type(), array.len()),
        }
    }
}

/// An array value, classified by element kind
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayValue {
    /// Array of references; elements are already generic values
    Object(Vec<Value>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    Bool(Vec<bool>),
    Char(Vec<char>),
    Byte(Vec<u8>),
    /// Unclassified element kind
    Other { element_type: String, len: usize },
}

impl ArrayValue {
    pub fn len(&self) -> usize {
        match self {
            ArrayValue::Object(v) => v.len(),
            ArrayValue::I8(v) => v.len(),
            ArrayValue::I16(v) => v.len(),
            ArrayValue::I32(v) => v.len(),
            ArrayValue::I64(v) => v.len(),
            ArrayValue::F32(v) => v.len(),
            ArrayValue::F64(v) => v.len(),
            ArrayValue::Bool(v) => v.len(),
            ArrayValue::Char(v) => v.len(),
            ArrayValue::Byte(v) => v.len(),
            ArrayValue::Other { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn element_type(&self) -> &str {
        match self {
            ArrayValue::Object(_) => "object",
            ArrayValue::I8(_) => "i8",
            ArrayValue::I16(_) => "i16",
            ArrayValue::I32(_) => "i32",
            ArrayValue::I64(_) => "i64",
            ArrayValue::F32(_) => "f32",
            ArrayValue::F64(_) => "f64",
            ArrayValue::Bool(_) => "bool",
            ArrayValue::Char(_) => "char",
            ArrayValue::Byte(_) => "u8",
            ArrayValue::Other { element_type, .. } => element_type,
        }
    }
}

/// Conversion of host values into [`Value`]
pub trait AsValue {
    fn as_value(&self) -> Value;
}

macro_rules! impl_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl AsValue for $ty {
                fn as_value(&self) -> Value {
                    Value::$variant(*self)
                }
            }
        )*
    };
}

impl_scalar!(
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u64 => U64,
    f32 => F32,
    f64 => F64,
);

impl AsValue for isize {
    fn as_value(&self) -> Value {
        Value::I64(*self as i64)
    }
}

impl AsValue for u16 {
    fn as_value(&self) -> Value {
        Value::U64(u64::from(*self))
    }
}

impl AsValue for u32 {
    fn as_value(&self) -> Value {
        Value::U64(u64::from(*self))
    }
}

impl AsValue for usize {
    fn as_value(&self) -> Value {
        Value::U64(*self as u64)
    }
}

impl AsValue for str {
    fn as_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl AsValue for String {
    fn as_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

/// Unit results log as `null`
impl AsValue for () {
    fn as_value(&self) -> Value {
        Value::Null
    }
}

impl AsValue for Value {
    fn as_value(&self) -> Value {
        self.clone()
    }
}

impl<T: AsValue + ?Sized> AsValue for &T {
    fn as_value(&self) -> Value {
        (**self).as_value()
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, AsValue::as_value)
    }
}

impl<T> AsValue for Sensitive<T> {
    fn as_value(&self) -> Value {
        Value::Redacted
    }
}

impl<T: ArrayElement> AsValue for [T] {
    fn as_value(&self) -> Value {
        Value::Array(T::to_array(self))
    }
}

impl<T: ArrayElement> AsValue for Vec<T> {
    fn as_value(&self) -> Value {
        Value::Array(T::to_array(self))
    }
}

impl<T: ArrayElement, const N: usize> AsValue for [T; N] {
    fn as_value(&self) -> Value {
        Value::Array(T::to_array(self))
    }
}

/// Element types that can form a classified array
pub trait ArrayElement: Sized {
    fn to_array(items: &[Self]) -> ArrayValue;
}

macro_rules! impl_primitive_element {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ArrayElement for $ty {
                fn to_array(items: &[Self]) -> ArrayValue {
                    ArrayValue::$variant(items.to_vec())
                }
            }
        )*
    };
}

impl_primitive_element!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    char => Char,
    u8 => Byte,
);

impl ArrayElement for String {
    fn to_array(items: &[Self]) -> ArrayValue {
        ArrayValue::Object(items.iter().map(AsValue::as_value).collect())
    }
}

impl ArrayElement for &str {
    fn to_array(items: &[Self]) -> ArrayValue {
        ArrayValue::Object(items.iter().map(|s| Value::Str((*s).to_string())).collect())
    }
}

impl ArrayElement for Value {
    fn to_array(items: &[Self]) -> ArrayValue {
        ArrayValue::Object(items.to_vec())
    }
}

/// Nested arrays become object arrays whose elements stay raw arrays
impl<T: ArrayElement> ArrayElement for Vec<T> {
    fn to_array(items: &[Self]) -> ArrayValue {
        ArrayValue::Object(
            items
                .iter()
                .map(|inner| Value::Array(T::to_array(inner)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_display() {
        assert_eq!(50i32.as_value().to_string(), "50");
        assert_eq!(true.as_value().to_string(), "true");
        assert_eq!(1.0f64.as_value().to_string(), "1.0");
        assert_eq!("A1".as_value().to_string(), "A1");
        assert_eq!(().as_value().to_string(), "null");
    }

    #[test]
    fn test_option_maps_none_to_null() {
        assert_eq!(None::<i32>.as_value(), Value::Null);
        assert_eq!(Some(3u32).as_value(), Value::U64(3));
    }

    #[test]
    fn test_sensitive_is_redacted() {
        let pin = Sensitive::new(1234);
        assert_eq!(pin.as_value(), Value::Redacted);
        assert_eq!(pin.as_value().to_string(), REDACTED);
    }

    #[test]
    fn test_raw_array_renders_kind_and_len() {
        let value = vec![1i32, 2, 3].as_value();
        assert!(value.is_array());
        assert_eq!(value.to_string(), "i32[3]");

        let bytes: &[u8] = b"ab";
        assert_eq!(bytes.as_value().to_string(), "u8[2]");
    }

    #[test]
    fn test_string_array_is_object_array() {
        let value = vec!["a".to_string(), "b".to_string()].as_value();
        assert_eq!(
            value,
            Value::Array(ArrayValue::Object(vec![
                Value::Str("a".to_string()),
                Value::Str("b".to_string())
            ]))
        );
    }

    #[test]
    fn test_nested_arrays_keep_inner_arrays_raw() {
        let value = vec![vec![1i64, 2], vec![3]].as_value();
        match value {
            Value::Array(ArrayValue::Object(items)) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].to_string(), "i64[2]");
            }
            other => panic!("expected object array, got {:?}", other),
        }
    }

    #[test]
    fn test_list_display() {
        let list = Value::List(vec![Value::I32(1), Value::Str("x".to_string()), Value::Null]);
        assert_eq!(list.to_string(), "[1, x, null]");
    }

    #[test]
    fn test_object_captures_debug() {
        #[derive(Debug)]
        struct Payee {
            #[allow(dead_code)]
            id: u32,
        }
        assert_eq!(Value::object(&Payee { id: 7 }).to_string(), "Payee { id: 7 }");
    }
}
