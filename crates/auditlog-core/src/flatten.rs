//! Array flattening for parameter rendering
//!
//! Raw arrays render as `<element>[<len>]`, which tells a reader nothing
//! about the argument. Before parameter values are placed in an entry
//! message they are flattened into ordered lists of generic values.

use crate::model::{ArrayValue, Value};

/// Flatten an array value into an ordered list
///
/// Non-array values are returned unchanged (not wrapped). Arrays become a
/// `Value::List` of the same length and order with each element boxed into
/// its matching `Value` variant. Object arrays keep their elements as they
/// are. Unclassified arrays flatten to an empty list.
///
/// # Example
///
/// ```
/// use auditlog_core::{flatten, AsValue, Value};
///
/// let flat = flatten(&vec![1i32, 2].as_value());
/// assert_eq!(flat, Value::List(vec![Value::I32(1), Value::I32(2)]));
///
/// assert_eq!(flatten(&Value::I64(7)), Value::I64(7));
/// ```
pub fn flatten(value: &Value) -> Value {
    match value {
        Value::Array(array) => Value::List(flatten_array(array)),
        other => other.clone(),
    }
}

/// Box every element of an array into a generic value
pub fn flatten_array(array: &ArrayValue) -> Vec<Value> {
    fn boxed<T: Copy>(items: &[T], to_value: fn(T) -> Value) -> Vec<Value> {
        items.iter().copied().map(to_value).collect()
    }

    match array {
        ArrayValue::Object(items) => items.clone(),
        ArrayValue::I8(items) => boxed(items, Value::I8),
        ArrayValue::I16(items) => boxed(items, Value::I16),
        ArrayValue::I32(items) => boxed(items, Value::I32),
        ArrayValue::I64(items) => boxed(items, Value::I64),
        ArrayValue::F32(items) => boxed(items, Value::F32),
        ArrayValue::F64(items) => boxed(items, Value::F64),
        ArrayValue::Bool(items) => boxed(items, Value::Bool),
        ArrayValue::Char(items) => boxed(items, Value::Char),
        ArrayValue::Byte(items) => boxed(items, Value::U8),
        ArrayValue::Other { .. } => Vec::new(),
    }
}
