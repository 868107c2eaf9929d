//! Text values at the driver boundary.

use sea_query::Value;

/// Wrap an optional string as a driver value.
///
/// `None` becomes a typed text NULL (`Value::String(None)`), so bound
/// parameters keep their text type.
pub fn text_value(value: Option<String>) -> Value {
    Value::String(value)
}

/// Read a text value returned by the driver.
///
/// Returns the string as stored for `Value::String`, and `None` for NULL and
/// for any other variant.
pub fn stored_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => text,
        other => {
            log::debug!(
                "expected text from the driver, got {} value",
                variant_name(&other)
            );
            None
        }
    }
}

/// Short name of a `Value` variant, for log lines that must not carry the value itself.
pub fn variant_name(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "bool",
        Value::TinyInt(_) | Value::SmallInt(_) | Value::Int(_) | Value::BigInt(_) => "integer",
        Value::TinyUnsigned(_)
        | Value::SmallUnsigned(_)
        | Value::Unsigned(_)
        | Value::BigUnsigned(_) => "unsigned",
        Value::Float(_) | Value::Double(_) => "float",
        Value::String(_) => "text",
        Value::Char(_) => "char",
        Value::Bytes(_) => "bytes",
        _ => "other",
    }
}
