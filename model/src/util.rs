use serde::de::Unexpected;
use serde_json::Value;

pub fn to_unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Other("null"),
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Unexpected::Signed(i);
            }

            if let Some(u) = n.as_u64() {
                return Unexpected::Unsigned(u);
            }

            Unexpected::Float(n.as_f64().unwrap_or(f64::NAN))
        }
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

/// Short name of a json value's kind, used in type error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Lower-cases a wire code and turns dashes into spaces.
pub fn default_name(value: &str) -> String {
    value.to_lowercase().replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_kind() {
        assert_eq!(value_kind(&json!(1.5)), "float");
        assert_eq!(value_kind(&json!(1)), "int");
        assert_eq!(value_kind(&json!("a")), "string");
    }

    #[test]
    fn test_default_name() {
        assert_eq!(default_name("In-Transit"), "in transit");
        assert_eq!(default_name("12"), "12");
        assert_eq!(default_name("late_night"), "late_night");
    }
}
