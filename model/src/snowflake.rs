use super::util;
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// A Discord id. Zero stands for "no id", which is how absent ids are represented
/// throughout the activity model.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Snowflake(pub u64);

impl Snowflake {
    pub const NONE: Snowflake = Snowflake(0);

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    /// Lenient decode used by the wire codec: accepts a decimal string or an
    /// unsigned integer, anything else yields `None`.
    pub fn from_value(value: &Value) -> Option<Snowflake> {
        match value {
            Value::String(s) => s.parse().ok(),
            Value::Number(n) => n.as_u64().map(Snowflake),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        Value::String(self.0.to_string())
    }
}

impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value: Value = Deserialize::deserialize(deserializer)?;

        if let Some(i) = value.as_u64() {
            return Ok(Snowflake(i));
        }

        if let Some(s) = value.as_str() {
            return Ok(Snowflake(s.parse().map_err(Error::custom)?));
        }

        Err(Error::invalid_type(
            util::to_unexpected(&value),
            &"a string or u64",
        ))
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Snowflake {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Snowflake(s.parse()?))
    }
}

impl From<u64> for Snowflake {
    fn from(x: u64) -> Self {
        Snowflake(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value() {
        assert_eq!(Snowflake::from_value(&json!("1234")), Some(Snowflake(1234)));
        assert_eq!(Snowflake::from_value(&json!(1234)), Some(Snowflake(1234)));
        assert_eq!(Snowflake::from_value(&json!("abc")), None);
        assert_eq!(Snowflake::from_value(&json!(null)), None);
        assert_eq!(Snowflake::from_value(&json!(-5)), None);
    }

    #[test]
    fn test_deserialize_string_or_int() {
        let a: Snowflake = serde_json::from_str(r#""77""#).unwrap();
        let b: Snowflake = serde_json::from_str("77").unwrap();
        assert_eq!(a, b);
        assert!(serde_json::from_str::<Snowflake>("1.5").is_err());
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&Snowflake(42)).unwrap();
        assert_eq!(json, r#""42""#);
    }
}
