//! Building blocks shared by the per-field `parse_*` / `put_*_into` / `validate_*`
//! functions. Wire data is always a json object; absent keys, `null` and values of
//! the wrong kind all decode to the field's zero value.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::{ModelError, Payload, Result, Snowflake};

pub fn parse_string(data: &Payload, key: &str) -> Option<String> {
    match data.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

pub fn put_string_into<'a>(
    value: Option<&str>,
    data: &'a mut Payload,
    key: &str,
    defaults: bool,
) -> &'a mut Payload {
    match value {
        Some(value) => {
            data.insert(key.to_owned(), Value::String(value.to_owned()));
        }
        None if defaults => {
            data.insert(key.to_owned(), Value::Null);
        }
        None => {}
    }

    data
}

/// Normalizes `""` to `None` and rejects strings longer than `max` characters.
pub fn validate_string(
    value: Option<String>,
    field: &'static str,
    max: Option<usize>,
) -> Result<Option<String>> {
    let value = match value {
        Some(value) if !value.is_empty() => value,
        _ => return Ok(None),
    };

    if let Some(max) = max {
        let len = value.chars().count();
        if len > max {
            return ModelError::OutOfRange { field, len, max }.into();
        }
    }

    Ok(Some(value))
}

pub fn parse_snowflake(data: &Payload, key: &str) -> Snowflake {
    data.get(key)
        .and_then(Snowflake::from_value)
        .unwrap_or_default()
}

pub fn put_snowflake_into<'a>(
    value: Snowflake,
    data: &'a mut Payload,
    key: &str,
    defaults: bool,
) -> &'a mut Payload {
    if defaults || !value.is_none() {
        data.insert(key.to_owned(), value.to_value());
    }

    data
}

pub fn parse_datetime(data: &Payload, key: &str) -> Option<DateTime<Utc>> {
    data.get(key)
        .and_then(Value::as_i64)
        .and_then(millis_to_datetime)
}

pub fn put_datetime_into<'a>(
    value: Option<DateTime<Utc>>,
    data: &'a mut Payload,
    key: &str,
    defaults: bool,
) -> &'a mut Payload {
    match value {
        Some(value) => {
            data.insert(key.to_owned(), Value::from(value.timestamp_millis()));
        }
        None if defaults => {
            data.insert(key.to_owned(), Value::Null);
        }
        None => {}
    }

    data
}

pub fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

/// Decodes a nested object with `decode`; anything but an object is absence.
pub fn parse_nested<T>(data: &Payload, key: &str, decode: fn(&Payload) -> T) -> Option<T> {
    data.get(key).and_then(Value::as_object).map(decode)
}

pub fn put_nested_into<'a, T>(
    value: Option<&T>,
    data: &'a mut Payload,
    key: &str,
    defaults: bool,
    encode: fn(&T, bool) -> Payload,
) -> &'a mut Payload {
    match value {
        Some(value) => {
            data.insert(key.to_owned(), Value::Object(encode(value, defaults)));
        }
        None if defaults => {
            data.insert(key.to_owned(), Value::Null);
        }
        None => {}
    }

    data
}
