//! Per-field wire codec of activities.
//!
//! Every field `x` has a `parse_x` reading it from a wire payload (lenient, missing
//! or malformed values become the field's zero value), a `put_x_into` writing it
//! into a caller owned payload (skipped when the value is the default, unless
//! `defaults` is set) and, where a caller supplied value needs checking, a
//! `validate_x`.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::codec::{
    parse_datetime, parse_nested, parse_snowflake, parse_string, put_datetime_into,
    put_nested_into, put_snowflake_into, put_string_into, validate_string,
};
use crate::user::{
    ActivityAssets, ActivityEmoji, ActivityFlag, ActivityParty, ActivitySecrets,
    ActivityTimestamps, ActivityType, HangType,
};
use crate::{ModelError, Payload, Result, Snowflake};

pub const NAME_LENGTH_MAX: usize = 128;
pub const DETAILS_LENGTH_MAX: usize = 128;
pub const STATE_LENGTH_MAX: usize = 128;
pub const URL_LENGTH_MAX: usize = 512;

// type

pub fn parse_type(data: &Payload) -> ActivityType {
    match data.get("type").and_then(Value::as_i64) {
        Some(value) => ActivityType::from_i64(value),
        None => ActivityType::PLAYING,
    }
}

pub fn put_type_into(activity_type: ActivityType, data: &mut Payload) -> &mut Payload {
    data.insert("type".to_owned(), Value::from(activity_type.value()));
    data
}

// application_id

pub fn parse_application_id(data: &Payload) -> Snowflake {
    parse_snowflake(data, "application_id")
}

pub fn put_application_id_into(
    application_id: Snowflake,
    data: &mut Payload,
    defaults: bool,
) -> &mut Payload {
    put_snowflake_into(application_id, data, "application_id", defaults)
}

// assets

pub fn parse_assets(data: &Payload) -> Option<ActivityAssets> {
    parse_nested(data, "assets", ActivityAssets::from_data)
}

pub fn put_assets_into<'a>(
    assets: Option<&ActivityAssets>,
    data: &'a mut Payload,
    defaults: bool,
) -> &'a mut Payload {
    put_nested_into(assets, data, "assets", defaults, ActivityAssets::to_data)
}

pub fn validate_assets(assets: Option<ActivityAssets>) -> Option<ActivityAssets> {
    assets.filter(|assets| !assets.is_empty())
}

// created_at

pub fn parse_created_at(data: &Payload) -> Option<DateTime<Utc>> {
    parse_datetime(data, "created_at")
}

pub fn put_created_at_into(
    created_at: Option<DateTime<Utc>>,
    data: &mut Payload,
    defaults: bool,
) -> &mut Payload {
    put_datetime_into(created_at, data, "created_at", defaults)
}

// details

pub fn parse_details(data: &Payload) -> Option<String> {
    parse_string(data, "details")
}

pub fn put_details_into<'a>(
    details: Option<&str>,
    data: &'a mut Payload,
    defaults: bool,
) -> &'a mut Payload {
    put_string_into(details, data, "details", defaults)
}

pub fn validate_details(details: Option<String>) -> Result<Option<String>> {
    validate_string(details, "details", Some(DETAILS_LENGTH_MAX))
}

// emoji

pub fn parse_emoji(data: &Payload) -> Option<ActivityEmoji> {
    data.get("emoji")
        .and_then(Value::as_object)
        .and_then(ActivityEmoji::from_data)
}

pub fn put_emoji_into<'a>(
    emoji: Option<&ActivityEmoji>,
    data: &'a mut Payload,
    defaults: bool,
) -> &'a mut Payload {
    match emoji {
        Some(emoji) => {
            data.insert("emoji".to_owned(), Value::Object(emoji.to_data()));
        }
        None if defaults => {
            data.insert("emoji".to_owned(), Value::Null);
        }
        None => {}
    }

    data
}

// flags

pub fn parse_flags(data: &Payload) -> ActivityFlag {
    data.get("flags")
        .and_then(Value::as_u64)
        .map(|bits| ActivityFlag::from_bits_truncate(bits as u32))
        .unwrap_or_default()
}

pub fn put_flags_into(flags: ActivityFlag, data: &mut Payload, defaults: bool) -> &mut Payload {
    if defaults || !flags.is_empty() {
        data.insert("flags".to_owned(), Value::from(flags.bits()));
    }

    data
}

// hang_type, carried by the `state` key of hanging activities

pub fn parse_hang_type(data: &Payload) -> HangType {
    match data.get("state").and_then(Value::as_str) {
        Some(value) if !value.is_empty() => HangType::get(value),
        _ => HangType::default(),
    }
}

pub fn put_hang_type_into(hang_type: HangType, data: &mut Payload) -> &mut Payload {
    data.insert("state".to_owned(), Value::from(hang_type.value()));
    data
}

// id, a hex string on the wire

pub fn parse_id(data: &Payload) -> u64 {
    data.get("id")
        .and_then(Value::as_str)
        .and_then(|id| u64::from_str_radix(id, 16).ok())
        .unwrap_or(0)
}

/// Zero ids are never written; the activity fills in its Discord side id instead.
pub fn put_id_into(id: u64, data: &mut Payload) -> &mut Payload {
    if id != 0 {
        data.insert("id".to_owned(), Value::String(format!("{:x}", id)));
    }

    data
}

// name

pub fn parse_name(data: &Payload) -> String {
    parse_string(data, "name").unwrap_or_default()
}

pub fn put_name_into<'a>(name: &str, data: &'a mut Payload) -> &'a mut Payload {
    data.insert("name".to_owned(), Value::String(name.to_owned()));
    data
}

pub fn validate_name(name: String) -> Result<String> {
    Ok(validate_string(Some(name), "name", Some(NAME_LENGTH_MAX))?.unwrap_or_default())
}

// party

pub fn parse_party(data: &Payload) -> Option<ActivityParty> {
    parse_nested(data, "party", ActivityParty::from_data)
}

pub fn put_party_into<'a>(
    party: Option<&ActivityParty>,
    data: &'a mut Payload,
    defaults: bool,
) -> &'a mut Payload {
    put_nested_into(party, data, "party", defaults, ActivityParty::to_data)
}

pub fn validate_party(party: Option<ActivityParty>) -> Option<ActivityParty> {
    party.filter(|party| !party.is_empty())
}

// secrets

pub fn parse_secrets(data: &Payload) -> Option<ActivitySecrets> {
    parse_nested(data, "secrets", ActivitySecrets::from_data)
}

pub fn put_secrets_into<'a>(
    secrets: Option<&ActivitySecrets>,
    data: &'a mut Payload,
    defaults: bool,
) -> &'a mut Payload {
    put_nested_into(secrets, data, "secrets", defaults, ActivitySecrets::to_data)
}

pub fn validate_secrets(secrets: Option<ActivitySecrets>) -> Option<ActivitySecrets> {
    secrets.filter(|secrets| !secrets.is_empty())
}

// session_id

pub fn parse_session_id(data: &Payload) -> Option<String> {
    parse_string(data, "session_id")
}

pub fn put_session_id_into<'a>(
    session_id: Option<&str>,
    data: &'a mut Payload,
    defaults: bool,
) -> &'a mut Payload {
    put_string_into(session_id, data, "session_id", defaults)
}

pub fn validate_session_id(session_id: Option<String>) -> Result<Option<String>> {
    validate_string(session_id, "session_id", None)
}

// state

pub fn parse_state(data: &Payload) -> Option<String> {
    parse_string(data, "state")
}

pub fn put_state_into<'a>(
    state: Option<&str>,
    data: &'a mut Payload,
    defaults: bool,
) -> &'a mut Payload {
    put_string_into(state, data, "state", defaults)
}

pub fn validate_state(state: Option<String>) -> Result<Option<String>> {
    validate_string(state, "state", Some(STATE_LENGTH_MAX))
}

// sync_id

pub fn parse_sync_id(data: &Payload) -> Option<String> {
    parse_string(data, "sync_id")
}

pub fn put_sync_id_into<'a>(
    sync_id: Option<&str>,
    data: &'a mut Payload,
    defaults: bool,
) -> &'a mut Payload {
    put_string_into(sync_id, data, "sync_id", defaults)
}

pub fn validate_sync_id(sync_id: Option<String>) -> Result<Option<String>> {
    validate_string(sync_id, "sync_id", None)
}

// timestamps

pub fn parse_timestamps(data: &Payload) -> Option<ActivityTimestamps> {
    parse_nested(data, "timestamps", ActivityTimestamps::from_data)
}

pub fn put_timestamps_into<'a>(
    timestamps: Option<&ActivityTimestamps>,
    data: &'a mut Payload,
    defaults: bool,
) -> &'a mut Payload {
    put_nested_into(
        timestamps,
        data,
        "timestamps",
        defaults,
        ActivityTimestamps::to_data,
    )
}

pub fn validate_timestamps(timestamps: Option<ActivityTimestamps>) -> Option<ActivityTimestamps> {
    timestamps.filter(|timestamps| !timestamps.is_empty())
}

// url

pub fn parse_url(data: &Payload) -> Option<String> {
    parse_string(data, "url")
}

pub fn put_url_into<'a>(url: Option<&str>, data: &'a mut Payload, defaults: bool) -> &'a mut Payload {
    put_string_into(url, data, "url", defaults)
}

pub fn validate_url(url: Option<String>) -> Result<Option<String>> {
    let url = match validate_string(url, "url", Some(URL_LENGTH_MAX))? {
        Some(url) => url,
        None => return Ok(None),
    };

    let is_valid = match url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    {
        Some(rest) => !rest.is_empty() && !rest.contains(char::is_whitespace),
        None => false,
    };

    if is_valid {
        Ok(Some(url))
    } else {
        ModelError::InvalidUrl { field: "url", url }.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_parse_type() {
        assert_eq!(parse_type(&payload(json!({}))), ActivityType::PLAYING);
        assert_eq!(parse_type(&payload(json!({"type": null}))), ActivityType::PLAYING);
        assert_eq!(parse_type(&payload(json!({"type": 4}))), ActivityType::CUSTOM);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(&payload(json!({"id": "ff"}))), 255);
        assert_eq!(parse_id(&payload(json!({"id": "spotify:1"}))), 0);
        assert_eq!(parse_id(&payload(json!({}))), 0);
    }

    #[test]
    fn test_put_id_into() {
        let mut data = Payload::new();
        put_id_into(0, &mut data);
        assert!(data.is_empty());

        put_id_into(255, &mut data);
        assert_eq!(data["id"], json!("ff"));
    }

    #[test]
    fn test_flags() {
        let data = payload(json!({"flags": 0b1_0000_0001}));
        let flags = parse_flags(&data);
        assert_eq!(flags, ActivityFlag::INSTANCE | ActivityFlag::EMBEDDED);

        let mut data = Payload::new();
        put_flags_into(ActivityFlag::empty(), &mut data, false);
        assert!(data.is_empty());
        put_flags_into(ActivityFlag::empty(), &mut data, true);
        assert_eq!(data["flags"], json!(0));
    }

    #[test]
    fn test_hang_type_reuses_state_key() {
        let data = payload(json!({"state": "brb"}));
        assert_eq!(parse_hang_type(&data), HangType::BE_RIGHT_BACK);
        assert_eq!(parse_hang_type(&payload(json!({}))), HangType::CHILLING);

        let mut data = Payload::new();
        put_hang_type_into(HangType::EATING, &mut data);
        assert_eq!(data["state"], json!("eating"));
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name(String::new()), Ok(String::new()));
        assert_eq!(validate_name("Iceon".to_owned()), Ok("Iceon".to_owned()));
        assert!(matches!(
            validate_name("a".repeat(NAME_LENGTH_MAX + 1)),
            Err(ModelError::OutOfRange { field: "name", .. })
        ));
    }

    #[test]
    fn test_validate_details() {
        assert_eq!(validate_details(None), Ok(None));
        let details = "d".repeat(DETAILS_LENGTH_MAX);
        assert_eq!(validate_details(Some(details.clone())), Ok(Some(details)));
        assert_eq!(
            validate_details(Some("d".repeat(DETAILS_LENGTH_MAX + 1))),
            Err(ModelError::OutOfRange {
                field: "details",
                len: DETAILS_LENGTH_MAX + 1,
                max: DETAILS_LENGTH_MAX,
            })
        );
    }

    #[test]
    fn test_validate_state() {
        assert_eq!(
            validate_state(Some("Playing solo".to_owned())),
            Ok(Some("Playing solo".to_owned()))
        );
        assert!(matches!(
            validate_state(Some("s".repeat(STATE_LENGTH_MAX + 1))),
            Err(ModelError::OutOfRange { field: "state", .. })
        ));
    }

    #[test]
    fn test_validate_url() {
        assert_eq!(validate_url(None), Ok(None));
        assert_eq!(validate_url(Some(String::new())), Ok(None));
        assert_eq!(
            validate_url(Some("https://www.twitch.tv/orin".to_owned())),
            Ok(Some("https://www.twitch.tv/orin".to_owned()))
        );
        assert!(matches!(
            validate_url(Some("twitch.tv/orin".to_owned())),
            Err(ModelError::InvalidUrl { .. })
        ));
        assert!(matches!(
            validate_url(Some("https://".to_owned())),
            Err(ModelError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_nested_put_respects_defaults() {
        let mut data = Payload::new();
        put_party_into(None, &mut data, false);
        assert!(data.is_empty());

        put_party_into(None, &mut data, true);
        assert_eq!(data["party"], Value::Null);

        let party = ActivityParty::new(None, 1, 4);
        put_party_into(Some(&party), &mut data, false);
        assert_eq!(data["party"], json!({"size": [1, 4]}));
    }

    #[test]
    fn test_validate_nested_empty_is_none() {
        assert_eq!(validate_assets(Some(ActivityAssets::default())), None);
        assert_eq!(validate_party(Some(ActivityParty::default())), None);
        assert_eq!(validate_secrets(Some(ActivitySecrets::default())), None);
        assert_eq!(validate_timestamps(Some(ActivityTimestamps::default())), None);
    }
}
