use chrono::{DateTime, Utc};
use serde_json::Value;

use super::ActivityField;
use crate::codec::millis_to_datetime;
use crate::user::{
    ActivityAssets, ActivityEmoji, ActivityFlag, ActivityParty, ActivitySecrets,
    ActivityTimestamps, HangType,
};
use crate::util::value_kind;
use crate::{ModelError, Payload, Result, Snowflake};

/// Field values given when building or copying an activity.
///
/// Each metadata variant takes the fields it understands out of the set; whatever
/// is left afterwards was not applicable to the chosen activity type and is
/// reported as [`ModelError::UnknownFields`]. Empty strings and empty nested
/// values clear the field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivityFields {
    pub application_id: Option<Snowflake>,
    pub assets: Option<Option<ActivityAssets>>,
    pub created_at: Option<Option<DateTime<Utc>>>,
    pub details: Option<String>,
    pub emoji: Option<Option<ActivityEmoji>>,
    pub flags: Option<ActivityFlag>,
    pub hang_type: Option<HangType>,
    pub id: Option<u64>,
    pub name: Option<String>,
    pub party: Option<Option<ActivityParty>>,
    pub secrets: Option<Option<ActivitySecrets>>,
    pub session_id: Option<String>,
    pub state: Option<String>,
    pub sync_id: Option<String>,
    pub timestamps: Option<Option<ActivityTimestamps>>,
    pub url: Option<String>,
}

impl ActivityFields {
    pub fn new() -> ActivityFields {
        ActivityFields::default()
    }

    pub fn application_id(mut self, application_id: impl Into<Snowflake>) -> Self {
        self.application_id = Some(application_id.into());
        self
    }

    pub fn assets(mut self, assets: impl Into<Option<ActivityAssets>>) -> Self {
        self.assets = Some(assets.into());
        self
    }

    pub fn created_at(mut self, created_at: impl Into<Option<DateTime<Utc>>>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn emoji(mut self, emoji: impl Into<Option<ActivityEmoji>>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    pub fn flags(mut self, flags: ActivityFlag) -> Self {
        self.flags = Some(flags);
        self
    }

    pub fn hang_type(mut self, hang_type: HangType) -> Self {
        self.hang_type = Some(hang_type);
        self
    }

    pub fn id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn party(mut self, party: impl Into<Option<ActivityParty>>) -> Self {
        self.party = Some(party.into());
        self
    }

    pub fn secrets(mut self, secrets: impl Into<Option<ActivitySecrets>>) -> Self {
        self.secrets = Some(secrets.into());
        self
    }

    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn sync_id(mut self, sync_id: impl Into<String>) -> Self {
        self.sync_id = Some(sync_id.into());
        self
    }

    pub fn timestamps(mut self, timestamps: impl Into<Option<ActivityTimestamps>>) -> Self {
        self.timestamps = Some(timestamps.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Builds the field set from loosely typed keyword parameters, for example
    /// values read from a command or a config file.
    pub fn from_keyword_parameters(parameters: &Payload) -> Result<ActivityFields> {
        let mut fields = ActivityFields::default();
        let mut unknown = Vec::new();

        for (key, value) in parameters {
            match key.as_str() {
                "application_id" => {
                    fields.application_id = Some(expect_snowflake("application_id", value)?)
                }
                "assets" => {
                    fields.assets = Some(expect_nested("assets", value, ActivityAssets::from_data)?)
                }
                "created_at" => fields.created_at = Some(expect_datetime("created_at", value)?),
                "details" => fields.details = Some(expect_string("details", value)?),
                "emoji" => fields.emoji = Some(expect_emoji("emoji", value)?),
                "flags" => {
                    let bits = expect_u64("flags", value)?;
                    fields.flags = Some(ActivityFlag::from_bits_truncate(bits as u32))
                }
                "hang_type" => {
                    let hang_type = expect_string("hang_type", value)?;
                    fields.hang_type = Some(HangType::get(&hang_type))
                }
                "id" => fields.id = Some(expect_u64("id", value)?),
                "name" => fields.name = Some(expect_string("name", value)?),
                "party" => {
                    fields.party = Some(expect_nested("party", value, ActivityParty::from_data)?)
                }
                "secrets" => {
                    let secrets = expect_nested("secrets", value, ActivitySecrets::from_data)?;
                    fields.secrets = Some(secrets)
                }
                "session_id" => fields.session_id = Some(expect_string("session_id", value)?),
                "state" => fields.state = Some(expect_string("state", value)?),
                "sync_id" => fields.sync_id = Some(expect_string("sync_id", value)?),
                "timestamps" => {
                    let timestamps =
                        expect_nested("timestamps", value, ActivityTimestamps::from_data)?;
                    fields.timestamps = Some(timestamps)
                }
                "url" => fields.url = Some(expect_string("url", value)?),
                _ => unknown.push(key.clone()),
            }
        }

        if !unknown.is_empty() {
            return ModelError::UnknownKeywords(unknown).into();
        }

        Ok(fields)
    }

    /// Fields still set, meaning no metadata variant took them.
    pub fn remaining(&self) -> Vec<ActivityField> {
        let mut remaining = Vec::new();

        macro_rules! check {
            ($($field:ident => $variant:ident),* $(,)?) => {
                $(
                    if self.$field.is_some() {
                        remaining.push(ActivityField::$variant);
                    }
                )*
            };
        }

        check!(
            application_id => ApplicationId,
            assets => Assets,
            created_at => CreatedAt,
            details => Details,
            emoji => Emoji,
            flags => Flags,
            hang_type => HangType,
            id => Id,
            name => Name,
            party => Party,
            secrets => Secrets,
            session_id => SessionId,
            state => State,
            sync_id => SyncId,
            timestamps => Timestamps,
            url => Url,
        );

        remaining
    }

    pub fn ensure_consumed(&self) -> Result<()> {
        let remaining = self.remaining();
        if remaining.is_empty() {
            Ok(())
        } else {
            ModelError::UnknownFields(remaining).into()
        }
    }
}

fn invalid_type<T>(field: &'static str, expected: &'static str, value: &Value) -> Result<T> {
    ModelError::InvalidType {
        field,
        expected,
        got: value_kind(value),
    }
    .into()
}

fn expect_string(field: &'static str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Ok(String::new()),
        _ => invalid_type(field, "`str` or `None`", value),
    }
}

fn expect_u64(field: &'static str, value: &Value) -> Result<u64> {
    match value.as_u64() {
        Some(n) => Ok(n),
        None => invalid_type(field, "`int`", value),
    }
}

fn expect_snowflake(field: &'static str, value: &Value) -> Result<Snowflake> {
    match value {
        Value::Null => Ok(Snowflake::NONE),
        Value::Number(_) | Value::String(_) => match Snowflake::from_value(value) {
            Some(snowflake) => Ok(snowflake),
            None => invalid_type(field, "a snowflake `int` or `str`", value),
        },
        _ => invalid_type(field, "a snowflake `int` or `str`", value),
    }
}

fn expect_datetime(field: &'static str, value: &Value) -> Result<Option<DateTime<Utc>>> {
    match value {
        Value::Null => Ok(None),
        _ => match value.as_i64().and_then(millis_to_datetime) {
            Some(at) => Ok(Some(at)),
            None => invalid_type(field, "unix milliseconds `int` or `None`", value),
        },
    }
}

fn expect_nested<T>(
    field: &'static str,
    value: &Value,
    decode: fn(&Payload) -> T,
) -> Result<Option<T>> {
    match value {
        Value::Object(data) => Ok(Some(decode(data))),
        Value::Null => Ok(None),
        _ => invalid_type(field, "`dict` or `None`", value),
    }
}

fn expect_emoji(field: &'static str, value: &Value) -> Result<Option<ActivityEmoji>> {
    match value {
        Value::Null => Ok(None),
        Value::Object(data) => match ActivityEmoji::from_data(data) {
            Some(emoji) => Ok(Some(emoji)),
            None => invalid_type(field, "an emoji", value),
        },
        _ => invalid_type(field, "an emoji or `None`", value),
    }
}
