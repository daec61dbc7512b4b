use std::collections::HashSet;

use activity_model::user::fields::{self, parse_type};
use activity_model::user::{Activity, ActivityChanges, MetadataKind, ToDataOptions};
use activity_model::{Payload, Snowflake};
use serde_json::Value;
use tracing::warn;

use super::EmbeddedActivityStateKey;

/// Who is taking part in an embedded activity of a voice channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbeddedActivityState {
    pub activity: Activity,
    pub channel_id: Snowflake,
    pub guild_id: Snowflake,
    pub user_ids: HashSet<Snowflake>,
}

impl EmbeddedActivityState {
    pub fn new(
        activity: Activity,
        channel_id: Snowflake,
        guild_id: Snowflake,
        user_ids: HashSet<Snowflake>,
    ) -> EmbeddedActivityState {
        EmbeddedActivityState {
            activity,
            channel_id,
            guild_id,
            user_ids,
        }
    }

    /// Builds a state without registering it anywhere.
    pub fn from_data(data: &Payload, guild_id: Snowflake) -> EmbeddedActivityState {
        EmbeddedActivityState {
            activity: parse_activity(data),
            channel_id: parse_channel_id(data),
            guild_id: parse_guild_id(data, guild_id),
            user_ids: parse_user_ids(data),
        }
    }

    pub fn to_data(&self) -> Payload {
        let mut data = Payload::new();
        data.insert("guild_id".to_owned(), self.guild_id.to_value());
        data.insert("channel_id".to_owned(), self.channel_id.to_value());
        data.insert(
            "embedded_activity".to_owned(),
            Value::Object(self.activity.to_data(ToDataOptions::INTERNAL)),
        );

        let mut user_ids = self.user_ids.iter().copied().collect::<Vec<_>>();
        user_ids.sort();
        data.insert(
            "users".to_owned(),
            Value::Array(user_ids.iter().map(Snowflake::to_value).collect()),
        );

        data
    }

    pub fn key(&self) -> EmbeddedActivityStateKey {
        EmbeddedActivityStateKey::new(self.guild_id, self.channel_id, self.application_id())
    }

    pub fn application_id(&self) -> Snowflake {
        self.activity.application_id()
    }

    pub fn is_empty(&self) -> bool {
        self.user_ids.is_empty()
    }

    pub fn update_attributes(&mut self, data: &Payload) {
        self.user_ids = parse_user_ids(data);
        self.update_activity(data);
    }

    pub fn update_activity(&mut self, data: &Payload) {
        if let Some(activity_data) = activity_data(data) {
            self.activity.update_attributes(activity_data);
        }
    }

    pub fn difference_update_activity(&mut self, data: &Payload) -> ActivityChanges {
        match activity_data(data) {
            Some(activity_data) => self.activity.difference_update_attributes(activity_data),
            None => ActivityChanges::new(),
        }
    }

    /// Replaces the participants, returning who joined and who left.
    pub fn difference_update_user_ids(
        &mut self,
        data: &Payload,
    ) -> (HashSet<Snowflake>, HashSet<Snowflake>) {
        let new_user_ids = parse_user_ids(data);

        let joined = new_user_ids.difference(&self.user_ids).copied().collect();
        let left = self.user_ids.difference(&new_user_ids).copied().collect();

        self.user_ids = new_user_ids;
        (joined, left)
    }
}

fn activity_data(data: &Payload) -> Option<&Payload> {
    data.get("embedded_activity").and_then(Value::as_object)
}

pub(crate) fn parse_activity(data: &Payload) -> Activity {
    data.get("embedded_activity")
        .map(Activity::from_value)
        .unwrap_or_default()
}

/// Application id of the nested activity, read without decoding the whole activity.
/// Only rich activities carry one.
pub(crate) fn parse_application_id(data: &Payload) -> Snowflake {
    match activity_data(data) {
        Some(activity) if parse_type(activity).metadata_kind() == MetadataKind::Rich => {
            fields::parse_application_id(activity)
        }
        _ => Snowflake::NONE,
    }
}

pub(crate) fn parse_channel_id(data: &Payload) -> Snowflake {
    data.get("channel_id")
        .and_then(Snowflake::from_value)
        .unwrap_or_default()
}

pub(crate) fn parse_guild_id(data: &Payload, default: Snowflake) -> Snowflake {
    data.get("guild_id")
        .and_then(Snowflake::from_value)
        .filter(|guild_id| !guild_id.is_none())
        .unwrap_or(default)
}

pub(crate) fn parse_user_ids(data: &Payload) -> HashSet<Snowflake> {
    let users = match data.get("users").and_then(Value::as_array) {
        Some(users) => users,
        None => return HashSet::new(),
    };

    users
        .iter()
        .filter_map(|user| match Snowflake::from_value(user) {
            Some(user_id) => Some(user_id),
            None => {
                warn!(?user, "Skipping malformed embedded activity participant id");
                None
            }
        })
        .collect()
}
