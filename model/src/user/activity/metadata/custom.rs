use std::borrow::Cow;

use chrono::{DateTime, Utc};

use super::{MetadataVariant, ToDataOptions};
use crate::user::activity::changes::diff_field;
use crate::user::activity::fields::*;
use crate::user::{ActivityChange, ActivityChanges, ActivityEmoji, ActivityFields};
use crate::{Payload, Result};

/// Custom status: an optional emoji followed by free text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CustomMetadata {
    pub created_at: Option<DateTime<Utc>>,
    pub emoji: Option<ActivityEmoji>,
    pub state: Option<String>,
}

impl MetadataVariant for CustomMetadata {
    fn from_data(data: &Payload) -> Self {
        CustomMetadata {
            created_at: parse_created_at(data),
            emoji: parse_emoji(data),
            state: parse_state(data),
        }
    }

    fn to_data(&self, options: ToDataOptions) -> Payload {
        let defaults = options.defaults;
        let mut data = Payload::new();

        if options.user_level() {
            put_emoji_into(self.emoji.as_ref(), &mut data, defaults);
            put_state_into(self.state.as_deref(), &mut data, defaults);
        }

        if options.internals {
            put_created_at_into(self.created_at, &mut data, defaults);
        }

        data
    }

    fn update_attributes(&mut self, data: &Payload) {
        self.created_at = parse_created_at(data);
        self.emoji = parse_emoji(data);
        self.state = parse_state(data);
    }

    fn difference_update_attributes(&mut self, data: &Payload) -> ActivityChanges {
        let mut changes = ActivityChanges::new();

        diff_field!(changes, self.created_at, parse_created_at(data), ActivityChange::CreatedAt);
        diff_field!(changes, self.emoji, parse_emoji(data), ActivityChange::Emoji);
        diff_field!(changes, self.state, parse_state(data), ActivityChange::State);

        changes
    }

    fn apply_fields(&mut self, fields: &mut ActivityFields) -> Result<()> {
        if let Some(created_at) = fields.created_at.take() {
            self.created_at = created_at;
        }

        if let Some(emoji) = fields.emoji.take() {
            self.emoji = emoji;
        }

        if let Some(state) = fields.state.take() {
            self.state = validate_state(Some(state))?;
        }

        Ok(())
    }

    fn name(&self) -> Cow<'_, str> {
        match (&self.emoji, &self.state) {
            (Some(emoji), Some(state)) => Cow::Owned(format!("{} {}", emoji, state)),
            (Some(emoji), None) => Cow::Owned(emoji.to_string()),
            (None, Some(state)) => Cow::Borrowed(state.as_str()),
            (None, None) => Cow::Borrowed(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::ActivityField;
    use crate::Snowflake;
    use serde_json::{json, Value};

    fn payload(value: Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_name() {
        let mut metadata = CustomMetadata::default();
        assert_eq!(metadata.name(), "");

        metadata.state = Some("hi".to_owned());
        assert_eq!(metadata.name(), "hi");

        metadata.emoji = Some(ActivityEmoji::new_custom_emoji(
            "blob".to_owned(),
            Snowflake(7),
            false,
        ));
        assert_eq!(metadata.name(), "<:blob:7> hi");

        metadata.state = None;
        assert_eq!(metadata.name(), "<:blob:7>");
    }

    #[test]
    fn test_to_data_hidden_for_bots() {
        let metadata = CustomMetadata::from_data(&payload(json!({"state": "hi"})));

        assert!(metadata.to_data(ToDataOptions::BOT).is_empty());
        assert_eq!(
            metadata.to_data(ToDataOptions::USER),
            payload(json!({"state": "hi"}))
        );
        assert_eq!(
            metadata.to_data(ToDataOptions::USER.with_defaults()),
            payload(json!({"state": "hi", "emoji": null}))
        );
    }

    #[test]
    fn test_round_trip() {
        let data = payload(json!({
            "state": "hi",
            "emoji": {"name": "🎮"},
            "created_at": 1_600_000_000_000_i64,
        }));
        let metadata = CustomMetadata::from_data(&data);

        assert_eq!(metadata.to_data(ToDataOptions::INTERNAL), data);
        let data = metadata.to_data(ToDataOptions::INTERNAL);
        assert_eq!(CustomMetadata::from_data(&data), metadata);
    }

    #[test]
    fn test_difference_update_attributes() {
        let mut metadata = CustomMetadata::from_data(&payload(json!({"state": "hi"})));
        let data = payload(json!({"state": "bye", "emoji": {"name": "👋"}}));
        let changes = metadata.difference_update_attributes(&data);

        assert_eq!(
            changes.get(ActivityField::State),
            Some(&ActivityChange::State(Some("hi".to_owned())))
        );
        assert_eq!(changes.get(ActivityField::Emoji), Some(&ActivityChange::Emoji(None)));
        assert_eq!(changes.len(), 2);
        assert_eq!(metadata.name(), "👋 bye");
    }

    #[test]
    fn test_apply_fields_ignores_rich_fields() {
        let mut fields = ActivityFields::new().state("").name("x").url("https://a.b");
        let metadata = CustomMetadata::from_fields(&mut fields).unwrap();

        assert_eq!(metadata.state, None);
        assert_eq!(fields.remaining(), vec![ActivityField::Name, ActivityField::Url]);
    }
}
