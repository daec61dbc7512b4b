use std::borrow::Cow;

use chrono::{DateTime, Utc};

use super::{MetadataVariant, ToDataOptions};
use crate::user::activity::changes::diff_field;
use crate::user::activity::fields::*;
use crate::user::{ActivityChange, ActivityChanges, ActivityEmoji, ActivityFields, HangType};
use crate::{Payload, Result};

/// Hang status shown while sitting in a voice channel. The hang type travels in the
/// `state` key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct HangingMetadata {
    pub created_at: Option<DateTime<Utc>>,
    pub details: Option<String>,
    pub emoji: Option<ActivityEmoji>,
    pub hang_type: HangType,
}

impl MetadataVariant for HangingMetadata {
    fn from_data(data: &Payload) -> Self {
        HangingMetadata {
            created_at: parse_created_at(data),
            details: parse_details(data),
            emoji: parse_emoji(data),
            hang_type: parse_hang_type(data),
        }
    }

    fn to_data(&self, options: ToDataOptions) -> Payload {
        let defaults = options.defaults;
        let mut data = Payload::new();

        put_hang_type_into(self.hang_type, &mut data);

        if options.user_level() {
            put_details_into(self.details.as_deref(), &mut data, defaults);
            put_emoji_into(self.emoji.as_ref(), &mut data, defaults);
        }

        if options.internals {
            put_created_at_into(self.created_at, &mut data, defaults);
        }

        data
    }

    fn update_attributes(&mut self, data: &Payload) {
        self.created_at = parse_created_at(data);
        self.details = parse_details(data);
        self.emoji = parse_emoji(data);
        self.hang_type = parse_hang_type(data);
    }

    fn difference_update_attributes(&mut self, data: &Payload) -> ActivityChanges {
        let mut changes = ActivityChanges::new();

        diff_field!(changes, self.created_at, parse_created_at(data), ActivityChange::CreatedAt);
        diff_field!(changes, self.details, parse_details(data), ActivityChange::Details);
        diff_field!(changes, self.emoji, parse_emoji(data), ActivityChange::Emoji);
        diff_field!(changes, self.hang_type, parse_hang_type(data), ActivityChange::HangType);

        changes
    }

    fn apply_fields(&mut self, fields: &mut ActivityFields) -> Result<()> {
        if let Some(created_at) = fields.created_at.take() {
            self.created_at = created_at;
        }

        if let Some(details) = fields.details.take() {
            self.details = validate_details(Some(details))?;
        }

        if let Some(emoji) = fields.emoji.take() {
            self.emoji = emoji;
        }

        if let Some(hang_type) = fields.hang_type.take() {
            self.hang_type = hang_type;
        }

        Ok(())
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(self.hang_type.activity_name(self))
    }
}
