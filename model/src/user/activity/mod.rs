mod builder;
pub use builder::ActivityFields;

mod changes;
pub use changes::{ActivityChange, ActivityChanges};

mod field;
pub use field::ActivityField;

pub mod fields;

pub mod metadata;
pub use metadata::{
    ActivityMetadata, CustomMetadata, HangingMetadata, MetadataKind, MetadataVariant,
    RichMetadata, ToDataOptions,
};

use std::borrow::Cow;

use chrono::{DateTime, Duration, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::{
    ActivityAssets, ActivityEmoji, ActivityFlag, ActivityParty, ActivitySecrets,
    ActivityTimestamps, ActivityType, HangType,
};
use crate::util::value_kind;
use crate::{ModelError, Payload, Result, Snowflake};
use fields::{parse_type, put_type_into};

pub const COLOR_GAME: u32 = 0x7289DA;
pub const COLOR_STREAM: u32 = 0x593695;
pub const COLOR_SPOTIFY: u32 = 0x1DB954;
pub const COLOR_WATCHING: u32 = 0xFF0000;
pub const COLOR_COMPETING: u32 = 0xF1C40F;
pub const COLOR_NONE: u32 = 0;

const TWITCH_ASSET_PREFIX: &str = "twitch:";
const YOUTUBE_ASSET_PREFIX: &str = "youtube:";
const SPOTIFY_ASSET_PREFIX: &str = "spotify:";

/// "No activity". Returned when decoding a missing or `null` activity.
pub const ACTIVITY_UNKNOWN: Activity = Activity {
    activity_type: ActivityType::UNKNOWN,
    metadata: ActivityMetadata::Base,
};

/// A user's rich presence entry.
///
/// The activity type decides the metadata variant: the metadata always has the
/// kind named by `activity_type.metadata_kind()`, and every field accessor works
/// regardless of the variant, returning the zero value for fields it lacks.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Activity {
    activity_type: ActivityType,
    metadata: ActivityMetadata,
}

impl Activity {
    /// Builds an activity of the given type. Fails if a field is invalid, or if a
    /// field was given that activities of this type do not carry.
    pub fn new(activity_type: ActivityType, mut fields: ActivityFields) -> Result<Activity> {
        let metadata = ActivityMetadata::from_fields(activity_type.metadata_kind(), &mut fields)?;
        fields.ensure_consumed()?;

        Ok(Activity {
            activity_type,
            metadata,
        })
    }

    pub fn named(name: impl Into<String>, activity_type: ActivityType) -> Result<Activity> {
        Activity::new(activity_type, ActivityFields::new().name(name))
    }

    /// Builds an activity from loosely typed keyword parameters. The type is read
    /// from `activity_type` (an `int`), defaulting to playing.
    pub fn from_keyword_parameters(parameters: &Payload) -> Result<Activity> {
        let mut parameters = parameters.clone();

        let activity_type = match parameters.remove("activity_type") {
            None | Some(Value::Null) => ActivityType::PLAYING,
            Some(value) => match value.as_i64() {
                Some(value) => ActivityType::from_i64(value),
                None => {
                    return ModelError::InvalidType {
                        field: "activity_type",
                        expected: "`int` or `None`",
                        got: value_kind(&value),
                    }
                    .into()
                }
            },
        };

        Activity::new(
            activity_type,
            ActivityFields::from_keyword_parameters(&parameters)?,
        )
    }

    pub fn from_data(data: &Payload) -> Activity {
        let activity_type = parse_type(data);

        Activity {
            activity_type,
            metadata: ActivityMetadata::from_data(activity_type.metadata_kind(), data),
        }
    }

    /// Decodes a possibly `null` activity; anything but an object is
    /// [`ACTIVITY_UNKNOWN`].
    pub fn from_value(value: &Value) -> Activity {
        match value {
            Value::Object(data) => Activity::from_data(data),
            _ => ACTIVITY_UNKNOWN,
        }
    }

    pub fn to_data(&self, options: ToDataOptions) -> Payload {
        let mut data = self.metadata.to_data(options);
        put_type_into(self.activity_type, &mut data);

        if options.internals && !data.contains_key("id") {
            data.insert("id".to_owned(), Value::String(self.discord_side_id()));
        }

        data
    }

    pub fn update_attributes(&mut self, data: &Payload) {
        let activity_type = parse_type(data);

        if activity_type == self.activity_type {
            self.metadata.update_attributes(data);
        } else {
            self.activity_type = activity_type;
            self.metadata = ActivityMetadata::from_data(activity_type.metadata_kind(), data);
        }
    }

    /// Updates the activity from new wire data, returning the old value of every
    /// field that changed.
    ///
    /// A type change rebuilds the metadata from scratch and reports both the old
    /// `Type` and the old `Metadata`. When the old and new type share a metadata
    /// kind, the field level changes are reported as well.
    pub fn difference_update_attributes(&mut self, data: &Payload) -> ActivityChanges {
        let activity_type = parse_type(data);

        if activity_type == self.activity_type {
            return self.metadata.difference_update_attributes(data);
        }

        let mut changes = ActivityChanges::new();
        changes.push(ActivityChange::Type(self.activity_type));

        let metadata = ActivityMetadata::from_data(activity_type.metadata_kind(), data);
        let old_metadata = std::mem::replace(&mut self.metadata, metadata);
        self.activity_type = activity_type;

        if old_metadata.kind() == self.metadata.kind() {
            let mut scratch = old_metadata.clone();
            changes.extend(scratch.difference_update_attributes(data));
        }

        changes.push(ActivityChange::Metadata(old_metadata));
        changes
    }

    /// Copy with the given fields replaced. When `activity_type` switches to a type
    /// backed by another metadata kind, the metadata is built from `fields` alone.
    pub fn copy_with(
        &self,
        activity_type: Option<ActivityType>,
        mut fields: ActivityFields,
    ) -> Result<Activity> {
        let activity_type = activity_type.unwrap_or(self.activity_type);

        let metadata = if activity_type.metadata_kind() == self.metadata.kind() {
            self.metadata.copy_with_fields(&mut fields)?
        } else {
            ActivityMetadata::from_fields(activity_type.metadata_kind(), &mut fields)?
        };

        fields.ensure_consumed()?;

        Ok(Activity {
            activity_type,
            metadata,
        })
    }

    pub fn is_unknown(&self) -> bool {
        self.activity_type == ActivityType::UNKNOWN
    }

    pub fn activity_type(&self) -> ActivityType {
        self.activity_type
    }

    pub fn metadata(&self) -> &ActivityMetadata {
        &self.metadata
    }

    pub fn name(&self) -> Cow<'_, str> {
        self.metadata.name()
    }

    pub fn application_id(&self) -> Snowflake {
        self.metadata.application_id()
    }

    pub fn assets(&self) -> Option<&ActivityAssets> {
        self.metadata.assets()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.metadata.created_at()
    }

    pub fn details(&self) -> Option<&str> {
        self.metadata.details()
    }

    pub fn emoji(&self) -> Option<&ActivityEmoji> {
        self.metadata.emoji()
    }

    pub fn flags(&self) -> ActivityFlag {
        self.metadata.flags()
    }

    pub fn hang_type(&self) -> Option<HangType> {
        self.metadata.hang_type()
    }

    pub fn id(&self) -> u64 {
        self.metadata.id()
    }

    #[deprecated(note = "use `Activity::id`")]
    pub fn activity_id(&self) -> u64 {
        self.id()
    }

    pub fn party(&self) -> Option<&ActivityParty> {
        self.metadata.party()
    }

    pub fn secrets(&self) -> Option<&ActivitySecrets> {
        self.metadata.secrets()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.metadata.session_id()
    }

    pub fn state(&self) -> Option<&str> {
        self.metadata.state()
    }

    pub fn sync_id(&self) -> Option<&str> {
        self.metadata.sync_id()
    }

    pub fn timestamps(&self) -> Option<&ActivityTimestamps> {
        self.metadata.timestamps()
    }

    pub fn url(&self) -> Option<&str> {
        self.metadata.url()
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.timestamps().and_then(|timestamps| timestamps.start)
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.timestamps().and_then(|timestamps| timestamps.end)
    }

    pub fn color(&self) -> u32 {
        match self.activity_type {
            t if t == ActivityType::PLAYING => COLOR_GAME,
            t if t == ActivityType::STREAM => {
                if self.url().is_some() {
                    COLOR_STREAM
                } else {
                    COLOR_GAME
                }
            }
            t if t == ActivityType::SPOTIFY => COLOR_SPOTIFY,
            t if t == ActivityType::WATCHING => COLOR_WATCHING,
            t if t == ActivityType::COMPETING => COLOR_COMPETING,
            _ => COLOR_NONE,
        }
    }

    /// The id Discord uses for this activity: the hex encoded `id` if set, else
    /// a per type constant, else `"UNKNOWN"`.
    pub fn discord_side_id(&self) -> String {
        let id = self.id();
        if id != 0 {
            return format!("{:x}", id);
        }

        self.activity_type
            .fallback_discord_side_id()
            .unwrap_or("UNKNOWN")
            .to_owned()
    }

    fn large_image_with_prefix(&self, activity_type: ActivityType, prefix: &str) -> Option<&str> {
        if self.activity_type != activity_type {
            return None;
        }

        self.assets()?.image_large.as_deref()?.strip_prefix(prefix)
    }

    /// Channel name of a twitch stream.
    pub fn twitch_name(&self) -> Option<&str> {
        self.large_image_with_prefix(ActivityType::STREAM, TWITCH_ASSET_PREFIX)
    }

    pub fn youtube_video_id(&self) -> Option<&str> {
        self.large_image_with_prefix(ActivityType::STREAM, YOUTUBE_ASSET_PREFIX)
    }

    pub fn spotify_track_duration(&self) -> Option<Duration> {
        if self.activity_type != ActivityType::SPOTIFY {
            return None;
        }

        self.timestamps()?.duration()
    }

    pub fn spotify_cover_id(&self) -> Option<&str> {
        self.large_image_with_prefix(ActivityType::SPOTIFY, SPOTIFY_ASSET_PREFIX)
    }

    pub fn spotify_album_cover_url(&self) -> Option<String> {
        self.spotify_cover_id()
            .map(|cover_id| format!("https://i.scdn.co/image/{}", cover_id))
    }

    pub fn spotify_track_id(&self) -> Option<&str> {
        if self.activity_type != ActivityType::SPOTIFY {
            return None;
        }

        self.sync_id()
    }

    pub fn spotify_track_url(&self) -> Option<String> {
        self.spotify_track_id()
            .map(|track_id| format!("https://open.spotify.com/track/{}", track_id))
    }
}

impl Default for Activity {
    fn default() -> Self {
        ACTIVITY_UNKNOWN
    }
}

impl Serialize for Activity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_data(ToDataOptions::INTERNAL).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Activity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;

        match value {
            Value::Object(ref data) => Ok(Activity::from_data(data)),
            Value::Null => Ok(ACTIVITY_UNKNOWN),
            _ => Err(D::Error::invalid_type(
                crate::util::to_unexpected(&value),
                &"an activity object or null",
            )),
        }
    }
}
