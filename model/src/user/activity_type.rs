use std::collections::HashMap;
use std::convert::TryFrom;
use std::fmt;
use std::hash::{Hash, Hasher};

use lazy_static::lazy_static;
use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use super::MetadataKind;
use crate::util;

lazy_static! {
    static ref INTERNED: RwLock<HashMap<i32, ActivityType>> = RwLock::new(HashMap::new());
}

/// Wire level activity type code with the metadata shape it selects.
///
/// Every code maps to exactly one `ActivityType`: the predefined constants cover the
/// codes Discord documents, and [`ActivityType::get`] interns a placeholder for any
/// other code the first time it is seen, so comparing two handles by value is the
/// same as comparing them by identity.
#[derive(Clone, Copy)]
pub struct ActivityType {
    value: i32,
    name: &'static str,
    metadata_kind: MetadataKind,
}

impl ActivityType {
    pub const UNKNOWN: ActivityType = ActivityType::predefined(-1, "unknown", MetadataKind::Base);
    pub const PLAYING: ActivityType = ActivityType::predefined(0, "playing", MetadataKind::Rich);
    pub const STREAM: ActivityType = ActivityType::predefined(1, "stream", MetadataKind::Rich);
    pub const SPOTIFY: ActivityType = ActivityType::predefined(2, "spotify", MetadataKind::Rich);
    pub const WATCHING: ActivityType = ActivityType::predefined(3, "watching", MetadataKind::Rich);
    pub const CUSTOM: ActivityType = ActivityType::predefined(4, "custom", MetadataKind::Custom);
    pub const COMPETING: ActivityType =
        ActivityType::predefined(5, "competing", MetadataKind::Rich);
    pub const HANGING: ActivityType = ActivityType::predefined(6, "hanging", MetadataKind::Hanging);

    #[deprecated(note = "use `ActivityType::PLAYING`")]
    pub const GAME: ActivityType = ActivityType::PLAYING;

    const PREDEFINED: [ActivityType; 8] = [
        ActivityType::UNKNOWN,
        ActivityType::PLAYING,
        ActivityType::STREAM,
        ActivityType::SPOTIFY,
        ActivityType::WATCHING,
        ActivityType::CUSTOM,
        ActivityType::COMPETING,
        ActivityType::HANGING,
    ];

    const fn predefined(value: i32, name: &'static str, metadata_kind: MetadataKind) -> Self {
        ActivityType {
            value,
            name,
            metadata_kind,
        }
    }

    /// Returns the activity type for the given wire code. Never fails: unknown codes
    /// get a placeholder backed by rich metadata, cached for the process lifetime.
    pub fn get(value: i32) -> ActivityType {
        if let Some(activity_type) = Self::PREDEFINED.iter().find(|t| t.value == value) {
            return *activity_type;
        }

        if let Some(activity_type) = INTERNED.read().get(&value) {
            return *activity_type;
        }

        *INTERNED.write().entry(value).or_insert_with(|| {
            debug!(value, "Interning unknown activity type");

            // Bounded by the number of distinct codes Discord sends us.
            let name: &'static str =
                Box::leak(util::default_name(&value.to_string()).into_boxed_str());
            ActivityType::predefined(value, name, MetadataKind::Rich)
        })
    }

    /// Lenient variant of [`ActivityType::get`] for raw json numbers. Values that
    /// do not fit a type code fall back to `PLAYING`.
    pub fn from_i64(value: i64) -> ActivityType {
        match i32::try_from(value) {
            Ok(value) => ActivityType::get(value),
            Err(_) => ActivityType::PLAYING,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn metadata_kind(&self) -> MetadataKind {
        self.metadata_kind
    }

    /// Id Discord reports for activities of this type which carry no id of their own.
    pub fn fallback_discord_side_id(&self) -> Option<&'static str> {
        match self.value {
            2 => Some("spotify:1"),
            4 => Some("custom"),
            _ => None,
        }
    }
}

impl Default for ActivityType {
    fn default() -> Self {
        ActivityType::PLAYING
    }
}

impl PartialEq for ActivityType {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for ActivityType {}

impl Hash for ActivityType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Debug for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActivityType::{}({})", self.name, self.value)
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl From<i32> for ActivityType {
    fn from(value: i32) -> Self {
        ActivityType::get(value)
    }
}

impl Serialize for ActivityType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.value)
    }
}

impl<'de> Deserialize<'de> for ActivityType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(ActivityType::from_i64(i64::deserialize(deserializer)?))
    }
}
