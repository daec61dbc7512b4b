use chrono::{DateTime, Utc};

use super::metadata::ActivityMetadata;
use super::ActivityField;
use crate::user::{
    ActivityAssets, ActivityEmoji, ActivityFlag, ActivityParty, ActivitySecrets,
    ActivityTimestamps, ActivityType, HangType,
};

/// Previous value of a field replaced by a difference update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActivityChange {
    Type(ActivityType),
    /// The whole metadata was rebuilt because the activity type changed.
    Metadata(ActivityMetadata),
    Assets(Option<ActivityAssets>),
    CreatedAt(Option<DateTime<Utc>>),
    Details(Option<String>),
    Emoji(Option<ActivityEmoji>),
    Flags(ActivityFlag),
    HangType(HangType),
    Name(String),
    Party(Option<ActivityParty>),
    Secrets(Option<ActivitySecrets>),
    SessionId(Option<String>),
    State(Option<String>),
    SyncId(Option<String>),
    Timestamps(Option<ActivityTimestamps>),
    Url(Option<String>),
}

impl ActivityChange {
    pub fn field(&self) -> ActivityField {
        match self {
            ActivityChange::Type(_) => ActivityField::Type,
            ActivityChange::Metadata(_) => ActivityField::Metadata,
            ActivityChange::Assets(_) => ActivityField::Assets,
            ActivityChange::CreatedAt(_) => ActivityField::CreatedAt,
            ActivityChange::Details(_) => ActivityField::Details,
            ActivityChange::Emoji(_) => ActivityField::Emoji,
            ActivityChange::Flags(_) => ActivityField::Flags,
            ActivityChange::HangType(_) => ActivityField::HangType,
            ActivityChange::Name(_) => ActivityField::Name,
            ActivityChange::Party(_) => ActivityField::Party,
            ActivityChange::Secrets(_) => ActivityField::Secrets,
            ActivityChange::SessionId(_) => ActivityField::SessionId,
            ActivityChange::State(_) => ActivityField::State,
            ActivityChange::SyncId(_) => ActivityField::SyncId,
            ActivityChange::Timestamps(_) => ActivityField::Timestamps,
            ActivityChange::Url(_) => ActivityField::Url,
        }
    }
}

/// Old values of every field a difference update touched, in update order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivityChanges(Vec<ActivityChange>);

impl ActivityChanges {
    pub fn new() -> ActivityChanges {
        ActivityChanges(Vec::new())
    }

    pub fn push(&mut self, change: ActivityChange) {
        self.0.push(change);
    }

    pub fn extend(&mut self, other: ActivityChanges) {
        self.0.extend(other.0);
    }

    pub fn get(&self, field: ActivityField) -> Option<&ActivityChange> {
        self.0.iter().find(|change| change.field() == field)
    }

    pub fn contains(&self, field: ActivityField) -> bool {
        self.get(field).is_some()
    }

    pub fn fields(&self) -> impl Iterator<Item = ActivityField> + '_ {
        self.0.iter().map(ActivityChange::field)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActivityChange> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for ActivityChanges {
    type Item = ActivityChange;
    type IntoIter = std::vec::IntoIter<ActivityChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Records `$field`'s old value under `$change` if `$new` differs, then stores `$new`.
macro_rules! diff_field {
    ($changes:expr, $field:expr, $new:expr, $change:path) => {{
        let new = $new;
        if $field != new {
            $changes.push($change(std::mem::replace(&mut $field, new)));
        }
    }};
}

pub(crate) use diff_field;
