mod custom;
pub use custom::CustomMetadata;

mod hanging;
pub use hanging::HangingMetadata;

mod rich;
pub use rich::RichMetadata;

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use super::{ActivityChanges, ActivityFields};
use crate::user::{
    ActivityAssets, ActivityEmoji, ActivityFlag, ActivityParty, ActivitySecrets,
    ActivityTimestamps, HangType,
};
use crate::{Payload, Result, Snowflake};

/// Which metadata shape an activity type is backed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetadataKind {
    Base,
    Rich,
    Custom,
    Hanging,
}

/// Visibility tiers of a serialized activity.
///
/// With every flag off only what a bot may send when setting its own presence is
/// written. `user` adds what Discord reports about other users, `internals` adds
/// receive-only fields, `defaults` also writes fields holding their zero value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToDataOptions {
    pub defaults: bool,
    pub internals: bool,
    pub user: bool,
}

impl ToDataOptions {
    pub const BOT: ToDataOptions = ToDataOptions {
        defaults: false,
        internals: false,
        user: false,
    };

    pub const USER: ToDataOptions = ToDataOptions {
        defaults: false,
        internals: false,
        user: true,
    };

    pub const INTERNAL: ToDataOptions = ToDataOptions {
        defaults: false,
        internals: true,
        user: true,
    };

    pub fn with_defaults(mut self) -> Self {
        self.defaults = true;
        self
    }

    pub(crate) fn user_level(&self) -> bool {
        self.user || self.internals
    }
}

/// Shared contract of the metadata variants.
pub trait MetadataVariant: Clone + Default + Sized {
    fn from_data(data: &Payload) -> Self;

    fn to_data(&self, options: ToDataOptions) -> Payload;

    /// Overwrites every mutable field from new wire data.
    fn update_attributes(&mut self, data: &Payload);

    /// Like `update_attributes`, returning the old value of each field that changed.
    fn difference_update_attributes(&mut self, data: &Payload) -> ActivityChanges;

    /// Validates and takes the fields this variant carries out of `fields`.
    fn apply_fields(&mut self, fields: &mut ActivityFields) -> Result<()>;

    fn name(&self) -> Cow<'_, str>;

    fn from_fields(fields: &mut ActivityFields) -> Result<Self> {
        let mut metadata = Self::default();
        metadata.apply_fields(fields)?;
        Ok(metadata)
    }

    fn copy_with_fields(&self, fields: &mut ActivityFields) -> Result<Self> {
        let mut metadata = self.clone();
        metadata.apply_fields(fields)?;
        Ok(metadata)
    }
}

/// Type specific payload of an activity. Accessors for fields a variant does not
/// carry return that field's zero value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActivityMetadata {
    Base,
    Rich(RichMetadata),
    Custom(CustomMetadata),
    Hanging(HangingMetadata),
}

macro_rules! dispatch {
    ($self:expr, $metadata:ident => $expr:expr, $base:expr) => {
        match $self {
            ActivityMetadata::Base => $base,
            ActivityMetadata::Rich($metadata) => $expr,
            ActivityMetadata::Custom($metadata) => $expr,
            ActivityMetadata::Hanging($metadata) => $expr,
        }
    };
}

impl ActivityMetadata {
    pub fn kind(&self) -> MetadataKind {
        match self {
            ActivityMetadata::Base => MetadataKind::Base,
            ActivityMetadata::Rich(_) => MetadataKind::Rich,
            ActivityMetadata::Custom(_) => MetadataKind::Custom,
            ActivityMetadata::Hanging(_) => MetadataKind::Hanging,
        }
    }

    pub fn from_data(kind: MetadataKind, data: &Payload) -> ActivityMetadata {
        match kind {
            MetadataKind::Base => ActivityMetadata::Base,
            MetadataKind::Rich => ActivityMetadata::Rich(RichMetadata::from_data(data)),
            MetadataKind::Custom => ActivityMetadata::Custom(CustomMetadata::from_data(data)),
            MetadataKind::Hanging => ActivityMetadata::Hanging(HangingMetadata::from_data(data)),
        }
    }

    pub fn from_fields(kind: MetadataKind, fields: &mut ActivityFields) -> Result<ActivityMetadata> {
        Ok(match kind {
            MetadataKind::Base => ActivityMetadata::Base,
            MetadataKind::Rich => ActivityMetadata::Rich(RichMetadata::from_fields(fields)?),
            MetadataKind::Custom => ActivityMetadata::Custom(CustomMetadata::from_fields(fields)?),
            MetadataKind::Hanging => {
                ActivityMetadata::Hanging(HangingMetadata::from_fields(fields)?)
            }
        })
    }

    pub fn copy_with_fields(&self, fields: &mut ActivityFields) -> Result<ActivityMetadata> {
        Ok(match self {
            ActivityMetadata::Base => ActivityMetadata::Base,
            ActivityMetadata::Rich(m) => ActivityMetadata::Rich(m.copy_with_fields(fields)?),
            ActivityMetadata::Custom(m) => ActivityMetadata::Custom(m.copy_with_fields(fields)?),
            ActivityMetadata::Hanging(m) => ActivityMetadata::Hanging(m.copy_with_fields(fields)?),
        })
    }

    pub fn to_data(&self, options: ToDataOptions) -> Payload {
        dispatch!(self, m => m.to_data(options), Payload::new())
    }

    pub fn update_attributes(&mut self, data: &Payload) {
        dispatch!(self, m => m.update_attributes(data), ())
    }

    pub fn difference_update_attributes(&mut self, data: &Payload) -> ActivityChanges {
        dispatch!(self, m => m.difference_update_attributes(data), ActivityChanges::new())
    }

    pub fn name(&self) -> Cow<'_, str> {
        dispatch!(self, m => m.name(), Cow::Borrowed(""))
    }

    pub fn application_id(&self) -> Snowflake {
        match self {
            ActivityMetadata::Rich(m) => m.application_id,
            _ => Snowflake::NONE,
        }
    }

    pub fn assets(&self) -> Option<&ActivityAssets> {
        match self {
            ActivityMetadata::Rich(m) => m.assets.as_ref(),
            _ => None,
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        dispatch!(self, m => m.created_at, None)
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            ActivityMetadata::Rich(m) => m.details.as_deref(),
            ActivityMetadata::Hanging(m) => m.details.as_deref(),
            _ => None,
        }
    }

    pub fn emoji(&self) -> Option<&ActivityEmoji> {
        match self {
            ActivityMetadata::Custom(m) => m.emoji.as_ref(),
            ActivityMetadata::Hanging(m) => m.emoji.as_ref(),
            _ => None,
        }
    }

    pub fn flags(&self) -> ActivityFlag {
        match self {
            ActivityMetadata::Rich(m) => m.flags,
            _ => ActivityFlag::empty(),
        }
    }

    pub fn hang_type(&self) -> Option<HangType> {
        match self {
            ActivityMetadata::Hanging(m) => Some(m.hang_type),
            _ => None,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            ActivityMetadata::Rich(m) => m.id,
            _ => 0,
        }
    }

    pub fn party(&self) -> Option<&ActivityParty> {
        match self {
            ActivityMetadata::Rich(m) => m.party.as_ref(),
            _ => None,
        }
    }

    pub fn secrets(&self) -> Option<&ActivitySecrets> {
        match self {
            ActivityMetadata::Rich(m) => m.secrets.as_ref(),
            _ => None,
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        match self {
            ActivityMetadata::Rich(m) => m.session_id.as_deref(),
            _ => None,
        }
    }

    pub fn state(&self) -> Option<&str> {
        match self {
            ActivityMetadata::Rich(m) => m.state.as_deref(),
            ActivityMetadata::Custom(m) => m.state.as_deref(),
            _ => None,
        }
    }

    pub fn sync_id(&self) -> Option<&str> {
        match self {
            ActivityMetadata::Rich(m) => m.sync_id.as_deref(),
            _ => None,
        }
    }

    pub fn timestamps(&self) -> Option<&ActivityTimestamps> {
        match self {
            ActivityMetadata::Rich(m) => m.timestamps.as_ref(),
            _ => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ActivityMetadata::Rich(m) => m.url.as_deref(),
            _ => None,
        }
    }
}
