use std::fmt;

/// Every logical field an activity can carry, across all metadata variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActivityField {
    Type,
    Metadata,
    ApplicationId,
    Assets,
    CreatedAt,
    Details,
    Emoji,
    Flags,
    HangType,
    Id,
    Name,
    Party,
    Secrets,
    SessionId,
    State,
    SyncId,
    Timestamps,
    Url,
}

impl ActivityField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityField::Type => "type",
            ActivityField::Metadata => "metadata",
            ActivityField::ApplicationId => "application_id",
            ActivityField::Assets => "assets",
            ActivityField::CreatedAt => "created_at",
            ActivityField::Details => "details",
            ActivityField::Emoji => "emoji",
            ActivityField::Flags => "flags",
            ActivityField::HangType => "hang_type",
            ActivityField::Id => "id",
            ActivityField::Name => "name",
            ActivityField::Party => "party",
            ActivityField::Secrets => "secrets",
            ActivityField::SessionId => "session_id",
            ActivityField::State => "state",
            ActivityField::SyncId => "sync_id",
            ActivityField::Timestamps => "timestamps",
            ActivityField::Url => "url",
        }
    }
}

impl fmt::Display for ActivityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
