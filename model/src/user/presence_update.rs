use serde::{Deserialize, Serialize};

use super::{Activity, ClientStatus, StatusType};
use crate::Snowflake;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PresenceUser {
    pub id: Snowflake,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PresenceUpdate {
    pub user: PresenceUser,
    pub guild_id: Option<Snowflake>,
    pub status: StatusType,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub client_status: ClientStatus,
}

impl PresenceUpdate {
    /// The first activity that is not a custom status, which is what clients show
    /// under the user's name.
    pub fn primary_activity(&self) -> Option<&Activity> {
        self.activities
            .iter()
            .find(|activity| activity.activity_type() != super::ActivityType::CUSTOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::ActivityType;

    #[test]
    fn test_deserialize() {
        let presence: PresenceUpdate = serde_json::from_str(
            r#"{
                "user": {"id": "80351110224678912"},
                "guild_id": "41771983423143937",
                "status": "online",
                "activities": [
                    {"type": 4, "name": "Custom Status", "state": "hi", "emoji": null},
                    {"type": 2, "name": "Spotify", "id": "spotify:1", "sync_id": "track"}
                ],
                "client_status": {"desktop": "online"}
            }"#,
        )
        .unwrap();

        assert_eq!(presence.user.id, Snowflake(80351110224678912));
        assert_eq!(presence.activities.len(), 2);
        assert_eq!(presence.activities[0].name(), "hi");
        assert_eq!(presence.client_status.desktop, Some(StatusType::Online));
        assert_eq!(presence.client_status.mobile, None);

        let primary = presence.primary_activity().unwrap();
        assert_eq!(primary.activity_type(), ActivityType::SPOTIFY);
        assert_eq!(primary.spotify_track_id(), Some("track"));
    }
}
