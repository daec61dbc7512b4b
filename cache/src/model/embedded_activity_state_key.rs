use activity_model::{Payload, Snowflake};

use super::embedded_activity_state::{parse_application_id, parse_channel_id, parse_guild_id};

/// Identifies an embedded activity: one application running in one voice channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmbeddedActivityStateKey {
    pub guild_id: Snowflake,
    pub channel_id: Snowflake,
    pub application_id: Snowflake,
}

impl EmbeddedActivityStateKey {
    pub fn new(
        guild_id: Snowflake,
        channel_id: Snowflake,
        application_id: Snowflake,
    ) -> EmbeddedActivityStateKey {
        EmbeddedActivityStateKey {
            guild_id,
            channel_id,
            application_id,
        }
    }

    /// Key of the embedded activity update payload `data`. `guild_id` is used when
    /// the payload does not carry one.
    pub fn from_data(data: &Payload, guild_id: Snowflake) -> EmbeddedActivityStateKey {
        EmbeddedActivityStateKey {
            guild_id: parse_guild_id(data, guild_id),
            channel_id: parse_channel_id(data),
            application_id: parse_application_id(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EmbeddedActivityState;
    use serde_json::json;

    #[test]
    fn test_from_data() {
        let data = json!({
            "channel_id": "2",
            "embedded_activity": {"application_id": "3", "name": "Watch Together"},
            "users": [],
        });
        let key = EmbeddedActivityStateKey::from_data(data.as_object().unwrap(), Snowflake(1));

        assert_eq!(
            key,
            EmbeddedActivityStateKey::new(Snowflake(1), Snowflake(2), Snowflake(3))
        );
    }

    #[test]
    fn test_payload_guild_id_wins() {
        let data = json!({"guild_id": "9", "channel_id": "2"});
        let key = EmbeddedActivityStateKey::from_data(data.as_object().unwrap(), Snowflake(1));

        assert_eq!(key.guild_id, Snowflake(9));
        assert_eq!(key.application_id, Snowflake::NONE);
    }

    #[test]
    fn test_matches_state_key() {
        for activity in [
            json!({"application_id": "3", "name": "Poker Night"}),
            json!({"application_id": 3, "type": 0, "name": "Poker Night"}),
            json!({"application_id": "3", "type": 4, "state": "busy"}),
            json!(null),
        ] {
            let data = json!({"channel_id": "2", "embedded_activity": activity});
            let data = data.as_object().unwrap();

            assert_eq!(
                EmbeddedActivityStateKey::from_data(data, Snowflake(1)),
                EmbeddedActivityState::from_data(data, Snowflake(1)).key()
            );
        }
    }
}
