use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use super::{Activity, StatusType, ToDataOptions};

/// Presence a bot sends for itself. Activities are written with the narrow field
/// set Discord accepts from bots.
#[derive(Serialize, Debug, Clone)]
pub struct StatusUpdate {
    pub since: Option<u64>,
    #[serde(serialize_with = "serialize_bot_activities")]
    pub activities: Vec<Activity>,
    pub status: StatusType,
    pub afk: bool,
}

impl StatusUpdate {
    pub fn new(activity: Activity, status_type: StatusType) -> StatusUpdate {
        StatusUpdate {
            since: Some(0),
            activities: vec![activity],
            status: status_type,
            afk: false,
        }
    }
}

fn serialize_bot_activities<S: Serializer>(
    activities: &[Activity],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(activities.len()))?;

    for activity in activities.iter().filter(|activity| !activity.is_unknown()) {
        seq.serialize_element(&activity.to_data(ToDataOptions::BOT))?;
    }

    seq.end()
}
