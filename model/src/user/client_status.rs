use serde::{Deserialize, Serialize};

use super::StatusType;

/// Per platform status of a user. Platforms the user is not active on are absent.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desktop: Option<StatusType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<StatusType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<StatusType>,
}
