mod activity;
pub use activity::*;

mod activity_type;
pub use activity_type::ActivityType;

mod hang_type;
pub use hang_type::{HangType, NameGetter};

mod activity_flag;
pub use activity_flag::ActivityFlag;

mod activity_emoji;
pub use activity_emoji::ActivityEmoji;

mod assets;
pub use assets::ActivityAssets;

mod party;
pub use party::ActivityParty;

mod secrets;
pub use secrets::ActivitySecrets;

mod timestamps;
pub use timestamps::ActivityTimestamps;

mod status_type;
pub use status_type::StatusType;

mod status_update;
pub use status_update::StatusUpdate;

mod presence_update;
pub use presence_update::{PresenceUpdate, PresenceUser};

mod client_status;
pub use client_status::ClientStatus;
