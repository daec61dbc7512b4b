mod embedded_activity_state;
pub use embedded_activity_state::EmbeddedActivityState;

mod embedded_activity_state_key;
pub use embedded_activity_state_key::EmbeddedActivityStateKey;
