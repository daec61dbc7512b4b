mod snowflake;
pub use snowflake::Snowflake;

mod error;
pub use error::{ModelError, Result};

pub mod user;

mod codec;
mod util;

/// A json object as exchanged with the gateway and the REST api.
pub type Payload = serde_json::Map<String, serde_json::Value>;
