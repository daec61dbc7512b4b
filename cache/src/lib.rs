mod memory;
pub use memory::{EmbeddedActivityCache, EmbeddedActivityUpdate};

pub mod model;
pub use model::{EmbeddedActivityState, EmbeddedActivityStateKey};

mod options;
pub use options::Options;

mod config;
pub use config::Config;

mod error;
pub use error::{CacheError, Result};
