use serde::Deserialize;

use crate::{Options, Result};

pub const ENV_PREFIX: &str = "EMBEDDED_ACTIVITY_";

/// Cache settings read from `EMBEDDED_ACTIVITY_*` environment variables, e.g.
/// `EMBEDDED_ACTIVITY_EVICT_EMPTY=true`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "enabled")]
    pub store: bool,
    #[serde(default = "enabled")]
    pub guild_index: bool,
    #[serde(default)]
    pub evict_empty: bool,
}

impl Config {
    pub fn from_envvar() -> Result<Config> {
        Ok(envy::prefixed(ENV_PREFIX).from_env::<Config>()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store: true,
            guild_index: true,
            evict_empty: false,
        }
    }
}

impl From<Config> for Options {
    fn from(config: Config) -> Self {
        Options::new(config.store, config.guild_index, config.evict_empty)
    }
}

fn enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config: Config = envy::prefixed(ENV_PREFIX).from_iter(vars(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(Options::from(config), Options::default());
    }

    #[test]
    fn test_overrides() {
        let config: Config = envy::prefixed(ENV_PREFIX)
            .from_iter(vars(&[
                ("EMBEDDED_ACTIVITY_EVICT_EMPTY", "true"),
                ("EMBEDDED_ACTIVITY_GUILD_INDEX", "false"),
                ("UNRELATED", "1"),
            ]))
            .unwrap();

        assert_eq!(Options::from(config), Options::new(true, false, true));
    }

    #[test]
    fn test_invalid_value() {
        let result: std::result::Result<Config, _> = envy::prefixed(ENV_PREFIX)
            .from_iter(vars(&[("EMBEDDED_ACTIVITY_STORE", "maybe")]));
        assert!(result.is_err());
    }
}
