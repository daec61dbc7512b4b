use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use lazy_static::lazy_static;
use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use super::HangingMetadata;
use crate::util;

lazy_static! {
    static ref INTERNED: RwLock<HashMap<String, HangType>> = RwLock::new(HashMap::new());
}

pub type NameGetter = fn(&HangingMetadata) -> String;

/// What a user "hanging" in a voice channel is up to. Sent as a string code.
#[derive(Clone, Copy)]
pub struct HangType {
    value: &'static str,
    name: &'static str,
    name_getter: NameGetter,
}

impl HangType {
    pub const CHILLING: HangType = HangType::predefined("chilling", "chilling", chilling);
    pub const GAMING: HangType = HangType::predefined("gaming", "gaming", gaming);
    pub const FOCUSING: HangType = HangType::predefined("focusing", "focusing", focusing);
    pub const BE_RIGHT_BACK: HangType = HangType::predefined("brb", "be right back", brb);
    pub const EATING: HangType = HangType::predefined("eating", "eating", eating);
    pub const IN_TRANSIT: HangType = HangType::predefined("in-transit", "in transit", in_transit);
    pub const WATCHING: HangType = HangType::predefined("watching", "watching", watching);
    pub const CUSTOM: HangType = HangType::predefined("custom", "custom", custom);

    const PREDEFINED: [HangType; 8] = [
        HangType::CHILLING,
        HangType::GAMING,
        HangType::FOCUSING,
        HangType::BE_RIGHT_BACK,
        HangType::EATING,
        HangType::IN_TRANSIT,
        HangType::WATCHING,
        HangType::CUSTOM,
    ];

    const fn predefined(value: &'static str, name: &'static str, name_getter: NameGetter) -> Self {
        HangType {
            value,
            name,
            name_getter,
        }
    }

    /// Returns the hang type for the given wire code, interning a placeholder named
    /// after the code if Discord sends one we do not know yet.
    pub fn get(value: &str) -> HangType {
        if let Some(hang_type) = Self::PREDEFINED.iter().find(|t| t.value == value) {
            return *hang_type;
        }

        if let Some(hang_type) = INTERNED.read().get(value) {
            return *hang_type;
        }

        *INTERNED
            .write()
            .entry(value.to_owned())
            .or_insert_with(|| {
                debug!(value, "Interning unknown hang type");

                let name: &'static str = Box::leak(util::default_name(value).into_boxed_str());
                let value: &'static str = Box::leak(value.to_owned().into_boxed_str());
                HangType::predefined(value, name, own_name)
            })
    }

    pub fn value(&self) -> &'static str {
        self.value
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Display name of a hanging activity of this type.
    pub fn activity_name(&self, metadata: &HangingMetadata) -> String {
        (self.name_getter)(metadata)
    }
}

impl Default for HangType {
    fn default() -> Self {
        HangType::CHILLING
    }
}

impl PartialEq for HangType {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for HangType {}

impl Hash for HangType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Debug for HangType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HangType::{}({:?})", self.name, self.value)
    }
}

impl fmt::Display for HangType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Serialize for HangType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.value)
    }
}

impl<'de> Deserialize<'de> for HangType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(HangType::get(&String::deserialize(deserializer)?))
    }
}

fn chilling(_: &HangingMetadata) -> String {
    "Chilling".to_owned()
}

fn gaming(_: &HangingMetadata) -> String {
    "GAMING".to_owned()
}

fn focusing(_: &HangingMetadata) -> String {
    "In the zone".to_owned()
}

fn brb(_: &HangingMetadata) -> String {
    "Gonna BRB".to_owned()
}

fn eating(_: &HangingMetadata) -> String {
    "Grubbin".to_owned()
}

fn in_transit(_: &HangingMetadata) -> String {
    "Wandering IRL".to_owned()
}

fn watching(_: &HangingMetadata) -> String {
    "Watching stuff".to_owned()
}

fn custom(metadata: &HangingMetadata) -> String {
    match (&metadata.emoji, &metadata.details) {
        (Some(emoji), Some(details)) => format!("{} {}", emoji, details),
        (Some(emoji), None) => emoji.to_string(),
        (None, Some(details)) => details.clone(),
        (None, None) => String::new(),
    }
}

fn own_name(metadata: &HangingMetadata) -> String {
    metadata.hang_type.name().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::ActivityEmoji;

    #[test]
    fn test_get_predefined() {
        assert_eq!(HangType::get("brb"), HangType::BE_RIGHT_BACK);
        assert_eq!(HangType::get("in-transit").name(), "in transit");
    }

    #[test]
    fn test_unknown_is_interned() {
        let a = HangType::get("Touching-Grass");
        let b = HangType::get("Touching-Grass");

        assert_eq!(a, b);
        assert!(std::ptr::eq(a.value(), b.value()));
        assert_eq!(a.name(), "touching grass");
        assert_eq!(a.value(), "Touching-Grass");
    }

    #[test]
    fn test_concurrent_interning() {
        let hang_types: Vec<HangType> = std::thread::scope(|s| {
            let workers: Vec<_> = (0..8)
                .map(|_| s.spawn(|| HangType::get("stargazing")))
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });

        for hang_type in &hang_types {
            assert_eq!(*hang_type, hang_types[0]);
            assert!(std::ptr::eq(hang_type.name(), hang_types[0].name()));
            assert!(std::ptr::eq(hang_type.value(), hang_types[0].value()));
        }
    }

    #[test]
    fn test_activity_name() {
        let mut metadata = HangingMetadata::default();
        metadata.hang_type = HangType::BE_RIGHT_BACK;
        assert_eq!(metadata.hang_type.activity_name(&metadata), "Gonna BRB");

        metadata.hang_type = HangType::CUSTOM;
        assert_eq!(metadata.hang_type.activity_name(&metadata), "");

        metadata.details = Some("vibing".to_owned());
        metadata.emoji = Some(ActivityEmoji::new("🎧".to_owned()));
        assert_eq!(metadata.hang_type.activity_name(&metadata), "🎧 vibing");

        metadata.hang_type = HangType::get("napping");
        assert_eq!(metadata.hang_type.activity_name(&metadata), "napping");
    }
}
