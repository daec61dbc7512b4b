use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ActivityFlag: u32 {
        const INSTANCE                    = 1 << 0;
        const JOIN                        = 1 << 1;
        const SPECTATE                    = 1 << 2;
        const JOIN_REQUEST                = 1 << 3;
        const SYNC                        = 1 << 4;
        const PLAY                        = 1 << 5;
        const PARTY_PRIVACY_FRIENDS       = 1 << 6;
        const PARTY_PRIVACY_VOICE_CHANNEL = 1 << 7;
        const EMBEDDED                    = 1 << 8;
        const CONTEXTLESS                 = 1 << 9;
    }
}

impl Serialize for ActivityFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for ActivityFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u32::deserialize(deserializer)?;
        Ok(ActivityFlag::from_bits_truncate(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_bits_truncated() {
        let flags: ActivityFlag = serde_json::from_str(&(1u32 << 31 | 0b11).to_string()).unwrap();
        assert_eq!(flags, ActivityFlag::INSTANCE | ActivityFlag::JOIN);
        assert_eq!(serde_json::to_string(&flags).unwrap(), "3");
    }
}
