#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Keep embedded activity states in the primary registry at all.
    pub embedded_activities: bool,
    /// Maintain the per guild index of states with participants.
    pub guild_index: bool,
    /// Drop a state from the primary registry once its last participant leaves,
    /// instead of keeping it around as an empty entry.
    pub evict_empty: bool,
}

impl Options {
    pub fn new(embedded_activities: bool, guild_index: bool, evict_empty: bool) -> Options {
        Options {
            embedded_activities,
            guild_index,
            evict_empty,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            embedded_activities: true,
            guild_index: true,
            evict_empty: false,
        }
    }
}
