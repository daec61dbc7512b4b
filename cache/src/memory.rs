use std::collections::HashSet;

use activity_model::user::ActivityChanges;
use activity_model::{Payload, Snowflake};
use dashmap::mapref::entry::{Entry, VacantEntry};
use dashmap::DashMap;
use tracing::{debug, trace};

use crate::model::{EmbeddedActivityState, EmbeddedActivityStateKey};
use crate::{CacheError, Config, Options, Result};

/// Outcome of an embedded activity update event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmbeddedActivityUpdate {
    /// First time the activity was seen, with participants.
    Created(EmbeddedActivityState),
    /// Known activity still running. `changes` holds the old activity fields.
    Updated {
        state: EmbeddedActivityState,
        joined: HashSet<Snowflake>,
        left: HashSet<Snowflake>,
        changes: ActivityChanges,
    },
    /// The last participant left (or the activity was first seen without any).
    Deleted(EmbeddedActivityState),
}

/// Registry of embedded activity states, keyed by guild, channel and application,
/// plus a per guild index of the states that currently have participants.
///
/// Every read-modify-write of a state happens under its registry entry guard.
/// When both maps are touched the registry entry is locked first.
pub struct EmbeddedActivityCache {
    opts: Options,
    states: DashMap<EmbeddedActivityStateKey, EmbeddedActivityState>,
    guild_states: DashMap<Snowflake, HashSet<EmbeddedActivityStateKey>>,
}

impl EmbeddedActivityCache {
    pub fn new(opts: Options) -> Self {
        EmbeddedActivityCache {
            opts,
            states: DashMap::new(),
            guild_states: DashMap::new(),
        }
    }

    pub fn from_config(config: Config) -> Self {
        EmbeddedActivityCache::new(Options::from(config))
    }

    pub fn options(&self) -> Options {
        self.opts
    }

    /// Returns the state of the embedded activity described by `data`, creating
    /// and registering it when unknown, or updating the registered one otherwise.
    pub fn from_data(
        &self,
        data: &Payload,
        guild_id: Snowflake,
        strong_cache: bool,
    ) -> EmbeddedActivityState {
        if !self.opts.embedded_activities {
            return EmbeddedActivityState::from_data(data, guild_id);
        }

        let key = EmbeddedActivityStateKey::from_data(data, guild_id);

        match self.states.entry(key) {
            Entry::Occupied(mut entry) => {
                let state = entry.get_mut();
                state.update_attributes(data);

                if !state.is_empty() {
                    if strong_cache {
                        self.index(&key);
                    }
                    return state.clone();
                }

                self.unindex(&key);
                if self.opts.evict_empty {
                    debug!(?key, "Evicting embedded activity state");
                    entry.remove()
                } else {
                    state.clone()
                }
            }
            Entry::Vacant(entry) => {
                let state = EmbeddedActivityState::from_data(data, guild_id);
                self.register(entry, state, strong_cache)
            }
        }
    }

    /// Like [`from_data`](Self::from_data), also telling whether this call created
    /// the state. A state that was already registered is returned untouched, so
    /// the caller can diff it against `data`.
    pub fn from_data_is_created(
        &self,
        data: &Payload,
        guild_id: Snowflake,
        strong_cache: bool,
    ) -> (EmbeddedActivityState, bool) {
        if !self.opts.embedded_activities {
            return (EmbeddedActivityState::from_data(data, guild_id), true);
        }

        let key = EmbeddedActivityStateKey::from_data(data, guild_id);

        match self.states.entry(key) {
            Entry::Occupied(entry) => (entry.get().clone(), false),
            Entry::Vacant(entry) => {
                let state = EmbeddedActivityState::from_data(data, guild_id);
                (self.register(entry, state, strong_cache), true)
            }
        }
    }

    /// Applies an embedded activity update event.
    pub fn handle_update(&self, data: &Payload, guild_id: Snowflake) -> EmbeddedActivityUpdate {
        if !self.opts.embedded_activities {
            let state = EmbeddedActivityState::from_data(data, guild_id);
            return if state.is_empty() {
                EmbeddedActivityUpdate::Deleted(state)
            } else {
                EmbeddedActivityUpdate::Created(state)
            };
        }

        let key = EmbeddedActivityStateKey::from_data(data, guild_id);

        let mut entry = match self.states.entry(key) {
            Entry::Occupied(entry) => entry,
            Entry::Vacant(entry) => {
                let state = EmbeddedActivityState::from_data(data, guild_id);
                let state = self.register(entry, state, true);

                return if state.is_empty() {
                    EmbeddedActivityUpdate::Deleted(state)
                } else {
                    EmbeddedActivityUpdate::Created(state)
                };
            }
        };

        let state = entry.get_mut();
        let (joined, left) = state.difference_update_user_ids(data);

        if !state.is_empty() {
            let changes = state.difference_update_activity(data);
            self.index(&key);

            trace!(
                ?key,
                joined = joined.len(),
                left = left.len(),
                changed = changes.len(),
                "Updated embedded activity state"
            );

            return EmbeddedActivityUpdate::Updated {
                state: state.clone(),
                joined,
                left,
                changes,
            };
        }

        state.update_activity(data);
        self.unindex(&key);

        let state = if self.opts.evict_empty {
            debug!(?key, "Evicting embedded activity state");
            entry.remove()
        } else {
            state.clone()
        };

        EmbeddedActivityUpdate::Deleted(state)
    }

    pub fn get(&self, key: &EmbeddedActivityStateKey) -> Result<Option<EmbeddedActivityState>> {
        if !self.opts.embedded_activities {
            return CacheError::StoreDisabled.into();
        }

        Ok(self.states.get(key).map(|state| state.value().clone()))
    }

    pub fn remove(&self, key: &EmbeddedActivityStateKey) -> Option<EmbeddedActivityState> {
        match self.states.entry(*key) {
            Entry::Occupied(entry) => {
                self.unindex(key);
                Some(entry.remove())
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Drops every state without participants from the registry. Returns how many
    /// were dropped.
    pub fn evict_empty(&self) -> usize {
        let before = self.states.len();
        self.states.retain(|_, state| !state.is_empty());

        let evicted = before.saturating_sub(self.states.len());
        if evicted > 0 {
            debug!(evicted, "Evicted empty embedded activity states");
        }

        evicted
    }

    /// States of the guild's embedded activities that currently have participants.
    pub fn guild_states(&self, guild_id: Snowflake) -> Result<Vec<EmbeddedActivityState>> {
        if !self.opts.embedded_activities {
            return CacheError::StoreDisabled.into();
        }

        let keys = match self.guild_states.get(&guild_id) {
            Some(keys) => keys.value().iter().copied().collect::<Vec<_>>(),
            None => return Ok(vec![]),
        };

        Ok(keys
            .iter()
            .filter_map(|key| self.states.get(key).map(|state| state.value().clone()))
            .collect())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn register(
        &self,
        entry: VacantEntry<'_, EmbeddedActivityStateKey, EmbeddedActivityState>,
        state: EmbeddedActivityState,
        strong_cache: bool,
    ) -> EmbeddedActivityState {
        let key = *entry.key();

        if state.is_empty() && self.opts.evict_empty {
            return state;
        }

        debug!(?key, users = state.user_ids.len(), "Created embedded activity state");

        if strong_cache && !state.is_empty() {
            self.index(&key);
        }

        entry.insert(state).value().clone()
    }

    fn index(&self, key: &EmbeddedActivityStateKey) {
        // Activities outside of guilds have nothing to be indexed under.
        if !self.opts.guild_index || key.guild_id.is_none() {
            return;
        }

        if self.guild_states.entry(key.guild_id).or_default().insert(*key) {
            debug!(?key, "Indexed embedded activity state");
        }
    }

    fn unindex(&self, key: &EmbeddedActivityStateKey) {
        if !self.opts.guild_index {
            return;
        }

        let now_empty = match self.guild_states.get_mut(&key.guild_id) {
            Some(mut keys) => {
                if keys.remove(key) {
                    debug!(?key, "Unindexed embedded activity state");
                }
                keys.is_empty()
            }
            None => return,
        };

        if now_empty {
            self.guild_states.remove_if(&key.guild_id, |_, keys| keys.is_empty());
        }
    }
}

impl Default for EmbeddedActivityCache {
    fn default() -> Self {
        EmbeddedActivityCache::new(Options::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use activity_model::user::{ActivityChange, ActivityField};
    use serde_json::{json, Value};

    const GUILD: Snowflake = Snowflake(1);

    fn payload(value: Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    fn update(users: &[&str], details: Option<&str>) -> Payload {
        let mut activity = json!({"application_id": "3", "name": "Poker Night"});
        if let Some(details) = details {
            activity["details"] = json!(details);
        }

        payload(json!({
            "guild_id": "1",
            "channel_id": "2",
            "embedded_activity": activity,
            "users": users,
        }))
    }

    fn key() -> EmbeddedActivityStateKey {
        EmbeddedActivityStateKey::new(GUILD, Snowflake(2), Snowflake(3))
    }

    fn ids(ids: &[u64]) -> HashSet<Snowflake> {
        ids.iter().copied().map(Snowflake).collect()
    }

    #[test]
    fn test_from_data_is_created() {
        let cache = EmbeddedActivityCache::default();

        let (state, is_created) = cache.from_data_is_created(&update(&["10"], None), GUILD, true);
        assert!(is_created);
        assert_eq!(state.key(), key());

        let (state, is_created) =
            cache.from_data_is_created(&update(&["10", "11"], None), GUILD, true);
        assert!(!is_created);
        assert_eq!(state.user_ids, ids(&[10]));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.guild_states(GUILD).unwrap().len(), 1);
    }

    #[test]
    fn test_from_data_updates_existing() {
        let cache = EmbeddedActivityCache::default();
        cache.from_data(&update(&["10"], None), GUILD, true);

        let state = cache.from_data(&update(&["10", "11"], Some("round 2")), GUILD, true);
        assert_eq!(state.user_ids, ids(&[10, 11]));
        assert_eq!(state.activity.details(), Some("round 2"));
        assert_eq!(cache.get(&key()).unwrap(), Some(state));
    }

    #[test]
    fn test_weak_cache_is_not_indexed() {
        let cache = EmbeddedActivityCache::default();
        cache.from_data(&update(&["10"], None), GUILD, false);

        assert_eq!(cache.len(), 1);
        assert!(cache.guild_states(GUILD).unwrap().is_empty());
    }

    #[test]
    fn test_handle_update_created() {
        let cache = EmbeddedActivityCache::default();

        match cache.handle_update(&update(&["10"], None), Snowflake::NONE) {
            EmbeddedActivityUpdate::Created(state) => assert_eq!(state.user_ids, ids(&[10])),
            other => panic!("expected created, got {:?}", other),
        }
    }

    #[test]
    fn test_handle_update_created_without_users() {
        let cache = EmbeddedActivityCache::default();

        assert!(matches!(
            cache.handle_update(&update(&[], None), GUILD),
            EmbeddedActivityUpdate::Deleted(_)
        ));
        assert!(cache.guild_states(GUILD).unwrap().is_empty());
    }

    #[test]
    fn test_handle_update_updated() {
        let cache = EmbeddedActivityCache::default();
        cache.handle_update(&update(&["10", "11"], None), GUILD);

        match cache.handle_update(&update(&["11", "12"], Some("round 2")), GUILD) {
            EmbeddedActivityUpdate::Updated {
                state,
                joined,
                left,
                changes,
            } => {
                assert_eq!(joined, ids(&[12]));
                assert_eq!(left, ids(&[10]));
                assert_eq!(
                    changes.get(ActivityField::Details),
                    Some(&ActivityChange::Details(None))
                );
                assert_eq!(state.activity.details(), Some("round 2"));
            }
            other => panic!("expected updated, got {:?}", other),
        }
    }

    #[test]
    fn test_handle_update_last_user_left() {
        let cache = EmbeddedActivityCache::default();
        cache.handle_update(&update(&["10"], None), GUILD);
        assert_eq!(cache.guild_states(GUILD).unwrap().len(), 1);

        match cache.handle_update(&update(&[], Some("over")), GUILD) {
            EmbeddedActivityUpdate::Deleted(state) => {
                assert!(state.user_ids.is_empty());
                assert_eq!(state.activity.details(), Some("over"));
            }
            other => panic!("expected deleted, got {:?}", other),
        }

        assert!(cache.guild_states(GUILD).unwrap().is_empty());

        let state = cache.get(&key()).unwrap().unwrap();
        assert!(state.is_empty());
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.evict_empty(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_handle_update_revives_tombstone() {
        let cache = EmbeddedActivityCache::default();
        cache.handle_update(&update(&["10"], None), GUILD);
        cache.handle_update(&update(&[], None), GUILD);

        match cache.handle_update(&update(&["10"], None), GUILD) {
            EmbeddedActivityUpdate::Updated { joined, .. } => assert_eq!(joined, ids(&[10])),
            other => panic!("expected updated, got {:?}", other),
        }
        assert_eq!(cache.guild_states(GUILD).unwrap().len(), 1);
    }

    #[test]
    fn test_evict_empty_option() {
        let cache = EmbeddedActivityCache::new(Options::new(true, true, true));
        cache.handle_update(&update(&["10"], None), GUILD);

        assert!(matches!(
            cache.handle_update(&update(&[], None), GUILD),
            EmbeddedActivityUpdate::Deleted(_)
        ));
        assert_eq!(cache.get(&key()).unwrap(), None);

        cache.handle_update(&update(&[], None), GUILD);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_from_data_evict_empty_option() {
        let cache = EmbeddedActivityCache::new(Options::new(true, true, true));
        cache.from_data(&update(&["10"], None), GUILD, true);
        assert_eq!(cache.guild_states(GUILD).unwrap().len(), 1);

        let state = cache.from_data(&update(&[], None), GUILD, true);
        assert!(state.is_empty());
        assert_eq!(cache.get(&key()).unwrap(), None);
        assert!(cache.is_empty());
        assert!(cache.guild_states(GUILD).unwrap().is_empty());
    }

    #[test]
    fn test_from_data_keeps_tombstone() {
        let cache = EmbeddedActivityCache::default();
        cache.from_data(&update(&["10"], None), GUILD, true);
        cache.from_data(&update(&[], None), GUILD, true);

        assert!(cache.get(&key()).unwrap().unwrap().is_empty());
        assert!(cache.guild_states(GUILD).unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_updates() {
        let cache = EmbeddedActivityCache::default();
        let threads = 8;
        let rounds = 200;

        std::thread::scope(|s| {
            for worker in 0..threads {
                let cache = &cache;
                s.spawn(move || {
                    let user = (100 + worker).to_string();
                    for round in 0..rounds {
                        let users = if round % 2 == 0 {
                            vec![user.as_str()]
                        } else {
                            vec![]
                        };
                        cache.handle_update(&update(&users, None), GUILD);
                    }
                });
            }
        });

        let state = cache.get(&key()).unwrap().unwrap();
        let indexed = cache.guild_states(GUILD).unwrap();
        if state.is_empty() {
            assert!(indexed.is_empty());
        } else {
            assert_eq!(indexed, vec![state]);
        }

        cache.handle_update(&update(&["1"], None), GUILD);
        assert_eq!(cache.guild_states(GUILD).unwrap().len(), 1);
        cache.handle_update(&update(&[], None), GUILD);
        assert!(cache.guild_states(GUILD).unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_evictions() {
        let cache = EmbeddedActivityCache::new(Options::new(true, true, true));

        std::thread::scope(|s| {
            for worker in 0..8 {
                let cache = &cache;
                s.spawn(move || {
                    for round in 0..200 {
                        if (round + worker) % 3 == 0 {
                            cache.remove(&key());
                        } else if round % 2 == 0 {
                            cache.handle_update(&update(&["10"], None), GUILD);
                        } else {
                            cache.handle_update(&update(&[], None), GUILD);
                        }
                    }
                });
            }
        });

        let indexed = cache.guild_states(GUILD).unwrap();
        match cache.get(&key()).unwrap() {
            Some(state) => assert_eq!(indexed, vec![state]),
            None => assert!(indexed.is_empty()),
        }
    }

    #[test]
    fn test_store_disabled() {
        let cache = EmbeddedActivityCache::new(Options::new(false, true, false));

        let (_, is_created) = cache.from_data_is_created(&update(&["10"], None), GUILD, true);
        assert!(is_created);
        assert!(cache.is_empty());
        assert!(matches!(cache.get(&key()), Err(CacheError::StoreDisabled)));
    }

    #[test]
    fn test_remove() {
        let cache = EmbeddedActivityCache::default();
        cache.handle_update(&update(&["10"], None), GUILD);

        assert!(cache.remove(&key()).is_some());
        assert!(cache.remove(&key()).is_none());
        assert!(cache.guild_states(GUILD).unwrap().is_empty());
    }
}
