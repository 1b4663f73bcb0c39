use crate::consts;
use crate::store::{KeyValueStore, StoreError};
use crate::util::ErrorChain;
use serde::de::{Deserializer, Error as _, Unexpected};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::num::NonZeroU32;
use thiserror::Error;

/// A single ranked result on the leaderboard
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct LeaderboardEntry {
    #[serde(deserialize_with = "nonblank_name")]
    pub(crate) name: String,
    pub(crate) score: NonZeroU32,
}

/// Names in stored data must contain something other than whitespace, same
/// as names entered by a player
fn nonblank_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let name = String::deserialize(deserializer)?;
    if name.trim().is_empty() {
        Err(D::Error::invalid_value(
            Unexpected::Str(&name),
            &"a non-blank name",
        ))
    } else {
        Ok(name)
    }
}

/// The best [`LEADERBOARD_CAPACITY`][consts::LEADERBOARD_CAPACITY] scores,
/// highest first, persisted as a JSON array under a single key of a
/// [`KeyValueStore`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Leaderboard<S> {
    store: S,
    /// The entries as last read from or written to the store
    entries: Vec<LeaderboardEntry>,
}

impl<S: KeyValueStore> Leaderboard<S> {
    /// Create a leaderboard backed by `store` and load its current contents
    pub(crate) fn new(store: S) -> Leaderboard<S> {
        let mut lb = Leaderboard {
            store,
            entries: Vec::new(),
        };
        lb.load();
        lb
    }

    /// Reread the entries from the store.  A missing, unreadable, or corrupt
    /// leaderboard is treated as empty.
    pub(crate) fn load(&mut self) -> &[LeaderboardEntry] {
        self.entries = self.read();
        &self.entries
    }

    fn read(&self) -> Vec<LeaderboardEntry> {
        let src = match self.store.get(consts::LEADERBOARD_KEY) {
            Ok(Some(src)) => src,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Treating leaderboard as empty: {}", e.source_chain());
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<LeaderboardEntry>>(&src) {
            Ok(mut entries) => {
                rank(&mut entries);
                entries
            }
            Err(e) => {
                log::warn!("Stored leaderboard is corrupt; treating as empty: {e}");
                Vec::new()
            }
        }
    }

    /// Add a result for `name` and persist the new top entries, replacing
    /// whatever the store held before.  Scores of zero are not recorded.
    pub(crate) fn record(&mut self, name: &str, score: u32) -> Result<(), SaveError> {
        let Some(score) = NonZeroU32::new(score) else {
            return Ok(());
        };
        let mut entries = self.read();
        entries.push(LeaderboardEntry {
            name: name.to_owned(),
            score,
        });
        rank(&mut entries);
        let mut src = serde_json::to_string(&entries).map_err(SaveError::serialize)?;
        src.push('\n');
        self.store
            .set(consts::LEADERBOARD_KEY, &src)
            .map_err(SaveError::store)?;
        log::info!("Recorded score of {score} for {name:?}");
        self.entries = entries;
        Ok(())
    }
}

impl<S> Leaderboard<S> {
    /// Return the persisted entries, highest score first
    pub(crate) fn all(&self) -> &[LeaderboardEntry] {
        &self.entries
    }
}

/// Sort `entries` by descending score, keeping earlier entries first on
/// ties, and drop everything past the capacity
fn rank(entries: &mut Vec<LeaderboardEntry>) {
    entries.sort_by_key(|e| Reverse(e.score));
    entries.truncate(consts::LEADERBOARD_CAPACITY);
}

#[derive(Debug, Error)]
#[error("Failed to save leaderboard")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn store(e: StoreError) -> Self {
        SaveError(SaveErrorSource::Store(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to serialize leaderboard")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write leaderboard to storage")]
    Store(#[source] StoreError),
}
