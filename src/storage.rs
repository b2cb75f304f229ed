use crate::stopwatch::{Lap, SavedState};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

pub const STATE_KEY: &str = "lapwatch.state";

/// A string key-value store.
pub trait Store {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordRef<'a> {
    accumulated_ms: u64,
    laps: &'a [Lap],
    saved_at: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Record {
    accumulated_ms: u64,
    laps: Vec<Lap>,
}

/// Best-effort persistence of [`SavedState`] under [`STATE_KEY`].
///
/// Neither direction fails: writes that cannot complete are logged and
/// dropped, and unreadable state loads as the default.
pub struct Persistence<S> {
    store: S,
}

impl<S: Store> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn save(&mut self, state: &SavedState) {
        let record = RecordRef {
            accumulated_ms: state.accumulated_ms,
            laps: &state.laps,
            saved_at: epoch_ms(),
        };

        let result = serde_json::to_string(&record)
            .map_err(anyhow::Error::from)
            .and_then(|payload| self.store.set(STATE_KEY, &payload));

        match result {
            Ok(()) => {
                tracing::trace!(accumulated_ms = record.accumulated_ms, "Saved stopwatch state")
            }
            Err(e) => tracing::warn!(%e, "Failed to save stopwatch state"),
        }
    }

    pub fn load(&self) -> SavedState {
        let payload = match self.store.get(STATE_KEY) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                tracing::debug!("No saved stopwatch state");
                return SavedState::default();
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to read stopwatch state");
                return SavedState::default();
            }
        };

        match serde_json::from_str::<Record>(&payload) {
            Ok(record) => SavedState {
                accumulated_ms: record.accumulated_ms,
                laps: record.laps,
            },
            Err(e) => {
                tracing::warn!(%e, "Discarding malformed stopwatch state");
                SavedState::default()
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}
