use tracing::error;

use crate::codec;
use crate::errors::{CodecError, StoreError};
use crate::models::Record;
use crate::storage::KeyValueStore;

pub const STORAGE_KEY: &str = "habit_grid contents";
pub const DEBUG_STORAGE_KEY: &str = "DEBUG_habit_grid contents";

/// Pairs a storage backend with the codec: the whole record set is loaded
/// and saved in one piece under a single key.
#[derive(Debug)]
pub struct HabitStore<S> {
    backend: S,
    debug_mirror: bool,
}

impl<S: KeyValueStore> HabitStore<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            debug_mirror: false,
        }
    }

    /// Like [`new`](Self::new), but every save also writes the expanded
    /// record array under [`DEBUG_STORAGE_KEY`] for inspection. No code path
    /// reads that key back.
    pub fn with_debug_mirror(backend: S) -> Self {
        Self {
            backend,
            debug_mirror: true,
        }
    }

    /// Reads the full record set. A missing, unreadable, or corrupt blob is
    /// an empty history.
    pub fn load(&self) -> Vec<Record> {
        match self.backend.get(STORAGE_KEY) {
            Ok(blob) => codec::decode(blob.as_deref()),
            Err(err) => {
                error!("failed to read habit blob: {err}");
                Vec::new()
            }
        }
    }

    /// Packs and writes the full record set, replacing the previous blob.
    pub fn save(&mut self, records: &[Record]) -> Result<(), StoreError> {
        if self.debug_mirror {
            let expanded = serde_json::to_string_pretty(records).map_err(CodecError::from)?;
            self.backend.set(DEBUG_STORAGE_KEY, &expanded)?;
        }
        let blob = codec::encode(records)?;
        self.backend.set(STORAGE_KEY, &blob)?;
        Ok(())
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }
}
