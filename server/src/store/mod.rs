// Coasterd
// Copyright 2024 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! In-memory storage for the coaster catalog.
//!
//! The catalog lives for as long as the process does: it starts empty, grows through inserts,
//! and is never persisted.  All shared state sits behind a single exclusive lock, and no
//! operation holds that lock across an await point or any I/O.

use crate::model::{Coaster, CoasterId};
use coasterd_core::clocks::Clock;
use coasterd_core::driver::DriverError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[cfg(test)]
mod tests;

/// Storage errors.
#[derive(Debug, PartialEq, thiserror::Error)]
pub(crate) enum StoreError {
    /// Indicates that a requested entry does not exist.
    #[error("Entity not found")]
    NotFound,
}

impl From<StoreError> for DriverError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => DriverError::NotFound(e.to_string()),
        }
    }
}

/// Result type for this module.
pub(crate) type StoreResult<T> = Result<T, StoreError>;

/// Mutable internals of the store, all guarded by the same lock.
struct State {
    /// All known coasters, indexed by their identifier.
    records: HashMap<CoasterId, Coaster>,

    /// Numeric value of the last identifier handed out by `insert`.
    last_id: i128,
}

/// In-memory, concurrency-safe keeper of all coaster records.
///
/// Every operation acquires the lock for the whole of its critical section, so callers observe
/// the mapping either before or after a mutation but never in the middle of one.
pub(crate) struct RecordStore {
    /// Clock used to derive new identifiers.
    clock: Arc<dyn Clock + Send + Sync>,

    /// The identifier-to-record mapping and the identifier allocation cursor.
    state: Mutex<State>,
}

impl RecordStore {
    /// Creates an empty store that derives identifiers from `clock`.
    pub(crate) fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { clock, state: Mutex::new(State { records: HashMap::new(), last_id: 0 }) }
    }

    /// Returns a snapshot of all stored coasters, in no particular order.
    ///
    /// Inserts that complete after this returns do not alter the snapshot.
    pub(crate) fn all(&self) -> Vec<Coaster> {
        let state = self.state.lock().expect("Store operations do not panic while locked");
        state.records.values().cloned().collect()
    }

    /// Returns the coaster stored under `id`.
    pub(crate) fn get(&self, id: &CoasterId) -> StoreResult<Coaster> {
        let state = self.state.lock().expect("Store operations do not panic while locked");
        state.records.get(id).cloned().ok_or(StoreError::NotFound)
    }

    /// Stores `candidate` under a newly-assigned identifier and returns that identifier.
    ///
    /// Any identifier already present in `candidate` is discarded: identifiers are always
    /// generated by the store and never reused.
    pub(crate) fn insert(&self, candidate: Coaster) -> CoasterId {
        let mut state = self.state.lock().expect("Store operations do not panic while locked");

        // Identifiers are the decimal rendering of the clock's nanosecond timestamp.  The wall
        // clock can repeat readings when its resolution is coarser than the insert rate, so bump
        // past the previous identifier whenever it has not advanced.
        let nanos = self.clock.now_utc().unix_timestamp_nanos();
        let raw = if nanos > state.last_id { nanos } else { state.last_id + 1 };
        state.last_id = raw;

        let id = CoasterId::new(raw.to_string());
        let previous = state.records.insert(id.clone(), candidate.with_id(id.clone()));
        assert!(previous.is_none(), "Assigned identifiers cannot collide");
        id
    }
}
