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

//! Tests for the in-memory record store.

use super::*;
use coasterd_core::clocks::SystemClock;
use coasterd_core::clocks::testutils::SettableClock;
use std::collections::BTreeSet;
use std::thread;
use std::time::Duration;
use time::macros::datetime;

/// Fixed instant used by the tests that need a deterministic clock.
const T0: time::OffsetDateTime = datetime!(2024-06-20 11:30:00 UTC);

/// Creates a store backed by a settable clock frozen at `T0`.
fn settable_store() -> (Arc<SettableClock>, RecordStore) {
    let clock = Arc::from(SettableClock::new(T0));
    let store = RecordStore::new(clock.clone());
    (clock, store)
}

/// Convenience to build a candidate with mostly-canned contents.
fn candidate(name: &str) -> Coaster {
    Coaster::candidate(
        name.to_owned(),
        "Bolliger & Mabillard".to_owned(),
        "Alton Towers".to_owned(),
        42,
    )
}

#[test]
fn test_all_initially_empty() {
    let (_clock, store) = settable_store();
    assert!(store.all().is_empty());
}

#[test]
fn test_insert_then_get() {
    let (_clock, store) = settable_store();

    let id = store.insert(candidate("Nemesis"));

    let coaster = store.get(&id).unwrap();
    assert_eq!(id, *coaster.id());
    assert_eq!("Nemesis", coaster.name().as_str());
    assert_eq!("Bolliger & Mabillard", coaster.manufacturer().as_str());
    assert_eq!("Alton Towers", coaster.in_park().as_str());
    assert_eq!(42, *coaster.height());
}

#[test]
fn test_get_missing() {
    let (_clock, store) = settable_store();
    store.insert(candidate("Nemesis"));

    assert_eq!(
        StoreError::NotFound,
        store.get(&CoasterId::new("does-not-exist".to_owned())).unwrap_err()
    );
}

#[test]
fn test_insert_assigns_timestamp_identifiers() {
    let (clock, store) = settable_store();

    let id = store.insert(candidate("Nemesis"));
    assert_eq!(T0.unix_timestamp_nanos().to_string(), *id.as_ref());

    clock.advance(Duration::from_nanos(25));
    let id = store.insert(candidate("Oblivion"));
    assert_eq!((T0.unix_timestamp_nanos() + 25).to_string(), *id.as_ref());
}

#[test]
fn test_insert_discards_candidate_identifier() {
    let (_clock, store) = settable_store();

    let candidate = candidate("Nemesis").with_id(CoasterId::new("custom".to_owned()));
    let id = store.insert(candidate);

    assert_ne!(CoasterId::new("custom".to_owned()), id);
    assert_eq!(
        StoreError::NotFound,
        store.get(&CoasterId::new("custom".to_owned())).unwrap_err()
    );
    assert_eq!(id, *store.get(&id).unwrap().id());
}

#[test]
fn test_insert_bumps_identifiers_when_the_clock_stalls() {
    let (_clock, store) = settable_store();

    let id1 = store.insert(candidate("Nemesis"));
    let id2 = store.insert(candidate("Oblivion"));
    let id3 = store.insert(candidate("Wicker Man"));

    let base = T0.unix_timestamp_nanos();
    assert_eq!(base.to_string(), *id1.as_ref());
    assert_eq!((base + 1).to_string(), *id2.as_ref());
    assert_eq!((base + 2).to_string(), *id3.as_ref());
}

#[test]
fn test_all_returns_every_record_exactly_once() {
    let (clock, store) = settable_store();

    let mut exp_ids = BTreeSet::new();
    for name in ["Nemesis", "Oblivion", "Wicker Man"] {
        exp_ids.insert(store.insert(candidate(name)));
        clock.advance(Duration::from_secs(1));
    }

    let ids = store.all().into_iter().map(|c| c.id().clone()).collect::<BTreeSet<CoasterId>>();
    assert_eq!(exp_ids, ids);
}

#[test]
fn test_all_snapshots_are_isolated_from_later_inserts() {
    let (_clock, store) = settable_store();

    store.insert(candidate("Nemesis"));
    let snapshot = store.all();
    assert_eq!(1, snapshot.len());

    store.insert(candidate("Oblivion"));
    assert_eq!(1, snapshot.len());
    assert_eq!(2, store.all().len());
}

#[test]
fn test_system_clock_identifiers_are_numeric_and_increasing() {
    let store = RecordStore::new(Arc::from(SystemClock::default()));

    let id1 = store.insert(candidate("Nemesis"));
    let id2 = store.insert(candidate("Oblivion"));

    let raw1 = id1.as_ref().parse::<i128>().unwrap();
    let raw2 = id2.as_ref().parse::<i128>().unwrap();
    assert!(raw1 > 0);
    assert!(raw2 > raw1);
}

#[test]
fn test_concurrent_inserts_yield_distinct_identifiers() {
    let (_clock, store) = settable_store();
    let store = Arc::from(store);

    let mut handles = vec![];
    for i in 0..8 {
        let store: Arc<RecordStore> = store.clone();
        handles.push(thread::spawn(move || {
            let mut ids = vec![];
            for j in 0..16 {
                ids.push(store.insert(candidate(&format!("Coaster {}-{}", i, j))));
            }
            ids
        }));
    }

    let mut ids = BTreeSet::new();
    for handle in handles {
        ids.extend(handle.join().unwrap());
    }

    assert_eq!(8 * 16, ids.len());
    assert_eq!(8 * 16, store.all().len());

    // Every stored record must be keyed by its own identifier.
    for id in ids {
        assert_eq!(id, *store.get(&id).unwrap().id());
    }
}
