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

//! Test utilities for the business layer.

use crate::driver::{AdminPolicy, Driver};
use crate::model::{Coaster, CoasterId};
use crate::store::RecordStore;
use coasterd_core::clocks::testutils::SettableClock;
use std::sync::Arc;
use time::macros::datetime;

/// Admin password used by the test drivers.
pub(crate) const ADMIN_PASSWORD: &str = "sekrit";

/// State of a running test.
pub(crate) struct TestContext {
    /// The fake clock that feeds identifier generation.
    clock: Arc<SettableClock>,

    /// The store backing the driver.
    store: Arc<RecordStore>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes a driver against an empty store and a frozen clock.
    pub(crate) fn setup() -> Self {
        let clock = Arc::from(SettableClock::new(datetime!(2024-06-20 11:30:00 UTC)));
        let store = Arc::from(RecordStore::new(clock.clone()));
        let driver = Driver::new(store.clone(), AdminPolicy::new(ADMIN_PASSWORD));
        Self { clock, store, driver }
    }

    /// Returns the fake clock used by the store.
    pub(crate) fn clock(&self) -> &SettableClock {
        &self.clock
    }

    /// Returns direct access to the store to inspect or prepare its contents.
    pub(crate) fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Returns a driver clone to execute one operation.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Inserts a coaster directly into the store, bypassing the driver.
    pub(crate) fn insert_coaster(
        &self,
        name: &str,
        manufacturer: &str,
        in_park: &str,
        height: i64,
    ) -> CoasterId {
        self.store.insert(Coaster::candidate(
            name.to_owned(),
            manufacturer.to_owned(),
            in_park.to_owned(),
            height,
        ))
    }
}
