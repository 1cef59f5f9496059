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

//! Test utilities for the REST API.

use crate::driver::{AdminPolicy, Driver};
use crate::model::{Coaster, CoasterId};
use crate::rest::app;
use crate::store::RecordStore;
use axum::Router;
use coasterd_core::clocks::testutils::SettableClock;
use std::sync::Arc;
use std::time::Duration;
use time::macros::datetime;

/// Admin password configured in the apps built by `TestContext`.
pub(crate) const ADMIN_PASSWORD: &str = "sekrit";

/// State of a running test.
pub(crate) struct TestContext {
    /// The fake clock that feeds identifier generation.
    clock: Arc<SettableClock>,

    /// The store backing the app.
    store: Arc<RecordStore>,

    /// The app under test.
    app: Router,
}

impl TestContext {
    /// Initializes an app against an empty store and a frozen clock.
    pub(crate) fn setup() -> Self {
        let clock = Arc::from(SettableClock::new(datetime!(2024-06-20 11:30:00 UTC)));
        let store = Arc::from(RecordStore::new(clock.clone()));
        let driver = Driver::new(store.clone(), AdminPolicy::new(ADMIN_PASSWORD));
        let app = app(driver);
        Self { clock, store, app }
    }

    /// Returns a clone of the app under test.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the app under test.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Advances the store's clock by `delta`.
    pub(crate) fn advance(&self, delta: Duration) {
        self.clock.advance(delta);
    }

    /// Inserts a coaster directly into the store, bypassing the REST layer.
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

    /// Returns the coaster stored under `id`, which must exist.
    pub(crate) fn get_coaster(&self, id: &CoasterId) -> Coaster {
        self.store.get(id).unwrap()
    }

    /// Counts the records currently in the store.
    pub(crate) fn count_coasters(&self) -> usize {
        self.store.all().len()
    }
}
