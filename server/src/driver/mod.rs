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

//! Business logic for the service.

use crate::store::RecordStore;
use std::sync::Arc;

mod admin;
mod coaster;
mod coasters;
#[cfg(test)]
mod testutils;

pub(crate) use admin::AdminPolicy;

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they consume the driver in an
/// attempt to minimize the possibility of executing two operations against shared state without
/// making that pattern obvious at the call site.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The store that keeps all coaster records in memory.
    store: Arc<RecordStore>,

    /// Credentials checker for the administrative entry point.
    admin: AdminPolicy,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(store: Arc<RecordStore>, admin: AdminPolicy) -> Self {
        Self { store, admin }
    }
}
