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

//! Operations on one coaster.

use crate::driver::Driver;
use crate::model::{Coaster, CoasterId};
use coasterd_core::driver::DriverResult;

impl Driver {
    /// Inserts `candidate` into the catalog and returns the stored record, which carries the
    /// identifier assigned to it.
    pub(crate) async fn create_coaster(self, candidate: Coaster) -> DriverResult<Coaster> {
        let id = self.store.insert(candidate);
        let coaster = self.store.get(&id)?;
        Ok(coaster)
    }

    /// Gets the coaster stored under `id`.
    pub(crate) async fn get_coaster(self, id: &CoasterId) -> DriverResult<Coaster> {
        let coaster = self.store.get(id)?;
        Ok(coaster)
    }
}
