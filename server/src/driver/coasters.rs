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

//! Operations on the collection of coasters.

use crate::driver::Driver;
use crate::model::Coaster;
use coasterd_core::driver::DriverResult;

impl Driver {
    /// Lists all known coasters, in no particular order.
    pub(crate) async fn list_coasters(self) -> DriverResult<Vec<Coaster>> {
        Ok(self.store.all())
    }
}

#[cfg(test)]
mod tests {
    use crate::driver::testutils::*;
    use crate::model::CoasterId;
    use std::collections::BTreeSet;
    use std::time::Duration;

    #[tokio::test]
    async fn test_list_coasters_none() {
        let context = TestContext::setup();

        let coasters = context.driver().list_coasters().await.unwrap();
        assert!(coasters.is_empty());
    }

    #[tokio::test]
    async fn test_list_coasters_some() {
        let context = TestContext::setup();

        let mut exp_ids = BTreeSet::new();
        exp_ids
            .insert(context.insert_coaster("Nemesis", "Bolliger & Mabillard", "Alton Towers", 42));
        context.clock().advance(Duration::from_secs(1));
        exp_ids
            .insert(context.insert_coaster("Oblivion", "Bolliger & Mabillard", "Alton Towers", 65));

        let coasters = context.driver().list_coasters().await.unwrap();
        let ids = coasters.into_iter().map(|c| c.id().clone()).collect::<BTreeSet<CoasterId>>();
        assert_eq!(exp_ids, ids);
    }
}
