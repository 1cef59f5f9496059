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

//! High-level data types.

use derive_getters::Getters;
use derive_more::{AsRef, Constructor};
use serde::{Deserialize, Serialize};

/// Newtype pattern for the identifiers assigned to coasters.
///
/// Identifiers are generated by the store and are opaque text to every other layer.
#[derive(
    AsRef, Clone, Constructor, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[cfg_attr(test, derive(Debug))]
pub(crate) struct CoasterId(String);

/// A roller coaster tracked by the catalog.
#[derive(Clone, Constructor, Getters, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct Coaster {
    /// Name of the coaster.
    name: String,

    /// Company that built the coaster.
    manufacturer: String,

    /// Identifier assigned by the store.  Unique and immutable once assigned.
    id: CoasterId,

    /// Name of the park that operates the coaster.
    in_park: String,

    /// Height of the coaster, as provided by the caller.
    height: i64,
}

impl Coaster {
    /// Creates a candidate coaster whose identifier has not yet been assigned.
    ///
    /// The store replaces the placeholder identifier when the candidate is inserted.
    pub(crate) fn candidate(
        name: String,
        manufacturer: String,
        in_park: String,
        height: i64,
    ) -> Self {
        Self { name, manufacturer, id: CoasterId::new(String::new()), in_park, height }
    }

    /// Returns this coaster with its identifier replaced by `id`.
    pub(crate) fn with_id(self, id: CoasterId) -> Self {
        Self { id, ..self }
    }
}
