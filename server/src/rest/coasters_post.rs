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

//! API to add a coaster to the catalog.

use crate::driver::Driver;
use crate::model::{Coaster, CoasterId};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Json, http};
use coasterd_core::rest::{JsonBody, RestError};
use serde::Deserialize;

/// Wire representation of a request to create a coaster.
///
/// All fields are optional and default to empty values when absent.
#[derive(Deserialize)]
pub(crate) struct Request {
    /// Name of the coaster.
    #[serde(default)]
    name: String,

    /// Company that built the coaster.
    #[serde(default)]
    manufacturer: String,

    /// Identifier supplied by the caller.  Accepted for compatibility but always discarded
    /// because the store assigns identifiers on insert.
    id: Option<CoasterId>,

    /// Name of the park that operates the coaster.
    #[serde(default)]
    in_park: String,

    /// Height of the coaster.
    #[serde(default)]
    height: i64,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<Request>,
) -> Result<(http::StatusCode, impl IntoResponse), RestError> {
    if request.id.is_some() {
        log::debug!("Discarding caller-supplied coaster identifier");
    }

    let candidate =
        Coaster::candidate(request.name, request.manufacturer, request.in_park, request.height);
    let coaster = driver.create_coaster(candidate).await?;

    Ok((http::StatusCode::CREATED, Json(coaster)))
}
