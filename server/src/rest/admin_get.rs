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

//! Administrative entry point, gated by HTTP basic authentication.

use crate::driver::Driver;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse};
use coasterd_core::rest::{EmptyBody, RestError, get_basic_auth};

/// Confirmation page returned to authorized administrators.
const ADMIN_PAGE: &str =
    "<html><body><h1>Coasterd administration</h1><p>You are authorized.</p></body></html>";

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    headers: HeaderMap,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let (username, password) = get_basic_auth(&headers)?;
    driver.authorize_admin(&username, &password).await?;

    Ok(Html(ADMIN_PAGE))
}
