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

//! Entry point to the REST server.

use crate::driver::Driver;
use axum::Router;
use coasterd_core::rest::RestError;

mod admin_get;
mod coaster_get;
mod coasters_get;
mod coasters_post;
#[cfg(test)]
mod testutils;

/// Replies to requests that hit a known path with an unsupported method.
async fn method_not_allowed() -> RestError {
    RestError::MethodNotAllowed
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::get;
    Router::new()
        .route(
            "/coasters",
            get(coasters_get::handler).post(coasters_post::handler).fallback(method_not_allowed),
        )
        .route("/coasters/:id", get(coaster_get::handler).fallback(method_not_allowed))
        .route("/admin", get(admin_get::handler).fallback(method_not_allowed))
        .with_state(driver)
}
