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

//! Authorization of administrative requests.

use crate::driver::Driver;
use coasterd_core::driver::{DriverError, DriverResult};

/// The only username that may access the administrative entry point.
const ADMIN_USERNAME: &str = "admin";

/// Credentials checker for the administrative entry point.
///
/// The policy never talks to the record store: it only knows about the single password that the
/// process was configured with at startup.
#[derive(Clone)]
pub(crate) struct AdminPolicy {
    /// The configured admin password.
    password: String,
}

impl AdminPolicy {
    /// Creates a policy that accepts `password` for the admin user.
    pub(crate) fn new<P: Into<String>>(password: P) -> Self {
        Self { password: password.into() }
    }

    /// Checks whether `username` and `password` identify the administrator.
    fn authorize(&self, username: &str, password: &str) -> bool {
        username == ADMIN_USERNAME && password == self.password
    }
}

impl Driver {
    /// Validates the credentials of an administrative request.
    ///
    /// All mismatches look the same to the caller.
    pub(crate) async fn authorize_admin(self, username: &str, password: &str) -> DriverResult<()> {
        if !self.admin.authorize(username, password) {
            log::warn!("Rejected admin credentials for username '{}'", username);
            return Err(DriverError::Unauthorized("Invalid admin credentials".to_owned()));
        }
        Ok(())
    }
}
