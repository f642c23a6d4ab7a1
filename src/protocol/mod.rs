// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cloud protocol implementation.
//!
//! The Keemple cloud speaks a single style of request: an authenticated
//! POST with query parameters, answered by a JSON body carrying a vendor
//! `resultCode` (zero means success). [`CloudClient`] owns the session
//! state; [`CloudConfig`] is the builder-style connection configuration.

mod cloud;

pub use cloud::{
    ApiEnvelope, CloudClient, CloudConfig, LOGIN_ENDPOINT, OPERATE_ENDPOINT, POLL_ENDPOINT,
};
