// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Keemple device control.
//!
//! This module provides type-safe representations of values used across the
//! device model and the wire commands. Each constrained type validates at
//! construction time.
//!
//! # Types
//!
//! - [`Channel`] - Output channel index on dual-channel devices (1-2)
//! - [`DeviceType`] - Device category keyed by the vendor type code
//! - [`Position`] - Blind position with host (0-100) / vendor (0-99) conversion
//! - [`StatusVector`] - Ordered numeric state vector with lossy parsing

mod channel;
mod device_type;
mod position;
mod status_vector;

pub use channel::Channel;
pub use device_type::DeviceType;
pub use position::{Position, clamp_vendor_position};
pub use status_vector::StatusVector;
