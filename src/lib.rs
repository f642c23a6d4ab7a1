// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Keemple Lib - A Rust library for the Keemple home-automation cloud.
//!
//! This library logs in against the Keemple cloud API, polls for full device
//! snapshots, reconciles them onto a stable set of shared device handles,
//! groups devices into rooms, and translates domain commands into vendor
//! wire commands. It is the integration core for a host automation platform
//! that owns scheduling, entity lifecycle, and UI.
//!
//! # Supported Features
//!
//! - **Switch control**: Turn lights and switches on/off, including
//!   dual-channel units sharing one vendor ID
//! - **Blind control**: Open, close, stop, and absolute positioning with
//!   host (0-100) to vendor (0-99) range conversion
//! - **Heater control**: Target temperature and power state
//! - **Room layout**: Per-room device buckets plus a synthetic
//!   "Unassigned" bucket
//!
//! # Quick Start
//!
//! ```no_run
//! use keemple_lib::{CloudConfig, KeempleHome};
//! use keemple_lib::types::DeviceType;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut home = KeempleHome::new(CloudConfig::new("48123456789", "secret"))?;
//!
//!     // One poll cycle: fetch, reconcile, organize rooms
//!     home.update().await?;
//!
//!     // Handles stay valid across polls; reconciliation mutates in place
//!     for light in home.get_devices_by_type(&DeviceType::Light) {
//!         println!("{}: {}", light.unique_id(), light.status());
//!         home.turn_on(&light).await;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Identity Model
//!
//! A device is keyed by its vendor `nuid` plus an optional channel. The
//! dual-channel type splits into two logical devices (channels 1 and 2)
//! during reconciliation; both share the `nuid` but have distinct unique
//! IDs. A device present in consecutive snapshots keeps its handle; one
//! absent from a snapshot is silently dropped.
//!
//! # Failure Model
//!
//! Command operations return `bool` and never raise: failures are logged
//! and local state stays untouched. Only [`KeempleHome::update`] propagates
//! errors, so the host can mark the integration unavailable. There is no
//! retry or backoff; the next scheduled poll or user action retries
//! naturally.

pub mod command;
mod device;
pub mod error;
mod home;
pub mod protocol;
mod reconcile;
mod rooms;
pub mod snapshot;
pub mod types;

pub use command::{BlindCommand, BlindOperation, Command, HeaterCommand, SwitchCommand};
pub use device::{
    DOMAIN, Device, DeviceHandle, DeviceInfo, DeviceKey, MANUFACTURER, POWER_STATE_IDX,
    TEMP_CURRENT_IDX, TEMP_TARGET_IDX,
};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use home::KeempleHome;
pub use protocol::{ApiEnvelope, CloudClient, CloudConfig};
pub use reconcile::reconcile;
pub use rooms::{UNASSIGNED_ROOM, organize};
pub use snapshot::Snapshot;
pub use types::{Channel, DeviceType, Position, StatusVector};
