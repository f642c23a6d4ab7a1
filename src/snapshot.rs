// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw poll payload model.
//!
//! The poll endpoint returns one full snapshot describing the current status
//! of every known appliance, plus the remote directory used for name
//! resolution and (depending on the deployment) the room layout. Every field
//! is optional on the wire; missing values fall back to defaults instead of
//! failing deserialization.

use serde::Deserialize;

use crate::types::StatusVector;

/// Display name used when an appliance has no entry in the remote directory.
pub const UNKNOWN_NAME: &str = "Unknown";

/// One full poll response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    /// Status entries, one per physical appliance.
    #[serde(default, rename = "appliancestatus")]
    pub appliance_status: Vec<RawApplianceStatus>,
    /// Remote directory carrying display names.
    #[serde(default)]
    pub remote: Vec<RawRemote>,
    /// Room layout, when the deployment delivers it in the poll body.
    #[serde(default)]
    pub rooms: Vec<RawRoom>,
}

impl Snapshot {
    /// Resolves the display name for `nuid` from the remote directory.
    ///
    /// The first matching appliance entry wins, in payload order. Returns
    /// [`UNKNOWN_NAME`] when no entry matches.
    #[must_use]
    pub fn resolve_name(&self, nuid: u64) -> &str {
        self.remote
            .iter()
            .flat_map(|remote| &remote.appliance_list)
            .find(|appliance| appliance.nuid == nuid)
            .map_or(UNKNOWN_NAME, |appliance| &appliance.name)
    }
}

/// Raw status entry for one appliance.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawApplianceStatus {
    /// Vendor numeric device identifier.
    #[serde(default)]
    pub nuid: u64,
    /// Opaque vendor device identifier.
    #[serde(default, rename = "deviceid")]
    pub device_id: String,
    /// Vendor type code, as a string.
    #[serde(default, rename = "devicetype")]
    pub device_type: String,
    /// Primary scalar status (on/off flag or blind position).
    #[serde(default)]
    pub status: i64,
    /// Battery level.
    #[serde(default)]
    pub battery: i64,
    /// Last activity timestamp, vendor-formatted.
    #[serde(default, rename = "lastactivetime")]
    pub last_active_time: String,
    /// Wire-protocol address used for commands.
    #[serde(default, rename = "zwavedeviceid")]
    pub zwave_device_id: u64,
    /// Multi-dimensional status, as a string or a numeric list.
    #[serde(default)]
    pub statuses: Option<RawStatuses>,
}

impl RawApplianceStatus {
    /// Converts the raw statuses field into a [`StatusVector`].
    ///
    /// Absent statuses yield an empty vector; a malformed string form is
    /// downgraded (and logged) by [`StatusVector::parse_lossy`].
    #[must_use]
    pub fn status_vector(&self) -> StatusVector {
        match &self.statuses {
            None => StatusVector::new(),
            Some(RawStatuses::Text(raw)) => StatusVector::parse_lossy(raw),
            Some(RawStatuses::Values(values)) => StatusVector::from(values.clone()),
        }
    }
}

/// The `statuses` field arrives either serialized or as a plain array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawStatuses {
    /// Serialized form, e.g. `"[21.5,0,19.0]"`.
    Text(String),
    /// Plain numeric array.
    Values(Vec<f64>),
}

/// Remote directory entry wrapping an appliance list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRemote {
    /// Appliances known to this remote.
    #[serde(default, rename = "appliancelist")]
    pub appliance_list: Vec<RawAppliance>,
}

/// Appliance reference inside a remote or room.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAppliance {
    /// Vendor numeric device identifier.
    #[serde(default)]
    pub nuid: u64,
    /// Display name (remote entries only).
    #[serde(default)]
    pub name: String,
}

/// Raw room entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRoom {
    /// Room display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Appliances assigned to this room.
    #[serde(default, rename = "appliancelist")]
    pub appliance_list: Vec<RawAppliance>,
}
