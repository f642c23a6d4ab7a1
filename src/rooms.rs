// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room organization.
//!
//! Rooms are a derived view over the device set, recomputed in full on
//! every poll. Room membership matches on `nuid` only; the raw payload does
//! not distinguish channels, so every channel of a dual device lands in the
//! same rooms.

use std::collections::{HashMap, HashSet};

use crate::device::DeviceHandle;
use crate::snapshot::{RawRoom, UNKNOWN_NAME};

/// Name of the synthetic bucket for devices referenced by no room.
pub const UNASSIGNED_ROOM: &str = "Unassigned";

/// Groups devices into room buckets from the raw room payload.
///
/// One bucket per raw room entry (name defaulting to `"Unknown"`), plus the
/// synthetic [`UNASSIGNED_ROOM`] bucket holding every device whose `nuid`
/// appears in no named room.
#[must_use]
pub fn organize(
    devices: &[DeviceHandle],
    raw_rooms: &[RawRoom],
) -> HashMap<String, Vec<DeviceHandle>> {
    let mut rooms: HashMap<String, Vec<DeviceHandle>> = HashMap::new();

    for raw_room in raw_rooms {
        let name = raw_room
            .name
            .clone()
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());
        let bucket = rooms.entry(name).or_default();
        for appliance in &raw_room.appliance_list {
            for device in devices {
                if device.nuid() == appliance.nuid {
                    bucket.push(device.clone());
                }
            }
        }
    }

    // A raw room may itself be named "Unassigned"; that bucket does not
    // count as an assignment and gets appended to, never replaced.
    let assigned: HashSet<u64> = rooms
        .iter()
        .filter(|(name, _)| name.as_str() != UNASSIGNED_ROOM)
        .flat_map(|(_, bucket)| bucket)
        .map(DeviceHandle::nuid)
        .collect();
    let already_unassigned: HashSet<u64> = rooms
        .get(UNASSIGNED_ROOM)
        .map(|bucket| bucket.iter().map(DeviceHandle::nuid).collect())
        .unwrap_or_default();
    let unassigned: Vec<DeviceHandle> = devices
        .iter()
        .filter(|device| {
            !assigned.contains(&device.nuid()) && !already_unassigned.contains(&device.nuid())
        })
        .cloned()
        .collect();
    rooms
        .entry(UNASSIGNED_ROOM.to_string())
        .or_default()
        .extend(unassigned);

    rooms
}
