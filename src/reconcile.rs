// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Snapshot reconciliation.
//!
//! Each poll delivers a full snapshot. Rebuilding the device set from
//! scratch would invalidate every handle the host platform holds, so
//! reconciliation instead looks devices up by their stable key and mutates
//! them in place; only genuinely new keys produce new instances. Devices
//! absent from the snapshot drop out of the returned set silently.

use std::collections::HashMap;

use crate::device::{Device, DeviceHandle, DeviceKey};
use crate::snapshot::{RawApplianceStatus, Snapshot};
use crate::types::{Channel, DeviceType, clamp_vendor_position};

/// Reconciles a snapshot onto the existing device set.
///
/// Returns the new working set. Handles for devices present in both the
/// previous set and the snapshot are the same instances, updated in place;
/// dual-channel entries split into one handle per channel.
#[must_use]
pub fn reconcile(snapshot: &Snapshot, existing: &[DeviceHandle]) -> Vec<DeviceHandle> {
    let mut index: HashMap<DeviceKey, DeviceHandle> = existing
        .iter()
        .map(|handle| (handle.key(), handle.clone()))
        .collect();

    let mut next = Vec::new();
    for raw in &snapshot.appliance_status {
        let name = snapshot.resolve_name(raw.nuid).to_string();
        let device_type = DeviceType::from_code(&raw.device_type);

        if device_type.is_dual_channel() {
            for channel in Channel::DUAL {
                next.push(update_or_create(&mut index, raw, &name, Some(channel)));
            }
        } else {
            let handle = update_or_create(&mut index, raw, &name, None);
            if device_type == DeviceType::Blind {
                let mut device = handle.write();
                device.status = clamp_vendor_position(device.status);
            }
            next.push(handle);
        }
    }

    tracing::debug!(
        devices = next.len(),
        dropped = index.len(),
        "reconciled snapshot"
    );
    next
}

fn update_or_create(
    index: &mut HashMap<DeviceKey, DeviceHandle>,
    raw: &RawApplianceStatus,
    name: &str,
    channel: Option<Channel>,
) -> DeviceHandle {
    let key = DeviceKey {
        nuid: raw.nuid,
        channel,
    };
    match index.remove(&key) {
        Some(handle) => {
            handle.write().update_from_status(raw);
            handle
        }
        None => {
            tracing::debug!(%key, "creating device");
            DeviceHandle::new(Device::from_raw(raw, name.to_string(), channel))
        }
    }
}
