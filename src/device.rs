// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device model.
//!
//! A [`Device`] is one controllable unit, or one channel of a dual-channel
//! unit. Devices are owned by the working set inside
//! [`KeempleHome`](crate::KeempleHome) and handed out as [`DeviceHandle`]s:
//! shared references that stay valid across polls because reconciliation
//! mutates the device behind the handle instead of replacing it.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::snapshot::{RawApplianceStatus, RawStatuses};
use crate::types::{Channel, DeviceType, StatusVector};

/// Identifier prefix for derived unique IDs.
pub const DOMAIN: &str = "keemple";

/// Manufacturer reported in [`DeviceInfo`].
pub const MANUFACTURER: &str = "Keemple";

/// Index of the heater target temperature in `statuses`.
pub const TEMP_TARGET_IDX: usize = 0;
/// Index of the heater current temperature in `statuses`.
pub const TEMP_CURRENT_IDX: usize = 2;
/// Index of the heater power state in `statuses` (nonzero = heating).
pub const POWER_STATE_IDX: usize = 4;

/// Stable internal key of a logical device.
///
/// Dual-channel units share one `nuid` and are distinguished by channel;
/// single-channel devices key on `nuid` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceKey {
    /// Vendor numeric device identifier.
    pub nuid: u64,
    /// Channel index for dual-channel units.
    pub channel: Option<Channel>,
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.channel {
            Some(channel) => write!(f, "{}_{channel}", self.nuid),
            None => write!(f, "{}", self.nuid),
        }
    }
}

/// Registry metadata for host-platform device display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Stable identifier, same as the device's unique ID.
    pub identifier: String,
    /// Display name.
    pub name: String,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Model string derived from the vendor type code.
    pub model: String,
}

/// One controllable unit, or one channel of a dual-channel unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    /// Display name resolved from the remote directory.
    pub name: String,
    /// Opaque vendor device identifier.
    pub device_id: String,
    /// Device category.
    pub device_type: DeviceType,
    /// Primary scalar status (on/off flag or blind position 0-99).
    pub status: i64,
    /// Vendor numeric device identifier, stable across polls.
    pub nuid: u64,
    /// Battery level.
    pub battery: i64,
    /// Last activity timestamp, vendor-formatted.
    pub last_active_time: String,
    /// Wire-protocol address used for commands.
    pub zwave_device_id: u64,
    /// Multi-dimensional status values.
    pub statuses: StatusVector,
    /// Channel index; assigned at creation, never changes.
    pub channel: Option<Channel>,
}

impl Device {
    /// Builds a device from a raw snapshot entry.
    #[must_use]
    pub fn from_raw(raw: &RawApplianceStatus, name: String, channel: Option<Channel>) -> Self {
        Self {
            name,
            device_id: raw.device_id.clone(),
            device_type: DeviceType::from_code(&raw.device_type),
            status: raw.status,
            nuid: raw.nuid,
            battery: raw.battery,
            last_active_time: raw.last_active_time.clone(),
            zwave_device_id: raw.zwave_device_id,
            statuses: raw.status_vector(),
            channel,
        }
    }

    /// Returns the stable internal key.
    #[must_use]
    pub fn key(&self) -> DeviceKey {
        DeviceKey {
            nuid: self.nuid,
            channel: self.channel,
        }
    }

    /// Returns the deterministic host-facing unique ID.
    ///
    /// Derived from the type code and `nuid`, suffixed with the channel for
    /// dual-channel devices so the two logical devices never collide.
    #[must_use]
    pub fn unique_id(&self) -> String {
        let base = format!("{DOMAIN}_{}_{}", self.device_type.code(), self.nuid);
        match self.channel {
            Some(channel) => format!("{base}_channel_{channel}"),
            None => base,
        }
    }

    /// Returns the display name, including the channel when present.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.channel {
            Some(channel) => format!("{} Channel {channel}", self.name),
            None => self.name.clone(),
        }
    }

    /// Returns registry metadata for host-platform display.
    #[must_use]
    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            identifier: self.unique_id(),
            name: self.name.clone(),
            manufacturer: MANUFACTURER.to_string(),
            model: format!("Type {}", self.device_type.code()),
        }
    }

    /// Returns the status slot for this device's channel.
    ///
    /// Channel devices read `statuses[channel - 1]`, single devices read
    /// index 0. Unknown slots read as `0.0`.
    #[must_use]
    pub fn channel_status(&self) -> f64 {
        let index = self.channel.map_or(0, |channel| channel.status_index());
        self.statuses.get(index).unwrap_or_else(|| {
            tracing::debug!(
                device = %self.display_name(),
                index,
                "status slot unknown, reading as 0"
            );
            0.0
        })
    }

    /// Writes the status slot for this device's channel, growing the vector
    /// as needed.
    pub fn set_channel_status(&mut self, value: f64) {
        let index = self.channel.map_or(0, |channel| channel.status_index());
        self.statuses.set_growing(index, value);
    }

    /// Updates mutable state from a new raw snapshot entry.
    ///
    /// Identity fields (`nuid`, `channel`, type) are left untouched. A
    /// malformed statuses string keeps the previous vector.
    pub fn update_from_status(&mut self, raw: &RawApplianceStatus) {
        self.status = raw.status;
        self.battery = raw.battery;
        if !raw.last_active_time.is_empty() {
            self.last_active_time = raw.last_active_time.clone();
        }
        match &raw.statuses {
            None => {}
            Some(RawStatuses::Values(values)) => {
                self.statuses = StatusVector::from(values.clone());
            }
            Some(RawStatuses::Text(text)) => {
                let parsed = StatusVector::parse_lossy(text);
                if parsed.is_empty() && !text.trim().is_empty() {
                    tracing::warn!(
                        device = %self.display_name(),
                        raw = %text,
                        "keeping previous statuses after parse failure"
                    );
                } else {
                    self.statuses = parsed;
                }
            }
        }
    }

    /// Parses the last activity timestamp.
    #[must_use]
    pub fn last_active(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.last_active_time, "%Y-%m-%d %H:%M:%S").ok()
    }

    /// Heater target temperature, when known.
    #[must_use]
    pub fn target_temperature(&self) -> Option<f64> {
        self.statuses.get(TEMP_TARGET_IDX)
    }

    /// Heater current temperature, when known.
    #[must_use]
    pub fn current_temperature(&self) -> Option<f64> {
        self.statuses.get(TEMP_CURRENT_IDX)
    }

    /// Whether a heater is currently set to heat, when known.
    #[must_use]
    pub fn is_heating(&self) -> Option<bool> {
        self.statuses.get(POWER_STATE_IDX).map(|v| v != 0.0)
    }
}

/// Shared handle to a device in the working set.
///
/// The host platform keeps clones of these across polls; reconciliation
/// mutates the device behind the handle, so handles never go stale while
/// the device remains in the snapshot. Both the poll path and the command
/// handlers write through the same lock.
#[derive(Debug, Clone)]
pub struct DeviceHandle(Arc<RwLock<Device>>);

impl DeviceHandle {
    /// Wraps a device into a shared handle.
    #[must_use]
    pub fn new(device: Device) -> Self {
        Self(Arc::new(RwLock::new(device)))
    }

    /// Acquires a read guard on the device.
    pub fn read(&self) -> RwLockReadGuard<'_, Device> {
        self.0.read()
    }

    /// Acquires a write guard on the device.
    pub fn write(&self) -> RwLockWriteGuard<'_, Device> {
        self.0.write()
    }

    /// Returns the stable internal key.
    #[must_use]
    pub fn key(&self) -> DeviceKey {
        self.read().key()
    }

    /// Returns the vendor numeric device identifier.
    #[must_use]
    pub fn nuid(&self) -> u64 {
        self.read().nuid
    }

    /// Returns the device category.
    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        self.read().device_type.clone()
    }

    /// Returns the host-facing unique ID.
    #[must_use]
    pub fn unique_id(&self) -> String {
        self.read().unique_id()
    }

    /// Returns the primary scalar status.
    #[must_use]
    pub fn status(&self) -> i64 {
        self.read().status
    }

    /// Returns `true` when both handles point at the same device instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(nuid: u64, device_type: &str) -> RawApplianceStatus {
        serde_json::from_value(serde_json::json!({
            "nuid": nuid,
            "devicetype": device_type,
            "status": 1,
            "battery": 80,
            "lastactivetime": "2024-03-01 10:15:00",
            "zwavedeviceid": 7,
            "deviceid": "dev-1",
            "statuses": "[21.5,0,19.0,0,1]"
        }))
        .unwrap()
    }

    #[test]
    fn unique_id_without_channel() {
        let device = Device::from_raw(&raw(5, "41"), "Lamp".into(), None);
        assert_eq!(device.unique_id(), "keemple_41_5");
        assert_eq!(device.display_name(), "Lamp");
    }

    #[test]
    fn unique_id_with_channel() {
        let device = Device::from_raw(&raw(5, "42"), "Dual".into(), Some(Channel::TWO));
        assert_eq!(device.unique_id(), "keemple_42_5_channel_2");
        assert_eq!(device.display_name(), "Dual Channel 2");
    }

    #[test]
    fn device_info_metadata() {
        let device = Device::from_raw(&raw(5, "45"), "Bathroom Heater".into(), None);
        let info = device.device_info();
        assert_eq!(info.manufacturer, "Keemple");
        assert_eq!(info.model, "Type 45");
        assert_eq!(info.identifier, device.unique_id());
    }

    #[test]
    fn heater_accessors() {
        let device = Device::from_raw(&raw(5, "45"), "Heater".into(), None);
        assert_eq!(device.target_temperature(), Some(21.5));
        assert_eq!(device.current_temperature(), Some(19.0));
        assert_eq!(device.is_heating(), Some(true));
    }

    #[test]
    fn heater_accessors_unknown_when_short() {
        let mut device = Device::from_raw(&raw(5, "45"), "Heater".into(), None);
        device.statuses = StatusVector::from(vec![21.0]);
        assert_eq!(device.target_temperature(), Some(21.0));
        assert_eq!(device.current_temperature(), None);
        assert_eq!(device.is_heating(), None);
    }

    #[test]
    fn channel_status_reads_channel_slot() {
        let device = Device::from_raw(&raw(5, "42"), "Dual".into(), Some(Channel::TWO));
        assert_eq!(device.channel_status(), 0.0);
        let one = Device::from_raw(&raw(5, "42"), "Dual".into(), Some(Channel::ONE));
        assert_eq!(one.channel_status(), 21.5);
    }

    #[test]
    fn set_channel_status_grows_vector() {
        let mut device = Device::from_raw(&raw(5, "42"), "Dual".into(), Some(Channel::TWO));
        device.statuses = StatusVector::new();
        device.set_channel_status(1.0);
        assert_eq!(device.statuses.as_slice(), &[0.0, 1.0]);
    }

    #[test]
    fn update_keeps_identity_fields() {
        let mut device = Device::from_raw(&raw(5, "42"), "Dual".into(), Some(Channel::ONE));
        let newer: RawApplianceStatus = serde_json::from_value(serde_json::json!({
            "nuid": 5,
            "devicetype": "42",
            "status": 0,
            "statuses": "[0,1]"
        }))
        .unwrap();
        device.update_from_status(&newer);
        assert_eq!(device.status, 0);
        assert_eq!(device.statuses.as_slice(), &[0.0, 1.0]);
        assert_eq!(device.channel, Some(Channel::ONE));
        assert_eq!(device.name, "Dual");
    }

    #[test]
    fn update_with_malformed_statuses_keeps_previous() {
        let mut device = Device::from_raw(&raw(5, "45"), "Heater".into(), None);
        let before = device.statuses.clone();
        let newer: RawApplianceStatus = serde_json::from_value(serde_json::json!({
            "nuid": 5,
            "devicetype": "45",
            "status": 1,
            "statuses": "[1,2,"
        }))
        .unwrap();
        device.update_from_status(&newer);
        assert_eq!(device.statuses, before);
    }

    #[test]
    fn last_active_parses_vendor_format() {
        let device = Device::from_raw(&raw(5, "41"), "Lamp".into(), None);
        assert!(device.last_active().is_some());

        let mut unparseable = device;
        unparseable.last_active_time = "yesterday".into();
        assert!(unparseable.last_active().is_none());
    }

    #[test]
    fn handle_ptr_eq() {
        let handle = DeviceHandle::new(Device::from_raw(&raw(5, "41"), "Lamp".into(), None));
        let clone = handle.clone();
        let other = DeviceHandle::new(Device::from_raw(&raw(5, "41"), "Lamp".into(), None));
        assert!(handle.ptr_eq(&clone));
        assert!(!handle.ptr_eq(&other));
    }
}
