// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Top-level facade over the Keemple cloud account.
//!
//! [`KeempleHome`] owns the wire client, the working device set, and the
//! derived room map. The host platform drives it with one [`update`] call
//! per poll cycle and reads the device handles it hands out; user actions
//! flow back in through the command operations, which mutate local state
//! speculatively on success so the host reflects the new state before the
//! next poll confirms it.
//!
//! [`update`]: KeempleHome::update

use std::collections::HashMap;

use crate::command::{BlindCommand, BlindOperation, HeaterCommand, SwitchCommand};
use crate::device::{DeviceHandle, DeviceKey, POWER_STATE_IDX, TEMP_TARGET_IDX};
use crate::error::{Error, ParseError, ProtocolError, Result};
use crate::protocol::{CloudClient, CloudConfig, POLL_ENDPOINT};
use crate::reconcile::reconcile;
use crate::rooms::organize;
use crate::snapshot::{RawRoom, Snapshot};
use crate::types::{DeviceType, Position, StatusVector};

/// A Keemple cloud account with its reconciled device and room state.
#[derive(Debug)]
pub struct KeempleHome {
    client: CloudClient,
    devices: Vec<DeviceHandle>,
    rooms: HashMap<String, Vec<DeviceHandle>>,
    raw_rooms: Vec<RawRoom>,
}

impl KeempleHome {
    /// Creates a home from a cloud configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: CloudConfig) -> std::result::Result<Self, ProtocolError> {
        Ok(Self {
            client: config.into_client()?,
            devices: Vec::new(),
            rooms: HashMap::new(),
            raw_rooms: Vec::new(),
        })
    }

    /// Logs in against the cloud.
    ///
    /// Useful for validating credentials up front; [`update`](Self::update)
    /// and the command operations log in transparently when needed.
    pub async fn login(&self) -> bool {
        self.client.login().await
    }

    /// Polls the cloud for a full snapshot and reconciles local state.
    ///
    /// Any failure propagates so the host platform can mark the integration
    /// unavailable; the working set keeps its previous contents in that
    /// case.
    ///
    /// # Errors
    ///
    /// Returns transport, result-code, or parse errors from the poll.
    pub async fn update(&mut self) -> Result<()> {
        let params = [("platform", CloudConfig::PLATFORM)];
        let body = self.client.request(POLL_ENDPOINT, &params).await?;

        if let Some(code) = body.get("resultCode").and_then(serde_json::Value::as_i64)
            && code != 0
        {
            let message = body
                .get("resultMessage")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Err(ProtocolError::ResultCode { code, message }.into());
        }

        let snapshot: Snapshot =
            serde_json::from_value(body).map_err(|err| Error::Parse(ParseError::Json(err)))?;

        let previous: HashMap<DeviceKey, (i64, StatusVector)> = self
            .devices
            .iter()
            .map(|handle| {
                let device = handle.read();
                (device.key(), (device.status, device.statuses.clone()))
            })
            .collect();

        self.devices = reconcile(&snapshot, &self.devices);

        for handle in &self.devices {
            let device = handle.read();
            if let Some((old_status, old_statuses)) = previous.get(&device.key())
                && (*old_status != device.status || *old_statuses != device.statuses)
            {
                tracing::debug!(
                    device = %device.display_name(),
                    old_status,
                    new_status = device.status,
                    "device state changed"
                );
            }
        }

        if !snapshot.rooms.is_empty() {
            self.raw_rooms = snapshot.rooms;
        }
        self.rooms = organize(&self.devices, &self.raw_rooms);
        Ok(())
    }

    /// Replaces the raw rooms payload from an independent source and
    /// recomputes room membership.
    pub fn set_rooms_payload(&mut self, rooms: Vec<RawRoom>) {
        self.raw_rooms = rooms;
        self.rooms = organize(&self.devices, &self.raw_rooms);
    }

    /// Returns the current working device set.
    #[must_use]
    pub fn devices(&self) -> &[DeviceHandle] {
        &self.devices
    }

    /// Returns the current room map.
    #[must_use]
    pub fn rooms(&self) -> &HashMap<String, Vec<DeviceHandle>> {
        &self.rooms
    }

    /// Returns all devices of a specific category.
    #[must_use]
    pub fn get_devices_by_type(&self, device_type: &DeviceType) -> Vec<DeviceHandle> {
        self.devices
            .iter()
            .filter(|handle| handle.read().device_type == *device_type)
            .cloned()
            .collect()
    }

    /// Returns all devices in a specific room, empty when unknown.
    #[must_use]
    pub fn get_devices_in_room(&self, room_name: &str) -> Vec<DeviceHandle> {
        self.rooms.get(room_name).cloned().unwrap_or_default()
    }

    /// Turns a device on. Returns `true` on success.
    pub async fn turn_on(&self, device: &DeviceHandle) -> bool {
        self.switch(device, SwitchCommand::On).await
    }

    /// Turns a device off. Returns `true` on success.
    pub async fn turn_off(&self, device: &DeviceHandle) -> bool {
        self.switch(device, SwitchCommand::Off).await
    }

    async fn switch(&self, device: &DeviceHandle, command: SwitchCommand) -> bool {
        let (address, channel) = {
            let device = device.read();
            (device.zwave_device_id, device.channel)
        };

        match self.client.operate(address, &command, channel).await {
            Ok(()) => {
                let mut device = device.write();
                device.status = command.status_value();
                if device.channel.is_some() {
                    let slot_value = if command.status_value() == 0 { 0.0 } else { 1.0 };
                    device.set_channel_status(slot_value);
                }
                true
            }
            Err(err) => {
                Self::log_command_failure(device, &err);
                false
            }
        }
    }

    /// Operates a blind, optionally to an explicit position.
    ///
    /// On success the local position updates speculatively: an explicit
    /// value or full open/close sets it, a stop leaves it unchanged until
    /// the next poll.
    pub async fn operate_blind(
        &self,
        device: &DeviceHandle,
        operation: BlindOperation,
        position: Option<Position>,
    ) -> bool {
        let command = BlindCommand::new(operation, position.map(|p| p.to_vendor()));
        let address = device.read().zwave_device_id;

        match self.client.operate(address, &command, None).await {
            Ok(()) => {
                if let Some(status) = command.speculative_status() {
                    device.write().status = status;
                }
                true
            }
            Err(err) => {
                Self::log_command_failure(device, &err);
                false
            }
        }
    }

    /// Moves a blind to a host-range position (0-100).
    pub async fn set_blind_position(&self, device: &DeviceHandle, position: Position) -> bool {
        self.operate_blind(device, BlindOperation::Open, Some(position)).await
    }

    /// Sets a heater's target temperature.
    ///
    /// On success `statuses[0]` updates speculatively when the vector is
    /// long enough; other indices stay untouched.
    pub async fn set_heater_temperature(&self, device: &DeviceHandle, temperature: f64) -> bool {
        let command = HeaterCommand::set_temperature(temperature);
        let address = device.read().zwave_device_id;

        match self.client.operate(address, &command, None).await {
            Ok(()) => {
                device.write().statuses.set(TEMP_TARGET_IDX, temperature);
                true
            }
            Err(err) => {
                Self::log_command_failure(device, &err);
                false
            }
        }
    }

    /// Sets a heater's power state.
    ///
    /// On success `statuses[4]` updates speculatively when the vector is
    /// long enough.
    pub async fn set_heater_power(&self, device: &DeviceHandle, on: bool) -> bool {
        let command = HeaterCommand::set_power(on);
        let address = device.read().zwave_device_id;

        match self.client.operate(address, &command, None).await {
            Ok(()) => {
                device
                    .write()
                    .statuses
                    .set(POWER_STATE_IDX, if on { 1.0 } else { 0.0 });
                true
            }
            Err(err) => {
                Self::log_command_failure(device, &err);
                false
            }
        }
    }

    fn log_command_failure(device: &DeviceHandle, err: &Error) {
        tracing::error!(
            device = %device.read().display_name(),
            error = %err,
            "device command failed"
        );
    }
}
