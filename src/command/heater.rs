// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heater commands.

use serde_json::json;

use crate::command::Command;

/// Command to control a heater.
///
/// Temperature commands always carry `mode: 1` (the vendor's heat mode);
/// power commands carry a bare integer power flag.
///
/// # Examples
///
/// ```
/// use keemple_lib::command::{Command, HeaterCommand};
///
/// let cmd = HeaterCommand::set_temperature(21.5);
/// assert_eq!(cmd.encode().to_string(), r#"{"mode":1,"temperature":21.5}"#);
///
/// let cmd = HeaterCommand::set_power(true);
/// assert_eq!(cmd.encode().to_string(), r#"{"power":1}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaterCommand {
    /// Set the target temperature in degrees Celsius.
    SetTemperature {
        /// Target temperature.
        temperature: f64,
    },
    /// Turn heating on or off.
    SetPower {
        /// `true` to heat.
        on: bool,
    },
}

impl HeaterCommand {
    /// Creates a target-temperature command.
    #[must_use]
    pub const fn set_temperature(temperature: f64) -> Self {
        Self::SetTemperature { temperature }
    }

    /// Creates a power command.
    #[must_use]
    pub const fn set_power(on: bool) -> Self {
        Self::SetPower { on }
    }
}

impl Command for HeaterCommand {
    fn encode(&self) -> serde_json::Value {
        match self {
            Self::SetTemperature { temperature } => {
                json!({ "mode": 1, "temperature": temperature })
            }
            Self::SetPower { on } => json!({ "power": i64::from(*on) }),
        }
    }
}
