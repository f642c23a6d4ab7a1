// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch power commands.

use serde_json::json;

use crate::command::Command;

/// Command to turn a switch or light on or off.
///
/// The vendor reuses the blind vocabulary for switches: `"open"` means on
/// and `"close"` means off.
///
/// # Examples
///
/// ```
/// use keemple_lib::command::{Command, SwitchCommand};
///
/// assert_eq!(SwitchCommand::On.encode().to_string(), r#"{"operation":"open"}"#);
/// assert_eq!(SwitchCommand::Off.encode().to_string(), r#"{"operation":"close"}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchCommand {
    /// Turn the output on.
    On,
    /// Turn the output off.
    Off,
}

impl SwitchCommand {
    /// Returns the wire operation string.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::On => "open",
            Self::Off => "close",
        }
    }

    /// Returns the speculative local status value applied on success.
    #[must_use]
    pub const fn status_value(&self) -> i64 {
        match self {
            Self::On => 1,
            Self::Off => 0,
        }
    }
}

impl Command for SwitchCommand {
    fn encode(&self) -> serde_json::Value {
        json!({ "operation": self.operation() })
    }
}
