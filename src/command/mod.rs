// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Keemple wire command definitions.
//!
//! Every device operation goes through the single `/device/operate` endpoint
//! carrying a JSON-encoded command object in the `command` parameter. This
//! module provides the typed command families and their encoding.
//!
//! | Command Type | Purpose | Wire shape |
//! |-------------|---------|-----------|
//! | [`SwitchCommand`] | Turn a switch/light on or off | `{"operation":"open"\|"close"}` |
//! | [`BlindCommand`] | Open/close/stop a blind, optionally to a position | `{"operation":...,"value":?}` |
//! | [`HeaterCommand`] | Set heater target temperature or power | `{"mode":1,"temperature":t}` / `{"power":p}` |
//!
//! # Examples
//!
//! ```
//! use keemple_lib::command::{Command, SwitchCommand, BlindCommand};
//!
//! let on = SwitchCommand::On;
//! assert_eq!(on.encode().to_string(), r#"{"operation":"open"}"#);
//!
//! let stop = BlindCommand::stop();
//! assert_eq!(stop.encode().to_string(), r#"{"operation":"stop"}"#);
//! ```

mod blind;
mod heater;
mod switch;

pub use blind::{BlindCommand, BlindOperation};
pub use heater::HeaterCommand;
pub use switch::SwitchCommand;

/// A command that can be encoded into the `command` parameter of the
/// operate endpoint.
pub trait Command {
    /// Returns the JSON command object sent to the cloud.
    fn encode(&self) -> serde_json::Value;
}
