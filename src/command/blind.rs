// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Blind movement commands.

use std::fmt;
use std::str::FromStr;

use serde_json::json;

use crate::command::Command;
use crate::error::ValueError;
use crate::types::Position;

/// Movement operation for a blind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlindOperation {
    /// Drive towards fully open.
    Open,
    /// Drive towards fully closed.
    Close,
    /// Stop movement at the current position.
    Stop,
}

impl BlindOperation {
    /// Returns the wire operation string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for BlindOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BlindOperation {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "close" => Ok(Self::Close),
            "stop" => Ok(Self::Stop),
            other => Err(ValueError::InvalidOperation(other.to_string())),
        }
    }
}

/// Command to operate a blind, optionally targeting an explicit position.
///
/// The `value` accompanies an `"open"` operation when the blind should move
/// to a specific vendor-range position instead of fully open.
///
/// # Examples
///
/// ```
/// use keemple_lib::command::{BlindCommand, Command};
/// use keemple_lib::types::Position;
///
/// let cmd = BlindCommand::move_to(Position::new(50).unwrap());
/// assert_eq!(cmd.encode().to_string(), r#"{"operation":"open","value":50}"#);
///
/// let cmd = BlindCommand::close();
/// assert_eq!(cmd.encode().to_string(), r#"{"operation":"close"}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlindCommand {
    operation: BlindOperation,
    value: Option<i64>,
}

impl BlindCommand {
    /// Creates a command with an explicit operation and optional vendor
    /// position value.
    #[must_use]
    pub const fn new(operation: BlindOperation, value: Option<i64>) -> Self {
        Self { operation, value }
    }

    /// Creates a command driving the blind fully open.
    #[must_use]
    pub const fn open() -> Self {
        Self::new(BlindOperation::Open, None)
    }

    /// Creates a command driving the blind fully closed.
    #[must_use]
    pub const fn close() -> Self {
        Self::new(BlindOperation::Close, None)
    }

    /// Creates a command stopping the blind.
    #[must_use]
    pub const fn stop() -> Self {
        Self::new(BlindOperation::Stop, None)
    }

    /// Creates a command moving the blind to a host-range position.
    #[must_use]
    pub fn move_to(position: Position) -> Self {
        Self::new(BlindOperation::Open, Some(position.to_vendor()))
    }

    /// Returns the operation.
    #[must_use]
    pub const fn operation(&self) -> BlindOperation {
        self.operation
    }

    /// Returns the explicit vendor-range position, if any.
    #[must_use]
    pub const fn value(&self) -> Option<i64> {
        self.value
    }

    /// Returns the speculative local status applied on success, or `None`
    /// for a stop (position unknown until the next poll).
    #[must_use]
    pub fn speculative_status(&self) -> Option<i64> {
        match (self.value, self.operation) {
            (Some(value), _) => Some(value),
            (None, BlindOperation::Open) => Some(Position::VENDOR_MAX),
            (None, BlindOperation::Close) => Some(Position::VENDOR_MIN),
            (None, BlindOperation::Stop) => None,
        }
    }
}

impl Command for BlindCommand {
    fn encode(&self) -> serde_json::Value {
        match self.value {
            Some(value) => json!({ "operation": self.operation.as_str(), "value": value }),
            None => json!({ "operation": self.operation.as_str() }),
        }
    }
}
