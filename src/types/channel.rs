// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel index for dual-output Keemple devices.

use std::fmt;

use crate::error::ValueError;

/// Index of an output channel on a dual-channel device.
///
/// Keemple dual switches expose two independently controllable outputs that
/// share a single vendor `nuid`. Channels are indexed 1 and 2; a channel is
/// assigned when the logical device is first created and never changes for
/// the lifetime of that device.
///
/// # Examples
///
/// ```
/// use keemple_lib::types::Channel;
///
/// let ch = Channel::new(2).unwrap();
/// assert_eq!(ch.value(), 2);
///
/// // Only channels 1 and 2 exist
/// assert!(Channel::new(3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel(u8);

impl Channel {
    /// First output channel.
    pub const ONE: Self = Self(1);
    /// Second output channel.
    pub const TWO: Self = Self(2);

    /// Channels of a dual-channel device, in wire order.
    pub const DUAL: [Self; 2] = [Self::ONE, Self::TWO];

    /// Creates a new channel index.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidChannel` if the index is not 1 or 2.
    pub fn new(index: u8) -> Result<Self, ValueError> {
        match index {
            1 | 2 => Ok(Self(index)),
            other => Err(ValueError::InvalidChannel(other)),
        }
    }

    /// Returns the numeric channel index (1-based).
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the zero-based index into a status vector.
    #[must_use]
    pub const fn status_index(&self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_channels() {
        assert_eq!(Channel::new(1).unwrap(), Channel::ONE);
        assert_eq!(Channel::new(2).unwrap(), Channel::TWO);
    }

    #[test]
    fn invalid_channels() {
        assert!(matches!(Channel::new(0), Err(ValueError::InvalidChannel(0))));
        assert!(matches!(Channel::new(3), Err(ValueError::InvalidChannel(3))));
    }

    #[test]
    fn status_index_is_zero_based() {
        assert_eq!(Channel::ONE.status_index(), 0);
        assert_eq!(Channel::TWO.status_index(), 1);
    }

    #[test]
    fn dual_ordering() {
        assert_eq!(Channel::DUAL, [Channel::ONE, Channel::TWO]);
    }

    #[test]
    fn display() {
        assert_eq!(Channel::TWO.to_string(), "2");
    }
}
