// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Blind position with host/vendor range conversion.
//!
//! Host platforms express cover positions as 0-100 percent, while the
//! Keemple wire protocol uses 0-99. The conversion pins both top values to
//! each other and rounds half away from zero everywhere else, so the
//! boundary values round-trip exactly.

use std::fmt;

use crate::error::ValueError;

/// Host-facing blind position (0-100, fully open = 100).
///
/// # Examples
///
/// ```
/// use keemple_lib::types::Position;
///
/// let pos = Position::new(100).unwrap();
/// assert_eq!(pos.to_vendor(), 99);
///
/// assert_eq!(Position::from_vendor(99).value(), 100);
/// assert_eq!(Position::from_vendor(0).value(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position(u8);

impl Position {
    /// Maximum host position.
    pub const MAX: u8 = 100;
    /// Maximum vendor position.
    pub const VENDOR_MAX: i64 = 99;
    /// Minimum vendor position.
    pub const VENDOR_MIN: i64 = 0;

    /// Creates a new host position.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the value is greater than 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > Self::MAX {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: u16::from(Self::MAX),
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Returns the host-range value (0-100).
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Converts this host position into the vendor range (0-99).
    #[must_use]
    pub fn to_vendor(&self) -> i64 {
        if self.0 >= Self::MAX {
            return Self::VENDOR_MAX;
        }
        #[allow(clippy::cast_possible_truncation)]
        let vendor = (f64::from(self.0) / f64::from(Self::MAX) * 99.0).round() as i64;
        vendor
    }

    /// Converts a vendor-range value (0-99) into a host position.
    ///
    /// Out-of-range vendor values are clamped first, so this never fails.
    #[must_use]
    pub fn from_vendor(value: i64) -> Self {
        if value >= Self::VENDOR_MAX {
            return Self(Self::MAX);
        }
        let clamped = value.max(Self::VENDOR_MIN);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let host = ((clamped as f64) / 99.0 * f64::from(Self::MAX)).round() as u8;
        Self(host)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Clamps a raw vendor status value into the valid blind range [0, 99].
#[must_use]
pub fn clamp_vendor_position(value: i64) -> i64 {
    value.clamp(Position::VENDOR_MIN, Position::VENDOR_MAX)
}
