// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vendor device type codes.

use std::fmt;

/// Device category, keyed by the vendor's numeric type code.
///
/// The vendor transmits type codes as strings. Known codes map to dedicated
/// variants so callers can dispatch per category; everything else is carried
/// through as [`DeviceType::Other`] without losing the original code.
///
/// # Examples
///
/// ```
/// use keemple_lib::types::DeviceType;
///
/// assert_eq!(DeviceType::from_code("42"), DeviceType::DualLight);
/// assert_eq!(DeviceType::DualLight.code(), "42");
///
/// let unknown = DeviceType::from_code("77");
/// assert_eq!(unknown.code(), "77");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeviceType {
    /// Single-channel light or switch.
    Light,
    /// Dual-channel switch sharing one `nuid` across two outputs.
    DualLight,
    /// Motorized blind with position 0-99.
    Blind,
    /// Heater reporting target/current temperature and power state.
    Heater,
    /// Any type code this library has no dedicated handling for.
    Other(String),
}

impl DeviceType {
    /// Vendor code for single lights.
    pub const LIGHT_CODE: &'static str = "41";
    /// Vendor code for dual-channel lights.
    pub const DUAL_LIGHT_CODE: &'static str = "42";
    /// Vendor code for blinds.
    pub const BLIND_CODE: &'static str = "43";
    /// Vendor code for heaters.
    pub const HEATER_CODE: &'static str = "45";

    /// Maps a vendor type code onto a device category.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            Self::LIGHT_CODE => Self::Light,
            Self::DUAL_LIGHT_CODE => Self::DualLight,
            Self::BLIND_CODE => Self::Blind,
            Self::HEATER_CODE => Self::Heater,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the vendor type code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Light => Self::LIGHT_CODE,
            Self::DualLight => Self::DUAL_LIGHT_CODE,
            Self::Blind => Self::BLIND_CODE,
            Self::Heater => Self::HEATER_CODE,
            Self::Other(code) => code,
        }
    }

    /// Returns `true` for the dual-channel type that splits into two
    /// logical devices during reconciliation.
    #[must_use]
    pub fn is_dual_channel(&self) -> bool {
        matches!(self, Self::DualLight)
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_round_trip() {
        for code in ["41", "42", "43", "45"] {
            assert_eq!(DeviceType::from_code(code).code(), code);
        }
    }

    #[test]
    fn unknown_code_preserved() {
        let ty = DeviceType::from_code("99");
        assert_eq!(ty, DeviceType::Other("99".to_string()));
        assert_eq!(ty.code(), "99");
    }

    #[test]
    fn only_dual_light_is_dual_channel() {
        assert!(DeviceType::DualLight.is_dual_channel());
        assert!(!DeviceType::Light.is_dual_channel());
        assert!(!DeviceType::Blind.is_dual_channel());
        assert!(!DeviceType::Other("42x".into()).is_dual_channel());
    }
}
