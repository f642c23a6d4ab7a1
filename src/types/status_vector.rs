// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered numeric state vector for multi-dimensional devices.
//!
//! Devices with more than one readable or controllable dimension (heaters,
//! dual switches) report a `statuses` field that arrives either as a JSON
//! array of numbers or as its serialized string form, e.g. `"[21.5,0,19.0]"`.
//! A string that fails to parse downgrades to an empty vector; it is logged
//! and never surfaces as an error.

use std::fmt;

/// Ordered vector of numeric state values.
///
/// Reads outside the vector yield `None` ("value unknown") rather than
/// panicking; writes can either be bounded by the current length or grow the
/// vector with zeros.
///
/// # Examples
///
/// ```
/// use keemple_lib::types::StatusVector;
///
/// let v = StatusVector::parse_lossy("[21.5,0,19.0]");
/// assert_eq!(v.get(0), Some(21.5));
/// assert_eq!(v.get(5), None);
///
/// // Malformed input downgrades to empty
/// assert!(StatusVector::parse_lossy("[1,2,").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusVector(Vec<f64>);

impl StatusVector {
    /// Creates an empty status vector.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Parses the serialized string form.
    ///
    /// Accepts the vendor's bracketed comma-separated format. Any element
    /// that fails to parse downgrades the whole vector to empty, with a
    /// warning logged.
    #[must_use]
    pub fn parse_lossy(raw: &str) -> Self {
        let inner = raw.trim().trim_matches(['[', ']']);
        let parsed: Result<Vec<f64>, _> = inner
            .split(',')
            .map(|piece| piece.trim().parse::<f64>())
            .collect();
        match parsed {
            Ok(values) => Self(values),
            Err(_) => {
                tracing::warn!(raw, "failed to parse statuses string, dropping");
                Self::new()
            }
        }
    }

    /// Returns the value at `index`, or `None` when unknown.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Sets the value at `index` only when the vector is long enough.
    ///
    /// Returns `true` if the value was written.
    pub fn set(&mut self, index: usize, value: f64) -> bool {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = value;
            true
        } else {
            false
        }
    }

    /// Sets the value at `index`, growing the vector with zeros as needed.
    pub fn set_growing(&mut self, index: usize, value: f64) {
        if self.0.len() <= index {
            self.0.resize(index + 1, 0.0);
        }
        self.0[index] = value;
    }

    /// Returns the number of known values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no values are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the values as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for StatusVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl fmt::Display for StatusVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bracketed_floats() {
        let v = StatusVector::parse_lossy("[21.5, 0, 19.0, 0, 1]");
        assert_eq!(v.as_slice(), &[21.5, 0.0, 19.0, 0.0, 1.0]);
    }

    #[test]
    fn parses_without_brackets() {
        let v = StatusVector::parse_lossy("1,0");
        assert_eq!(v.as_slice(), &[1.0, 0.0]);
    }

    #[test]
    fn malformed_string_yields_empty() {
        assert!(StatusVector::parse_lossy("[1,2,").is_empty());
        assert!(StatusVector::parse_lossy("").is_empty());
        assert!(StatusVector::parse_lossy("[a,b]").is_empty());
    }

    #[test]
    fn out_of_range_read_is_none() {
        let v = StatusVector::from(vec![1.0]);
        assert_eq!(v.get(0), Some(1.0));
        assert_eq!(v.get(1), None);
    }

    #[test]
    fn bounded_set_respects_length() {
        let mut v = StatusVector::from(vec![1.0, 2.0]);
        assert!(v.set(1, 5.0));
        assert!(!v.set(2, 5.0));
        assert_eq!(v.as_slice(), &[1.0, 5.0]);
    }

    #[test]
    fn growing_set_fills_with_zeros() {
        let mut v = StatusVector::new();
        v.set_growing(2, 7.0);
        assert_eq!(v.as_slice(), &[0.0, 0.0, 7.0]);
    }

    #[test]
    fn display_round_trips() {
        let v = StatusVector::from(vec![1.0, 0.5]);
        assert_eq!(StatusVector::parse_lossy(&v.to_string()), v);
    }
}
