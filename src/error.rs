// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Keemple library.
//!
//! This module provides the error hierarchy for handling failures across the
//! library: value validation, cloud protocol communication, and JSON parsing.
//!
//! Command operations deliberately do not surface these errors to callers;
//! they log and return `false` so a failed user action never tears down the
//! host integration. Only the poll path propagates errors.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during cloud communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// A channel index outside the supported dual-channel range.
    #[error("channel {0} is out of range [1, 2]")]
    InvalidChannel(u8),

    /// An invalid blind operation string was provided.
    #[error("invalid blind operation: {0}")]
    InvalidOperation(String),
}

/// Errors related to cloud protocol communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the cloud failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Login was rejected or has not succeeded yet.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The cloud answered with a non-zero result code.
    #[error("cloud rejected request with result code {code}: {message}")]
    ResultCode {
        /// The vendor result code (zero means success).
        code: i64,
        /// The vendor result message, if any.
        message: String,
    },
}

/// Errors related to parsing Keemple cloud responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 99,
            actual: 150,
        };
        assert_eq!(err.to_string(), "value 150 is out of range [0, 99]");
    }

    #[test]
    fn error_from_value_error() {
        let value_err = ValueError::InvalidChannel(3);
        let err: Error = value_err.into();
        assert!(matches!(err, Error::Value(ValueError::InvalidChannel(3))));
    }

    #[test]
    fn result_code_display() {
        let err = ProtocolError::ResultCode {
            code: 11,
            message: "session expired".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cloud rejected request with result code 11: session expired"
        );
    }

    #[test]
    fn error_from_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = ParseError::from(json_err).into();
        assert!(matches!(err, Error::Parse(ParseError::Json(_))));
    }
}
