// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `BroadR` library.
//!
//! This module provides the error hierarchy for handling failures across
//! the library: value validation, transport communication, device
//! operations, and configuration.

use thiserror::Error;

use crate::types::DeviceKind;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when
/// interacting with Broadlink devices.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the device.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred during device operations.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A hardware address string could not be parsed.
    #[error("invalid hardware address: {0}")]
    InvalidMacAddr(String),

    /// An unknown device kind tag was provided.
    #[error("invalid device kind: {0}")]
    InvalidDeviceKind(String),

    /// An invalid power state string was provided.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),

    /// A stored command could not be decoded from base64.
    #[error("invalid base64 command code: {0}")]
    InvalidCommandCode(String),

    /// A stored command decoded to zero bytes.
    #[error("command code is empty")]
    EmptyCommandCode,
}

/// Errors raised by [`Transport`](crate::transport::Transport)
/// implementations.
///
/// The timeout variant is the one condition the session layer reacts to:
/// device firmware drops sessions silently, and a timed-out call is the
/// only observable symptom.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The network call exceeded the configured timeout.
    #[error("device did not answer within the timeout")]
    Timeout,

    /// An I/O error other than a timeout.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The wire-protocol library rejected the exchange.
    #[error("protocol failure: {0}")]
    Protocol(String),
}

impl TransportError {
    /// Returns `true` if this error is the retry-triggering timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

/// Errors related to the device session and command exchange.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The authentication handshake timed out.
    #[error("authentication handshake timed out")]
    ConnectTimeout,

    /// A command kept timing out until the retry budget ran out.
    #[error("command timed out after {attempts} attempt(s)")]
    CommandTimeout {
        /// Total transport attempts made, including the first.
        attempts: u8,
    },

    /// The transport failed with something other than a timeout.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Errors related to device operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// Learning mode was requested on a device kind without an IR/RF
    /// receiver.
    #[error("device kind {0} does not support learning")]
    LearningNotSupported(DeviceKind),

    /// The learning window closed without capturing a signal.
    #[error("no signal captured within the learning window")]
    NothingLearned,
}

/// Errors related to platform configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A configuration field failed validation.
    #[error("invalid value for {field}: {source}")]
    Invalid {
        /// The configuration field that failed to validate.
        field: String,
        /// The underlying validation failure.
        source: ValueError,
    },

    /// The per-command timeout must be at least one second.
    #[error("timeout must be a positive number of seconds")]
    ZeroTimeout,

    /// A per-switch field failed validation.
    #[error("switch {slug}: invalid value for {field}: {source}")]
    InvalidSwitch {
        /// The switch slug the field belongs to.
        slug: String,
        /// The offending field.
        field: String,
        /// The underlying validation failure.
        source: ValueError,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::InvalidMacAddr("not-a-mac".to_string());
        assert_eq!(err.to_string(), "invalid hardware address: not-a-mac");
    }

    #[test]
    fn error_from_value_error() {
        let value_err = ValueError::EmptyCommandCode;
        let err: Error = value_err.into();
        assert!(matches!(err, Error::Value(ValueError::EmptyCommandCode)));
    }

    #[test]
    fn transport_error_timeout_predicate() {
        assert!(TransportError::Timeout.is_timeout());
        assert!(!TransportError::Protocol("bad key".to_string()).is_timeout());
    }

    #[test]
    fn protocol_error_display() {
        let err = ProtocolError::CommandTimeout { attempts: 3 };
        assert_eq!(err.to_string(), "command timed out after 3 attempt(s)");
    }

    #[test]
    fn device_error_display() {
        let err = DeviceError::LearningNotSupported(DeviceKind::Sp2);
        assert_eq!(err.to_string(), "device kind sp2 does not support learning");
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidSwitch {
            slug: "tv".to_string(),
            field: "command_on".to_string(),
            source: ValueError::InvalidCommandCode("bad padding".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "switch tv: invalid value for command_on: invalid base64 command code: bad padding"
        );
    }
}
