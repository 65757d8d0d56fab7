// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The opaque boundary to the device wire protocol.
//!
//! The on-the-wire encryption and framing for Broadlink devices lives in
//! a separate protocol library; this crate only drives it through the
//! [`Transport`] trait. A transport owns one connection to one physical
//! device and applies the per-command timeout from
//! [`DeviceIdentity`](crate::types::DeviceIdentity).
//!
//! Implementations take `&mut self`; serialization across the switches
//! that share a device is handled by
//! [`DeviceSession`](crate::session::DeviceSession), so a transport never
//! sees overlapping calls.

use crate::error::TransportError;
use crate::types::PowerState;

/// Command and handshake primitives of one Broadlink device connection.
///
/// Every method must fail with [`TransportError::Timeout`] when the
/// device does not answer within the configured timeout; that is the
/// signal the session layer re-authenticates and retries on.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Performs the key/session exchange the device requires before it
    /// accepts commands.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Timeout` if the device does not answer.
    async fn authenticate(&mut self) -> Result<(), TransportError>;

    /// Transmits a stored IR/RF command packet (RM devices).
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the exchange fails.
    async fn send_packet(&mut self, packet: &[u8]) -> Result<(), TransportError>;

    /// Sets the relay power state (SP1/SP2 devices).
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the exchange fails.
    async fn set_power(&mut self, state: PowerState) -> Result<(), TransportError>;

    /// Reads back the relay power state (SP2 devices).
    ///
    /// `Ok(None)` means the device answered without a definite state;
    /// the session layer treats that as "try again", not as a failure.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the exchange fails.
    async fn power_state(&mut self) -> Result<Option<bool>, TransportError>;

    /// Puts the device into IR/RF learning mode (RM devices).
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the exchange fails. The default
    /// implementation reports the operation as unsupported, which is
    /// correct for plug transports.
    async fn enter_learning(&mut self) -> Result<(), TransportError> {
        Err(TransportError::Protocol(
            "learning mode is not supported by this transport".to_string(),
        ))
    }

    /// Polls for a packet captured in learning mode (RM devices).
    ///
    /// `Ok(None)` means nothing has been captured yet.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the exchange fails. The default
    /// implementation reports the operation as unsupported.
    async fn check_data(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        Err(TransportError::Protocol(
            "learning mode is not supported by this transport".to_string(),
        ))
    }
}
