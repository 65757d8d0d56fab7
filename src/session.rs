// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authenticated session to one physical device.
//!
//! A [`DeviceSession`] owns the transport for a single device and is
//! shared by every switch configured against that device. All device I/O
//! goes through one `tokio::sync::Mutex`, so commands are serialized and
//! re-authentication never races a command in flight.
//!
//! # Retry policy
//!
//! Device firmware expires sessions silently; the only observable symptom
//! is a timeout. Every command primitive therefore shares one policy: on
//! timeout, opportunistically re-authenticate (ignoring failure of that
//! handshake) and retry, up to [`RETRY_BUDGET`] extra attempts. A state
//! readback that yields no definite answer also consumes a retry, but
//! without the re-authentication step, since the device did respond.
//!
//! Exhausting the budget fails the call, not the session: the next call
//! starts with a fresh budget.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, MutexGuard};

use crate::error::{Error, ProtocolError};
use crate::transport::Transport;
use crate::types::{CommandCode, DeviceIdentity, PowerState};

/// Extra attempts permitted after the first, shared by all command
/// primitives. Caps worst-case latency at two extra round trips plus two
/// re-auth attempts per call.
pub const RETRY_BUDGET: u8 = 2;

/// The authenticated link to one physical Broadlink device.
///
/// One session exists per device for the process lifetime; zero or more
/// [`Switch`](crate::switch::Switch) instances share it behind an `Arc`.
///
/// # Examples
///
/// ```ignore
/// use std::sync::Arc;
/// use broadr_lib::session::DeviceSession;
///
/// // `transport` comes from the wire-protocol crate for this device.
/// let session = Arc::new(DeviceSession::new(identity, transport));
/// if let Err(err) = session.authenticate().await {
///     tracing::error!(error = %err, "device unreachable, will retry on first command");
/// }
/// ```
#[derive(Debug)]
pub struct DeviceSession<T: Transport> {
    identity: DeviceIdentity,
    transport: Mutex<T>,
    authenticated: AtomicBool,
}

/// One transport call the retry loop can attempt.
enum DeviceCommand<'a> {
    Packet(&'a [u8]),
    Power(PowerState),
    ReadPower,
}

impl DeviceCommand<'_> {
    const fn name(&self) -> &'static str {
        match self {
            Self::Packet(_) => "send_packet",
            Self::Power(_) => "set_power",
            Self::ReadPower => "power_state",
        }
    }
}

/// What a successful transport call produced.
enum Outcome {
    Acked,
    Power(Option<bool>),
}

impl<T: Transport> DeviceSession<T> {
    /// Creates a session over an already-constructed transport.
    ///
    /// No network traffic happens here; call [`authenticate`] for the
    /// initial handshake.
    ///
    /// [`authenticate`]: DeviceSession::authenticate
    pub fn new(identity: DeviceIdentity, transport: T) -> Self {
        Self {
            identity,
            transport: Mutex::new(transport),
            authenticated: AtomicBool::new(false),
        }
    }

    /// Returns the identity of the device this session talks to.
    #[must_use]
    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    /// Returns `true` once a handshake has completed at least once.
    ///
    /// Informational only: a past handshake may have expired on the
    /// device side, which surfaces as command timeouts, not here.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::Relaxed)
    }

    /// Performs one authentication handshake.
    ///
    /// Never retried on its own; callers decide whether a failure is
    /// fatal (setup logs and carries on, learning mode aborts).
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::ConnectTimeout` if the device does not
    /// answer, or `ProtocolError::Transport` for other failures.
    pub async fn authenticate(&self) -> Result<(), Error> {
        let mut transport = self.transport.lock().await;
        self.authenticate_locked(&mut transport).await
    }

    /// Transmits a stored command packet.
    ///
    /// `None` means the switch has no code configured for this
    /// direction; that is a deliberate pass-through and succeeds without
    /// touching the transport.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::CommandTimeout` once the retry budget is
    /// exhausted, or `ProtocolError::Transport` for non-timeout
    /// failures.
    pub async fn send_packet(&self, code: Option<&CommandCode>) -> Result<(), Error> {
        let Some(code) = code else {
            tracing::debug!(device = %self.identity.mac(), "no command code configured, nothing to send");
            return Ok(());
        };
        let mut transport = self.transport.lock().await;
        self.run(&mut transport, &DeviceCommand::Packet(code.as_bytes()))
            .await?;
        Ok(())
    }

    /// Sets the relay power level.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::CommandTimeout` once the retry budget is
    /// exhausted, or `ProtocolError::Transport` for non-timeout
    /// failures.
    pub async fn set_power(&self, state: PowerState) -> Result<(), Error> {
        let mut transport = self.transport.lock().await;
        self.run(&mut transport, &DeviceCommand::Power(state)).await?;
        Ok(())
    }

    /// Reads back the relay power state.
    ///
    /// `Ok(None)` means the device stayed indeterminate through the
    /// whole retry budget; callers keep their last known state.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::CommandTimeout` once the retry budget is
    /// exhausted, or `ProtocolError::Transport` for non-timeout
    /// failures.
    pub async fn query_power(&self) -> Result<Option<bool>, Error> {
        let mut transport = self.transport.lock().await;
        match self.run(&mut transport, &DeviceCommand::ReadPower).await? {
            Outcome::Power(state) => Ok(state),
            Outcome::Acked => Ok(None),
        }
    }

    /// Locks the transport for an extended exchange (learning mode).
    pub(crate) async fn transport(&self) -> MutexGuard<'_, T> {
        self.transport.lock().await
    }

    pub(crate) async fn authenticate_locked(&self, transport: &mut T) -> Result<(), Error> {
        match transport.authenticate().await {
            Ok(()) => {
                self.authenticated.store(true, Ordering::Relaxed);
                Ok(())
            }
            Err(err) if err.is_timeout() => Err(ProtocolError::ConnectTimeout.into()),
            Err(err) => Err(ProtocolError::Transport(err).into()),
        }
    }

    /// The shared retry loop: bounded attempts, re-auth on timeout.
    async fn run(&self, transport: &mut T, command: &DeviceCommand<'_>) -> Result<Outcome, Error> {
        let mut attempts: u8 = 0;
        loop {
            attempts += 1;
            match Self::dispatch(transport, command).await {
                Ok(Outcome::Power(None)) if attempts <= RETRY_BUDGET => {
                    // The device answered but had no definite state yet.
                    tracing::debug!(
                        device = %self.identity.mac(),
                        attempt = attempts,
                        "indeterminate power state, trying again"
                    );
                }
                Ok(outcome) => return Ok(outcome),
                Err(err) if err.is_timeout() => {
                    if attempts > RETRY_BUDGET {
                        tracing::error!(
                            device = %self.identity.mac(),
                            command = command.name(),
                            attempts,
                            "command timed out, retry budget exhausted"
                        );
                        return Err(ProtocolError::CommandTimeout { attempts }.into());
                    }
                    // The firmware session may have expired; re-key before
                    // the next attempt. A failed handshake here is ignored
                    // and the retry proceeds regardless.
                    if let Err(auth_err) = self.authenticate_locked(transport).await {
                        tracing::debug!(
                            device = %self.identity.mac(),
                            error = %auth_err,
                            "re-authentication before retry failed"
                        );
                    }
                }
                Err(err) => return Err(ProtocolError::Transport(err).into()),
            }
        }
    }

    async fn dispatch(
        transport: &mut T,
        command: &DeviceCommand<'_>,
    ) -> Result<Outcome, crate::error::TransportError> {
        match command {
            DeviceCommand::Packet(bytes) => {
                transport.send_packet(bytes).await.map(|()| Outcome::Acked)
            }
            DeviceCommand::Power(state) => {
                transport.set_power(*state).await.map(|()| Outcome::Acked)
            }
            DeviceCommand::ReadPower => transport.power_state().await.map(Outcome::Power),
        }
    }
}
