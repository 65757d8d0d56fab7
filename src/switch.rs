// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch semantics over a shared device session.
//!
//! A [`Switch`] is what the host platform sees: a named on/off entity
//! with a cached state. Turning it on or off resolves to either "replay
//! a stored command code" (RM) or "set the relay power level" (SP1/SP2),
//! delegated to the [`DeviceSession`] the switch shares with its
//! siblings.
//!
//! Command failures have already been retried and logged by the session
//! layer; at this level they simply leave the cached state untouched.
//! Nothing propagates to the host.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::session::DeviceSession;
use crate::transport::Transport;
use crate::types::{CommandCode, PowerState};

/// Variant-specific command data for a switch.
///
/// Replaces per-kind subtyping: behavior dispatches on this tag, fixed
/// at construction by the device kind.
#[derive(Debug)]
pub enum SwitchKind {
    /// RM devices: replay stored codes. An absent code makes that
    /// direction a successful no-op.
    Stored {
        /// Code sent on `turn_on`.
        on: Option<CommandCode>,
        /// Code sent on `turn_off`.
        off: Option<CommandCode>,
    },
    /// SP1 plugs: drive the relay, assume the outcome.
    Power,
    /// SP2 plugs: drive the relay, poll the device for the truth.
    PowerReadback,
}

/// One on/off switch exposed to the host platform.
///
/// Cached state starts as `off` and is never queried at construction;
/// it changes only through successful [`turn_on`]/[`turn_off`] calls or,
/// for the readback variant, through [`update`].
///
/// [`turn_on`]: Switch::turn_on
/// [`turn_off`]: Switch::turn_off
/// [`update`]: Switch::update
#[derive(Debug)]
pub struct Switch<T: Transport> {
    name: String,
    state: RwLock<bool>,
    session: Arc<DeviceSession<T>>,
    kind: SwitchKind,
}

impl<T: Transport> Switch<T> {
    /// Creates an RM switch that replays stored command codes.
    #[must_use]
    pub fn stored(
        name: impl Into<String>,
        session: Arc<DeviceSession<T>>,
        on: Option<CommandCode>,
        off: Option<CommandCode>,
    ) -> Self {
        Self::new(name, session, SwitchKind::Stored { on, off })
    }

    /// Creates an SP1 switch that drives the relay without readback.
    #[must_use]
    pub fn power(name: impl Into<String>, session: Arc<DeviceSession<T>>) -> Self {
        Self::new(name, session, SwitchKind::Power)
    }

    /// Creates an SP2 switch that polls the relay for its true state.
    #[must_use]
    pub fn power_readback(name: impl Into<String>, session: Arc<DeviceSession<T>>) -> Self {
        Self::new(name, session, SwitchKind::PowerReadback)
    }

    /// Creates a switch with an explicit variant tag.
    ///
    /// The convenience constructors above cover the common cases.
    #[must_use]
    pub fn new(name: impl Into<String>, session: Arc<DeviceSession<T>>, kind: SwitchKind) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(false),
            session,
            kind,
        }
    }

    /// Returns the display name of the switch.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cached on/off state.
    #[must_use]
    pub fn is_on(&self) -> bool {
        *self.state.read()
    }

    /// Returns `true` if the cached state is assumed rather than read
    /// back from the device.
    #[must_use]
    pub fn assumed_state(&self) -> bool {
        !matches!(self.kind, SwitchKind::PowerReadback)
    }

    /// Returns `true` if the host should poll this switch via
    /// [`update`](Switch::update).
    #[must_use]
    pub fn should_poll(&self) -> bool {
        matches!(self.kind, SwitchKind::PowerReadback)
    }

    /// Returns the session this switch shares with its siblings.
    #[must_use]
    pub fn session(&self) -> &Arc<DeviceSession<T>> {
        &self.session
    }

    /// Turns the switch on.
    ///
    /// On success the cached state becomes `on`; on failure (already
    /// logged by the session) it stays as it was.
    pub async fn turn_on(&self) {
        self.apply(PowerState::On).await;
    }

    /// Turns the switch off.
    ///
    /// On success the cached state becomes `off`; on failure (already
    /// logged by the session) it stays as it was.
    pub async fn turn_off(&self) {
        self.apply(PowerState::Off).await;
    }

    /// Synchronizes the cached state with the device (readback variant).
    ///
    /// A definite answer overwrites the cache; an indeterminate answer
    /// or a failure keeps the last known state. For variants without
    /// readback this is a no-op.
    pub async fn update(&self) {
        if !self.should_poll() {
            return;
        }
        match self.session.query_power().await {
            Ok(Some(on)) => *self.state.write() = on,
            Ok(None) | Err(_) => {}
        }
    }

    async fn apply(&self, target: PowerState) {
        let sent = match &self.kind {
            SwitchKind::Stored { on, off } => {
                let code = match target {
                    PowerState::On => on.as_ref(),
                    PowerState::Off => off.as_ref(),
                };
                self.session.send_packet(code).await
            }
            SwitchKind::Power | SwitchKind::PowerReadback => self.session.set_power(target).await,
        };
        if sent.is_ok() {
            *self.state.write() = target.as_bool();
        }
    }
}
