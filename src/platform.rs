// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform setup: one shared session, one switch per config entry.

use std::sync::Arc;

use crate::config::PlatformConfig;
use crate::error::Error;
use crate::session::DeviceSession;
use crate::switch::Switch;
use crate::transport::Transport;

/// A configured device with its switches, ready to hand to the host.
#[derive(Debug)]
pub struct Platform<T: Transport> {
    session: Arc<DeviceSession<T>>,
    switches: Vec<Switch<T>>,
}

impl<T: Transport> Platform<T> {
    /// Returns the session shared by all switches on this device.
    #[must_use]
    pub fn session(&self) -> &Arc<DeviceSession<T>> {
        &self.session
    }

    /// Returns the configured switches.
    #[must_use]
    pub fn switches(&self) -> &[Switch<T>] {
        &self.switches
    }

    /// Consumes the platform, returning the session and the switches.
    #[must_use]
    pub fn into_parts(self) -> (Arc<DeviceSession<T>>, Vec<Switch<T>>) {
        (self.session, self.switches)
    }
}

/// Validates the configuration and builds the device session plus its
/// switches.
///
/// The setup-time authentication is optimistic: a failure is logged and
/// the switches are registered anyway, for a device that may become
/// reachable later. An empty switch map yields a platform with no
/// switches.
///
/// Stored command codes configured for plug kinds are ignored with a
/// warning; the plug relay is the command for those devices.
///
/// # Errors
///
/// Returns `ConfigError` wrapped in [`Error`](crate::error::Error) if
/// the device fields or a stored command code fail validation.
pub async fn setup<T: Transport>(
    config: &PlatformConfig,
    transport: T,
) -> Result<Platform<T>, Error> {
    let identity = config.device_identity()?;
    let kind = identity.kind();
    let session = Arc::new(DeviceSession::new(identity, transport));

    if let Err(err) = session.authenticate().await {
        tracing::error!(
            device = %session.identity().mac(),
            error = %err,
            "failed to connect to device during setup"
        );
    }

    let mut switches = Vec::with_capacity(config.switches.len());
    for (slug, switch_config) in &config.switches {
        let name = switch_config.display_name(slug);
        let switch = if kind.supports_stored_commands() {
            let (on, off) = switch_config.decode_commands(slug)?;
            Switch::stored(name, Arc::clone(&session), on, off)
        } else {
            if switch_config.has_stored_commands() {
                tracing::warn!(
                    switch = %slug,
                    kind = %kind,
                    "stored command codes are ignored for plug devices"
                );
            }
            if kind.supports_power_readback() {
                Switch::power_readback(name, Arc::clone(&session))
            } else {
                Switch::power(name, Arc::clone(&session))
            }
        };
        switches.push(switch);
    }

    Ok(Platform { session, switches })
}
