// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device identity.

use std::time::Duration;

use super::{DeviceKind, MacAddr};

/// Identity of one physical Broadlink device.
///
/// Supplied once at setup and immutable afterwards: network address
/// (host plus the fixed device port), hardware address, device kind, and
/// the per-command timeout the transport should apply.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use broadr_lib::types::{DeviceIdentity, DeviceKind};
///
/// let mac = "34:ea:34:12:ab:cd".parse().unwrap();
/// let identity = DeviceIdentity::new("192.168.1.23", mac, DeviceKind::Rm)
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(identity.port(), 80);
/// assert_eq!(identity.timeout(), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    host: String,
    mac: MacAddr,
    kind: DeviceKind,
    timeout: Duration,
}

impl DeviceIdentity {
    /// The fixed UDP port Broadlink devices listen on.
    pub const PORT: u16 = 80;

    /// Default per-command timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a device identity with the default timeout.
    #[must_use]
    pub fn new(host: impl Into<String>, mac: MacAddr, kind: DeviceKind) -> Self {
        Self {
            host: host.into(),
            mac,
            kind,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the per-command timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the device hostname or IP address.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the fixed device port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        Self::PORT
    }

    /// Returns the hardware address.
    #[must_use]
    pub const fn mac(&self) -> MacAddr {
        self.mac
    }

    /// Returns the device kind.
    #[must_use]
    pub const fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Returns the per-command timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}
