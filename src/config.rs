// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform configuration types.
//!
//! Mirrors the host-facing configuration schema: one device per
//! platform entry (host, hardware address, kind, timeout) plus a map of
//! switch slugs to per-switch settings. Values arrive as text and are
//! validated here into the typed forms the rest of the library uses.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{CommandCode, DeviceIdentity, DeviceKind};

fn default_timeout_secs() -> u64 {
    DeviceIdentity::DEFAULT_TIMEOUT.as_secs()
}

/// Configuration for one Broadlink device and its switches.
///
/// # Examples
///
/// ```
/// use broadr_lib::config::{PlatformConfig, SwitchConfig};
/// use broadr_lib::types::DeviceKind;
///
/// let config = PlatformConfig::new("192.168.1.23", "34:ea:34:12:ab:cd")
///     .with_kind(DeviceKind::Rm)
///     .with_timeout_secs(5)
///     .with_switch(
///         "tv",
///         SwitchConfig::new()
///             .with_friendly_name("Living Room TV")
///             .with_command_on("JgBGAA=="),
///     );
///
/// let identity = config.device_identity().unwrap();
/// assert_eq!(identity.host(), "192.168.1.23");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Hostname or IP address of the device.
    pub host: String,
    /// Hardware address as a colon- or hyphen-delimited hex string.
    pub mac: String,
    /// Device kind tag; defaults to `rm`.
    #[serde(default)]
    pub kind: DeviceKind,
    /// Per-command timeout in seconds; defaults to 10.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Switch slug to per-switch configuration.
    #[serde(default)]
    pub switches: BTreeMap<String, SwitchConfig>,
}

impl PlatformConfig {
    /// Creates a configuration with default kind and timeout.
    #[must_use]
    pub fn new(host: impl Into<String>, mac: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            mac: mac.into(),
            kind: DeviceKind::default(),
            timeout_secs: default_timeout_secs(),
            switches: BTreeMap::new(),
        }
    }

    /// Sets the device kind.
    #[must_use]
    pub fn with_kind(mut self, kind: DeviceKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the per-command timeout in seconds.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Adds a switch entry.
    #[must_use]
    pub fn with_switch(mut self, slug: impl Into<String>, switch: SwitchConfig) -> Self {
        self.switches.insert(slug.into(), switch);
        self
    }

    /// Validates the device fields into a [`DeviceIdentity`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for an unparseable hardware
    /// address and `ConfigError::ZeroTimeout` for a zero timeout.
    pub fn device_identity(&self) -> Result<DeviceIdentity, ConfigError> {
        let mac = self.mac.parse().map_err(|source| ConfigError::Invalid {
            field: "mac".to_string(),
            source,
        })?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(DeviceIdentity::new(self.host.clone(), mac, self.kind)
            .with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

/// Configuration for one switch on the device.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwitchConfig {
    /// Display name; the config slug is used when absent.
    #[serde(default)]
    pub friendly_name: Option<String>,
    /// Base64 code replayed on turn-on (RM devices).
    #[serde(default)]
    pub command_on: Option<String>,
    /// Base64 code replayed on turn-off (RM devices).
    #[serde(default)]
    pub command_off: Option<String>,
}

impl SwitchConfig {
    /// Creates an empty switch configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    /// Sets the base64 turn-on code.
    #[must_use]
    pub fn with_command_on(mut self, code: impl Into<String>) -> Self {
        self.command_on = Some(code.into());
        self
    }

    /// Sets the base64 turn-off code.
    #[must_use]
    pub fn with_command_off(mut self, code: impl Into<String>) -> Self {
        self.command_off = Some(code.into());
        self
    }

    /// Returns the display name, falling back to the config slug.
    #[must_use]
    pub fn display_name(&self, slug: &str) -> String {
        self.friendly_name
            .clone()
            .unwrap_or_else(|| slug.to_string())
    }

    /// Returns `true` if either direction has a stored code configured.
    #[must_use]
    pub fn has_stored_commands(&self) -> bool {
        self.command_on.is_some() || self.command_off.is_some()
    }

    /// Decodes the stored codes for both directions.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSwitch` naming the slug and field if
    /// a code is not valid base64 or decodes to zero bytes.
    pub fn decode_commands(
        &self,
        slug: &str,
    ) -> Result<(Option<CommandCode>, Option<CommandCode>), ConfigError> {
        let decode = |field: &str, value: &Option<String>| {
            value
                .as_deref()
                .map(CommandCode::from_base64)
                .transpose()
                .map_err(|source| ConfigError::InvalidSwitch {
                    slug: slug.to_string(),
                    field: field.to_string(),
                    source,
                })
        };
        Ok((
            decode("command_on", &self.command_on)?,
            decode("command_off", &self.command_off)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;

    #[test]
    fn deserializes_with_defaults() {
        let config: PlatformConfig = serde_json::from_str(
            r#"{"host": "192.168.1.23", "mac": "34:ea:34:12:ab:cd"}"#,
        )
        .unwrap();

        assert_eq!(config.kind, DeviceKind::Rm);
        assert_eq!(config.timeout_secs, 10);
        assert!(config.switches.is_empty());
    }

    #[test]
    fn deserializes_switch_map() {
        let config: PlatformConfig = serde_json::from_str(
            r#"{
                "host": "192.168.1.23",
                "mac": "34:ea:34:12:ab:cd",
                "kind": "rm",
                "switches": {
                    "tv": {"friendly_name": "TV", "command_on": "JgBGAA=="}
                }
            }"#,
        )
        .unwrap();

        let switch = &config.switches["tv"];
        assert_eq!(switch.display_name("tv"), "TV");
        assert!(switch.command_off.is_none());
    }

    #[test]
    fn device_identity_applies_kind_and_timeout() {
        let config = PlatformConfig::new("host", "34:ea:34:12:ab:cd")
            .with_kind(DeviceKind::Sp2)
            .with_timeout_secs(3);
        let identity = config.device_identity().unwrap();

        assert_eq!(identity.kind(), DeviceKind::Sp2);
        assert_eq!(identity.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn device_identity_rejects_bad_mac() {
        let config = PlatformConfig::new("host", "oops");
        let err = config.device_identity().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { field, source: ValueError::InvalidMacAddr(_) } if field == "mac"
        ));
    }

    #[test]
    fn device_identity_rejects_zero_timeout() {
        let config = PlatformConfig::new("host", "34:ea:34:12:ab:cd").with_timeout_secs(0);
        assert!(matches!(
            config.device_identity().unwrap_err(),
            ConfigError::ZeroTimeout
        ));
    }

    #[test]
    fn display_name_falls_back_to_slug() {
        let switch = SwitchConfig::new();
        assert_eq!(switch.display_name("bedroom_fan"), "bedroom_fan");
    }

    #[test]
    fn decode_commands_names_the_offending_field() {
        let switch = SwitchConfig::new()
            .with_command_on("JgBGAA==")
            .with_command_off("!!!");
        let err = switch.decode_commands("tv").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSwitch { slug, field, .. }
                if slug == "tv" && field == "command_off"
        ));
    }

    #[test]
    fn decode_commands_allows_absent_directions() {
        let switch = SwitchConfig::new().with_command_on("JgBGAA==");
        let (on, off) = switch.decode_commands("tv").unwrap();
        assert!(on.is_some());
        assert!(off.is_none());
    }
}
