// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Supported Broadlink device kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// The three supported Broadlink device kinds.
///
/// The kind is fixed at setup time and selects which switch variant is
/// constructed for the device.
///
/// # Examples
///
/// ```
/// use broadr_lib::types::DeviceKind;
///
/// let kind: DeviceKind = "sp2".parse().unwrap();
/// assert!(kind.supports_power_readback());
/// assert!(!kind.supports_learning());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// RM-series IR/RF blaster; switches replay stored command codes.
    #[default]
    Rm,
    /// SP1 smart plug; write-only power relay.
    Sp1,
    /// SP2 smart plug; power relay with state readback.
    Sp2,
}

impl DeviceKind {
    /// Returns the configuration tag for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rm => "rm",
            Self::Sp1 => "sp1",
            Self::Sp2 => "sp2",
        }
    }

    /// Returns `true` if switches on this device replay stored IR/RF
    /// command codes rather than driving a relay.
    #[must_use]
    pub const fn supports_stored_commands(&self) -> bool {
        matches!(self, Self::Rm)
    }

    /// Returns `true` if the device can report its actual power state.
    #[must_use]
    pub const fn supports_power_readback(&self) -> bool {
        matches!(self, Self::Sp2)
    }

    /// Returns `true` if the device can capture new IR/RF codes.
    #[must_use]
    pub const fn supports_learning(&self) -> bool {
        matches!(self, Self::Rm)
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeviceKind {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rm" => Ok(Self::Rm),
            "sp1" => Ok(Self::Sp1),
            "sp2" => Ok(Self::Sp2),
            _ => Err(ValueError::InvalidDeviceKind(s.to_string())),
        }
    }
}
