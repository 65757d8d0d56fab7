// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hardware address type for Broadlink devices.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// A 6-byte device hardware address.
///
/// Broadlink devices are addressed by IP plus MAC; the MAC is carried in
/// configuration as a colon- or hyphen-delimited hex string.
///
/// # Examples
///
/// ```
/// use broadr_lib::types::MacAddr;
///
/// let mac: MacAddr = "34:ea:34:12:ab:cd".parse().unwrap();
/// assert_eq!(mac.as_bytes(), &[0x34, 0xea, 0x34, 0x12, 0xab, 0xcd]);
/// assert_eq!(mac.to_string(), "34:ea:34:12:ab:cd");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr([u8; 6]);

impl MacAddr {
    /// Length of a hardware address in bytes.
    pub const LEN: usize = 6;

    /// Creates a hardware address from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Returns the raw address bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }

    /// Consumes the address and returns the raw bytes.
    #[must_use]
    pub const fn into_bytes(self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl FromStr for MacAddr {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; Self::LEN];
        let mut count = 0;

        for part in s.split(|c| c == ':' || c == '-') {
            if count == Self::LEN {
                return Err(ValueError::InvalidMacAddr(s.to_string()));
            }
            if part.len() != 2 {
                return Err(ValueError::InvalidMacAddr(s.to_string()));
            }
            bytes[count] = u8::from_str_radix(part, 16)
                .map_err(|_| ValueError::InvalidMacAddr(s.to_string()))?;
            count += 1;
        }

        if count != Self::LEN {
            return Err(ValueError::InvalidMacAddr(s.to_string()));
        }
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_colon_delimited() {
        let mac: MacAddr = "34:EA:34:12:AB:CD".parse().unwrap();
        assert_eq!(mac.as_bytes(), &[0x34, 0xea, 0x34, 0x12, 0xab, 0xcd]);
    }

    #[test]
    fn parse_hyphen_delimited() {
        let mac: MacAddr = "34-ea-34-12-ab-cd".parse().unwrap();
        assert_eq!(mac.as_bytes(), &[0x34, 0xea, 0x34, 0x12, 0xab, 0xcd]);
    }

    #[test]
    fn display_is_lowercase_colon_form() {
        let mac = MacAddr::new([0x34, 0xEA, 0x34, 0x12, 0xAB, 0xCD]);
        assert_eq!(mac.to_string(), "34:ea:34:12:ab:cd");
    }

    #[test]
    fn display_round_trips() {
        let mac: MacAddr = "01:02:03:0a:0b:0c".parse().unwrap();
        assert_eq!(mac.to_string().parse::<MacAddr>().unwrap(), mac);
    }

    #[test]
    fn rejects_short_address() {
        let result = "34:ea:34:12:ab".parse::<MacAddr>();
        assert!(matches!(result, Err(ValueError::InvalidMacAddr(_))));
    }

    #[test]
    fn rejects_long_address() {
        let result = "34:ea:34:12:ab:cd:ef".parse::<MacAddr>();
        assert!(result.is_err());
    }

    #[test]
    fn rejects_non_hex_digits() {
        let result = "34:ea:34:12:ab:zz".parse::<MacAddr>();
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unpadded_groups() {
        let result = "4:ea:34:12:ab:cd".parse::<MacAddr>();
        assert!(result.is_err());
    }
}
