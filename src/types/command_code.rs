// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stored IR/RF command codes.

use std::fmt;

use base64::prelude::*;

use crate::error::ValueError;

/// A previously learned IR/RF signal, carried as an opaque binary blob.
///
/// Codes travel through configuration as base64 text and are decoded once
/// at construction time. This library never interprets the bytes; they go
/// to the transport verbatim.
///
/// # Examples
///
/// ```
/// use broadr_lib::types::CommandCode;
///
/// let code = CommandCode::from_base64("JgBGAA==").unwrap();
/// assert_eq!(code.as_bytes(), &[0x26, 0x00, 0x46, 0x00]);
/// assert_eq!(code.to_base64(), "JgBGAA==");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CommandCode(Vec<u8>);

// Codes are non-empty by construction, so there is no `is_empty`.
#[allow(clippy::len_without_is_empty)]
impl CommandCode {
    /// Decodes a command code from its base64 configuration form.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidCommandCode` if the input is not valid
    /// base64, or `ValueError::EmptyCommandCode` if it decodes to zero
    /// bytes.
    pub fn from_base64(encoded: &str) -> Result<Self, ValueError> {
        let bytes = BASE64_STANDARD
            .decode(encoded.trim())
            .map_err(|err| ValueError::InvalidCommandCode(err.to_string()))?;
        Self::from_bytes(bytes)
    }

    /// Wraps raw signal bytes, e.g. a packet captured in learning mode.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyCommandCode` for an empty packet.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ValueError> {
        if bytes.is_empty() {
            return Err(ValueError::EmptyCommandCode);
        }
        Ok(Self(bytes))
    }

    /// Returns the raw signal bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the number of signal bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Re-encodes the code in its base64 configuration form.
    #[must_use]
    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(&self.0)
    }
}

impl fmt::Debug for CommandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Signal blobs run to hundreds of bytes; keep logs readable.
        write!(f, "CommandCode({} bytes)", self.0.len())
    }
}
