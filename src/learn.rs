// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IR/RF learning mode for RM devices.
//!
//! A one-shot, host-driven admin action: arm the device's receiver, then
//! poll for a captured packet on a fixed interval until a hard deadline.
//! The deadline is the only cancellation point, and it is separate from
//! the per-command retry budget in [`crate::session`].
//!
//! The transport lock is held for the whole learning window, so switch
//! commands against the same device queue up behind it; the device
//! cannot service them while in learning mode anyway.

use std::time::Duration;

use tokio::time::{self, Instant};

use crate::error::{DeviceError, Error, ProtocolError, TransportError};
use crate::session::DeviceSession;
use crate::transport::Transport;
use crate::types::CommandCode;

/// How long the device listens for a signal before giving up.
pub const LEARN_TIMEOUT: Duration = Duration::from_secs(20);

/// Pause between capture polls.
pub const LEARN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Captures one IR/RF signal from the device's receiver.
///
/// Authenticates, arms learning mode, then polls every
/// [`LEARN_POLL_INTERVAL`] until a packet arrives or [`LEARN_TIMEOUT`]
/// passes. The captured code is returned for the host to display or
/// store (`to_base64` gives the configuration form).
///
/// # Errors
///
/// Returns `DeviceError::LearningNotSupported` for non-RM devices,
/// `ProtocolError::ConnectTimeout` if the handshake fails,
/// `DeviceError::NothingLearned` if the window closes without a signal,
/// and transport errors from the capture exchange itself.
pub async fn learn_command<T: Transport>(
    session: &DeviceSession<T>,
) -> Result<CommandCode, Error> {
    let kind = session.identity().kind();
    if !kind.supports_learning() {
        return Err(DeviceError::LearningNotSupported(kind).into());
    }

    session.authenticate().await?;

    let mut transport = session.transport().await;
    transport.enter_learning().await.map_err(capture_error)?;
    tracing::info!(
        device = %session.identity().mac(),
        "learning mode armed, press the key to capture"
    );

    let deadline = Instant::now() + LEARN_TIMEOUT;
    loop {
        if let Some(packet) = transport.check_data().await.map_err(capture_error)? {
            let code = CommandCode::from_bytes(packet)?;
            tracing::info!(
                device = %session.identity().mac(),
                code = %code.to_base64(),
                "captured signal"
            );
            return Ok(code);
        }
        if Instant::now() >= deadline {
            tracing::error!(
                device = %session.identity().mac(),
                "no signal captured within the learning window"
            );
            return Err(DeviceError::NothingLearned.into());
        }
        time::sleep(LEARN_POLL_INTERVAL).await;
    }
}

fn capture_error(err: TransportError) -> Error {
    if err.is_timeout() {
        ProtocolError::CommandTimeout { attempts: 1 }.into()
    } else {
        ProtocolError::Transport(err).into()
    }
}
