// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `BroadR` Lib - A Rust library to control Broadlink RM and SP devices.
//!
//! This library exposes Broadlink infrared/RF blasters (RM series) and
//! smart plugs (SP1/SP2) as on/off switches: a per-device authenticated
//! session, stored-code replay or relay control, and bounded
//! retry-with-re-authentication when the device's firmware session
//! expires.
//!
//! The wire protocol itself (encryption, framing) is not implemented
//! here. It is driven through the [`Transport`] trait, implemented over
//! whatever Broadlink protocol crate the application uses.
//!
//! # Supported Devices
//!
//! - **RM series** (`rm`): switches replay previously learned IR/RF
//!   codes; new codes can be captured with [`learn::learn_command`]
//! - **SP1** (`sp1`): write-only smart plug, state is assumed
//! - **SP2** (`sp2`): smart plug with power readback, state is polled
//!
//! # Quick Start
//!
//! ```ignore
//! use broadr_lib::{PlatformConfig, SwitchConfig, setup};
//! use broadr_lib::types::DeviceKind;
//!
//! #[tokio::main]
//! async fn main() -> broadr_lib::Result<()> {
//!     let config = PlatformConfig::new("192.168.1.23", "34:ea:34:12:ab:cd")
//!         .with_kind(DeviceKind::Rm)
//!         .with_switch(
//!             "tv",
//!             SwitchConfig::new()
//!                 .with_friendly_name("Living Room TV")
//!                 .with_command_on("JgBGAJKVETkRORE...")
//!                 .with_command_off("JgBGAJKVETkRFBE..."),
//!         );
//!
//!     // `transport` comes from the wire-protocol crate for this device.
//!     let transport = my_broadlink_transport(&config.device_identity()?);
//!     let platform = setup(&config, transport).await?;
//!
//!     for switch in platform.switches() {
//!         switch.turn_on().await;
//!         println!("{}: on = {}", switch.name(), switch.is_on());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Failure Model
//!
//! No command failure is fatal. Timeouts trigger an opportunistic
//! re-authentication and a retry, up to [`session::RETRY_BUDGET`] extra
//! attempts; exhaustion logs an error and leaves the switch state
//! untouched. Setup-time authentication failure is logged and the
//! switches are registered anyway.

pub mod config;
pub mod error;
pub mod learn;
pub mod platform;
pub mod session;
pub mod switch;
pub mod transport;
pub mod types;

pub use config::{PlatformConfig, SwitchConfig};
pub use error::{
    ConfigError, DeviceError, Error, ProtocolError, Result, TransportError, ValueError,
};
pub use learn::learn_command;
pub use platform::{Platform, setup};
pub use session::{DeviceSession, RETRY_BUDGET};
pub use switch::{Switch, SwitchKind};
pub use transport::Transport;
pub use types::{CommandCode, DeviceIdentity, DeviceKind, MacAddr, PowerState};
