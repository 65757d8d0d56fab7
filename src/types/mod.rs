// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types shared across the library.

mod command_code;
mod device_kind;
mod identity;
mod mac;
mod power;

pub use command_code::CommandCode;
pub use device_kind::DeviceKind;
pub use identity::DeviceIdentity;
pub use mac::MacAddr;
pub use power::PowerState;
