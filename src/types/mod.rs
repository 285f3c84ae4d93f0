// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validated value types.
//!
//! - [`AccessKey`] - UUID-formatted API credential
//! - [`PinIndex`] - GPIO pin index (0-3)
//! - [`AnalogValue`] - Analog output value (0-254)
//! - [`DigitalLevel`] - `HIGH` / `LOW`

mod key;
mod pin;

pub use key::AccessKey;
pub use pin::{AnalogValue, DigitalLevel, PinIndex};
