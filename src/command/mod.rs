// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Remote command definitions.
//!
//! Every capability of the Bolt cloud API maps onto one [`Command`]
//! variant. A command knows its path segment and the query parameters it
//! appends after `deviceName`.
//!
//! | Command | Path | Extra parameters |
//! |---------|------|------------------|
//! | [`Command::Version`] | `version` | - |
//! | [`Command::IsOnline`] | `isOnline` | - |
//! | [`Command::Restart`] | `restart` | - |
//! | [`Command::AnalogRead`] | `analogRead` | `pin=A0` |
//! | [`Command::AnalogWrite`] | `analogWrite` | `pin`, `value` |
//! | [`Command::DigitalRead`] | `digitalRead` | `pin` |
//! | [`Command::DigitalWrite`] | `digitalWrite` | `pin`, `value` |
//!
//! # Examples
//!
//! ```
//! use bolt_remote::command::Command;
//! use bolt_remote::types::{AnalogValue, PinIndex};
//!
//! let cmd = Command::AnalogWrite {
//!     pin: PinIndex::new(2).unwrap(),
//!     value: AnalogValue::new(100).unwrap(),
//! };
//!
//! assert_eq!(cmd.name(), "analogWrite");
//! assert_eq!(
//!     cmd.params(),
//!     vec![("pin", "2".to_string()), ("value", "100".to_string())]
//! );
//! ```

use std::fmt;

use crate::error::ValueError;
use crate::types::{AnalogValue, DigitalLevel, PinIndex};

/// The analog input every `analogRead` targets.
pub const ANALOG_INPUT_PIN: &str = "A0";

/// A single call against the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Reports the firmware version; also used to validate device names.
    Version,
    /// Reports whether the device is connected to the cloud.
    IsOnline,
    /// Restarts the device.
    Restart,
    /// Reads the analog input [`ANALOG_INPUT_PIN`].
    AnalogRead,
    /// Writes an analog (PWM) value to a pin.
    AnalogWrite {
        /// Target pin.
        pin: PinIndex,
        /// Output value.
        value: AnalogValue,
    },
    /// Reads the level of a digital pin.
    DigitalRead {
        /// Pin to read.
        pin: PinIndex,
    },
    /// Drives a digital pin high or low.
    DigitalWrite {
        /// Target pin.
        pin: PinIndex,
        /// Level to drive.
        level: DigitalLevel,
    },
}

impl Command {
    /// Builds an `analogWrite` command from raw numbers.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the pin is outside `[0, 4)` or the
    /// value is outside `[0, 255)`.
    pub fn analog_write(pin: u8, value: u16) -> Result<Self, ValueError> {
        Ok(Self::AnalogWrite {
            pin: PinIndex::new(pin)?,
            value: AnalogValue::new(value)?,
        })
    }

    /// Builds a `digitalRead` command from a raw pin number.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the pin is outside `[0, 4)`.
    pub fn digital_read(pin: u8) -> Result<Self, ValueError> {
        Ok(Self::DigitalRead {
            pin: PinIndex::new(pin)?,
        })
    }

    /// Builds a `digitalWrite` command from a raw pin number and level name.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` for a bad pin, or
    /// `ValueError::InvalidLevel` if `level` is not `HIGH` or `LOW`.
    pub fn digital_write(pin: u8, level: &str) -> Result<Self, ValueError> {
        Ok(Self::DigitalWrite {
            pin: PinIndex::new(pin)?,
            level: level.parse()?,
        })
    }

    /// Returns the path segment of the command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::IsOnline => "isOnline",
            Self::Restart => "restart",
            Self::AnalogRead => "analogRead",
            Self::AnalogWrite { .. } => "analogWrite",
            Self::DigitalRead { .. } => "digitalRead",
            Self::DigitalWrite { .. } => "digitalWrite",
        }
    }

    /// Returns the query parameters appended after `deviceName`, in order.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Version | Self::IsOnline | Self::Restart => Vec::new(),
            Self::AnalogRead => vec![("pin", ANALOG_INPUT_PIN.to_string())],
            Self::AnalogWrite { pin, value } => {
                vec![("pin", pin.to_string()), ("value", value.to_string())]
            }
            Self::DigitalRead { pin } => vec![("pin", pin.to_string())],
            Self::DigitalWrite { pin, level } => {
                vec![("pin", pin.to_string()), ("value", level.to_string())]
            }
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
