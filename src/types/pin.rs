// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GPIO pin types.
//!
//! Each type can only hold a value the remote service accepts, so commands
//! built from them never need to be checked again before they are sent.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Index of a writable/readable GPIO pin, in `[0, 4)`.
///
/// # Examples
///
/// ```
/// use bolt_remote::types::PinIndex;
///
/// let pin = PinIndex::new(2).unwrap();
/// assert_eq!(pin.value(), 2);
///
/// assert!(PinIndex::new(4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinIndex(u8);

impl PinIndex {
    /// Exclusive upper bound for pin indices.
    pub const LIMIT: u8 = 4;

    /// Creates a new pin index.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `index` is 4 or greater.
    pub fn new(index: u8) -> Result<Self, ValueError> {
        if index >= Self::LIMIT {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: u16::from(Self::LIMIT),
                actual: u16::from(index),
            });
        }
        Ok(Self(index))
    }

    /// Returns the pin number.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for PinIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for PinIndex {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Analog output value, in `[0, 255)`.
///
/// # Examples
///
/// ```
/// use bolt_remote::types::AnalogValue;
///
/// assert_eq!(AnalogValue::new(100).unwrap().value(), 100);
/// assert!(AnalogValue::new(255).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnalogValue(u8);

impl AnalogValue {
    /// Exclusive upper bound for analog values.
    pub const LIMIT: u16 = 255;

    /// Lowest accepted value.
    pub const MIN: Self = Self(0);

    /// Highest accepted value.
    pub const MAX: Self = Self(254);

    /// Creates a new analog value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `value` is 255 or greater.
    pub fn new(value: u16) -> Result<Self, ValueError> {
        match u8::try_from(value) {
            Ok(v) if u16::from(v) < Self::LIMIT => Ok(Self(v)),
            _ => Err(ValueError::OutOfRange {
                min: 0,
                max: Self::LIMIT,
                actual: value,
            }),
        }
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for AnalogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for AnalogValue {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Logic level for a digital write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigitalLevel {
    /// Pin driven high.
    High,
    /// Pin driven low.
    Low,
}

impl DigitalLevel {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for DigitalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigitalLevel {
    type Err = ValueError;

    /// Only the exact strings `HIGH` and `LOW` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HIGH" => Ok(Self::High),
            "LOW" => Ok(Self::Low),
            _ => Err(ValueError::InvalidLevel(s.to_string())),
        }
    }
}

impl From<bool> for DigitalLevel {
    fn from(value: bool) -> Self {
        if value { Self::High } else { Self::Low }
    }
}
