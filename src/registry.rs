// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered list of verified device identifiers.

/// Device identifiers in registration order.
///
/// Duplicates are allowed: registering the same device twice makes every
/// command reach it twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DeviceRegistry {
    devices: Vec<String>,
}

impl DeviceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a device.
    pub(crate) fn push(&mut self, device: String) {
        self.devices.push(device);
    }

    /// Removes the first occurrence of `device`.
    ///
    /// # Returns
    ///
    /// Returns `true` if the device was found and removed, `false` otherwise.
    pub(crate) fn remove(&mut self, device: &str) -> bool {
        match self.devices.iter().position(|d| d == device) {
            Some(index) => {
                self.devices.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns the registered devices in order.
    #[must_use]
    pub(crate) fn as_slice(&self) -> &[String] {
        &self.devices
    }

    /// Returns the number of entries.
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Iterates over the devices in order.
    pub(crate) fn iter(&self) -> std::slice::Iter<'_, String> {
        self.devices.iter()
    }
}

impl<'a> IntoIterator for &'a DeviceRegistry {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
