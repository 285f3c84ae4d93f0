// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client for the Bolt cloud remote-control API.

use std::fmt;

use tokio::task::JoinSet;

use crate::command::Command;
use crate::error::{Error, ProtocolError, Result, ValueError};
use crate::protocol::{ClientConfig, FanOut, HttpTransport};
use crate::registry::DeviceRegistry;
use crate::response::{DeviceOutcome, RemoteResponse};
use crate::types::AccessKey;

/// Client holding an access key and a list of verified devices.
///
/// Devices are admitted only after a successful `version` round-trip. Every
/// capability method then sends its command to all registered devices and
/// returns one [`DeviceOutcome`] per device, in registration order. A
/// failure on one device never stops the others.
///
/// # Examples
///
/// ```no_run
/// use bolt_remote::RemoteDeviceClient;
///
/// #[tokio::main]
/// async fn main() -> bolt_remote::Result<()> {
///     let mut client = RemoteDeviceClient::new("123e4567-e89b-12d3-a456-426614174000")?;
///
///     if client.add_device("BOLT1234567").await {
///         for outcome in client.analog_read().await {
///             println!("{}: {:?}", outcome.device, outcome.result);
///         }
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct RemoteDeviceClient {
    key: Option<AccessKey>,
    devices: DeviceRegistry,
    debug: bool,
    fan_out: FanOut,
    transport: HttpTransport,
}

impl RemoteDeviceClient {
    /// Creates a client for the public Bolt cloud.
    ///
    /// An invalid key does not fail construction: the client is created
    /// without a key (see [`key`](Self::key)) and every remote call reports
    /// [`Error::KeyNotSet`] until [`set_key`](Self::set_key) succeeds.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(key: &str) -> std::result::Result<Self, ProtocolError> {
        ClientConfig::new(key).into_client()
    }

    pub(crate) fn from_config(config: &ClientConfig) -> std::result::Result<Self, ProtocolError> {
        let transport = HttpTransport::new(config)?;

        let mut client = Self {
            key: None,
            devices: DeviceRegistry::new(),
            debug: config.debug(),
            fan_out: config.fan_out(),
            transport,
        };
        client.set_key(config.key());
        Ok(client)
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Enables or disables diagnostic output, returning the new setting.
    pub fn set_debug(&mut self, enabled: bool) -> bool {
        self.debug = enabled;
        self.debug
    }

    /// Returns whether diagnostic output is enabled.
    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the current key, or `None` if no valid key is set.
    #[must_use]
    pub fn key(&self) -> Option<&AccessKey> {
        self.key.as_ref()
    }

    /// Forgets the access key, returning the previous one.
    ///
    /// Registered devices are kept, but every call reports
    /// [`Error::KeyNotSet`] until a new key is set.
    pub fn clear_key(&mut self) -> Option<AccessKey> {
        if self.debug {
            tracing::debug!("Key cleared");
        }
        self.key.take()
    }

    /// Replaces the access key.
    ///
    /// Returns `false` and keeps the previous key if `key` is not a UUID.
    pub fn set_key(&mut self, key: &str) -> bool {
        self.try_set_key(key).is_ok()
    }

    /// Replaces the access key, reporting why it was rejected.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidKey` if `key` is not a UUID; the previous
    /// key is kept.
    pub fn try_set_key(&mut self, key: &str) -> std::result::Result<(), ValueError> {
        if self.debug {
            tracing::debug!("Setting key");
        }

        match AccessKey::parse(key) {
            Ok(parsed) => {
                self.key = Some(parsed);
                if self.debug {
                    tracing::debug!(key = ?parsed, "Key set");
                }
                Ok(())
            }
            Err(e) => {
                if self.debug {
                    tracing::debug!("Key not a valid UUID");
                }
                Err(e)
            }
        }
    }

    // =========================================================================
    // Device registry
    // =========================================================================

    /// Validates a device and registers it.
    ///
    /// Returns `true` only if the `version` call for the device reports
    /// success; otherwise the registry is left unchanged.
    pub async fn add_device(&mut self, device: impl fmt::Display) -> bool {
        self.try_add_device(device).await.is_ok()
    }

    /// Validates a device and registers it, reporting why it was rejected.
    ///
    /// # Errors
    ///
    /// - [`Error::KeyNotSet`] if no key is set
    /// - [`Error::Protocol`] / [`Error::Parse`] if the validation call failed
    /// - [`Error::DeviceRejected`] if the service did not report success
    pub async fn try_add_device(&mut self, device: impl fmt::Display) -> Result<()> {
        let device = device.to_string();
        let key = self.key.ok_or(Error::KeyNotSet)?;

        let response = self
            .transport
            .call(&key, Command::Version, &device, self.debug)
            .await?;

        if !response.success() {
            return Err(Error::DeviceRejected {
                device,
                response: Box::new(response),
            });
        }

        self.devices.push(device);
        Ok(())
    }

    /// Removes a device.
    ///
    /// # Returns
    ///
    /// Returns `true` if the device was found and removed, `false` otherwise.
    pub fn remove_device(&mut self, device: &str) -> bool {
        self.devices.remove(device)
    }

    /// Returns the registered devices in registration order.
    #[must_use]
    pub fn list_devices(&self) -> &[String] {
        self.devices.as_slice()
    }

    // =========================================================================
    // Capabilities
    // =========================================================================

    /// Queries the firmware version of every device.
    pub async fn version(&self) -> Vec<DeviceOutcome> {
        self.send(Command::Version).await
    }

    /// Asks whether every device is online.
    pub async fn is_online(&self) -> Vec<DeviceOutcome> {
        self.send(Command::IsOnline).await
    }

    /// Restarts every device.
    pub async fn restart(&self) -> Vec<DeviceOutcome> {
        self.send(Command::Restart).await
    }

    /// Reads the `A0` analog input of every device.
    pub async fn analog_read(&self) -> Vec<DeviceOutcome> {
        self.send(Command::AnalogRead).await
    }

    /// Writes an analog value to a pin on every device.
    ///
    /// Returns an empty list without calling any device if `pin` is outside
    /// `[0, 4)` or `value` is outside `[0, 255)`.
    pub async fn analog_write(&self, pin: u8, value: u16) -> Vec<DeviceOutcome> {
        self.send_validated(Command::analog_write(pin, value)).await
    }

    /// Reads a digital pin on every device.
    ///
    /// Returns an empty list without calling any device if `pin` is outside
    /// `[0, 4)`.
    pub async fn digital_read(&self, pin: u8) -> Vec<DeviceOutcome> {
        self.send_validated(Command::digital_read(pin)).await
    }

    /// Drives a digital pin `HIGH` or `LOW` on every device.
    ///
    /// Returns an empty list without calling any device if `pin` is outside
    /// `[0, 4)` or `level` is neither `HIGH` nor `LOW`.
    pub async fn digital_write(&self, pin: u8, level: &str) -> Vec<DeviceOutcome> {
        self.send_validated(Command::digital_write(pin, level)).await
    }

    async fn send_validated(
        &self,
        command: std::result::Result<Command, ValueError>,
    ) -> Vec<DeviceOutcome> {
        match command {
            Ok(command) => self.send(command).await,
            Err(e) => {
                if self.debug {
                    tracing::debug!(error = %e, "Invalid parameters, no calls made");
                }
                Vec::new()
            }
        }
    }

    /// Sends a command to every registered device.
    ///
    /// Returns one outcome per device in registration order, or an empty
    /// list if no device is registered.
    pub async fn send(&self, command: Command) -> Vec<DeviceOutcome> {
        if self.devices.is_empty() {
            return Vec::new();
        }

        let Some(key) = self.key else {
            return self
                .devices
                .iter()
                .map(|device| DeviceOutcome {
                    device: device.clone(),
                    result: Err(Error::KeyNotSet),
                })
                .collect();
        };

        match self.fan_out {
            FanOut::Sequential => {
                let mut outcomes = Vec::with_capacity(self.devices.len());
                for device in &self.devices {
                    let result = self.call(&key, command, device).await;
                    outcomes.push(DeviceOutcome {
                        device: device.clone(),
                        result,
                    });
                }
                outcomes
            }
            FanOut::Concurrent => self.send_concurrent(key, command).await,
        }
    }

    async fn send_concurrent(&self, key: AccessKey, command: Command) -> Vec<DeviceOutcome> {
        let mut tasks = JoinSet::new();
        for (index, device) in self.devices.iter().enumerate() {
            let transport = self.transport.clone();
            let device = device.clone();
            let debug = self.debug;
            tasks.spawn(async move {
                let result = transport.call(&key, command, &device, debug).await;
                (index, result)
            });
        }

        let mut slots: Vec<Option<Result<RemoteResponse>>> =
            (0..self.devices.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => tracing::warn!(command = %command, error = %e, "Device call task failed"),
            }
        }

        self.devices
            .iter()
            .zip(slots)
            .map(|(device, slot)| DeviceOutcome {
                device: device.clone(),
                result: slot.unwrap_or_else(|| Err(Error::TaskFailed(device.clone()))),
            })
            .collect()
    }

    async fn call(&self, key: &AccessKey, command: Command, device: &str) -> Result<RemoteResponse> {
        self.transport.call(key, command, device, self.debug).await
    }
}
