// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the Bolt cloud API.

use std::time::Duration;

use reqwest::Client;

use crate::command::Command;
use crate::error::{ProtocolError, Result};
use crate::response::RemoteResponse;
use crate::types::AccessKey;

// ============================================================================
// ClientConfig - Configuration for the remote client
// ============================================================================

/// How device identifiers and parameter values are written into the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryEncoding {
    /// Values are concatenated as-is, matching what the service has always
    /// received. Reserved characters in a device name end up in the URL
    /// verbatim.
    #[default]
    Raw,
    /// Values are percent-encoded.
    Encoded,
}

/// How a command is dispatched across the registered devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FanOut {
    /// One device after another, in registration order.
    #[default]
    Sequential,
    /// All devices at once on the tokio runtime. Results are still returned
    /// in registration order.
    Concurrent,
}

/// Configuration for a [`RemoteDeviceClient`](crate::RemoteDeviceClient).
///
/// # Examples
///
/// ```
/// use bolt_remote::protocol::{ClientConfig, FanOut, QueryEncoding};
/// use std::time::Duration;
///
/// let config = ClientConfig::new("123e4567-e89b-12d3-a456-426614174000")
///     .with_base_url("https://cloud.boltiot.com/remote")
///     .with_timeout(Duration::from_secs(5))
///     .with_query_encoding(QueryEncoding::Encoded)
///     .with_fan_out(FanOut::Concurrent)
///     .with_debug(false);
///
/// assert_eq!(config.base_url(), "https://cloud.boltiot.com/remote");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    key: String,
    base_url: String,
    timeout: Duration,
    encoding: QueryEncoding,
    fan_out: FanOut,
    debug: bool,
}

impl ClientConfig {
    /// Base URL of the public Bolt cloud.
    pub const DEFAULT_BASE_URL: &'static str = "https://cloud.boltiot.com/remote/";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration using the given access key.
    ///
    /// The key is validated when the client is built; an invalid key leaves
    /// the client without a key rather than failing.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            encoding: QueryEncoding::default(),
            fan_out: FanOut::default(),
            debug: true,
        }
    }

    /// Points the client at another endpoint, e.g. a self-hosted relay.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the query encoding.
    #[must_use]
    pub fn with_query_encoding(mut self, encoding: QueryEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the fan-out mode.
    #[must_use]
    pub fn with_fan_out(mut self, fan_out: FanOut) -> Self {
        self.fan_out = fan_out;
        self
    }

    /// Enables or disables diagnostic output.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Returns the access key as given.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the base URL as given.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the query encoding.
    #[must_use]
    pub fn query_encoding(&self) -> QueryEncoding {
        self.encoding
    }

    /// Returns the fan-out mode.
    #[must_use]
    pub fn fan_out(&self) -> FanOut {
        self.fan_out
    }

    /// Returns whether diagnostic output is enabled.
    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the base URL with exactly one trailing slash.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` unless the URL uses the
    /// `http` or `https` scheme and names a host.
    pub fn normalized_base_url(&self) -> std::result::Result<String, ProtocolError> {
        let url = self.base_url.trim();
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .ok_or_else(|| ProtocolError::InvalidAddress(self.base_url.clone()))?;
        if rest.is_empty() || rest.starts_with('/') {
            return Err(ProtocolError::InvalidAddress(self.base_url.clone()));
        }
        Ok(format!("{}/", url.trim_end_matches('/')))
    }

    /// Creates a `RemoteDeviceClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is unusable or the HTTP client cannot be
    /// created.
    pub fn into_client(self) -> std::result::Result<crate::RemoteDeviceClient, ProtocolError> {
        crate::RemoteDeviceClient::from_config(&self)
    }
}

// ============================================================================
// HttpTransport - Internal HTTP transport
// ============================================================================

/// Builds request URLs and performs the GET exchange.
///
/// Cloning is cheap; the underlying `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub(crate) struct HttpTransport {
    client: Client,
    base_url: String,
    encoding: QueryEncoding,
}

impl HttpTransport {
    pub(crate) fn new(config: &ClientConfig) -> std::result::Result<Self, ProtocolError> {
        let base_url = config.normalized_base_url()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(Self {
            client,
            base_url,
            encoding: config.query_encoding(),
        })
    }

    /// Builds `<base><key>/<command>?deviceName=<device>[&<name>=<value>]*`.
    pub(crate) fn build_url(&self, key: &AccessKey, command: &Command, device: &str) -> String {
        self.format_url(&key.to_string(), command, device)
    }

    /// Same as [`build_url`](Self::build_url) with the key redacted, for logs.
    pub(crate) fn loggable_url(&self, key: &AccessKey, command: &Command, device: &str) -> String {
        self.format_url(&key.redacted(), command, device)
    }

    fn format_url(&self, key: &str, command: &Command, device: &str) -> String {
        let mut url = format!(
            "{}{key}/{}?deviceName={}",
            self.base_url,
            command.name(),
            self.encode(device)
        );
        for (name, value) in command.params() {
            url.push('&');
            url.push_str(name);
            url.push('=');
            url.push_str(&self.encode(&value));
        }
        url
    }

    fn encode(&self, value: &str) -> String {
        match self.encoding {
            QueryEncoding::Raw => value.to_string(),
            QueryEncoding::Encoded => urlencoding::encode(value).into_owned(),
        }
    }

    /// Issues one command against one device.
    ///
    /// Non-2xx statuses are not errors here: the service reports failures in
    /// the body, so the body is parsed whatever the status.
    pub(crate) async fn call(
        &self,
        key: &AccessKey,
        command: Command,
        device: &str,
        debug: bool,
    ) -> Result<RemoteResponse> {
        let url = self.build_url(key, &command, device);

        if debug {
            let url = self.loggable_url(key, &command, device);
            tracing::debug!(command = %command, device = %device, url = %url, "Calling remote command");
        }

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                // The URL carries the key
                let e = e.without_url();
                if debug {
                    tracing::debug!(command = %command, device = %device, error = %e, "Request failed");
                }
                return Err(ProtocolError::Http(e).into());
            }
        };

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ProtocolError::Http(e.without_url()))?;

        if debug {
            tracing::debug!(status, body = %body, "Received HTTP response");
        }

        Ok(RemoteResponse::from_body(status, body)?)
    }
}
