// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Responses returned by the remote service.
//!
//! The service answers every command with a JSON object carrying a string
//! `success` field (`"1"` or `"0"`) and command-specific payload fields,
//! typically `value`:
//!
//! ```json
//! {"success": "1", "value": "1.0.0"}
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ParseError, Result};

/// Parsed body of a single HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResponse {
    status: u16,
    body: String,
    json: Value,
}

impl RemoteResponse {
    /// Parses a raw response body received with `status`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the body is not valid JSON.
    pub fn from_body(status: u16, body: String) -> std::result::Result<Self, ParseError> {
        let json =
            serde_json::from_str(&body).map_err(|source| ParseError::Json { status, source })?;
        Ok(Self { status, body, json })
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the parsed JSON document.
    #[must_use]
    pub fn json(&self) -> &Value {
        &self.json
    }

    /// Returns the raw `success` field, if present.
    #[must_use]
    pub fn success_field(&self) -> Option<&Value> {
        self.json.get("success")
    }

    /// Returns `true` only if the `success` field is the string `"1"`.
    #[must_use]
    pub fn success(&self) -> bool {
        self.success_field().and_then(Value::as_str) == Some("1")
    }

    /// Returns the `value` payload field, if present.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.json.get("value")
    }

    /// Deserializes the JSON document into a caller-supplied type.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnexpectedFormat` if the document does not match `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> std::result::Result<T, ParseError> {
        T::deserialize(&self.json).map_err(Into::into)
    }
}

/// Result of one command against one registered device.
#[derive(Debug)]
pub struct DeviceOutcome {
    /// The device the command was sent to.
    pub device: String,
    /// The parsed response, or why none could be obtained.
    pub result: Result<RemoteResponse>,
}

impl DeviceOutcome {
    /// Returns `true` if a response arrived and it reports success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.as_ref().is_ok_and(RemoteResponse::success)
    }

    /// Returns the response if one was obtained.
    #[must_use]
    pub fn response(&self) -> Option<&RemoteResponse> {
        self.result.as_ref().ok()
    }
}
