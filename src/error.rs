// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Bolt remote client.
//!
//! Failures fall into four groups: invalid values rejected before any
//! request is made, transport failures, malformed response bodies, and
//! client-level conditions such as a missing access key.

use thiserror::Error;

use crate::response::RemoteResponse;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A value failed validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The HTTP exchange could not be completed.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The response body could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A remote call was attempted while no access key is set.
    #[error("access key is not set")]
    KeyNotSet,

    /// The validation round-trip for a device did not report success.
    #[error("device {device} was rejected by the remote service")]
    DeviceRejected {
        /// The identifier that failed validation.
        device: String,
        /// The response returned by the `version` call.
        response: Box<RemoteResponse>,
    },

    /// A concurrent per-device call panicked or was cancelled.
    #[error("call task for device {0} failed")]
    TaskFailed(String),
}

/// Errors raised when constructing validated values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed half-open range.
    #[error("value {actual} is out of range [{min}, {max})")]
    OutOfRange {
        /// Inclusive lower bound.
        min: u16,
        /// Exclusive upper bound.
        max: u16,
        /// The value that was provided.
        actual: u16,
    },

    /// The access key is not a UUID.
    #[error("invalid access key: {0}")]
    InvalidKey(String),

    /// A digital level other than `HIGH` or `LOW` was provided.
    #[error("invalid digital level: {0}")]
    InvalidLevel(String),
}

/// Errors related to the HTTP transport.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The HTTP request failed (DNS, connection, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL cannot be used.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing response bodies.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body returned with `status` is not valid JSON.
    #[error("malformed JSON body (HTTP {status}): {source}")]
    Json {
        /// HTTP status code of the response.
        status: u16,
        /// Underlying parser error.
        source: serde_json::Error,
    },

    /// The payload could not be converted into the requested type.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(#[from] serde_json::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
