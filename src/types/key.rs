// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Access key for the Bolt cloud API.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::error::ValueError;

/// A UUID-formatted credential authorizing calls to the remote service.
///
/// Only the UUID syntax is checked locally; whether the key is actually
/// authorized is decided by the service.
///
/// # Examples
///
/// ```
/// use bolt_remote::types::AccessKey;
///
/// let key: AccessKey = "123e4567-e89b-12d3-a456-426614174000".parse().unwrap();
/// assert_eq!(key.to_string(), "123e4567-e89b-12d3-a456-426614174000");
///
/// assert!("not-a-key".parse::<AccessKey>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessKey(Uuid);

impl AccessKey {
    /// Parses a key from any textual UUID representation.
    ///
    /// Braced, simple and URN forms are accepted and normalized to the
    /// hyphenated lowercase form.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidKey` if `key` is not a UUID.
    pub fn parse(key: &str) -> Result<Self, ValueError> {
        Uuid::parse_str(key)
            .map(Self)
            .map_err(|_| ValueError::InvalidKey(key.to_string()))
    }

    /// Returns the first eight hex digits followed by `...`.
    ///
    /// This is the only form of the key that appears in diagnostics.
    #[must_use]
    pub fn redacted(&self) -> String {
        let full = self.0.hyphenated().to_string();
        format!("{}...", &full[..8])
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessKey({})", self.redacted())
    }
}

impl fmt::Display for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for AccessKey {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Uuid> for AccessKey {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
