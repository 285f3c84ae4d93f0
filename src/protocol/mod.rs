// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP protocol layer for the Bolt cloud API.
//!
//! Every command is a single `GET` of the form
//!
//! ```text
//! <base_url><key>/<command>?deviceName=<device>[&<name>=<value>]*
//! ```
//!
//! and the answer is a JSON document. [`ClientConfig`] controls where
//! requests go and how they are built.

mod http;

pub use http::{ClientConfig, FanOut, QueryEncoding};

pub(crate) use http::HttpTransport;
