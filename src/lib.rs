// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `bolt_remote` - A Rust client for the Bolt IoT cloud API.
//!
//! The client keeps a list of verified device names and sends each
//! capability command to all of them over the cloud's HTTP API.
//!
//! # Supported Commands
//!
//! - **Status**: firmware version, online check
//! - **Control**: restart
//! - **GPIO**: analog read (`A0`), analog write, digital read, digital write
//!
//! # Quick Start
//!
//! ```no_run
//! use bolt_remote::RemoteDeviceClient;
//!
//! #[tokio::main]
//! async fn main() -> bolt_remote::Result<()> {
//!     let mut client = RemoteDeviceClient::new("123e4567-e89b-12d3-a456-426614174000")?;
//!
//!     // Devices are checked with a `version` call before being added
//!     if !client.add_device("BOLT1234567").await {
//!         eprintln!("device rejected");
//!         return Ok(());
//!     }
//!
//!     // Each capability returns one outcome per registered device
//!     for outcome in client.analog_write(2, 100).await {
//!         match outcome.result {
//!             Ok(response) if response.success() => println!("{}: ok", outcome.device),
//!             Ok(response) => println!("{}: refused {}", outcome.device, response.body()),
//!             Err(e) => println!("{}: {e}", outcome.device),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Custom Configuration
//!
//! ```no_run
//! use bolt_remote::protocol::{ClientConfig, FanOut, QueryEncoding};
//!
//! # fn example() -> bolt_remote::Result<()> {
//! let client = ClientConfig::new("123e4567-e89b-12d3-a456-426614174000")
//!     .with_query_encoding(QueryEncoding::Encoded)
//!     .with_fan_out(FanOut::Concurrent)
//!     .with_debug(false)
//!     .into_client()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Diagnostics
//!
//! With debug enabled (the default), key changes, request URLs, status
//! codes and raw bodies are emitted as `tracing` events at `DEBUG` level.
//! Install a subscriber to see them.

mod client;
pub mod command;
pub mod error;
pub mod protocol;
mod registry;
pub mod response;
pub mod types;

pub use client::RemoteDeviceClient;
pub use command::Command;
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use protocol::{ClientConfig, FanOut, QueryEncoding};
pub use response::{DeviceOutcome, RemoteResponse};
pub use types::{AccessKey, AnalogValue, DigitalLevel, PinIndex};

/// Version of the remote API this client speaks.
pub const API_VERSION: &str = "1.0.0";
