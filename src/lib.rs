// SPDX-FileCopyrightText: Copyright (c) 2017-2024 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command/response protocol layer for adaptive grippers that speak a
//! [Modbus](https://en.wikipedia.org/wiki/Modbus) RTU style dialect over a
//! serial line.
//!
//! The crate builds checksummed *read holding registers* (`0x03`) and
//! *write multiple registers* (`0x10`) frames, sends them over a byte
//! channel and collects the fixed-length replies of the device.
//!
//! ## Installation
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! gripper-rtu = "*"
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "serial", feature = "sync"))]
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     use gripper_rtu::prelude::*;
//!
//!     let config = SerialConfig::new("/dev/ttyUSB0", Slave(0x09));
//!     let ctx = sync::rtu::connect_slave(&config)?;
//!
//!     let exchange = ctx.activate()?;
//!     exchange.check()?;
//!
//!     Ok(())
//! }
//! # #[cfg(not(all(feature = "serial", feature = "sync")))]
//! # fn main() {}
//! ```

#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
// Additional restrictions
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::self_named_module_files)]
// Exceptions
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod prelude;

pub mod client;
pub mod codec;
pub mod crc;

mod config;
pub use self::config::{SerialConfig, DEFAULT_BAUD_RATE, DEFAULT_TIMEOUT};

mod error;
pub use self::error::Error;

mod frame;
pub use self::frame::{Address, Exchange, FunctionCode, Request, Word};

mod slave;
pub use self::slave::{Slave, SlaveId};

/// Specialized [`std::result::Result`] type for gripper transactions.
pub type Result<T> = std::result::Result<T, Error>;
