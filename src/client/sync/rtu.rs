// SPDX-FileCopyrightText: Copyright (c) 2017-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::{fmt, io, time::Duration};

use tokio::io::{AsyncRead, AsyncWrite};

use super::Context;

use crate::{client::rtu::attach_slave as async_attach_slave, Slave};

#[cfg(feature = "serial")]
use crate::{client::rtu::connect_slave as async_connect_slave, Result, SerialConfig};

fn new_runtime() -> io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .enable_time()
        .build()
}

/// Opens the serial port described by `config` and connects to the
/// configured slave.
///
/// Fails with [`Error::Connection`](crate::Error::Connection) if the port
/// cannot be opened.
#[cfg(feature = "serial")]
pub fn connect_slave(config: &SerialConfig) -> Result<Context> {
    let runtime = new_runtime()?;
    // The serial stream registers with the reactor of the runtime.
    let async_ctx = runtime.block_on(async { async_connect_slave(config) })?;
    Ok(Context { runtime, async_ctx })
}

/// Attaches a blocking context to an already connected transport.
pub fn attach_slave<T>(transport: T, slave: Slave, timeout: Duration) -> io::Result<Context>
where
    T: AsyncRead + AsyncWrite + Unpin + fmt::Debug + Send + 'static,
{
    let runtime = new_runtime()?;
    let async_ctx = async_attach_slave(transport, slave, timeout);
    Ok(Context { runtime, async_ctx })
}
