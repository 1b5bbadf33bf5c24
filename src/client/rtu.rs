// SPDX-FileCopyrightText: Copyright (c) 2017-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connecting a gripper over a serial line

use std::{fmt, io, time::Duration};

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use tokio::{
    io::{AsyncRead, AsyncReadExt as _, AsyncWrite, AsyncWriteExt as _},
    sync::Mutex,
    time::{timeout_at, Instant},
};

use super::Context;
use crate::{frame::Exchange, Result, Slave};

#[cfg(feature = "serial")]
use crate::{Error, SerialConfig};

/// Opens the serial port described by `config` and attaches a client
/// for the configured slave.
///
/// Must be called from within a _Tokio_ runtime.
#[cfg(feature = "serial")]
pub fn connect_slave(config: &SerialConfig) -> Result<Context> {
    let port = tokio_serial::SerialStream::open(&config.builder()).map_err(|err| {
        log::error!("Failed to open gripper port {}: {}", config.path, err);
        Error::Connection(err.into())
    })?;
    Ok(attach_slave(port, config.slave, config.timeout))
}

/// Attaches a new client context to an already connected transport.
///
/// `timeout` bounds every write and every response read of this
/// connection.
pub fn attach_slave<T>(transport: T, slave: Slave, timeout: Duration) -> Context
where
    T: AsyncRead + AsyncWrite + Unpin + fmt::Debug + Send + 'static,
{
    let client = Client::new(transport, slave, timeout);
    Context::from(Box::new(client) as Box<dyn super::Client>)
}

/// Gripper RTU client
///
/// Owns the transport. Transactions are serialized by an internal lock,
/// so a second caller blocks until the first write-then-read pair is done.
#[derive(Debug)]
pub(crate) struct Client<T> {
    transport: Mutex<Option<T>>,
    slave: Slave,
    timeout: Duration,
}

impl<T> Client<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    pub(crate) fn new(transport: T, slave: Slave, timeout: Duration) -> Self {
        Self {
            transport: Mutex::new(Some(transport)),
            slave,
            timeout,
        }
    }

    async fn send(&self, frame: Bytes, response_len: usize) -> Result<Exchange> {
        let mut guard = self.transport.lock().await;
        let transport = connected(&mut guard)?;

        log::debug!("Send {} bytes to {}: {:02X?}", frame.len(), self.slave, &frame[..]);
        let deadline = Instant::now() + self.timeout;
        let written = write_frame(transport, &frame, deadline).await?;
        if written < frame.len() {
            log::warn!(
                "Attempted to write {} bytes, but only wrote {}",
                frame.len(),
                written
            );
        }

        let response = read_response(transport, response_len, self.timeout).await?;
        log::debug!(
            "Received {} bytes from {}: {:02X?}",
            response.len(),
            self.slave,
            &response[..]
        );

        Ok(Exchange {
            request: frame,
            written,
            expected_response_len: response_len,
            response,
        })
    }

    async fn read_response(&self, response_len: usize) -> Result<Bytes> {
        let mut guard = self.transport.lock().await;
        let transport = connected(&mut guard)?;
        Ok(read_response(transport, response_len, self.timeout).await?)
    }

    async fn is_connected(&self) -> bool {
        self.transport.lock().await.is_some()
    }

    async fn disconnect(&self) -> io::Result<()> {
        let Some(mut transport) = self.transport.lock().await.take() else {
            // Already disconnected.
            return Ok(());
        };
        transport.shutdown().await
    }
}

fn connected<T>(transport: &mut Option<T>) -> io::Result<&mut T> {
    transport
        .as_mut()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "disconnected"))
}

/// Hands the whole frame to a single write call.
///
/// Returns the number of bytes accepted, `0` if the deadline elapsed first.
async fn write_frame<T>(transport: &mut T, frame: &[u8], deadline: Instant) -> io::Result<usize>
where
    T: AsyncWrite + Unpin,
{
    let write = async {
        let written = transport.write(frame).await?;
        transport.flush().await?;
        Ok::<_, io::Error>(written)
    };
    match timeout_at(deadline, write).await {
        Ok(Ok(written)) => Ok(written),
        Ok(Err(err)) if err.kind() == io::ErrorKind::TimedOut => Ok(0),
        Ok(Err(err)) => Err(err),
        Err(_) => Ok(0),
    }
}

/// Reads until `response_len` bytes arrived, the transport reached its end
/// or `timeout` elapsed.
///
/// Returns whatever was received, which may be fewer bytes than requested.
async fn read_response<T>(
    transport: &mut T,
    response_len: usize,
    timeout: Duration,
) -> io::Result<Bytes>
where
    T: AsyncRead + Unpin,
{
    let mut buf = BytesMut::zeroed(response_len);
    let mut filled = 0;
    let deadline = Instant::now() + timeout;
    while filled < response_len {
        match timeout_at(deadline, transport.read(&mut buf[filled..])).await {
            Ok(Ok(0)) => break,
            Ok(Ok(n)) => filled += n,
            Ok(Err(err)) if err.kind() == io::ErrorKind::TimedOut => break,
            Ok(Err(err)) => return Err(err),
            Err(_) => break,
        }
    }
    if filled < response_len {
        log::warn!("Requested {} bytes, but only got {}", response_len, filled);
    }
    buf.truncate(filled);
    Ok(buf.freeze())
}

#[async_trait]
impl<T> super::Client for Client<T>
where
    T: fmt::Debug + AsyncRead + AsyncWrite + Send + Unpin,
{
    fn slave(&self) -> Slave {
        self.slave
    }

    async fn send(&self, frame: Bytes, response_len: usize) -> Result<Exchange> {
        self.send(frame, response_len).await
    }

    async fn read_response(&self, response_len: usize) -> Result<Bytes> {
        self.read_response(response_len).await
    }

    async fn is_connected(&self) -> bool {
        self.is_connected().await
    }

    async fn disconnect(&self) -> io::Result<()> {
        self.disconnect().await
    }
}
