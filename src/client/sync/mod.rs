// SPDX-FileCopyrightText: Copyright (c) 2017-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synchronous gripper context access

pub mod rtu;

use std::{fmt, io};

use bytes::Bytes;

use super::Context as AsyncContext;

use crate::{frame::Exchange, Address, Request, Result, Slave, Word};

/// A blocking gripper context.
///
/// Drives the asynchronous context on a private current-thread runtime.
/// Every method returns only after its write-then-read exchange completed
/// or the connection timeout elapsed.
pub struct Context {
    runtime: tokio::runtime::Runtime,
    async_ctx: AsyncContext,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("async_ctx", &self.async_ctx)
            .finish_non_exhaustive()
    }
}

impl Context {
    #[must_use]
    pub fn slave(&self) -> Slave {
        self.async_ctx.slave()
    }

    #[must_use]
    pub fn status_request(&self) -> &Bytes {
        self.async_ctx.status_request()
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.runtime.block_on(self.async_ctx.is_connected())
    }

    pub fn disconnect(&self) -> io::Result<()> {
        self.runtime.block_on(self.async_ctx.disconnect())
    }

    pub fn send(&self, frame: Bytes, response_len: usize) -> Result<Exchange> {
        self.runtime.block_on(self.async_ctx.send(frame, response_len))
    }

    pub fn transact(&self, request: &Request<'_>, response_len: usize) -> Result<Exchange> {
        self.runtime.block_on(self.async_ctx.transact(request, response_len))
    }

    pub fn call(&self, request: &Request<'_>) -> Result<Exchange> {
        self.runtime.block_on(self.async_ctx.call(request))
    }

    pub fn read_response(&self, response_len: usize) -> Result<Bytes> {
        self.runtime.block_on(self.async_ctx.read_response(response_len))
    }

    /// Read holding registers (0x03)
    pub fn read_registers(&self, addr: Address, cnt: u8) -> Result<Exchange> {
        self.runtime.block_on(self.async_ctx.read_registers(addr, cnt))
    }

    /// Write multiple registers (0x10)
    pub fn write_registers(&self, addr: Address, words: &[Word]) -> Result<Exchange> {
        self.runtime.block_on(self.async_ctx.write_registers(addr, words))
    }

    pub fn activate(&self) -> Result<Exchange> {
        self.runtime.block_on(self.async_ctx.activate())
    }

    pub fn deactivate(&self) -> Result<Exchange> {
        self.runtime.block_on(self.async_ctx.deactivate())
    }

    pub fn read_status(&self) -> Result<Exchange> {
        self.runtime.block_on(self.async_ctx.read_status())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::Cursor,
        pin::Pin,
        task::{self, Poll},
        time::Duration,
    };

    use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

    use super::*;

    /// Accepts every write and replays a canned response.
    #[derive(Debug)]
    struct Loopback {
        response: Cursor<Vec<u8>>,
    }

    impl AsyncRead for Loopback {
        fn poll_read(
            mut self: Pin<&mut Self>,
            cx: &mut task::Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            Pin::new(&mut self.response).poll_read(cx, buf)
        }
    }

    impl AsyncWrite for Loopback {
        fn poll_write(
            self: Pin<&mut Self>,
            _: &mut task::Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _: &mut task::Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _: &mut task::Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[test]
    fn blocking_activate_and_deactivate() {
        let transport = Loopback {
            response: Cursor::new(vec![
                0x09, 0x10, 0x03, 0xE8, 0x00, 0x03, 0x01, 0x30, // activate ack
                0x09, 0x10, 0x03, 0xE8, 0x00, 0x03, 0x01, 0x30, // deactivate ack
            ]),
        };
        let ctx = rtu::attach_slave(transport, Slave(0x09), Duration::from_millis(100)).unwrap();
        assert_eq!(ctx.slave(), Slave(0x09));
        assert!(ctx.is_connected());

        let activated = ctx.activate().unwrap();
        assert!(activated.is_complete());
        assert_eq!(&activated.request()[13..], &[0x72, 0xE1]);

        let deactivated = ctx.deactivate().unwrap();
        assert!(deactivated.check().is_ok());
        assert_eq!(&deactivated.request()[13..], &[0x73, 0x30]);

        // The response is exhausted, the status read comes back empty.
        let status = ctx.read_status().unwrap();
        assert_eq!(status.request(), ctx.status_request());
        assert!(status.response().is_empty());
        assert!(status.check().is_err());

        ctx.disconnect().unwrap();
        assert!(!ctx.is_connected());
        assert!(ctx.activate().is_err());
    }
}
