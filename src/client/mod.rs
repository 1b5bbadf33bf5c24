// SPDX-FileCopyrightText: Copyright (c) 2017-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gripper clients

use std::{borrow::Cow, fmt::Debug, io};

use async_trait::async_trait;
use bytes::Bytes;

use crate::{
    codec::{build_read_frame, encode_request},
    frame::{Exchange, WRITE_RESPONSE_LEN},
    Address, Request, Result, Slave, Word,
};

pub mod rtu;

#[cfg(feature = "sync")]
pub mod sync;

/// Register that receives action requests (activation bit, go-to, ...).
pub const ACTION_REQUEST_REGISTER: Address = 0x03E8;

/// First register of the gripper status block.
pub const FIRST_OUTPUT_REGISTER: Address = 0x07D0;

/// Number of registers in the gripper status block.
pub const NUM_OUTPUT_REGISTERS: u8 = 0x06;

/// Sets the activation bit and clears the remaining action registers.
const ACTIVATE: [Word; 3] = [0x0100, 0x0000, 0x0000];

/// Clears the activation bit.
const DEACTIVATE: [Word; 3] = [0x0000, 0x0000, 0x0000];

/// Transport independent asynchronous client trait.
///
/// Implementations serialize transactions: a call waits until the
/// write-then-read exchange of any other caller has finished.
#[async_trait]
pub trait Client: Send + Sync + Debug {
    /// The address of the device this client talks to.
    fn slave(&self) -> Slave;

    /// Writes `frame` with a single write call and then reads up to
    /// `response_len` bytes.
    ///
    /// Short writes and short reads are logged and recorded in the
    /// returned [`Exchange`] without retrying.
    async fn send(&self, frame: Bytes, response_len: usize) -> Result<Exchange>;

    /// Reads up to `response_len` bytes without sending anything.
    async fn read_response(&self, response_len: usize) -> Result<Bytes>;

    /// Whether the underlying transport is still available.
    async fn is_connected(&self) -> bool;

    /// Disconnects the client.
    ///
    /// Shuts down the underlying transport. All subsequent transactions
    /// fail with [`io::ErrorKind::NotConnected`].
    async fn disconnect(&self) -> io::Result<()>;
}

/// Asynchronous gripper context
///
/// Owns the client and the status request template that is built once
/// per connection.
#[derive(Debug)]
pub struct Context {
    client: Box<dyn Client>,
    status_request: Bytes,
}

impl From<Box<dyn Client>> for Context {
    fn from(client: Box<dyn Client>) -> Self {
        let status_request =
            build_read_frame(client.slave(), FIRST_OUTPUT_REGISTER, NUM_OUTPUT_REGISTERS);
        Self {
            client,
            status_request,
        }
    }
}

impl From<Context> for Box<dyn Client> {
    fn from(val: Context) -> Self {
        val.client
    }
}

impl Context {
    #[must_use]
    pub fn slave(&self) -> Slave {
        self.client.slave()
    }

    /// The frame sent by [`Context::read_status`].
    #[must_use]
    pub fn status_request(&self) -> &Bytes {
        &self.status_request
    }

    pub async fn is_connected(&self) -> bool {
        self.client.is_connected().await
    }

    pub async fn disconnect(&self) -> io::Result<()> {
        self.client.disconnect().await
    }

    /// Sends a raw frame and reads `response_len` bytes.
    pub async fn send(&self, frame: Bytes, response_len: usize) -> Result<Exchange> {
        self.client.send(frame, response_len).await
    }

    /// Sends `request` and reads `response_len` bytes.
    pub async fn transact(&self, request: &Request<'_>, response_len: usize) -> Result<Exchange> {
        log::debug!("Call {:?}", request);
        let frame = encode_request(self.slave(), request);
        self.client.send(frame, response_len).await
    }

    /// Sends `request` and reads as many bytes as the device is expected
    /// to answer with.
    pub async fn call(&self, request: &Request<'_>) -> Result<Exchange> {
        self.transact(request, request.expected_response_len()).await
    }

    pub async fn read_response(&self, response_len: usize) -> Result<Bytes> {
        self.client.read_response(response_len).await
    }

    /// Read holding registers (0x03)
    pub async fn read_registers(&self, addr: Address, cnt: u8) -> Result<Exchange> {
        self.call(&Request::ReadHoldingRegisters(addr, cnt)).await
    }

    /// Write multiple registers (0x10)
    pub async fn write_registers(&self, addr: Address, words: &[Word]) -> Result<Exchange> {
        self.call(&Request::WriteMultipleRegisters(addr, Cow::Borrowed(words)))
            .await
    }

    /// Activates the gripper.
    pub async fn activate(&self) -> Result<Exchange> {
        self.transact(
            &Request::WriteMultipleRegisters(ACTION_REQUEST_REGISTER, Cow::Borrowed(&ACTIVATE)),
            WRITE_RESPONSE_LEN,
        )
        .await
    }

    /// Deactivates the gripper.
    pub async fn deactivate(&self) -> Result<Exchange> {
        self.transact(
            &Request::WriteMultipleRegisters(ACTION_REQUEST_REGISTER, Cow::Borrowed(&DEACTIVATE)),
            WRITE_RESPONSE_LEN,
        )
        .await
    }

    /// Reads the raw status block.
    ///
    /// Decoding the register values is left to the caller.
    pub async fn read_status(&self) -> Result<Exchange> {
        let frame = self.status_request.clone();
        let response_len =
            Request::ReadHoldingRegisters(FIRST_OUTPUT_REGISTER, NUM_OUTPUT_REGISTERS)
                .expected_response_len();
        self.client.send(frame, response_len).await
    }
}
