// SPDX-FileCopyrightText: Copyright (c) 2017-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::borrow::Cow;

use bytes::Bytes;

use crate::{crc, Error};

/// Length of the acknowledge a device sends after a write request:
/// slave, function code, start address, register count and checksum.
pub(crate) const WRITE_RESPONSE_LEN: usize = 1 + 1 + 2 + 2 + 2;

/// The function codes this protocol layer speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionCode {
    /// 03 (0x03) Read Holding Registers
    ReadHoldingRegisters,

    /// 16 (0x10) Write Multiple Registers
    WriteMultipleRegisters,
}

impl FunctionCode {
    /// Gets the [`u8`] value of the current [`FunctionCode`].
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::ReadHoldingRegisters => 0x03,
            Self::WriteMultipleRegisters => 0x10,
        }
    }
}

/// A register address, transmitted big-endian.
pub type Address = u16;

/// A 16 bit register value, transmitted big-endian.
pub type Word = u16;

/// A command sent from the client to the gripper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request<'a> {
    /// Read holding registers.
    /// The first parameter is the address of the first register to read.
    /// The second parameter is the number of registers, sent as a single byte.
    ReadHoldingRegisters(Address, u8),

    /// Write multiple registers.
    /// The first parameter is the address of the first register to write.
    /// The second parameter holds the values in register order.
    WriteMultipleRegisters(Address, Cow<'a, [Word]>),
}

impl Request<'_> {
    /// Number of bytes a well-behaved device answers with.
    ///
    /// Reads are answered with slave, function code, byte count, the
    /// register values and the checksum. Writes are acknowledged with
    /// 8 bytes echoing the start address and register count.
    #[must_use]
    pub fn expected_response_len(&self) -> usize {
        match self {
            Self::ReadHoldingRegisters(_, cnt) => 1 + 1 + 1 + 2 * usize::from(*cnt) + 2,
            Self::WriteMultipleRegisters(_, _) => WRITE_RESPONSE_LEN,
        }
    }
}

/// Outcome of a single write-then-read transaction.
///
/// A transaction that wrote or read fewer bytes than expected still
/// completes. The shortfall is kept here and can be turned into an
/// [`Error`] with [`Exchange::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub(crate) request: Bytes,
    pub(crate) written: usize,
    pub(crate) expected_response_len: usize,
    pub(crate) response: Bytes,
}

impl Exchange {
    /// The frame that was handed to the channel.
    #[must_use]
    pub fn request(&self) -> &Bytes {
        &self.request
    }

    /// Number of bytes the channel accepted.
    #[must_use]
    pub const fn written(&self) -> usize {
        self.written
    }

    #[must_use]
    pub const fn expected_response_len(&self) -> usize {
        self.expected_response_len
    }

    /// The bytes received, possibly fewer than expected.
    #[must_use]
    pub fn response(&self) -> &Bytes {
        &self.response
    }

    #[must_use]
    pub fn into_response(self) -> Bytes {
        self.response
    }

    /// Both the request and the response were transferred in full.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.written == self.request.len() && self.response.len() >= self.expected_response_len
    }

    /// Reports a short write before a short read.
    pub fn check(&self) -> Result<(), Error> {
        if self.written < self.request.len() {
            return Err(Error::ShortWrite {
                expected: self.request.len(),
                written: self.written,
            });
        }
        if self.response.len() < self.expected_response_len {
            return Err(Error::ShortRead {
                expected: self.expected_response_len,
                response: self.response.clone(),
            });
        }
        Ok(())
    }

    /// The response ends with the checksum of its preceding bytes.
    #[must_use]
    pub fn has_valid_response_crc(&self) -> bool {
        crc::verify_crc(&self.response)
    }
}
