// SPDX-FileCopyrightText: Copyright (c) 2017-2024 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assembly of checksummed command frames.
//!
//! Register addresses, counts and values are big-endian. The trailing
//! checksum is the only field sent low byte first.

use bytes::{BufMut as _, Bytes, BytesMut};

use crate::{crc::compute_crc, Address, FunctionCode, Request, Slave, Word};

/// Slave, function code, start address, register count.
const READ_FRAME_LEN: usize = 1 + 1 + 2 + 1 + 2;

/// Slave, function code, start address, register count and byte count.
const WRITE_HEADER_LEN: usize = 1 + 1 + 2 + 2 + 1;

#[allow(clippy::cast_possible_truncation)]
fn u16_len(len: usize) -> u16 {
    // This type conversion should always be safe, because either
    // the caller is responsible to pass a valid usize or the
    // possible values are limited by the protocol.
    debug_assert!(len <= u16::MAX.into());
    len as u16
}

#[allow(clippy::cast_possible_truncation)]
fn u8_len(len: usize) -> u8 {
    // This type conversion should always be safe, because either
    // the caller is responsible to pass a valid usize or the
    // possible values are limited by the protocol.
    debug_assert!(len <= u8::MAX.into());
    len as u8
}

/// Appends the checksum of everything in `buf`, low byte first.
pub fn append_crc(buf: &mut BytesMut) {
    let crc = compute_crc(buf);
    buf.put_u16_le(crc);
}

/// Builds a *read holding registers* frame.
///
/// The register count is a single byte, which makes the frame 7 bytes long.
#[must_use]
pub fn build_read_frame(slave: Slave, start: Address, count: u8) -> Bytes {
    let mut buf = BytesMut::with_capacity(READ_FRAME_LEN);
    buf.put_u8(slave.into());
    buf.put_u8(FunctionCode::ReadHoldingRegisters.value());
    buf.put_u16(start);
    buf.put_u8(count);
    append_crc(&mut buf);
    buf.freeze()
}

/// Builds a *write multiple registers* frame.
///
/// `values` must not be empty and must fit into a single byte count, i.e.
/// hold at most 127 registers. Neither is checked at runtime.
#[must_use]
pub fn build_write_frame(slave: Slave, start: Address, values: &[Word]) -> Bytes {
    debug_assert!(!values.is_empty());
    let len = values.len();
    let mut buf = BytesMut::with_capacity(WRITE_HEADER_LEN + 2 * len + 2);
    buf.put_u8(slave.into());
    buf.put_u8(FunctionCode::WriteMultipleRegisters.value());
    buf.put_u16(start);
    buf.put_u16(u16_len(len));
    buf.put_u8(u8_len(len * 2));
    for w in values {
        buf.put_u16(*w);
    }
    append_crc(&mut buf);
    buf.freeze()
}

/// Builds the frame for an arbitrary [`Request`].
#[must_use]
pub fn encode_request(slave: Slave, request: &Request<'_>) -> Bytes {
    match request {
        Request::ReadHoldingRegisters(start, count) => build_read_frame(slave, *start, *count),
        Request::WriteMultipleRegisters(start, values) => build_write_frame(slave, *start, values),
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use crate::crc::verify_crc;

    use super::*;

    fn assert_crc_placement(frame: &[u8]) {
        let (payload, crc) = frame.split_at(frame.len() - 2);
        let expected = compute_crc(payload);
        assert_eq!(crc[0], (expected & 0xFF) as u8);
        assert_eq!(crc[1], (expected >> 8) as u8);
        assert!(verify_crc(frame));
    }

    #[test]
    fn read_frame() {
        let frame = build_read_frame(Slave(0x09), 0x07D0, 0x06);
        assert_eq!(frame.len(), 7);
        assert_eq!(
            frame,
            Bytes::from_static(&[0x09, 0x03, 0x07, 0xD0, 0x06, 0x94, 0x46])
        );
        assert_crc_placement(&frame);
    }

    #[test]
    fn write_frame() {
        let frame = build_write_frame(Slave(0x09), 0x03E8, &[0x0100, 0x0000, 0x0000]);
        assert_eq!(frame.len(), 7 + 2 * 3 + 2);
        assert_eq!(
            frame,
            Bytes::from_static(&[
                0x09, // slave
                0x10, // function code
                0x03, 0xE8, // start address
                0x00, 0x03, // register count
                0x06, // byte count
                0x01, 0x00, // values
                0x00, 0x00, //
                0x00, 0x00, //
                0x72, 0xE1, // crc
            ])
        );
        assert_crc_placement(&frame);
    }

    #[test]
    fn write_frame_length_grows_with_values() {
        for n in 1..=10 {
            let values = vec![0xABCD; n];
            let frame = build_write_frame(Slave(0x01), 0x0000, &values);
            assert_eq!(frame.len(), 7 + 2 * n + 2);
            assert_eq!(usize::from(frame[6]), 2 * n);
            assert_crc_placement(&frame);
        }
    }

    #[test]
    fn values_are_big_endian_in_order() {
        let frame = build_write_frame(Slave(0x01), 0x0000, &[0x1234, 0xABCD]);
        assert_eq!(&frame[7..11], &[0x12, 0x34, 0xAB, 0xCD]);
    }

    #[test]
    fn start_address_round_trip() {
        for start in 0..=u16::MAX {
            let read = build_read_frame(Slave(0x09), start, 1);
            let write = build_write_frame(Slave(0x09), start, &[0]);
            for frame in [read, write] {
                assert_eq!(frame[2], (start >> 8) as u8);
                assert_eq!(frame[3], (start & 0xFF) as u8);
                assert_eq!((u16::from(frame[2]) << 8) | u16::from(frame[3]), start);
            }
        }
    }

    #[test]
    fn encode_request_dispatches_on_function() {
        let slave = Slave(0x09);
        assert_eq!(
            encode_request(slave, &Request::ReadHoldingRegisters(0x07D0, 6)),
            build_read_frame(slave, 0x07D0, 6)
        );
        assert_eq!(
            encode_request(
                slave,
                &Request::WriteMultipleRegisters(0x03E8, Cow::Borrowed(&[0, 0, 0]))
            ),
            build_write_frame(slave, 0x03E8, &[0, 0, 0])
        );
    }

    #[test]
    fn frames_carry_no_hidden_state() {
        let first = build_write_frame(Slave(0x09), 0x03E8, &[0, 0, 0]);
        let second = build_write_frame(Slave(0x09), 0x03E8, &[0, 0, 0]);
        assert_eq!(first, second);
        assert_eq!(&first[13..], &[0x73, 0x30]);
    }
}
