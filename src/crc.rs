// SPDX-FileCopyrightText: Copyright (c) 2017-2024 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Modbus CRC-16 (reflected polynomial `0xA001`, initial value `0xFFFF`).

const INITIAL_VALUE: u16 = 0xFFFF;
const POLYNOMIAL: u16 = 0xA001;

/// Computes the checksum over `buf`.
///
/// The result is the plain register value. On the wire it is transmitted
/// low byte first, see [`append_crc`](crate::codec::append_crc).
#[must_use]
pub fn compute_crc(buf: &[u8]) -> u16 {
    let mut crc = INITIAL_VALUE;
    for x in buf {
        crc ^= u16::from(*x);
        for _ in 0..8 {
            if (crc & 0x0001) != 0 {
                crc >>= 1;
                crc ^= POLYNOMIAL;
            } else {
                crc >>= 1;
            }
        }
    }
    crc
}

/// Checks that the trailing two bytes of `frame` hold the checksum of
/// everything before them.
#[must_use]
pub fn verify_crc(frame: &[u8]) -> bool {
    let Some(split) = frame.len().checked_sub(2) else {
        return false;
    };
    let (payload, crc) = frame.split_at(split);
    compute_crc(payload) == u16::from_le_bytes([crc[0], crc[1]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_crc_golden_vectors() {
        let msg = [0x09, 0x03, 0x07, 0xD0, 0x06];
        assert_eq!(compute_crc(&msg), 0x4694);

        let msg = [0x01, 0x03, 0x08, 0x2B, 0x00, 0x02];
        assert_eq!(compute_crc(&msg), 0x63B6);
    }

    #[test]
    fn compute_crc_of_nothing_is_initial_value() {
        assert_eq!(compute_crc(&[]), 0xFFFF);
    }

    #[test]
    fn compute_crc_is_deterministic() {
        let msg = [0x09, 0x10, 0x03, 0xE8, 0x00, 0x03];
        assert_eq!(compute_crc(&msg), compute_crc(&msg));
        assert_eq!(compute_crc(&msg), 0x3001);
    }

    #[test]
    fn verify_crc_accepts_valid_frame() {
        // Write multiple registers acknowledge from slave 0x09
        let rsp = [0x09, 0x10, 0x03, 0xE8, 0x00, 0x03, 0x01, 0x30];
        assert!(verify_crc(&rsp));
    }

    #[test]
    fn verify_crc_rejects_corrupted_frame() {
        let rsp = [0x09, 0x10, 0x03, 0xE8, 0x00, 0x04, 0x01, 0x30];
        assert!(!verify_crc(&rsp));

        // Byte order of the checksum swapped
        let rsp = [0x09, 0x10, 0x03, 0xE8, 0x00, 0x03, 0x30, 0x01];
        assert!(!verify_crc(&rsp));
    }

    #[test]
    fn verify_crc_rejects_truncated_frame() {
        assert!(!verify_crc(&[]));
        assert!(!verify_crc(&[0x09]));
        // Two bytes are the checksum of an empty payload only if they
        // are `0xFF 0xFF`.
        assert!(verify_crc(&[0xFF, 0xFF]));
    }
}
