// SPDX-FileCopyrightText: Copyright (c) 2017-2024 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types.

use std::io;

use bytes::Bytes;
use thiserror::Error;

/// Error type for gripper transactions.
///
/// None of the variants is fatal. Short writes and short reads are only
/// reported, the caller decides whether to repeat the whole transaction.
#[derive(Debug, Error)]
pub enum Error {
    /// The serial port could not be opened.
    #[error("failed to open gripper port: {0}")]
    Connection(#[source] io::Error),

    /// The channel accepted fewer bytes than the frame contains.
    #[error("attempted to write {expected} bytes, but only wrote {written}")]
    ShortWrite { expected: usize, written: usize },

    /// The channel delivered fewer bytes than requested before the timeout
    /// elapsed.
    ///
    /// Contains the partial response.
    #[error("requested {expected} bytes, but only got {}", .response.len())]
    ShortRead { expected: usize, response: Bytes },

    /// Any other I/O failure of the channel.
    #[error(transparent)]
    Transport(#[from] io::Error),
}

impl Error {
    /// The partially received response of a [`Error::ShortRead`].
    #[must_use]
    pub fn partial_response(&self) -> Option<&Bytes> {
        match self {
            Self::ShortRead { response, .. } => Some(response),
            _ => None,
        }
    }
}
