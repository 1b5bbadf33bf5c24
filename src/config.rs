// SPDX-FileCopyrightText: Copyright (c) 2017-2024 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::time::Duration;

use crate::Slave;

/// Baud rate of the gripper's serial interface.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Time to wait for a complete response before giving up.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Settings for opening the serial connection to a gripper.
///
/// The timeout is applied once when the connection is established and
/// bounds every write and every response read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    pub path: String,
    pub slave: Slave,
    pub baud_rate: u32,
    pub timeout: Duration,
}

impl SerialConfig {
    pub fn new(path: impl Into<String>, slave: Slave) -> Self {
        Self {
            path: path.into(),
            slave,
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[cfg(feature = "serial")]
    #[must_use]
    pub fn builder(&self) -> tokio_serial::SerialPortBuilder {
        tokio_serial::new(&self.path, self.baud_rate).timeout(self.timeout)
    }
}
