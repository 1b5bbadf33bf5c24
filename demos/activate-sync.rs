// SPDX-FileCopyrightText: Copyright (c) 2017-2023 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synchronous activation example

fn main() -> Result<(), Box<dyn std::error::Error>> {
    use gripper_rtu::prelude::*;

    env_logger::init();

    let tty_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/dev/ttyUSB0".to_owned());
    let config = SerialConfig::new(tty_path, Slave(0x09));

    let ctx = sync::rtu::connect_slave(&config)?;
    println!("Activating gripper {}", ctx.slave());
    ctx.activate()?.check()?;

    println!("Deactivating gripper {}", ctx.slave());
    ctx.deactivate()?.check()?;

    Ok(())
}
