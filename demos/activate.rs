// SPDX-FileCopyrightText: Copyright (c) 2017-2024 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Asynchronous activation example

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use gripper_rtu::prelude::*;

    env_logger::init();

    let tty_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/dev/ttyUSB0".to_owned());
    let config = SerialConfig::new(tty_path, Slave(0x09));

    let ctx = rtu::connect_slave(&config)?;
    println!("Activating gripper {}", ctx.slave());
    let exchange = ctx.activate().await?;
    if let Err(err) = exchange.check() {
        println!("Activation incomplete: {err}");
    }

    println!("Reading the status block");
    let status = ctx.read_status().await?;
    println!("Status response: {:02X?}", &status.response()[..]);

    ctx.disconnect().await?;

    Ok(())
}
