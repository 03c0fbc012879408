//! Command sinks: where the per-tick frames end up.

use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use serial::prelude::*;
use switch_pad_common::WireCommand;
use tracing::info;

/// The serial port the controller board is attached to.
pub const SERIAL_PORT: &str = "COM9";

/// Line rate the controller board listens at.
pub const BAUD_RATE: serial::BaudRate = serial::Baud38400;

/// A command sink stands in for the serial-attached controller board.
///
/// The transmitter only ever sees this trait, so tests can capture frames in
/// memory instead of needing hardware.
pub trait CommandSink: Send {
    fn write_command(&mut self, command: &WireCommand) -> anyhow::Result<()>;
}

/// Serial link to the controller board.
pub struct SerialSink {
    port: serial::SystemPort,
}

impl SerialSink {
    /// Open and configure the serial link: 8N1, no flow control.
    pub fn open() -> anyhow::Result<Self> {
        let mut port = serial::open(SERIAL_PORT)
            .with_context(|| format!("Failed to open serial port {SERIAL_PORT}"))?;
        port.reconfigure(&|settings| {
            settings.set_baud_rate(BAUD_RATE)?;
            settings.set_char_size(serial::Bits8);
            settings.set_parity(serial::ParityNone);
            settings.set_stop_bits(serial::Stop1);
            settings.set_flow_control(serial::FlowNone);
            Ok(())
        })
        .context("Failed to configure serial port")?;
        port.set_timeout(Duration::from_secs(1))
            .context("Failed to set serial timeout")?;

        info!("Opened serial port {SERIAL_PORT} at {BAUD_RATE:?}");
        Ok(Self { port })
    }
}

impl CommandSink for SerialSink {
    fn write_command(&mut self, command: &WireCommand) -> anyhow::Result<()> {
        self.port
            .write_all(command.encode_line().as_bytes())
            .context("Serial write failed")
    }
}
