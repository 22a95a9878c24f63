use std::{
    io::{Read, Write},
    time::Duration,
};

use serialport::SerialPort;
use tracing::debug;

use crate::{error::ArmError, transport::ArmTransport};

/// Serial link to the arm, e.g. the RFCOMM port the Bluetooth pairing exposes.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    pub fn open(serial_port: &str, baudrate: u32, timeout: Duration) -> Result<Self, ArmError> {
        let port = serialport::new(serial_port, baudrate)
            .timeout(timeout)
            .open()
            .map_err(|_| ArmError::Communication)?;
        debug!("opened {serial_port} at {baudrate} baud");
        Ok(Self { port })
    }
}

impl ArmTransport for SerialTransport {
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, ArmError> {
        let pending = self.port.bytes_to_read().map_err(|_| ArmError::Communication)? as usize;
        if pending == 0 {
            return Ok(0);
        }
        let len = pending.min(buf.len());
        self.port.read(&mut buf[..len]).map_err(|_| ArmError::Communication)
    }

    fn write_line(&mut self, line: &str) -> Result<(), ArmError> {
        self.port
            .write_all(line.as_bytes())
            .and_then(|_| self.port.write_all(b"\r\n"))
            .and_then(|_| self.port.flush())
            .map_err(|_| ArmError::Communication)
    }
}
