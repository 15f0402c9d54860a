//! Serial link to the display device.

use std::io::Write;
use std::time::Duration;

use serialport::SerialPort;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to open port: {0}")]
    Open(#[from] serialport::Error),
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Line-oriented sink for wire-format records.
pub trait Transport: Send {
    /// Write one record, appending the line terminator.
    fn write_line(&mut self, line: &str) -> Result<(), TransportError>;
}

pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    /// Open `name` at the given baud rate. The timeout bounds how long a
    /// single blocking write may hang on an unresponsive device. Dropping
    /// the transport releases the OS handle.
    pub fn open(name: &str, baud: u32, timeout: Duration) -> Result<Self, TransportError> {
        let port = serialport::new(name, baud).timeout(timeout).open()?;
        Ok(Self { port })
    }
}

impl Transport for SerialTransport {
    fn write_line(&mut self, line: &str) -> Result<(), TransportError> {
        self.port.write_all(line.as_bytes())?;
        self.port.write_all(b"\n")?;
        self.port.flush()?;
        Ok(())
    }
}
