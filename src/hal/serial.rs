//! Newline-delimited JSON uplink over any `Write`.
//!
//! One [`NormalizedPacket`] per line; the host splits on newlines and
//! parses each frame independently. [`parse_frame`] is the matching
//! inbound direction for host command lines.

use std::io::Write;

use thiserror::Error;

use crate::packet::NormalizedPacket;
use crate::traits::Uplink;

/// Serial uplink transport failure.
#[derive(Error, Debug)]
pub enum SerialError {
    /// The packet did not serialize.
    #[error("serialize: {0}")]
    Json(#[from] serde_json::Error),
    /// The underlying port rejected the write.
    #[error("write: {0}")]
    Io(#[from] std::io::Error),
}

/// Uplink writing one JSON frame per line.
///
/// # Example
///
/// ```rust
/// use rs_rfgate::hal::JsonUplink;
/// use rs_rfgate::traits::Uplink;
/// use rs_rfgate::{Device, NormalizedPacket, Payload};
///
/// let mut uplink = JsonUplink::new(Vec::new());
/// let report = NormalizedPacket::device_report(Device::StatusLed, Payload::Value(0xFF));
/// uplink.send(&report).unwrap();
///
/// let line = String::from_utf8(uplink.into_inner()).unwrap();
/// assert!(line.ends_with('\n'));
/// assert!(line.contains("\"device_report\""));
/// ```
#[derive(Debug)]
pub struct JsonUplink<W> {
    writer: W,
}

impl<W: Write> JsonUplink<W> {
    /// Wraps a writer (serial port, socket, buffer).
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwraps the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Uplink for JsonUplink<W> {
    type Error = SerialError;

    fn send(&mut self, packet: &NormalizedPacket) -> Result<(), Self::Error> {
        serde_json::to_writer(&mut self.writer, packet)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Parses one inbound host frame.
pub fn parse_frame(line: &str) -> Result<NormalizedPacket, serde_json::Error> {
    serde_json::from_str(line.trim())
}
