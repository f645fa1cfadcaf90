//! Receiver and transmitter traits for the shared radio.
//!
//! The two sides of one physical radio. They must never operate at the same
//! time; the dispatcher enforces that with its radio-mode token, stopping
//! the receiver for the duration of a transmission and restarting it on
//! every exit path.

use crate::pulse::RawPacket;

/// The radio in listening mode.
///
/// A receiver buffers at most one undelivered packet. [`pending`]
/// (Receiver::pending) hands out that buffer without consuming it; the
/// dispatcher calls [`purge`](Receiver::purge) once it has finished
/// processing so a new frame can arrive. Skipping the purge stalls the
/// receiver: with its single slot occupied, it has nowhere to put the next
/// frame.
///
/// # Example Implementation
///
/// ```rust
/// use rs_rfgate::traits::Receiver;
/// use rs_rfgate::RawPacket;
///
/// struct LoopbackReceiver {
///     running: bool,
///     buffer: Option<RawPacket>,
/// }
///
/// impl Receiver for LoopbackReceiver {
///     type Error = std::convert::Infallible;
///
///     fn start(&mut self) -> Result<(), Self::Error> {
///         self.running = true;
///         Ok(())
///     }
///
///     fn stop(&mut self) -> Result<(), Self::Error> {
///         self.running = false;
///         Ok(())
///     }
///
///     fn pending(&mut self) -> Option<&mut RawPacket> {
///         self.buffer.as_mut()
///     }
///
///     fn purge(&mut self) {
///         self.buffer = None;
///     }
/// }
/// ```
pub trait Receiver {
    /// Error type for the fallible radio operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Puts the radio into listening mode.
    ///
    /// Starting an already-running receiver must be a no-op.
    fn start(&mut self) -> Result<(), Self::Error>;

    /// Takes the radio out of listening mode.
    ///
    /// Required before the transmitter may touch the air. Stopping an
    /// already-stopped receiver must be a no-op; the dispatcher relies on
    /// this to recover after a failed restart.
    fn stop(&mut self) -> Result<(), Self::Error>;

    /// The buffered packet, if a complete frame has arrived.
    ///
    /// Non-blocking. Returns a mutable borrow because decoding moves the
    /// packet's read cursor; the packet stays buffered until
    /// [`purge`](Self::purge).
    fn pending(&mut self) -> Option<&mut RawPacket>;

    /// Discards the buffered packet so a new one can arrive.
    fn purge(&mut self);
}

/// The radio in sending mode.
pub trait Transmitter {
    /// Error type for transmitter operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// One-time hardware initialization (pin setup, carrier calibration).
    fn setup(&mut self) -> Result<(), Self::Error>;

    /// Sends the packet `repeats` times back to back.
    ///
    /// Repetition happens inside one send call so the receiver stays
    /// stopped across all copies. Synchronous; returns when the last
    /// repetition has left the air.
    fn send(&mut self, packet: &RawPacket, repeats: u8) -> Result<(), Self::Error>;
}
