//! Raw pulse-train buffer shared between the receiver, decoders, and encoders.
//!
//! A [`RawPacket`] is an ordered sequence of pulse widths (microseconds) with
//! a read cursor. The cursor exists because the decode-probe loop runs every
//! decoder against the *same* buffer: each decoder consumes pulses through
//! the cursor, and the dispatcher calls [`rewind`](RawPacket::rewind) before
//! the next decoder gets its turn.
//!
//! The buffer is fixed-capacity (`heapless`) so receiver implementations can
//! fill it from interrupt context without allocating.
//!
//! # Example
//!
//! ```rust
//! use rs_rfgate::RawPacket;
//!
//! let mut packet = RawPacket::from_pulses(&[500, 1000, 500, 2000]);
//!
//! assert_eq!(packet.next_pulse(), Some(500));
//! assert_eq!(packet.next_pulse(), Some(1000));
//!
//! packet.rewind();
//! assert_eq!(packet.next_pulse(), Some(500)); // reading from the start again
//! ```

use heapless::Vec;

/// Maximum number of pulses a single over-the-air frame can carry.
///
/// Sized for the longest frame among the supported protocols (OSv2 at
/// roughly 200 transitions) with headroom for preamble glitches.
pub const MAX_PULSES: usize = 256;

/// A raw radio packet: timed pulses plus a read cursor.
///
/// Mutated only by the receiver (on fill) and the encode path (on build).
/// During decoding it is read-shared; only the cursor moves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawPacket {
    pulses: Vec<u16, MAX_PULSES>,
    cursor: usize,
}

impl RawPacket {
    /// Creates an empty packet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a packet pre-filled with the given pulse widths.
    ///
    /// Pulses beyond [`MAX_PULSES`] are dropped. Intended for tests and
    /// scripted receivers.
    pub fn from_pulses(pulses: &[u16]) -> Self {
        let mut packet = Self::new();
        for &width in pulses.iter().take(MAX_PULSES) {
            let _ = packet.pulses.push(width);
        }
        packet
    }

    /// Appends a pulse width to the buffer.
    ///
    /// Returns `false` if the buffer is full (the pulse is discarded).
    pub fn push(&mut self, width_us: u16) -> bool {
        self.pulses.push(width_us).is_ok()
    }

    /// Returns the next pulse and advances the read cursor.
    pub fn next_pulse(&mut self) -> Option<u16> {
        let width = self.pulses.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(width)
    }

    /// Returns the next pulse without advancing the cursor.
    pub fn peek(&self) -> Option<u16> {
        self.pulses.get(self.cursor).copied()
    }

    /// Resets the read cursor to the start of the buffer.
    ///
    /// Every decoder probe must start from pulse zero; the dispatcher calls
    /// this after each decode attempt.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Current read cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of pulses remaining from the cursor to the end.
    pub fn remaining(&self) -> usize {
        self.pulses.len() - self.cursor
    }

    /// Total number of pulses in the buffer.
    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    /// Returns true if the buffer holds no pulses.
    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }

    /// Discards all pulses and resets the cursor.
    pub fn clear(&mut self) {
        self.pulses.clear();
        self.cursor = 0;
    }

    /// The full pulse sequence, cursor-independent.
    pub fn pulses(&self) -> &[u16] {
        &self.pulses
    }
}
