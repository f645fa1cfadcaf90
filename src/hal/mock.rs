//! Mock implementations for testing without radio hardware.
//!
//! Test doubles for every collaborator trait, enabling development and
//! testing on desktop without a transmitter in sight.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockReceiver`] | [`Receiver`] | Scripted frame delivery, start/stop counts |
//! | [`MockTransmitter`] | [`Transmitter`] | Captures sent packets and repeat counts |
//! | [`ScriptedDecoder`] | [`ProtocolDecoder`] | Configurable match/no-match probe |
//! | [`MockEncoderBank`] | [`EncoderBank`] | Deterministic pulse-train encoders |
//! | [`MockLeds`] | [`StatusLeds`] | Tracks colors and blink count |
//! | [`MockHeartbeat`] | [`Heartbeat`] | Expiry on demand |
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//! | [`MockUplink`] | [`Uplink`] | Captures forwarded packets |
//!
//! # Example
//!
//! ```rust
//! use rs_rfgate::hal::{MockReceiver, MockUplink};
//! use rs_rfgate::traits::{Receiver, Uplink};
//! use rs_rfgate::RawPacket;
//!
//! let mut receiver = MockReceiver::new();
//! receiver.load(RawPacket::from_pulses(&[500, 1000]));
//!
//! assert!(receiver.pending().is_some());
//! receiver.purge();
//! assert!(receiver.pending().is_none());
//! assert_eq!(receiver.purge_calls, 1);
//! ```
//!
//! [`Receiver`]: crate::traits::Receiver
//! [`Transmitter`]: crate::traits::Transmitter
//! [`ProtocolDecoder`]: crate::traits::ProtocolDecoder
//! [`EncoderBank`]: crate::traits::EncoderBank
//! [`StatusLeds`]: crate::traits::StatusLeds
//! [`Heartbeat`]: crate::traits::Heartbeat
//! [`Clock`]: crate::traits::Clock
//! [`Uplink`]: crate::traits::Uplink

use std::cell::RefCell;
use std::rc::Rc;

use crate::packet::{Encoding, NormalizedPacket, Payload};
use crate::pulse::RawPacket;
use crate::traits::{
    Clock, EncoderBank, Heartbeat, ProtocolDecoder, ProtocolEncoder, Receiver, StatusLeds,
    Transmitter, Uplink,
};

/// Scripted fault for mock collaborators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockHalError(pub &'static str);

impl core::fmt::Display for MockHalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "mock fault: {}", self.0)
    }
}

impl std::error::Error for MockHalError {}

// ============================================================================
// Radio Mocks
// ============================================================================

/// Mock receiver with a scripted one-packet buffer.
///
/// Load frames with [`load`](Self::load); inspect the public fields to
/// verify the dispatcher's start/stop/purge discipline.
#[derive(Debug, Default)]
pub struct MockReceiver {
    /// Whether the receiver is currently in listening mode.
    pub running: bool,
    /// The single-slot frame buffer.
    pub buffer: Option<RawPacket>,
    /// Number of times `start` was called.
    pub start_calls: usize,
    /// Number of times `stop` was called.
    pub stop_calls: usize,
    /// Number of times `purge` was called.
    pub purge_calls: usize,
    /// When true, the next `start` fails.
    pub fail_start: bool,
    /// When true, the next `stop` fails.
    pub fail_stop: bool,
}

impl MockReceiver {
    /// Creates a stopped receiver with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a frame in the buffer, as if it had just arrived.
    pub fn load(&mut self, packet: RawPacket) {
        self.buffer = Some(packet);
    }
}

impl Receiver for MockReceiver {
    type Error = MockHalError;

    fn start(&mut self) -> Result<(), Self::Error> {
        self.start_calls += 1;
        if self.fail_start {
            return Err(MockHalError("receiver start"));
        }
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        self.stop_calls += 1;
        if self.fail_stop {
            return Err(MockHalError("receiver stop"));
        }
        self.running = false;
        Ok(())
    }

    fn pending(&mut self) -> Option<&mut RawPacket> {
        self.buffer.as_mut()
    }

    fn purge(&mut self) {
        self.purge_calls += 1;
        self.buffer = None;
    }
}

/// Mock transmitter capturing every send.
#[derive(Debug, Default)]
pub struct MockTransmitter {
    /// True once `setup` has run.
    pub setup_done: bool,
    /// Every sent packet with its repeat count, in order.
    pub sends: Vec<(RawPacket, u8)>,
    /// When true, `send` fails (after recording the attempt).
    pub fail_send: bool,
}

impl MockTransmitter {
    /// Creates an uninitialized transmitter.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transmitter for MockTransmitter {
    type Error = MockHalError;

    fn setup(&mut self) -> Result<(), Self::Error> {
        self.setup_done = true;
        Ok(())
    }

    fn send(&mut self, packet: &RawPacket, repeats: u8) -> Result<(), Self::Error> {
        self.sends.push((packet.clone(), repeats));
        if self.fail_send {
            return Err(MockHalError("transmitter send"));
        }
        Ok(())
    }
}

// ============================================================================
// Protocol Mocks
// ============================================================================

/// Scripted protocol decoder.
///
/// Always answers its configured match/no-match verdict and records the
/// packet cursor position at the start of every probe, which is how the
/// test suites verify the rewind-between-probes invariant.
///
/// # Example
///
/// ```rust
/// use rs_rfgate::hal::ScriptedDecoder;
/// use rs_rfgate::traits::ProtocolDecoder;
/// use rs_rfgate::{Encoding, RawPacket};
///
/// let mut decoder = ScriptedDecoder::matching(Encoding::Arlec);
/// let probes = decoder.probe_log();
///
/// let mut packet = RawPacket::from_pulses(&[1, 2, 3, 4]);
/// assert!(decoder.decode(&mut packet));
/// assert_eq!(*probes.borrow(), vec![0]); // probe started at the cursor origin
/// ```
pub struct ScriptedDecoder {
    encoding: Encoding,
    matches: bool,
    payload: Payload,
    consume: usize,
    probes: Rc<RefCell<Vec<usize>>>,
}

impl ScriptedDecoder {
    /// A decoder that recognizes every packet as `encoding`.
    pub fn matching(encoding: Encoding) -> Self {
        Self {
            encoding,
            matches: true,
            payload: Payload::Value(0),
            consume: 4,
            probes: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// A decoder that never matches.
    pub fn rejecting(encoding: Encoding) -> Self {
        Self {
            matches: false,
            ..Self::matching(encoding)
        }
    }

    /// Sets the payload `fill_packet` writes into the report.
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Sets how many pulses each probe consumes before answering.
    pub fn with_consume(mut self, pulses: usize) -> Self {
        self.consume = pulses;
        self
    }

    /// Shared log of the cursor position observed at each probe.
    ///
    /// Clone this before moving the decoder into a dispatcher.
    pub fn probe_log(&self) -> Rc<RefCell<Vec<usize>>> {
        Rc::clone(&self.probes)
    }
}

impl ProtocolDecoder for ScriptedDecoder {
    fn encoding(&self) -> Encoding {
        self.encoding
    }

    fn decode(&mut self, packet: &mut RawPacket) -> bool {
        self.probes.borrow_mut().push(packet.cursor());
        for _ in 0..self.consume {
            if packet.next_pulse().is_none() {
                break;
            }
        }
        self.matches
    }

    fn fill_packet(&self, packet: &mut NormalizedPacket) {
        packet.payload = self.payload.clone();
    }
}

/// What a [`MockEncoder`] has been fed.
#[derive(Clone, Debug, PartialEq, Eq)]
enum EncoderCode {
    Unset,
    Scalar(u32),
    Bytes(Vec<u8>),
}

/// Deterministic mock encoder.
///
/// Renders a recognizable pulse train so tests can verify, from the
/// transmitter's capture alone, which protocol and timing the bank
/// constructed and which payload path fed it:
///
/// - pulse 0: `9000` + protocol marker (see [`MockEncoderBank::marker`])
/// - pulse 1: the timing parameter
/// - scalar code: two pulses, high then low 16 bits
/// - byte code: one pulse per byte
#[derive(Debug)]
pub struct MockEncoder {
    encoding: Encoding,
    timing: u16,
    code: EncoderCode,
}

impl ProtocolEncoder for MockEncoder {
    fn set_code(&mut self, code: u32) {
        self.code = EncoderCode::Scalar(code);
    }

    fn set_code_bytes(&mut self, code: &[u8]) {
        self.code = EncoderCode::Bytes(code.to_vec());
    }

    fn encode(&mut self, out: &mut RawPacket) {
        out.push(9000 + MockEncoderBank::marker(self.encoding));
        out.push(self.timing);
        match &self.code {
            EncoderCode::Unset => {}
            EncoderCode::Scalar(value) => {
                out.push((value >> 16) as u16);
                out.push(*value as u16);
            }
            EncoderCode::Bytes(bytes) => {
                for &byte in bytes {
                    out.push(u16::from(byte));
                }
            }
        }
    }
}

/// Mock encoder bank covering every encodable protocol.
///
/// Mirrors the real protocol set: WT450 is receive-only, so requesting it
/// yields `None` — the unsupported-tag path.
#[derive(Debug, Default)]
pub struct MockEncoderBank;

impl MockEncoderBank {
    /// Creates the bank.
    pub fn new() -> Self {
        Self
    }

    /// Stable per-protocol marker used in [`MockEncoder`] pulse trains.
    pub fn marker(encoding: Encoding) -> u16 {
        match encoding {
            Encoding::Common => 0,
            Encoding::Wt450 => 1,
            Encoding::Arlec => 2,
            Encoding::He330v2 => 3,
            Encoding::Osv2 => 4,
            Encoding::Bind => 5,
        }
    }
}

impl EncoderBank for MockEncoderBank {
    type Encoder = MockEncoder;

    fn create(&self, encoding: Encoding, timing: u16) -> Option<MockEncoder> {
        match encoding {
            Encoding::Wt450 => None,
            _ => Some(MockEncoder {
                encoding,
                timing,
                code: EncoderCode::Unset,
            }),
        }
    }
}

// ============================================================================
// Indicator, Time, and Uplink Mocks
// ============================================================================

/// Mock LED subsystem tracking colors and blinks.
#[derive(Debug, Default)]
pub struct MockLeds {
    /// Current status LED color.
    pub stat: u32,
    /// Current eyes LED color.
    pub eyes: u32,
    /// Number of activity blinks requested.
    pub blink_count: usize,
}

impl MockLeds {
    /// Creates dark LEDs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates LEDs preset to the given colors.
    pub fn with_colors(stat: u32, eyes: u32) -> Self {
        Self {
            stat,
            eyes,
            blink_count: 0,
        }
    }
}

impl StatusLeds for MockLeds {
    fn set_stat_color(&mut self, rgb: u32) {
        self.stat = rgb;
    }

    fn stat_color(&self) -> u32 {
        self.stat
    }

    fn set_eyes_color(&mut self, rgb: u32) {
        self.eyes = rgb;
    }

    fn eyes_color(&self) -> u32 {
        self.eyes
    }

    fn blink_stat(&mut self) {
        self.blink_count += 1;
    }
}

/// Mock heartbeat expiring on demand.
///
/// # Example
///
/// ```rust
/// use rs_rfgate::hal::MockHeartbeat;
/// use rs_rfgate::traits::Heartbeat;
///
/// let mut heartbeat = MockHeartbeat::new();
/// assert!(!heartbeat.is_expired());
///
/// heartbeat.expire();
/// assert!(heartbeat.is_expired()); // once
/// assert!(!heartbeat.is_expired()); // reset on read
/// ```
#[derive(Debug, Default)]
pub struct MockHeartbeat {
    expired: bool,
}

impl MockHeartbeat {
    /// Creates an unexpired heartbeat.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the next `is_expired` call.
    pub fn expire(&mut self) {
        self.expired = true;
    }
}

impl Heartbeat for MockHeartbeat {
    fn is_expired(&mut self) -> bool {
        core::mem::take(&mut self.expired)
    }
}

/// Controllable time source.
#[derive(Debug, Default)]
pub struct MockClock {
    ms: u64,
}

impl MockClock {
    /// Creates a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock.
    pub fn advance(&mut self, ms: u64) {
        self.ms += ms;
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.ms
    }
}

/// Mock uplink capturing every packet sent upstream.
#[derive(Debug, Default)]
pub struct MockUplink {
    /// Successfully "delivered" packets, in order.
    pub sent: Vec<NormalizedPacket>,
    /// Total send attempts, including failed ones.
    pub attempts: usize,
    /// When true, sends fail (after counting the attempt).
    pub fail: bool,
}

impl MockUplink {
    /// Creates a working uplink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an uplink whose sends all fail.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Uplink for MockUplink {
    type Error = MockHalError;

    fn send(&mut self, packet: &NormalizedPacket) -> Result<(), Self::Error> {
        self.attempts += 1;
        if self.fail {
            return Err(MockHalError("uplink down"));
        }
        self.sent.push(packet.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receiver_counts_calls() {
        let mut receiver = MockReceiver::new();
        receiver.start().unwrap();
        receiver.stop().unwrap();
        receiver.purge();
        assert_eq!(receiver.start_calls, 1);
        assert_eq!(receiver.stop_calls, 1);
        assert_eq!(receiver.purge_calls, 1);
        assert!(!receiver.running);
    }

    #[test]
    fn receiver_scripted_failures_count_attempts() {
        let mut receiver = MockReceiver::new();
        receiver.fail_start = true;
        assert!(receiver.start().is_err());
        assert_eq!(receiver.start_calls, 1);
        assert!(!receiver.running);
    }

    #[test]
    fn transmitter_records_sends() {
        let mut tx = MockTransmitter::new();
        tx.setup().unwrap();
        tx.send(&RawPacket::from_pulses(&[1, 2]), 5).unwrap();
        assert!(tx.setup_done);
        assert_eq!(tx.sends.len(), 1);
        assert_eq!(tx.sends[0].1, 5);
    }

    #[test]
    fn scripted_decoder_consumes_and_answers() {
        let mut decoder = ScriptedDecoder::rejecting(Encoding::Osv2).with_consume(2);
        let mut packet = RawPacket::from_pulses(&[1, 2, 3]);
        assert!(!decoder.decode(&mut packet));
        assert_eq!(packet.cursor(), 2);
    }

    #[test]
    fn mock_encoder_scalar_layout() {
        let bank = MockEncoderBank::new();
        let mut encoder = bank.create(Encoding::Common, 350).unwrap();
        encoder.set_code(0x0001_0002);

        let mut out = RawPacket::new();
        encoder.encode(&mut out);
        assert_eq!(out.pulses(), &[9000, 350, 1, 2]);
    }

    #[test]
    fn mock_encoder_bytes_layout() {
        let bank = MockEncoderBank::new();
        let mut encoder = bank.create(Encoding::Arlec, 320).unwrap();
        encoder.set_code_bytes(&[0x3, 0x7]);

        let mut out = RawPacket::new();
        encoder.encode(&mut out);
        assert_eq!(out.pulses(), &[9002, 320, 3, 7]);
    }

    #[test]
    fn bank_has_no_wt450_encoder() {
        let bank = MockEncoderBank::new();
        assert!(bank.create(Encoding::Wt450, 0).is_none());
    }

    #[test]
    fn uplink_failure_counts_attempt() {
        let mut uplink = MockUplink::failing();
        let packet = NormalizedPacket::device_report(
            crate::packet::Device::StatusLed,
            Payload::Value(1),
        );
        assert!(uplink.send(&packet).is_err());
        assert_eq!(uplink.attempts, 1);
        assert!(uplink.sent.is_empty());
    }
}
