//! The gateway dispatcher: decode-probe loop, inbound routing, and
//! heartbeat emission.
//!
//! [`GatewayDispatcher`] is the crate's core. It owns the decoder bank and
//! the radio-mode token, and coordinates every collaborator:
//!
//! - [`check`](GatewayDispatcher::check) runs once per scheduler tick:
//!   probe a pending received frame against every decoder, forward the best
//!   match upstream, purge, then emit heartbeat status if due.
//! - [`handle`](GatewayDispatcher::handle) routes one inbound host command:
//!   LED updates, RF transmissions, acknowledgement echo.
//!
//! # Example
//!
//! ```rust
//! use rs_rfgate::{GatewayDispatcher, RawPacket};
//! use rs_rfgate::hal::{
//!     MockEncoderBank, MockHeartbeat, MockLeds, MockReceiver, MockTransmitter,
//!     MockUplink, ScriptedDecoder,
//! };
//! use rs_rfgate::Encoding;
//!
//! let mut receiver = MockReceiver::new();
//! receiver.load(RawPacket::from_pulses(&[500, 1000, 500]));
//!
//! let mut gateway = GatewayDispatcher::new(
//!     receiver,
//!     MockTransmitter::new(),
//!     MockEncoderBank::new(),
//!     vec![Box::new(ScriptedDecoder::matching(Encoding::Wt450))],
//!     MockLeds::new(),
//!     MockHeartbeat::new(),
//!     MockUplink::new(),
//! );
//!
//! let outcome = gateway.check().unwrap();
//! assert_eq!(outcome.decoded, Some(Encoding::Wt450));
//! assert_eq!(gateway.uplink().sent.len(), 1); // forwarded upstream
//! assert!(gateway.receiver().buffer.is_none()); // purged
//! ```

use log::{debug, info, trace, warn};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::packet::{Device, Encoding, NormalizedPacket, Payload};
use crate::pulse::RawPacket;
use crate::traits::{
    EncoderBank, Heartbeat, ProtocolDecoder, ProtocolEncoder, Receiver, StatusLeds, Transmitter,
    Uplink,
};

/// Which side of the radio is checked out.
///
/// The receiver and transmitter share one radio. This token must be
/// `Receiving` to enter the transmit path and is restored on every exit
/// path of that scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RadioMode {
    Receiving,
    Transmitting,
}

/// What a [`check`](GatewayDispatcher::check) cycle did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Protocol of the forwarded frame, if a received packet decoded.
    pub decoded: Option<Encoding>,
    /// True if the heartbeat expired and status reports were emitted.
    pub heartbeat_reported: bool,
}

/// How [`handle`](GatewayDispatcher::handle) disposed of an inbound packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleOutcome {
    /// Addressed to a remote node; not touched.
    Ignored,
    /// An indicator color was updated.
    LedUpdated(Device),
    /// The command went out over RF with this protocol.
    Transmitted(Encoding),
    /// Local packet for a device this gateway has no handler for; no
    /// side effect, but still acknowledged.
    UnknownDevice(u16),
}

/// The gateway control-loop core.
///
/// Generic over every collaborator so it can run against real radio
/// hardware or the [`hal::mock`](crate::hal::mock) doubles. All state is
/// in-memory and rebuilt at startup; nothing persists.
///
/// # Type Parameters
///
/// - `R`: [`Receiver`] — radio listening side
/// - `T`: [`Transmitter`] — radio sending side
/// - `B`: [`EncoderBank`] — encoding tag to single-use encoder
/// - `L`: [`StatusLeds`] — indicators
/// - `H`: [`Heartbeat`] — status-report timer
/// - `U`: [`Uplink`] — upstream transport
pub struct GatewayDispatcher<R, T, B, L, H, U> {
    receiver: R,
    transmitter: T,
    encoders: B,
    decoders: Vec<Box<dyn ProtocolDecoder>>,
    leds: L,
    heartbeat: H,
    uplink: U,
    config: GatewayConfig,
    radio: RadioMode,
}

impl<R, T, B, L, H, U> GatewayDispatcher<R, T, B, L, H, U>
where
    R: Receiver,
    T: Transmitter,
    B: EncoderBank,
    L: StatusLeds,
    H: Heartbeat,
    U: Uplink,
{
    /// Creates a dispatcher with the default configuration.
    ///
    /// `decoders` is the probe bank; its order is significant. Later
    /// entries override earlier matches, so place looser protocols first
    /// and more specific ones after them.
    pub fn new(
        receiver: R,
        transmitter: T,
        encoders: B,
        decoders: Vec<Box<dyn ProtocolDecoder>>,
        leds: L,
        heartbeat: H,
        uplink: U,
    ) -> Self {
        Self {
            receiver,
            transmitter,
            encoders,
            decoders,
            leds,
            heartbeat,
            uplink,
            config: GatewayConfig::default(),
            radio: RadioMode::Receiving,
        }
    }

    /// Replaces the configuration. Builder-style.
    pub fn with_config(mut self, config: GatewayConfig) -> Self {
        self.config = config;
        self
    }

    /// One-time initialization: transmitter hardware setup, then receiver
    /// into listening mode.
    pub fn setup(&mut self) -> Result<()> {
        self.transmitter
            .setup()
            .map_err(|e| GatewayError::Transmitter(Box::new(e)))?;
        self.receiver
            .start()
            .map_err(|e| GatewayError::Receiver(Box::new(e)))?;
        info!(
            "{}: gateway up, {} decoders in bank",
            self.config.device_name,
            self.decoders.len()
        );
        Ok(())
    }

    /// One control-loop tick.
    ///
    /// Processes a pending received frame first, then the heartbeat, in
    /// that order; both run to completion within the tick. Non-blocking
    /// throughout.
    ///
    /// The receive buffer is always purged once a frame has been
    /// processed, decoded or not, even when forwarding upstream fails —
    /// otherwise the single-slot receiver would stall.
    pub fn check(&mut self) -> Result<CheckOutcome> {
        let mut outcome = CheckOutcome::default();

        if let Some(packet) = self.receiver.pending() {
            // Scratch state for this cycle only.
            let mut last_match: Option<usize> = None;

            // Probe every decoder, no early exit: protocol formats are not
            // mutually exclusive at the bit level, and a later, more
            // specific decoder's interpretation takes precedence over an
            // earlier, looser one.
            for (index, decoder) in self.decoders.iter_mut().enumerate() {
                if decoder.decode(packet) {
                    last_match = Some(index);
                }
                // Next probe reads from the first pulse.
                packet.rewind();
            }

            let forwarded = match last_match {
                Some(index) => {
                    let decoder = &self.decoders[index];
                    let encoding = decoder.encoding();
                    debug!("decoded {encoding} frame (decoder {index})");
                    self.leds.blink_stat();

                    let mut report =
                        NormalizedPacket::rf_report(encoding, Payload::default());
                    decoder.fill_packet(&mut report);
                    outcome.decoded = Some(encoding);

                    self.uplink
                        .send(&report)
                        .map_err(|e| GatewayError::Uplink(Box::new(e)))
                }
                None => {
                    trace!("no decoder matched a {}-pulse frame", packet.len());
                    Ok(())
                }
            };

            self.receiver.purge();
            forwarded?;
        }

        if self.heartbeat.is_expired() {
            self.emit_status_reports();
            outcome.heartbeat_reported = true;
        }

        Ok(outcome)
    }

    /// Routes one inbound packet from the host.
    ///
    /// Packets addressed to a remote node (`guid != 0`) are ignored
    /// entirely. Local packets dispatch on the device field; every local
    /// packet is echoed back as an acknowledgement after its side effect,
    /// including when the RF path failed — the failure is returned after
    /// the acknowledgement has gone out.
    pub fn handle(&mut self, packet: &NormalizedPacket) -> Result<HandleOutcome> {
        if !packet.is_local() {
            trace!("ignoring packet for remote guid {}", packet.guid);
            return Ok(HandleOutcome::Ignored);
        }

        let disposed = match packet.device {
            Device::StatusLed => {
                self.leds
                    .set_stat_color(packet.payload.value().unwrap_or_default());
                Ok(HandleOutcome::LedUpdated(Device::StatusLed))
            }
            Device::EyesLed => {
                self.leds
                    .set_eyes_color(packet.payload.value().unwrap_or_default());
                Ok(HandleOutcome::LedUpdated(Device::EyesLed))
            }
            Device::OnboardRf => self
                .transmit_command(packet)
                .map(HandleOutcome::Transmitted),
            Device::Unknown(id) => {
                warn!("command for unknown device id {id}, acknowledging anyway");
                Ok(HandleOutcome::UnknownDevice(id))
            }
        };

        // The host gets its echo regardless of how the side effect went.
        let ack = packet.clone().into_ack();
        self.uplink
            .send(&ack)
            .map_err(|e| GatewayError::Uplink(Box::new(e)))?;

        disposed
    }

    /// Encodes and transmits one outbound RF command, with the receiver
    /// stopped for the duration and restarted on every exit path.
    fn transmit_command(&mut self, packet: &NormalizedPacket) -> Result<Encoding> {
        if self.radio != RadioMode::Receiving {
            return Err(GatewayError::RadioBusy);
        }

        self.receiver
            .stop()
            .map_err(|e| GatewayError::Receiver(Box::new(e)))?;
        self.radio = RadioMode::Transmitting;

        let sent = self.encode_and_send(packet);

        // The receiver comes back no matter how the send went.
        let restarted = self
            .receiver
            .start()
            .map_err(|e| GatewayError::Receiver(Box::new(e)));
        self.radio = RadioMode::Receiving;

        let encoding = sent?;
        restarted?;
        Ok(encoding)
    }

    /// The encoder's whole lifetime: checked out of the bank, fed the
    /// payload, rendered, dropped.
    fn encode_and_send(&mut self, packet: &NormalizedPacket) -> Result<Encoding> {
        let encoding = packet.encoding.ok_or(GatewayError::MissingEncoding)?;
        let timing = packet.timing.unwrap_or_default();

        let mut encoder = self
            .encoders
            .create(encoding, timing)
            .ok_or(GatewayError::UnsupportedEncoding(encoding))?;

        match &packet.payload {
            Payload::Value(value) => encoder.set_code(*value),
            Payload::Bytes(bytes) => encoder.set_code_bytes(bytes),
        }

        let mut raw = RawPacket::new();
        encoder.encode(&mut raw);

        debug!(
            "transmitting {encoding} frame: {} pulses x{}",
            raw.len(),
            self.config.transmit_repeats
        );
        self.transmitter
            .send(&raw, self.config.transmit_repeats)
            .map_err(|e| GatewayError::Transmitter(Box::new(e)))?;
        Ok(encoding)
    }

    /// Emits the heartbeat status pair: status LED color, then eyes LED
    /// color, both guid 0.
    ///
    /// Push-based reporting with no retry: an unavailable uplink costs us
    /// this interval's reports and nothing else.
    fn emit_status_reports(&mut self) {
        let reports = [
            NormalizedPacket::device_report(
                Device::StatusLed,
                Payload::Value(self.leds.stat_color()),
            ),
            NormalizedPacket::device_report(
                Device::EyesLed,
                Payload::Value(self.leds.eyes_color()),
            ),
        ];

        for report in &reports {
            if let Err(e) = self.uplink.send(report) {
                warn!("heartbeat report dropped: {e}");
            }
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Number of decoders in the probe bank.
    pub fn decoder_count(&self) -> usize {
        self.decoders.len()
    }

    /// The receiver collaborator.
    pub fn receiver(&self) -> &R {
        &self.receiver
    }

    /// The receiver collaborator, mutably (e.g. to feed a mock).
    pub fn receiver_mut(&mut self) -> &mut R {
        &mut self.receiver
    }

    /// The transmitter collaborator.
    pub fn transmitter(&self) -> &T {
        &self.transmitter
    }

    /// The transmitter collaborator, mutably.
    pub fn transmitter_mut(&mut self) -> &mut T {
        &mut self.transmitter
    }

    /// The LED collaborator.
    pub fn leds(&self) -> &L {
        &self.leds
    }

    /// The LED collaborator, mutably.
    pub fn leds_mut(&mut self) -> &mut L {
        &mut self.leds
    }

    /// The heartbeat collaborator, mutably (e.g. to force expiry).
    pub fn heartbeat_mut(&mut self) -> &mut H {
        &mut self.heartbeat
    }

    /// The uplink collaborator.
    pub fn uplink(&self) -> &U {
        &self.uplink
    }

    /// The uplink collaborator, mutably (e.g. to drain a mock's capture).
    pub fn uplink_mut(&mut self) -> &mut U {
        &mut self.uplink
    }
}
