//! Per-protocol decoder and encoder traits, and the encoder bank.
//!
//! The gateway core never touches protocol bit timing itself: decoders and
//! encoders own the demodulation and modulation for exactly one protocol
//! each. The dispatcher only sequences them — probing every decoder against
//! a received buffer, and checking one single-use encoder out of the bank
//! per outbound command.

use crate::packet::{Encoding, NormalizedPacket};
use crate::pulse::RawPacket;

/// Decoder for one RF protocol.
///
/// Decoders are probed in bank order against the same [`RawPacket`]. A
/// probe consumes pulses through the packet's cursor; the dispatcher
/// rewinds the cursor after every attempt, so implementations may assume
/// they start at pulse zero and need not reset anything on failure.
///
/// A failed probe is the normal case, not an error: most packets on the air
/// belong to some other protocol, or to no protocol at all.
pub trait ProtocolDecoder {
    /// The protocol this decoder recognizes.
    fn encoding(&self) -> Encoding;

    /// Attempts to interpret the packet as this decoder's protocol.
    ///
    /// On success the decoder retains whatever it extracted until the next
    /// `decode` call, for [`fill_packet`](Self::fill_packet) to read. Must
    /// be safe to call repeatedly on the same buffer after a rewind.
    fn decode(&mut self, packet: &mut RawPacket) -> bool;

    /// Populates `packet` from the most recent successful decode.
    ///
    /// Only called after `decode` returned true within the same check
    /// cycle.
    fn fill_packet(&self, packet: &mut NormalizedPacket);
}

/// Encoder for one RF protocol.
///
/// Single-use: the bank constructs one per outbound command, the dispatcher
/// feeds it the payload, encodes, transmits, and drops it.
pub trait ProtocolEncoder {
    /// Loads a scalar command code.
    fn set_code(&mut self, code: u32);

    /// Loads a multi-byte command payload.
    ///
    /// Required by protocols whose frames carry several values; the
    /// scalar form cannot express those.
    fn set_code_bytes(&mut self, code: &[u8]);

    /// Renders the loaded code into a pulse train ready for transmission.
    fn encode(&mut self, out: &mut RawPacket);
}

/// Factory selecting one encoder for an encoding tag.
///
/// `create` returning `None` is the unsupported-tag signal: the dispatcher
/// turns it into [`GatewayError::UnsupportedEncoding`] instead of operating
/// on a missing encoder. Banks match the [`Encoding`] enum exhaustively, so
/// receive-only protocols get an explicit `None` arm.
///
/// # Example Implementation
///
/// ```rust
/// use rs_rfgate::traits::{EncoderBank, ProtocolEncoder};
/// use rs_rfgate::{Encoding, RawPacket};
///
/// struct OnOffEncoder { timing: u16, code: u32 }
///
/// impl ProtocolEncoder for OnOffEncoder {
///     fn set_code(&mut self, code: u32) { self.code = code; }
///     fn set_code_bytes(&mut self, code: &[u8]) {
///         self.code = code.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32);
///     }
///     fn encode(&mut self, out: &mut RawPacket) {
///         for bit in (0..32).rev().map(|i| (self.code >> i) & 1) {
///             out.push(if bit == 1 { self.timing * 3 } else { self.timing });
///         }
///     }
/// }
///
/// struct SingleProtocolBank;
///
/// impl EncoderBank for SingleProtocolBank {
///     type Encoder = OnOffEncoder;
///
///     fn create(&self, encoding: Encoding, timing: u16) -> Option<OnOffEncoder> {
///         match encoding {
///             Encoding::Common => Some(OnOffEncoder { timing, code: 0 }),
///             _ => None,
///         }
///     }
/// }
/// ```
///
/// [`GatewayError::UnsupportedEncoding`]: crate::GatewayError::UnsupportedEncoding
pub trait EncoderBank {
    /// Concrete encoder type produced by this bank.
    type Encoder: ProtocolEncoder;

    /// Constructs the encoder for `encoding` with the given timing-profile
    /// parameter, or `None` if no encoder speaks that protocol.
    fn create(&self, encoding: Encoding, timing: u16) -> Option<Self::Encoder>;
}
