//! # rs-rfgate
//!
//! The control loop of an RF home-automation gateway: decode received
//! 433MHz pulse trains with an ordered bank of protocol decoders, forward
//! readings upstream as normalized packets, route inbound host commands to
//! LEDs or a single-use protocol encoder and the transmitter, and report
//! status on a heartbeat.
//!
//! ## Features
//!
//! - **Ordered decode probing**: every decoder probes every frame; the
//!   last match wins, so specific protocols placed later override looser
//!   ones placed earlier
//! - **Guarded radio arbitration**: receiver and transmitter share one
//!   radio; the dispatcher's radio-mode token stops reception around a
//!   transmission and guarantees restart on every exit path
//! - **Explicit failure for unsupported encodings**: an outbound command
//!   naming a protocol with no encoder is an error, not undefined behavior
//! - **Hardware abstraction**: every collaborator is a trait with a mock
//!   implementation, so the whole loop runs and tests on desktop
//!
//! ## Architecture
//!
//! - `traits` - collaborator abstractions (radio, protocol, LEDs, time,
//!   uplink)
//! - `pulse` - the raw pulse-train buffer decoders probe
//! - `packet` - the normalized packet model shared with the host
//! - `gateway` - the dispatcher: decode-probe loop, routing, heartbeat
//! - `hal` - concrete implementations (mocks, interval heartbeat, JSON
//!   serial uplink)
//!
//! ## Example
//!
//! ```rust
//! use rs_rfgate::{
//!     Device, GatewayDispatcher, NormalizedPacket, Payload,
//!     hal::{
//!         MockEncoderBank, MockHeartbeat, MockLeds, MockReceiver,
//!         MockTransmitter, MockUplink,
//!     },
//! };
//!
//! let mut gateway = GatewayDispatcher::new(
//!     MockReceiver::new(),
//!     MockTransmitter::new(),
//!     MockEncoderBank::new(),
//!     Vec::new(), // decoder bank; empty here
//!     MockLeds::new(),
//!     MockHeartbeat::new(),
//!     MockUplink::new(),
//! );
//! gateway.setup().unwrap();
//!
//! // Host tells the gateway to turn its status LED green
//! let cmd = NormalizedPacket::device_command(Device::StatusLed, Payload::Value(0x00FF00));
//! gateway.handle(&cmd).unwrap();
//! assert_eq!(gateway.leds().stat, 0x00FF00);
//!
//! // Main loop: call check() every tick
//! gateway.check().unwrap();
//! ```

#![warn(missing_docs)]

/// Gateway configuration.
pub mod config;
/// Error types for gateway operations.
pub mod error;
/// The dispatcher core: decode probing, routing, heartbeat.
pub mod gateway;
/// Concrete collaborator implementations (mock, timer, serial).
pub mod hal;
/// Normalized packet model exchanged with the host.
pub mod packet;
/// Raw pulse-train buffer.
pub mod pulse;
/// Collaborator trait definitions.
pub mod traits;

// Re-exports for convenience
pub use config::{DeviceName, GatewayConfig, MAX_NAME_LEN};
pub use error::{GatewayError, Result};
pub use gateway::{CheckOutcome, GatewayDispatcher, HandleOutcome};
pub use packet::{
    Device, Encoding, NormalizedPacket, PacketKind, Payload, GATEWAY_GUID,
};
pub use pulse::{RawPacket, MAX_PULSES};
pub use traits::{
    Clock,
    EncoderBank,
    Heartbeat,
    ProtocolDecoder,
    ProtocolEncoder,
    Receiver,
    StatusLeds,
    Transmitter,
    Uplink,
};
