//! Normalized packet model exchanged with the upstream host.
//!
//! A [`NormalizedPacket`] is the protocol-agnostic representation of a
//! logical event or command: decoded RF readings travel upstream as
//! device reports, the host sends device commands downstream, and every
//! locally handled command is echoed back as an acknowledgement.
//!
//! The [`Encoding`] enum is the closed set of RF protocol variants the
//! gateway knows about. Decoders tag their reports with it; outbound RF
//! commands name the encoder to use through it.
//!
//! # Example
//!
//! ```rust
//! use rs_rfgate::{Device, Encoding, NormalizedPacket, PacketKind, Payload};
//!
//! // An outbound RF command carrying a two-byte payload
//! let cmd = NormalizedPacket::rf_command(
//!     Encoding::Arlec,
//!     320,
//!     Payload::Bytes(vec![0x3, 0x7]),
//! );
//! assert_eq!(cmd.kind, PacketKind::DeviceCommand);
//! assert_eq!(cmd.device, Device::OnboardRf);
//! assert!(cmd.payload.is_array());
//!
//! // The echo the host receives after the gateway handles it
//! let ack = cmd.clone().into_ack();
//! assert_eq!(ack.kind, PacketKind::Ack);
//! assert_eq!(ack.device, cmd.device);
//! ```

/// Guid reserved for the gateway itself and its onboard peripherals.
///
/// Packets with any other guid are addressed to remote nodes and are not
/// handled by this crate.
pub const GATEWAY_GUID: u32 = 0;

/// What a [`NormalizedPacket`] represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PacketKind {
    /// A reading or status report from a device, flowing upstream.
    DeviceReport,
    /// A command for a device, flowing downstream from the host.
    DeviceCommand,
    /// Echo of a handled command, kind flipped, other fields unchanged.
    Ack,
}

/// Logical device identifier.
///
/// The known onboard peripherals get named variants; anything else is
/// carried as [`Unknown`](Self::Unknown) so routing can report it instead
/// of dropping it on the floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u16", into = "u16"))]
pub enum Device {
    /// Onboard 433MHz radio.
    OnboardRf,
    /// Status indicator LED.
    StatusLed,
    /// "Eyes" indicator LED.
    EyesLed,
    /// A device id this gateway has no handler for.
    Unknown(u16),
}

impl Device {
    /// Raw id of the onboard RF device.
    pub const ONBOARD_RF_ID: u16 = 11;
    /// Raw id of the status LED.
    pub const STATUS_LED_ID: u16 = 1000;
    /// Raw id of the eyes LED.
    pub const EYES_LED_ID: u16 = 1007;

    /// Raw numeric id of this device.
    pub fn id(&self) -> u16 {
        match self {
            Device::OnboardRf => Self::ONBOARD_RF_ID,
            Device::StatusLed => Self::STATUS_LED_ID,
            Device::EyesLed => Self::EYES_LED_ID,
            Device::Unknown(id) => *id,
        }
    }
}

impl From<u16> for Device {
    fn from(id: u16) -> Self {
        match id {
            Device::ONBOARD_RF_ID => Device::OnboardRf,
            Device::STATUS_LED_ID => Device::StatusLed,
            Device::EYES_LED_ID => Device::EyesLed,
            other => Device::Unknown(other),
        }
    }
}

impl From<Device> for u16 {
    fn from(device: Device) -> Self {
        device.id()
    }
}

/// RF protocol variant tag.
///
/// This is a closed enumeration: decoders report which variant they
/// recognized, and outbound commands select an encoder with it. WT450 is
/// receive-only — weather stations transmit it but nothing we drive speaks
/// it — so asking the encoder bank for it yields the unsupported-tag error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Encoding {
    /// Generic fixed-code remotes (PT2262 family).
    Common,
    /// WT450 weather station frames (receive-only).
    Wt450,
    /// Arlec power outlets.
    Arlec,
    /// HomeEasy HE330 v2 switches.
    He330v2,
    /// Oregon Scientific v2.1 sensors.
    Osv2,
    /// bInD doorbells.
    Bind,
}

impl Encoding {
    /// Lowercase protocol name, for logs and wire frames.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Encoding::Common => "common",
            Encoding::Wt450 => "wt450",
            Encoding::Arlec => "arlec",
            Encoding::He330v2 => "he330v2",
            Encoding::Osv2 => "osv2",
            Encoding::Bind => "bind",
        }
    }
}

impl core::fmt::Display for Encoding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command or report payload: a single scalar or a byte array.
///
/// The two shapes are mutually exclusive. Protocols carrying multiple
/// values per frame (temperature plus humidity, say) need the array form;
/// simple switch codes fit in the scalar.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Payload {
    /// Single scalar value (switch code, RGB color, ...).
    Value(u32),
    /// Variable-length byte payload.
    Bytes(Vec<u8>),
}

impl Payload {
    /// True if the payload is the array shape.
    pub fn is_array(&self) -> bool {
        matches!(self, Payload::Bytes(_))
    }

    /// The scalar value, if this is the scalar shape.
    pub fn value(&self) -> Option<u32> {
        match self {
            Payload::Value(v) => Some(*v),
            Payload::Bytes(_) => None,
        }
    }

    /// The byte array, if this is the array shape.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Value(_) => None,
            Payload::Bytes(b) => Some(b),
        }
    }
}

impl Default for Payload {
    fn default() -> Self {
        Payload::Value(0)
    }
}

/// The protocol-agnostic packet exchanged with the upstream transport.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizedPacket {
    /// Report, command, or acknowledgement.
    pub kind: PacketKind,
    /// Origin/destination address; [`GATEWAY_GUID`] means this gateway.
    pub guid: u32,
    /// Logical device the packet concerns.
    pub device: Device,
    /// Scalar or byte-array payload.
    #[cfg_attr(feature = "serde", serde(default))]
    pub payload: Payload,
    /// Protocol variant; only meaningful when `device` is the onboard RF.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub encoding: Option<Encoding>,
    /// Protocol timing-profile parameter; only meaningful for outbound RF.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub timing: Option<u16>,
}

impl NormalizedPacket {
    /// A device report from this gateway (guid 0).
    pub fn device_report(device: Device, payload: Payload) -> Self {
        Self {
            kind: PacketKind::DeviceReport,
            guid: GATEWAY_GUID,
            device,
            payload,
            encoding: None,
            timing: None,
        }
    }

    /// An RF report decoded off the air, tagged with its protocol.
    pub fn rf_report(encoding: Encoding, payload: Payload) -> Self {
        Self {
            kind: PacketKind::DeviceReport,
            guid: GATEWAY_GUID,
            device: Device::OnboardRf,
            payload,
            encoding: Some(encoding),
            timing: None,
        }
    }

    /// An outbound RF command for the onboard transmitter.
    pub fn rf_command(encoding: Encoding, timing: u16, payload: Payload) -> Self {
        Self {
            kind: PacketKind::DeviceCommand,
            guid: GATEWAY_GUID,
            device: Device::OnboardRf,
            payload,
            encoding: Some(encoding),
            timing: Some(timing),
        }
    }

    /// A command addressed to a local (guid 0) device.
    pub fn device_command(device: Device, payload: Payload) -> Self {
        Self {
            kind: PacketKind::DeviceCommand,
            guid: GATEWAY_GUID,
            device,
            payload,
            encoding: None,
            timing: None,
        }
    }

    /// Re-addresses the packet. Builder-style, used when targeting remote
    /// nodes in host-side tooling and tests.
    pub fn with_guid(mut self, guid: u32) -> Self {
        self.guid = guid;
        self
    }

    /// Converts this packet into its acknowledgement echo: kind flipped to
    /// [`PacketKind::Ack`], every other field untouched.
    pub fn into_ack(mut self) -> Self {
        self.kind = PacketKind::Ack;
        self
    }

    /// True if the packet is addressed to this gateway's own peripherals.
    pub fn is_local(&self) -> bool {
        self.guid == GATEWAY_GUID
    }
}
