//! Gateway configuration.
//!
//! Uses `heapless::String` for the name field so the same config struct
//! works on allocation-averse targets.
//!
//! # Example
//!
//! ```rust
//! use rs_rfgate::GatewayConfig;
//!
//! // Use defaults
//! let config = GatewayConfig::default();
//! assert_eq!(config.transmit_repeats, 5);
//!
//! // Or customize
//! let config = GatewayConfig::default()
//!     .with_transmit_repeats(8)
//!     .with_heartbeat_ms(30_000);
//! ```

use heapless::String as HString;

/// Maximum length of the device name string.
pub const MAX_NAME_LEN: usize = 32;

/// Type alias for the device name.
pub type DeviceName = HString<MAX_NAME_LEN>;

/// Gateway dispatcher configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GatewayConfig {
    /// How many times each encoded packet is transmitted.
    ///
    /// RF links are lossy; receivers latch onto whichever repetition
    /// arrives clean. The stock value of 5 suits the supported protocols.
    pub transmit_repeats: u8,

    /// Heartbeat status-report interval in milliseconds.
    ///
    /// Consumed by [`IntervalHeartbeat`](crate::hal::IntervalHeartbeat);
    /// dispatchers wired to an external heartbeat ignore it.
    pub heartbeat_ms: u32,

    /// Human-readable device name, used for log context.
    pub device_name: DeviceName,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        let mut device_name = DeviceName::new();
        let _ = device_name.push_str("rfgate");
        Self {
            transmit_repeats: 5,
            heartbeat_ms: 60_000,
            device_name,
        }
    }
}

impl GatewayConfig {
    /// Set the transmit repeat count.
    pub fn with_transmit_repeats(mut self, repeats: u8) -> Self {
        self.transmit_repeats = repeats;
        self
    }

    /// Set the heartbeat interval in milliseconds.
    pub fn with_heartbeat_ms(mut self, heartbeat_ms: u32) -> Self {
        self.heartbeat_ms = heartbeat_ms;
        self
    }

    /// Set the device name, truncating at [`MAX_NAME_LEN`] bytes.
    pub fn with_device_name(mut self, name: &str) -> Self {
        self.device_name = DeviceName::new();
        let take = name
            .char_indices()
            .take_while(|(i, c)| i + c.len_utf8() <= MAX_NAME_LEN)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        let _ = self.device_name.push_str(&name[..take]);
        self
    }
}
