//! Upstream transport trait.

use crate::packet::NormalizedPacket;

/// The sole channel to the upstream host.
///
/// Carries decoded RF reports, heartbeat status, and command
/// acknowledgements. Delivery is fire-and-forget: the host never
/// acknowledges, and the gateway never retries — callers decide per path
/// whether a send failure matters (heartbeat reports shrug it off, command
/// acknowledgements propagate it).
pub trait Uplink {
    /// Error type for transport failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sends one packet upstream.
    fn send(&mut self, packet: &NormalizedPacket) -> Result<(), Self::Error>;
}
