//! Error types for gateway operations.

use thiserror::Error;

use crate::packet::Encoding;

/// Boxed collaborator fault, as surfaced through [`GatewayError`].
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for gateway operations.
///
/// Per-collaborator faults keep their own associated error types at the
/// trait level; the dispatcher wraps them here so its public API has a
/// single error surface. None of these are fatal to the control loop — the
/// dispatcher upholds its invariants (receiver restarted, buffer purged)
/// before returning any of them, so the caller can log and keep ticking.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// An outbound RF command named an encoding with no matching encoder.
    ///
    /// The transmit step was suppressed; the acknowledgement was still
    /// emitted.
    #[error("no encoder for protocol '{0}'")]
    UnsupportedEncoding(Encoding),

    /// An outbound RF command carried no encoding tag at all.
    #[error("RF command is missing its encoding tag")]
    MissingEncoding,

    /// A transmit was requested while the radio was already checked out.
    #[error("radio is busy transmitting")]
    RadioBusy,

    /// The receiver failed to start, stop, or purge.
    #[error("receiver fault: {0}")]
    Receiver(#[source] SourceError),

    /// The transmitter failed to initialize or send.
    #[error("transmitter fault: {0}")]
    Transmitter(#[source] SourceError),

    /// The upstream transport rejected a packet.
    #[error("uplink fault: {0}")]
    Uplink(#[source] SourceError),
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_protocol() {
        let err = GatewayError::UnsupportedEncoding(Encoding::Wt450);
        assert_eq!(err.to_string(), "no encoder for protocol 'wt450'");
    }

    #[test]
    fn wrapped_faults_expose_their_source() {
        use std::error::Error;

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "port gone");
        let err = GatewayError::Uplink(Box::new(io));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("port gone"));
    }
}
