use thiserror::Error;

/// Result type alias for probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Errors that can occur inside an individual probe.
///
/// These never cross the orchestrator boundary: the uniform wrapper turns
/// every one of them into the probe's neutral default.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// DNS lookup failed
    #[error("DNS lookup failed: {0}")]
    Dns(String),

    /// TLS connection or handshake failed
    #[error("TLS error: {0}")]
    Tls(String),

    /// Certificate parsing failed
    #[error("certificate error: {0}")]
    Cert(String),
}
