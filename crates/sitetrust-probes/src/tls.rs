//! TLS certificate-expiry probe.
//!
//! Performs a handshake on port 443 and reads the leaf certificate's
//! validity window. Chain verification is intentionally skipped: the probe
//! inspects the certificate, it does not authenticate the peer, and an
//! untrusted chain should still yield an expiry reading.

use std::sync::Arc;

use chrono::Utc;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{ring, verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, SignatureScheme};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;

use crate::{ProbeError, Result};

const HTTPS_PORT: u16 = 443;
const SECONDS_PER_DAY: i64 = 86_400;

/// Certificate-expiry probe.
#[derive(Clone)]
pub struct TlsProbe {
    connector: TlsConnector,
}

impl TlsProbe {
    #[must_use]
    pub fn new() -> Self {
        let provider = Arc::new(ring::default_provider());
        let config = ClientConfig::builder_with_provider(Arc::clone(&provider))
            .with_safe_default_protocol_versions()
            .expect("default TLS versions supported")
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(ExpiryOnlyVerifier { provider }))
            .with_no_client_auth();

        Self {
            connector: TlsConnector::from(Arc::new(config)),
        }
    }

    /// Days until the leaf certificate expires, floored at zero.
    pub async fn days_to_expiry(&self, host: &str) -> Result<i64> {
        let stream = TcpStream::connect((host, HTTPS_PORT))
            .await
            .map_err(|e| ProbeError::Tls(format!("connect {host}:{HTTPS_PORT}: {e}")))?;
        let name = ServerName::try_from(host.to_string())
            .map_err(|e| ProbeError::Tls(format!("server name {host}: {e}")))?;
        let tls = self
            .connector
            .connect(name, stream)
            .await
            .map_err(|e| ProbeError::Tls(format!("handshake with {host}: {e}")))?;

        let (_, connection) = tls.get_ref();
        let leaf = connection
            .peer_certificates()
            .and_then(|certs| certs.first())
            .ok_or_else(|| ProbeError::Tls(format!("{host} presented no certificate")))?;

        let (_, cert) = x509_parser::parse_x509_certificate(leaf.as_ref())
            .map_err(|e| ProbeError::Cert(e.to_string()))?;
        let not_after = cert.validity().not_after.timestamp();
        let days = (not_after - Utc::now().timestamp()) / SECONDS_PER_DAY;
        Ok(days.max(0))
    }
}

impl Default for TlsProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Accepts any chain; signature checks still run so the handshake itself
/// stays honest.
#[derive(Debug)]
struct ExpiryOnlyVerifier {
    provider: Arc<CryptoProvider>,
}

impl ServerCertVerifier for ExpiryOnlyVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}
