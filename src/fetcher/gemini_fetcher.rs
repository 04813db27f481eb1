use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, SignatureScheme};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use url::Url;

use crate::app::{Result, StationlogError};
use crate::config::Config;
use crate::fetcher::PageFetcher;

pub const DEFAULT_PORT: u16 = 1965;

/// Responses larger than this are refused.
pub const MAX_RESPONSE_SIZE: u64 = 4 * 1024 * 1024;

/// Header of a Gemini response: `<status> <meta>\r\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHeader {
    pub status: u8,
    pub meta: String,
}

impl ResponseHeader {
    pub fn is_success(&self) -> bool {
        (20..30).contains(&self.status)
    }
}

/// Splits a raw response into its header and body.
pub fn parse_response(address: &str, raw: &[u8]) -> Result<(ResponseHeader, Vec<u8>)> {
    let header_end = raw
        .windows(2)
        .position(|w| w == b"\r\n")
        .ok_or_else(|| StationlogError::fetch(address, "response header is not terminated"))?;

    let line = std::str::from_utf8(&raw[..header_end])
        .map_err(|_| StationlogError::fetch(address, "response header is not UTF-8"))?;
    let (code, meta) = line.split_once(' ').unwrap_or((line, ""));
    let status = code
        .parse::<u8>()
        .ok()
        .filter(|s| (10..70).contains(s))
        .ok_or_else(|| StationlogError::fetch(address, format!("invalid status {:?}", code)))?;

    let header = ResponseHeader {
        status,
        meta: meta.trim().to_string(),
    };
    Ok((header, raw[header_end + 2..].to_vec()))
}

/// True when the leaf certificate's `notAfter` lies before `now`.
pub fn certificate_expired(address: &str, der: &[u8], now: chrono::DateTime<Utc>) -> Result<bool> {
    let (_, cert) = x509_parser::parse_x509_certificate(der)
        .map_err(|e| StationlogError::fetch(address, format!("unreadable certificate: {}", e)))?;
    Ok(cert.validity().not_after.timestamp() < now.timestamp())
}

/// Capsules present self-signed certificates, so the chain is not checked.
/// Handshake signatures still are, and expiry is looked at after connecting.
#[derive(Debug)]
struct AcceptAnyServerCert(Arc<CryptoProvider>);

impl ServerCertVerifier for AcceptAnyServerCert {
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
        verify_tls12_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}

pub struct GeminiFetcher {
    connector: TlsConnector,
    timeout: Duration,
    accept_expired_certificates: bool,
    max_response_size: u64,
}

impl GeminiFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let tls = ClientConfig::builder_with_provider(provider.clone())
            .with_safe_default_protocol_versions()?
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert(provider)))
            .with_no_client_auth();

        Ok(Self {
            connector: TlsConnector::from(Arc::new(tls)),
            timeout: config.timeout(),
            accept_expired_certificates: config.accept_expired_certificates,
            max_response_size: MAX_RESPONSE_SIZE,
        })
    }

    pub fn with_max_response_size(mut self, bytes: u64) -> Self {
        self.max_response_size = bytes;
        self
    }

    async fn request(&self, address: &str) -> Result<String> {
        let url = Url::parse(address)
            .map_err(|e| StationlogError::InvalidAddress(format!("{}: {}", address, e)))?;
        if url.scheme() != "gemini" {
            return Err(StationlogError::InvalidAddress(format!(
                "{}: unsupported scheme {}",
                address,
                url.scheme()
            )));
        }
        let host = url
            .host_str()
            .ok_or_else(|| StationlogError::InvalidAddress(format!("{}: missing host", address)))?
            .to_string();
        let port = url.port().unwrap_or(DEFAULT_PORT);

        let server_name = ServerName::try_from(host.clone())
            .map_err(|e| StationlogError::InvalidAddress(format!("{}: {}", address, e)))?;

        let tcp = TcpStream::connect((host.as_str(), port))
            .await
            .map_err(|e| StationlogError::fetch(address, e))?;
        let mut stream = self
            .connector
            .connect(server_name, tcp)
            .await
            .map_err(|e| StationlogError::fetch(address, e))?;

        self.check_certificate(address, stream.get_ref().1.peer_certificates())?;

        stream
            .write_all(format!("{}\r\n", url).as_bytes())
            .await
            .map_err(|e| StationlogError::fetch(address, e))?;

        let mut raw = Vec::new();
        let limit = self.max_response_size;
        match (&mut stream).take(limit + 1).read_to_end(&mut raw).await {
            Ok(_) => {}
            // Plenty of capsules hang up without a close_notify.
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof && !raw.is_empty() => {}
            Err(e) => return Err(StationlogError::fetch(address, e)),
        }
        if raw.len() as u64 > limit {
            return Err(StationlogError::fetch(address, "response too large"));
        }

        let (header, body) = parse_response(address, &raw)?;
        if !header.is_success() {
            return Err(StationlogError::GeminiStatus {
                address: address.to_string(),
                status: header.status,
                meta: header.meta,
            });
        }
        if body.is_empty() {
            return Err(StationlogError::fetch(address, "empty response body"));
        }

        tracing::debug!(address, bytes = body.len(), mime = %header.meta, "Fetched page");
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    fn check_certificate(&self, address: &str, certs: Option<&[CertificateDer<'_>]>) -> Result<()> {
        let Some(leaf) = certs.and_then(|c| c.first()) else {
            return Ok(());
        };

        if certificate_expired(address, leaf.as_ref(), Utc::now())? {
            if self.accept_expired_certificates {
                tracing::warn!(address, "Accepting expired certificate");
            } else {
                return Err(StationlogError::ExpiredCertificate(address.to_string()));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PageFetcher for GeminiFetcher {
    async fn fetch(&self, address: &str) -> Result<String> {
        match tokio::time::timeout(self.timeout, self.request(address)).await {
            Ok(result) => result,
            Err(_) => Err(StationlogError::Timeout(address.to_string())),
        }
    }
}
