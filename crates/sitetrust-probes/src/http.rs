//! HTTP security-header probe.
//!
//! Fetches the host over HTTPS and plain HTTP, recording reachability,
//! response headers that indicate security hygiene, and whether plain HTTP
//! redirects to an HTTPS URL.

use reqwest::header::{self, AsHeaderName, HeaderMap};
use reqwest::Client;
use sitetrust_core::HttpSignals;
use tracing::debug;

use crate::Result;

/// Security-header and reachability probe.
#[derive(Clone)]
pub struct HttpProbe {
    client: Client,
    origin: Option<String>,
}

impl HttpProbe {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            origin: None,
        }
    }

    /// Override the `https://{host}` / `http://{host}` origins with a fixed
    /// one (useful for testing).
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Fetch both schemes and collect signals. Per-scheme failures are
    /// recorded as unreachable rather than propagated.
    pub async fn run(&self, host: &str) -> Result<HttpSignals> {
        let https_url = self
            .origin
            .clone()
            .unwrap_or_else(|| format!("https://{host}"));
        let http_url = self
            .origin
            .clone()
            .unwrap_or_else(|| format!("http://{host}"));

        let mut out = HttpSignals::default();

        match self.client.get(&https_url).send().await {
            Ok(response) => {
                out.https_ok = true;
                out.status = Some(response.status().as_u16());
                collect_headers(response.headers(), &mut out);
            }
            Err(e) => debug!(host, error = %e, "HTTPS fetch failed"),
        }

        match self.client.get(&http_url).send().await {
            Ok(response) => {
                out.http_ok = true;
                out.http_upgrades_https = response.url().scheme() == "https";
                if out.status.is_none() {
                    out.status = Some(response.status().as_u16());
                }
            }
            Err(e) => debug!(host, error = %e, "HTTP fetch failed"),
        }

        Ok(out)
    }
}

fn collect_headers(headers: &HeaderMap, out: &mut HttpSignals) {
    out.hsts = headers.contains_key(header::STRICT_TRANSPORT_SECURITY);
    out.csp = present(headers, header::CONTENT_SECURITY_POLICY);
    out.xcto = headers
        .get(header::X_CONTENT_TYPE_OPTIONS)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("nosniff"));
    out.xfo = present(headers, header::X_FRAME_OPTIONS);
    out.refpol = present(headers, header::REFERRER_POLICY);
    out.permspol = present(headers, "permissions-policy");
    out.xxss = present(headers, header::X_XSS_PROTECTION);
}

fn present(headers: &HeaderMap, name: impl AsHeaderName) -> bool {
    headers.get(name).is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn collects_security_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("strict-transport-security", "max-age=63072000")
                    .insert_header("x-content-type-options", "nosniff")
                    .insert_header("x-frame-options", "DENY")
                    .insert_header("referrer-policy", "no-referrer"),
            )
            .mount(&server)
            .await;

        let probe = HttpProbe::new(Client::new()).with_origin(server.uri());
        let out = probe.run("example.com").await.unwrap();

        assert!(out.https_ok);
        assert!(out.http_ok);
        assert_eq!(out.status, Some(200));
        assert!(out.hsts);
        assert!(out.xcto);
        assert!(out.xfo);
        assert!(out.refpol);
        assert!(!out.csp);
        assert!(!out.permspol);
        assert!(!out.http_upgrades_https);
    }

    #[tokio::test]
    async fn nosniff_comparison_is_case_insensitive() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).insert_header("x-content-type-options", "NoSniff"))
            .mount(&server)
            .await;

        let probe = HttpProbe::new(Client::new()).with_origin(server.uri());
        let out = probe.run("example.com").await.unwrap();
        assert!(out.xcto);
    }

    #[tokio::test]
    async fn unreachable_host_reports_nothing() {
        // Reserved TLD: resolution fails fast, both schemes unreachable.
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(500))
            .build()
            .unwrap();
        let out = HttpProbe::new(client).run("host.invalid").await.unwrap();
        assert_eq!(out, HttpSignals::default());
    }
}
