//! Threat-list lookup probe.
//!
//! Queries a Safe-Browsing-compatible `threatMatches:find` endpoint for the
//! host under both schemes. The probe is a capability: without an API key
//! it is constructed in its `Disabled` form and uniformly reports
//! `flagged: false`, so no caller ever checks for key presence.

use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use crate::{ProbeError, Result};

const DEFAULT_ENDPOINT: &str = "https://safebrowsing.googleapis.com/v4/threatMatches:find";

/// Reputation lookup against an external threat list.
#[derive(Clone)]
pub enum ThreatListProbe {
    Enabled {
        client: Client,
        api_key: String,
        endpoint: String,
    },
    Disabled,
}

impl ThreatListProbe {
    /// Enabled when an API key is configured, no-op otherwise.
    #[must_use]
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        api_key.map_or(Self::Disabled, |api_key| Self::Enabled {
            client,
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        })
    }

    /// Point the probe at a different endpoint (useful for testing).
    #[must_use]
    pub fn with_endpoint(self, endpoint: impl Into<String>) -> Self {
        match self {
            Self::Enabled {
                client, api_key, ..
            } => Self::Enabled {
                client,
                api_key,
                endpoint: endpoint.into(),
            },
            Self::Disabled => Self::Disabled,
        }
    }

    /// Whether the host appears on the threat list.
    pub async fn check(&self, host: &str) -> Result<bool> {
        let Self::Enabled {
            client,
            api_key,
            endpoint,
        } = self
        else {
            return Ok(false);
        };

        let body = json!({
            "client": {
                "clientId": "sitetrust",
                "clientVersion": env!("CARGO_PKG_VERSION"),
            },
            "threatInfo": {
                "threatTypes": [
                    "MALWARE",
                    "SOCIAL_ENGINEERING",
                    "UNWANTED_SOFTWARE",
                    "POTENTIALLY_HARMFUL_APPLICATION",
                ],
                "platformTypes": ["ANY_PLATFORM"],
                "threatEntryTypes": ["URL"],
                "threatEntries": [
                    {"url": format!("http://{host}")},
                    {"url": format!("https://{host}")},
                ],
            },
        });

        let response = client
            .post(format!("{endpoint}?key={api_key}"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProbeError::Http(e.to_string()))?;

        if !response.status().is_success() {
            debug!(host, status = response.status().as_u16(), "threat lookup non-success");
            return Ok(false);
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ProbeError::Http(e.to_string()))?;
        Ok(payload
            .get("matches")
            .and_then(Value::as_array)
            .is_some_and(|matches| !matches.is_empty()))
    }
}

/// Pull a usable API key out of operator-supplied configuration, which in
/// practice arrives as a bare key, a `...key=XXX` fragment, or a full
/// endpoint URL with a `key` query parameter.
pub fn extract_api_key(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    let lower = value.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Url::parse(value).ok().and_then(|u| {
            u.query_pairs()
                .find(|(k, _)| k == "key")
                .map(|(_, v)| v.into_owned())
        });
    }
    if value.contains("key=") && !value.contains(char::is_whitespace) {
        return value.split_once("key=").map(|(_, key)| key.to_string());
    }
    Some(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn enabled(server: &MockServer) -> ThreatListProbe {
        ThreatListProbe::new(Client::new(), Some("test-key".into()))
            .with_endpoint(format!("{}/v4/threatMatches:find", server.uri()))
    }

    #[tokio::test]
    async fn disabled_probe_never_flags() {
        let probe = ThreatListProbe::new(Client::new(), None);
        assert!(!probe.check("malware.example").await.unwrap());
    }

    #[tokio::test]
    async fn flags_host_with_matches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v4/threatMatches:find"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "matches": [{"threatType": "MALWARE"}]
            })))
            .mount(&server)
            .await;

        assert!(enabled(&server).check("malware.example").await.unwrap());
    }

    #[tokio::test]
    async fn empty_response_means_clean() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v4/threatMatches:find"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        assert!(!enabled(&server).check("clean.example").await.unwrap());
    }

    #[tokio::test]
    async fn non_success_status_reads_as_clean() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v4/threatMatches:find"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        assert!(!enabled(&server).check("any.example").await.unwrap());
    }

    #[test]
    fn api_key_extraction_handles_operator_formats() {
        assert_eq!(extract_api_key("raw-key-123"), Some("raw-key-123".into()));
        assert_eq!(
            extract_api_key("https://safebrowsing.googleapis.com/v4/threatMatches:find?key=abc"),
            Some("abc".into())
        );
        assert_eq!(extract_api_key("endpoint?key=xyz"), Some("xyz".into()));
        assert_eq!(extract_api_key(""), None);
        assert_eq!(extract_api_key("   "), None);
        // URL without a key parameter yields nothing usable.
        assert_eq!(extract_api_key("https://example.com/lookup"), None);
    }
}
