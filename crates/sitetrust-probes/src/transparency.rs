//! Transparency-page discovery probe.
//!
//! Checks well-known paths whose presence signals organizational
//! accountability: policy pages, contact/about pages, and the security.txt
//! and humans.txt conventions. Within a path group the first reachable
//! candidate wins; groups are checked concurrently.

use reqwest::Client;
use sitetrust_core::TransparencySignals;

use crate::Result;

/// Well-known path probe.
#[derive(Clone)]
pub struct TransparencyProbe {
    client: Client,
    origin: Option<String>,
}

impl TransparencyProbe {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            origin: None,
        }
    }

    /// Override the `https://{host}` origin (useful for testing).
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub async fn run(&self, host: &str) -> Result<TransparencySignals> {
        let base = self
            .origin
            .clone()
            .unwrap_or_else(|| format!("https://{host}"));

        let (
            privacy,
            terms,
            about,
            contact,
            imprint,
            security_page,
            bug_bounty,
            security_txt,
            humans_txt,
        ) = tokio::join!(
            self.any_reachable(&base, &["/privacy", "/privacy-policy", "/policies/privacy"]),
            self.any_reachable(&base, &["/terms", "/terms-of-service", "/tos", "/legal/terms"]),
            self.any_reachable(&base, &["/about", "/about-us"]),
            self.any_reachable(&base, &["/contact", "/contact-us"]),
            self.any_reachable(&base, &["/imprint", "/impressum"]),
            self.any_reachable(&base, &["/security", "/security-policy"]),
            self.any_reachable(&base, &["/bug-bounty", "/security#bounty"]),
            self.reachable(&base, "/.well-known/security.txt"),
            self.reachable(&base, "/humans.txt"),
        );

        Ok(TransparencySignals {
            privacy,
            terms,
            about,
            contact,
            imprint,
            security_page,
            bug_bounty,
            security_txt,
            humans_txt,
        })
    }

    async fn any_reachable(&self, base: &str, paths: &[&str]) -> bool {
        for path in paths {
            if self.reachable(base, path).await {
                return true;
            }
        }
        false
    }

    async fn reachable(&self, base: &str, path: &str) -> bool {
        self.client
            .get(format!("{base}{path}"))
            .send()
            .await
            .is_ok_and(|response| response.status().as_u16() < 400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn discovers_mounted_pages_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/privacy-policy"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/.well-known/security.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Contact: mailto:sec@example.com"))
            .mount(&server)
            .await;
        // everything else -> 404

        let probe = TransparencyProbe::new(Client::new()).with_origin(server.uri());
        let out = probe.run("example.com").await.unwrap();

        assert!(out.privacy);
        assert!(out.security_txt);
        assert!(!out.terms);
        assert!(!out.about);
        assert!(!out.bug_bounty);
        assert!(!out.humans_txt);
        assert_eq!(out.hits(), 2);
    }

    #[tokio::test]
    async fn redirects_count_as_reachable() {
        let server = MockServer::start().await;
        // 3xx below 400 counts; reqwest follows and lands on the 200.
        Mock::given(method("GET"))
            .and(path("/about"))
            .respond_with(ResponseTemplate::new(301).insert_header("location", "/about-us"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/about-us"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let probe = TransparencyProbe::new(Client::new()).with_origin(server.uri());
        let out = probe.run("example.com").await.unwrap();
        assert!(out.about);
    }
}
