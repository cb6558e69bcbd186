//! SEO / metadata presence probe.
//!
//! Parses the homepage for basic metadata hygiene signals and checks
//! whether robots.txt and sitemap.xml are served.

use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use sitetrust_core::SeoSignals;

use crate::{ProbeError, Result};

/// Metadata-presence probe.
#[derive(Clone)]
pub struct SeoProbe {
    client: Client,
    origin: Option<String>,
}

impl SeoProbe {
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

    /// Fetch the homepage and the two well-known crawler files.
    pub async fn run(&self, host: &str) -> Result<SeoSignals> {
        let base = self
            .origin
            .clone()
            .unwrap_or_else(|| format!("https://{host}"));

        let response = self
            .client
            .get(format!("{base}/"))
            .send()
            .await
            .map_err(|e| ProbeError::Http(e.to_string()))?;
        let html = response
            .text()
            .await
            .map_err(|e| ProbeError::Http(e.to_string()))?;

        let mut out = parse_homepage(&html);
        out.has_robots = self.non_empty_ok(&format!("{base}/robots.txt")).await;
        out.has_sitemap = self.non_empty_ok(&format!("{base}/sitemap.xml")).await;
        Ok(out)
    }

    /// 200 with a non-empty body.
    async fn non_empty_ok(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                response.text().await.is_ok_and(|body| !body.is_empty())
            }
            _ => false,
        }
    }
}

/// Extract metadata signals from homepage HTML. Robots/sitemap flags are
/// left at their defaults; they come from separate fetches.
fn parse_homepage(html: &str) -> SeoSignals {
    let doc = Html::parse_document(html);
    SeoSignals {
        has_title: doc
            .select(&sel("title"))
            .next()
            .is_some_and(|el| !el.text().collect::<String>().trim().is_empty()),
        has_meta_description: attr_present(&doc, r#"meta[name="description"]"#, "content"),
        has_meta_robots: attr_present(&doc, r#"meta[name="robots"]"#, "content"),
        has_canonical: attr_present(&doc, r#"link[rel="canonical"]"#, "href"),
        has_open_graph: attr_present(&doc, r#"meta[property="og:title"]"#, "content"),
        has_jsonld: doc
            .select(&sel(r#"script[type="application/ld+json"]"#))
            .next()
            .is_some_and(|el| !el.text().collect::<String>().trim().is_empty()),
        ..SeoSignals::default()
    }
}

fn attr_present(doc: &Html, css: &str, attr: &str) -> bool {
    doc.select(&sel(css))
        .next()
        .and_then(|el| el.value().attr(attr))
        .is_some_and(|v| !v.trim().is_empty())
}

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}
