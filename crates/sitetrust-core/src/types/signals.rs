//! Raw probe signal contracts.
//!
//! Each probe collaborator fills one of these structs; `Default` for every
//! type is the probe's documented neutral value, so a failed or absent
//! probe contributes exactly the default.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Security-header and reachability signals from the HTTP probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSignals {
    /// Plain-HTTP fetch succeeded
    pub http_ok: bool,
    /// HTTPS fetch succeeded
    pub https_ok: bool,
    /// Final response status, HTTPS preferred
    pub status: Option<u16>,
    /// Strict-Transport-Security present
    pub hsts: bool,
    /// Content-Security-Policy present
    pub csp: bool,
    /// X-Content-Type-Options is `nosniff`
    pub xcto: bool,
    /// X-Frame-Options present
    pub xfo: bool,
    /// Referrer-Policy present
    pub refpol: bool,
    /// Permissions-Policy present
    pub permspol: bool,
    /// Legacy X-XSS-Protection present (surfaced, not scored)
    pub xxss: bool,
    /// Plain-HTTP request ended up on an HTTPS URL
    pub http_upgrades_https: bool,
}

/// Metadata-presence signals from the SEO probe.
///
/// `has_meta_robots` is collected for the explain surface but does not feed
/// the credibility sub-score; the seven scored checks are the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoSignals {
    pub has_title: bool,
    pub has_meta_description: bool,
    pub has_canonical: bool,
    pub has_robots: bool,
    pub has_meta_robots: bool,
    pub has_open_graph: bool,
    pub has_jsonld: bool,
    pub has_sitemap: bool,
}

/// Well-known transparency pages discovered on the site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransparencySignals {
    pub privacy: bool,
    pub terms: bool,
    pub about: bool,
    pub contact: bool,
    pub imprint: bool,
    pub security_page: bool,
    pub bug_bounty: bool,
    pub security_txt: bool,
    pub humans_txt: bool,
}

impl TransparencySignals {
    /// Number of discovered pages.
    pub fn hits(&self) -> usize {
        [
            self.privacy,
            self.terms,
            self.about,
            self.contact,
            self.imprint,
            self.security_page,
            self.bug_bounty,
            self.security_txt,
            self.humans_txt,
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}

/// Email-authentication signals from the DNS probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAuthSignals {
    /// SPF TXT record at the apex
    pub spf: bool,
    /// DMARC TXT record at `_dmarc.`
    pub dmarc: bool,
    /// At least one MX record
    pub mx: bool,
    /// Parsed DMARC `p=` policy, when present
    pub dmarc_policy: Option<String>,
    /// SPF record carries a hard-fail `-all` qualifier
    pub spf_strict: bool,
}

/// Unified bundle of raw probe outputs for one host.
///
/// Assembled by the orchestrator, consumed by the signal aggregator and the
/// explain surface. Transient -- never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProbeBundle {
    pub http: HttpSignals,
    pub seo: SeoSignals,
    pub transparency: TransparencySignals,
    pub email_auth: EmailAuthSignals,
    /// DS records exist at the zone apex
    pub dnssec: bool,
    /// Days until the TLS leaf certificate expires, when known
    pub tls_cert_days: Option<i64>,
    /// Host appears on the configured threat list
    pub threat_flagged: bool,
}

impl RawProbeBundle {
    /// Flatten every raw probe output into `(key, value)` pairs for the
    /// explain surface. Key order is stable.
    pub fn signals(&self) -> Vec<(String, Value)> {
        let mut out: Vec<(String, Value)> = vec![
            ("https_ok".into(), json!(self.http.https_ok)),
            ("http_ok".into(), json!(self.http.http_ok)),
            ("status".into(), json!(self.http.status)),
            ("hsts".into(), json!(self.http.hsts)),
            ("csp".into(), json!(self.http.csp)),
            ("xcto".into(), json!(self.http.xcto)),
            ("xfo".into(), json!(self.http.xfo)),
            ("refpol".into(), json!(self.http.refpol)),
            ("permspol".into(), json!(self.http.permspol)),
            ("xxss".into(), json!(self.http.xxss)),
            (
                "http_upgrades_https".into(),
                json!(self.http.http_upgrades_https),
            ),
            ("dnssec".into(), json!(self.dnssec)),
        ];

        let t = &self.transparency;
        for (key, present) in [
            ("privacy", t.privacy),
            ("terms", t.terms),
            ("about", t.about),
            ("contact", t.contact),
            ("imprint", t.imprint),
            ("security_page", t.security_page),
            ("bug_bounty", t.bug_bounty),
            ("security_txt", t.security_txt),
            ("humans_txt", t.humans_txt),
        ] {
            out.push((format!("transparency_{key}"), json!(present)));
        }

        let e = &self.email_auth;
        out.push(("email_spf".into(), json!(e.spf)));
        out.push(("email_dmarc".into(), json!(e.dmarc)));
        out.push(("email_mx".into(), json!(e.mx)));
        out.push((
            "email_dmarc_policy".into(),
            json!(e.dmarc_policy.as_deref().unwrap_or("")),
        ));
        out.push(("email_spf_strict".into(), json!(e.spf_strict)));

        out.push(("tls_cert_days_to_expire".into(), json!(self.tls_cert_days)));
        out.push(("threat_list_flagged".into(), json!(self.threat_flagged)));

        let s = &self.seo;
        for (key, present) in [
            ("has_title", s.has_title),
            ("has_meta_description", s.has_meta_description),
            ("has_canonical", s.has_canonical),
            ("has_robots", s.has_robots),
            ("has_meta_robots", s.has_meta_robots),
            ("has_open_graph", s.has_open_graph),
            ("has_jsonld", s.has_jsonld),
            ("has_sitemap", s.has_sitemap),
        ] {
            out.push((format!("seo_{key}"), json!(present)));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bundle_is_neutral() {
        let bundle = RawProbeBundle::default();
        assert!(!bundle.http.https_ok);
        assert!(!bundle.dnssec);
        assert!(!bundle.threat_flagged);
        assert_eq!(bundle.tls_cert_days, None);
        assert_eq!(bundle.transparency.hits(), 0);
    }

    #[test]
    fn signals_enumerate_every_probe_output() {
        let bundle = RawProbeBundle::default();
        let signals = bundle.signals();
        // 12 http/dnssec + 9 transparency + 5 email + 2 tls/threat + 8 seo
        assert_eq!(signals.len(), 36);
        let keys: Vec<&str> = signals.iter().map(|(k, _)| k.as_str()).collect();
        assert!(keys.contains(&"https_ok"));
        assert!(keys.contains(&"transparency_security_txt"));
        assert!(keys.contains(&"email_dmarc_policy"));
        assert!(keys.contains(&"tls_cert_days_to_expire"));
        assert!(keys.contains(&"seo_has_jsonld"));
    }
}
