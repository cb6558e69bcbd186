//! Signal aggregation: raw probe outputs to normalized S/C/T sub-scores.
//!
//! Deterministic and pure. The constants here are the scoring model; change
//! them and the model version changes.

use crate::types::RawProbeBundle;

/// Hostname substrings that commonly show up in phishing and bait domains.
const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "free", "deal", "cheap", "login", "verify", "gift", "win", "bonus",
];

/// TLDs with disproportionate abuse rates.
const RISKY_TLDS: &[&str] = &["zip", "mov", "xyz", "top"];

/// Restricted-registration TLDs.
const TRUSTED_TLDS: &[&str] = &["gov", "edu", "mil"];

/// Security posture S: HTTPS reachability, header hygiene, DNSSEC, and
/// certificate lifetime.
pub fn security_score(bundle: &RawProbeBundle) -> f64 {
    let http = &bundle.http;
    let mut s: f64 = if http.https_ok { 0.9 } else { 0.5 };

    if http.http_upgrades_https {
        s += 0.05;
    }
    for present in [
        http.hsts,
        http.csp,
        http.xcto,
        http.xfo,
        http.refpol,
        http.permspol,
    ] {
        if present {
            s += 0.02;
        }
    }
    if bundle.dnssec {
        s += 0.03;
    }
    if let Some(days) = bundle.tls_cert_days {
        if days >= 60 {
            s += 0.02;
        } else if days <= 7 {
            s -= 0.05;
        }
    }
    s.clamp(0.0, 1.0)
}

/// Static credibility heuristic computed purely from the hostname string.
pub fn domain_heuristic(host: &str) -> f64 {
    let h = host.to_lowercase();
    let mut c: f64 = 0.6;

    if SUSPICIOUS_KEYWORDS.iter().any(|k| h.contains(k)) {
        c -= 0.15;
    }
    if RISKY_TLDS.iter().any(|t| has_tld(&h, t)) {
        c -= 0.1;
    }
    if has_tld(&h, "org") {
        c += 0.05;
    }
    if TRUSTED_TLDS.iter().any(|t| has_tld(&h, t)) {
        c += 0.25;
    }
    if h.split('.').count() >= 4 {
        c -= 0.05;
    }
    if h.contains("--") || h.matches('-').count() >= 3 {
        c -= 0.05;
    }
    if h.len() > 60 {
        c -= 0.05;
    }
    c.clamp(0.0, 1.0)
}

/// Credibility C: domain heuristic, threat-list penalty, then small bonuses
/// for basic metadata hygiene (seven checks; meta-robots is not one of them).
#[allow(clippy::cast_precision_loss)]
pub fn credibility_score(host: &str, bundle: &RawProbeBundle) -> f64 {
    let mut c = domain_heuristic(host);

    if bundle.threat_flagged {
        c = (c - 0.3).max(0.0);
    }

    let seo = &bundle.seo;
    let bonuses = [
        seo.has_title,
        seo.has_meta_description,
        seo.has_canonical,
        seo.has_open_graph,
        seo.has_jsonld,
        seo.has_robots,
        seo.has_sitemap,
    ]
    .iter()
    .filter(|present| **present)
    .count();

    (c + 0.01 * bonuses as f64).min(1.0)
}

/// Transparency T: one hit per discovered policy page, one per email-auth
/// signal, plus bonuses for enforcing DMARC/SPF policies.
#[allow(clippy::cast_precision_loss)]
pub fn transparency_score(bundle: &RawProbeBundle) -> f64 {
    let mut hits = bundle.transparency.hits();

    let email = &bundle.email_auth;
    hits += [email.spf, email.dmarc, email.mx]
        .iter()
        .filter(|present| **present)
        .count();
    if matches!(email.dmarc_policy.as_deref(), Some("reject" | "quarantine")) {
        hits += 1;
    }
    if email.spf_strict {
        hits += 1;
    }

    (0.4 + 0.1 * hits as f64).min(1.0)
}

/// True when `host` ends in `.{tld}`.
fn has_tld(host: &str, tld: &str) -> bool {
    host.strip_suffix(tld)
        .is_some_and(|rest| rest.ends_with('.'))
}
