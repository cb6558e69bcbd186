//! DNS probes: email authentication (SPF/DMARC/MX) and DNSSEC.
//!
//! The system resolver is a capability: if it cannot be constructed the
//! probe still exists and every lookup reports its neutral default, so
//! callers never special-case resolver absence.

use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::TokioResolver;
use sitetrust_core::EmailAuthSignals;
use tracing::{debug, warn};

use crate::Result;

/// DNS-layer probe for email authentication and DNSSEC signals.
#[derive(Clone)]
pub struct DnsProbe {
    resolver: Option<TokioResolver>,
}

impl DnsProbe {
    /// Build against the system resolver configuration.
    #[must_use]
    pub fn new() -> Self {
        let resolver = match TokioResolver::builder_tokio() {
            Ok(builder) => Some(builder.build()),
            Err(e) => {
                warn!(error = %e, "system resolver unavailable; DNS probes return neutral defaults");
                None
            }
        };
        Self { resolver }
    }

    /// SPF at the apex, DMARC at `_dmarc.`, and MX presence.
    pub async fn email_auth(&self, host: &str) -> Result<EmailAuthSignals> {
        let Some(resolver) = &self.resolver else {
            return Ok(EmailAuthSignals::default());
        };

        let mut out = EmailAuthSignals::default();

        out.mx = resolver
            .mx_lookup(host)
            .await
            .is_ok_and(|lookup| lookup.iter().next().is_some());

        let apex_txt = Self::txt_strings(resolver, host).await;
        (out.spf, out.spf_strict) = spf_signals(&apex_txt);

        let dmarc_txt = Self::txt_strings(resolver, &format!("_dmarc.{host}")).await;
        (out.dmarc, out.dmarc_policy) = dmarc_signals(&dmarc_txt);

        Ok(out)
    }

    /// DS records at the zone apex indicate a signed delegation.
    pub async fn dnssec(&self, host: &str) -> Result<bool> {
        let Some(resolver) = &self.resolver else {
            return Ok(false);
        };
        Ok(resolver
            .lookup(host, RecordType::DS)
            .await
            .is_ok_and(|lookup| lookup.iter().next().is_some()))
    }

    /// All TXT strings for a name, each record's character-strings joined.
    /// NXDOMAIN and lookup failures read as "no records".
    async fn txt_strings(resolver: &TokioResolver, name: &str) -> Vec<String> {
        match resolver.txt_lookup(name).await {
            Ok(lookup) => lookup
                .iter()
                .map(|txt| {
                    txt.txt_data()
                        .iter()
                        .map(|segment| String::from_utf8_lossy(segment))
                        .collect::<String>()
                })
                .collect(),
            Err(e) => {
                debug!(name, error = %e, "TXT lookup failed");
                Vec::new()
            }
        }
    }
}

impl Default for DnsProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// First SPF record wins: (present, ends in hard-fail).
fn spf_signals(txts: &[String]) -> (bool, bool) {
    for txt in txts {
        if txt.to_lowercase().starts_with("v=spf1") {
            return (true, txt.contains("-all"));
        }
    }
    (false, false)
}

/// First DMARC record wins: (present, parsed `p=` policy).
fn dmarc_signals(txts: &[String]) -> (bool, Option<String>) {
    for txt in txts {
        if txt.to_lowercase().starts_with("v=dmarc1") {
            return (true, parse_dmarc_policy(txt));
        }
    }
    (false, None)
}

/// Pull the `p=` tag out of a semicolon-delimited DMARC record.
fn parse_dmarc_policy(record: &str) -> Option<String> {
    record.split(';').map(str::trim).find_map(|tag| {
        let (key, value) = tag.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("p") {
            Some(value.trim().to_lowercase())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spf_detects_record_and_hard_fail() {
        let txts = vec![
            "google-site-verification=abc123".to_string(),
            "v=spf1 include:_spf.example.com -all".to_string(),
        ];
        assert_eq!(spf_signals(&txts), (true, true));

        let soft = vec!["v=spf1 include:_spf.example.com ~all".to_string()];
        assert_eq!(spf_signals(&soft), (true, false));

        assert_eq!(spf_signals(&[]), (false, false));
    }

    #[test]
    fn dmarc_parses_policy_tag() {
        let txts = vec!["v=DMARC1; p=reject; rua=mailto:d@example.com".to_string()];
        assert_eq!(dmarc_signals(&txts), (true, Some("reject".into())));

        let none = vec!["v=DMARC1;p=none".to_string()];
        assert_eq!(dmarc_signals(&none), (true, Some("none".into())));

        let missing = vec!["v=DMARC1; rua=mailto:d@example.com".to_string()];
        assert_eq!(dmarc_signals(&missing), (true, None));
    }

    #[test]
    fn dmarc_policy_is_lowercased() {
        assert_eq!(
            parse_dmarc_policy("v=DMARC1; P=QUARANTINE"),
            Some("quarantine".into())
        );
    }

    #[test]
    fn unrelated_txt_records_are_ignored() {
        let txts = vec!["v=verification".to_string(), "hello world".to_string()];
        assert_eq!(dmarc_signals(&txts), (false, None));
        assert_eq!(spf_signals(&txts), (false, false));
    }
}
