//! Probe orchestrator: concurrent fan-out with uniform failure handling.
//!
//! Every probe runs under the same contract: its own timeout, neutral
//! default on error, no retries, no shared mutable state beyond the bundle
//! slot it fills. The fan-out as a whole is capped by an overall deadline;
//! when that fires, the bundle is returned with whatever subset of probes
//! managed to complete.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use sitetrust_core::{EmailAuthSignals, HttpSignals, RawProbeBundle, SeoSignals, TransparencySignals};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::dns::DnsProbe;
use crate::http::HttpProbe;
use crate::seo::SeoProbe;
use crate::threat::ThreatListProbe;
use crate::tls::TlsProbe;
use crate::transparency::TransparencyProbe;
use crate::Result;

/// Per-probe timeouts and the overall fan-out deadline.
#[derive(Debug, Clone, Copy)]
pub struct OrchestratorConfig {
    pub http_timeout: Duration,
    pub seo_timeout: Duration,
    pub transparency_timeout: Duration,
    pub email_auth_timeout: Duration,
    pub dnssec_timeout: Duration,
    pub tls_timeout: Duration,
    pub threat_timeout: Duration,
    /// Ceiling over the whole fan-out. On expiry the orchestrator returns
    /// the partial bundle instead of waiting for stragglers.
    pub overall_deadline: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            http_timeout: Duration::from_secs(8),
            seo_timeout: Duration::from_secs(6),
            transparency_timeout: Duration::from_secs(6),
            email_auth_timeout: Duration::from_secs(6),
            dnssec_timeout: Duration::from_secs(3),
            tls_timeout: Duration::from_secs(5),
            threat_timeout: Duration::from_secs(6),
            overall_deadline: Duration::from_secs(10),
        }
    }
}

/// Runs every probe collaborator for a host and assembles the raw bundle.
pub struct ProbeOrchestrator {
    http: HttpProbe,
    seo: SeoProbe,
    transparency: TransparencyProbe,
    dns: DnsProbe,
    tls: TlsProbe,
    threat: ThreatListProbe,
    config: OrchestratorConfig,
}

impl ProbeOrchestrator {
    /// Build with default timeouts. The threat-list probe is enabled only
    /// when an API key is supplied.
    #[must_use]
    pub fn new(threat_api_key: Option<String>) -> Self {
        Self::with_config(threat_api_key, OrchestratorConfig::default())
    }

    #[must_use]
    pub fn with_config(threat_api_key: Option<String>, config: OrchestratorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(format!("sitetrust/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http: HttpProbe::new(client.clone()),
            seo: SeoProbe::new(client.clone()),
            transparency: TransparencyProbe::new(client.clone()),
            dns: DnsProbe::new(),
            tls: TlsProbe::new(),
            threat: ThreatListProbe::new(client, threat_api_key),
            config,
        }
    }

    /// Invoke every probe concurrently and collect the raw signal bundle.
    ///
    /// Never fails: each slot holds either the probe's result or its
    /// neutral default. Probes still in flight when the overall deadline
    /// fires are left to finish in the background; their output is dropped.
    pub async fn collect(&self, host: &str) -> RawProbeBundle {
        let bundle = Arc::new(Mutex::new(RawProbeBundle::default()));
        let mut tasks: Vec<JoinHandle<()>> = Vec::with_capacity(7);

        {
            let probe = self.http.clone();
            let host = host.to_string();
            let out = Arc::clone(&bundle);
            let limit = self.config.http_timeout;
            tasks.push(tokio::spawn(async move {
                let signals =
                    run_probe("http", limit, HttpSignals::default(), probe.run(&host)).await;
                out.lock().await.http = signals;
            }));
        }
        {
            let probe = self.seo.clone();
            let host = host.to_string();
            let out = Arc::clone(&bundle);
            let limit = self.config.seo_timeout;
            tasks.push(tokio::spawn(async move {
                let signals =
                    run_probe("seo", limit, SeoSignals::default(), probe.run(&host)).await;
                out.lock().await.seo = signals;
            }));
        }
        {
            let probe = self.transparency.clone();
            let host = host.to_string();
            let out = Arc::clone(&bundle);
            let limit = self.config.transparency_timeout;
            tasks.push(tokio::spawn(async move {
                let signals = run_probe(
                    "transparency",
                    limit,
                    TransparencySignals::default(),
                    probe.run(&host),
                )
                .await;
                out.lock().await.transparency = signals;
            }));
        }
        {
            let probe = self.dns.clone();
            let host = host.to_string();
            let out = Arc::clone(&bundle);
            let limit = self.config.email_auth_timeout;
            tasks.push(tokio::spawn(async move {
                let signals = run_probe(
                    "email_auth",
                    limit,
                    EmailAuthSignals::default(),
                    probe.email_auth(&host),
                )
                .await;
                out.lock().await.email_auth = signals;
            }));
        }
        {
            let probe = self.dns.clone();
            let host = host.to_string();
            let out = Arc::clone(&bundle);
            let limit = self.config.dnssec_timeout;
            tasks.push(tokio::spawn(async move {
                let dnssec = run_probe("dnssec", limit, false, probe.dnssec(&host)).await;
                out.lock().await.dnssec = dnssec;
            }));
        }
        {
            let probe = self.tls.clone();
            let host = host.to_string();
            let out = Arc::clone(&bundle);
            let limit = self.config.tls_timeout;
            tasks.push(tokio::spawn(async move {
                let days = run_probe(
                    "tls_expiry",
                    limit,
                    None,
                    async { probe.days_to_expiry(&host).await.map(Some) },
                )
                .await;
                out.lock().await.tls_cert_days = days;
            }));
        }
        {
            let probe = self.threat.clone();
            let host = host.to_string();
            let out = Arc::clone(&bundle);
            let limit = self.config.threat_timeout;
            tasks.push(tokio::spawn(async move {
                let flagged = run_probe("threat_list", limit, false, probe.check(&host)).await;
                out.lock().await.threat_flagged = flagged;
            }));
        }

        let deadline = self.config.overall_deadline;
        if tokio::time::timeout(deadline, futures_util::future::join_all(tasks))
            .await
            .is_err()
        {
            warn!(host, ?deadline, "probe fan-out hit overall deadline; returning partial bundle");
        }

        let result = bundle.lock().await.clone();
        result
    }
}

/// The single failure-handling wrapper every probe runs under: a timeout
/// plus neutral-on-failure semantics.
async fn run_probe<T, F>(name: &'static str, limit: Duration, neutral: T, fut: F) -> T
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            debug!(probe = name, error = %e, "probe failed; using neutral value");
            neutral
        }
        Err(_) => {
            debug!(probe = name, ?limit, "probe timed out; using neutral value");
            neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProbeError;

    fn fast_config() -> OrchestratorConfig {
        OrchestratorConfig {
            http_timeout: Duration::from_millis(300),
            seo_timeout: Duration::from_millis(300),
            transparency_timeout: Duration::from_millis(300),
            email_auth_timeout: Duration::from_millis(300),
            dnssec_timeout: Duration::from_millis(300),
            tls_timeout: Duration::from_millis(300),
            threat_timeout: Duration::from_millis(300),
            overall_deadline: Duration::from_secs(2),
        }
    }

    #[tokio::test]
    async fn wrapper_passes_through_success() {
        let value = run_probe("ok", Duration::from_secs(1), 0_i64, async { Ok(42_i64) }).await;
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn wrapper_neutralizes_errors() {
        let value = run_probe("err", Duration::from_secs(1), 7_i64, async {
            Err(ProbeError::Http("boom".into()))
        })
        .await;
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn wrapper_neutralizes_timeouts() {
        let value = run_probe("slow", Duration::from_millis(20), true, async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(false)
        })
        .await;
        assert!(value);
    }

    #[tokio::test]
    async fn failing_probes_yield_the_neutral_bundle() {
        // Reserved TLD: every probe fails or times out quickly, and the
        // bundle that comes back is exactly the all-defaults one.
        let orchestrator = ProbeOrchestrator::with_config(None, fast_config());
        let bundle = orchestrator.collect("host.invalid").await;
        assert_eq!(bundle, RawProbeBundle::default());
    }
}
