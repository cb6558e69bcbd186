//! Environment configuration.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use sitetrust_core::scoring::CommunityParams;
use sitetrust_probes::threat::extract_api_key;

/// Service configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address
    pub bind: SocketAddr,

    /// Lifetime of cached score responses
    pub cache_ttl: Duration,

    /// Community estimator tunables (ramp size, neutral baseline)
    pub community: CommunityParams,

    /// Threat-list API key; absence disables that probe entirely
    pub threat_api_key: Option<String>,

    /// Ceiling over the whole probe fan-out per request
    pub probe_deadline: Duration,

    /// Run without any response cache
    pub cache_disabled: bool,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        let bind_host = env::var("BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env_parse("PORT", 8080);
        let bind = format!("{bind_host}:{port}")
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], port)));

        Self {
            bind,
            cache_ttl: Duration::from_secs(env_parse("CACHE_TTL_SECONDS", 900)),
            community: CommunityParams {
                baseline: env_parse("COMMUNITY_BASELINE", 0.5),
                ramp_n: env_parse("COMMUNITY_RAMP_N", 10),
            },
            threat_api_key: env::var("SAFE_BROWSING_API_KEY")
                .ok()
                .as_deref()
                .and_then(extract_api_key),
            probe_deadline: Duration::from_secs(env_parse("PROBE_DEADLINE_SECONDS", 10)),
            cache_disabled: env::var("CACHE_DISABLED").is_ok(),
        }
    }
}

fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
