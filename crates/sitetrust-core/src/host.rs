//! Host normalization.
//!
//! Every inbound host string is reduced to a bare lowercase hostname once,
//! at the boundary. The normalized form is the sole join key across vote
//! records, score records, and cache entries.

use crate::error::{CoreError, Result};
use url::Url;

/// Normalize a user-supplied host string.
///
/// Accepts bare hostnames, full URLs, and hostnames with ports or paths.
/// The result is lowercase, carries no scheme/path/query/fragment, and has
/// no trailing dot.
///
/// # Errors
///
/// Returns `CoreError::InvalidHost` when nothing resembling a hostname
/// remains after stripping.
pub fn normalize_host(value: &str) -> Result<String> {
    let trimmed = value.trim().to_lowercase();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidHost(value.to_string()));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.clone()
    } else {
        format!("http://{trimmed}")
    };

    let host = Url::parse(&candidate)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| strip_manually(&trimmed));

    let host = host.trim_end_matches('.').to_string();
    if host.is_empty() {
        return Err(CoreError::InvalidHost(value.to_string()));
    }
    Ok(host)
}

/// Fallback for inputs the URL parser rejects: drop any scheme-like prefix
/// and everything after the authority section.
fn strip_manually(value: &str) -> String {
    let rest = value.split_once("://").map_or(value, |(_, rest)| rest);
    rest.split(['/', '?', '#'])
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hostname_passes_through() {
        assert_eq!(normalize_host("example.com").unwrap(), "example.com");
    }

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize_host("  Example.COM  ").unwrap(), "example.com");
    }

    #[test]
    fn strips_scheme_path_query_fragment() {
        assert_eq!(
            normalize_host("https://Example.com/path?q=1#frag").unwrap(),
            "example.com"
        );
    }

    #[test]
    fn strips_port() {
        assert_eq!(normalize_host("example.com:8443").unwrap(), "example.com");
    }

    #[test]
    fn strips_trailing_dot() {
        assert_eq!(normalize_host("example.com.").unwrap(), "example.com");
    }

    #[test]
    fn rejects_empty_input() {
        assert!(normalize_host("").is_err());
        assert!(normalize_host("   ").is_err());
    }

    #[test]
    fn subdomains_are_kept() {
        assert_eq!(
            normalize_host("http://a.b.example.com/x").unwrap(),
            "a.b.example.com"
        );
    }
}
