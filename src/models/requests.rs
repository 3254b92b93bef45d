//! Request DTOs for the checker API
//!
//! Defines the structure of incoming parameters and the target address
//! parser shared by the probe endpoint and the landing page.

use serde::Deserialize;

use crate::error::{AppError, Result};

/// Form body for the probe endpoint (POST /api)
///
/// # Fields
/// - `ip_port`: target address as `IP[:PORT]`; the port falls back to the
///   resolving game's default when absent
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeRequest {
    /// Target address as `IP[:PORT]`
    pub ip_port: String,
}

/// Query parameters accepted by the landing page (GET /) to pre-fill the
/// displayed target.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrefillQuery {
    /// Combined `ip[:port]` form; takes precedence over `ip`/`port`
    pub url: Option<String>,
    /// Explicit target IP
    pub ip: Option<String>,
    /// Explicit target port
    pub port: Option<String>,
}

// == Target ==
/// A fully resolved probe target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// IP address or hostname to probe
    pub ip: String,
    /// UDP port to probe
    pub port: u16,
}

impl Target {
    // == Parse ==
    /// Parses an `IP[:PORT]` string, falling back to `default_port` when
    /// the port is absent or empty (`"1.2.3.4"` and `"1.2.3.4:"` both use
    /// the default).
    ///
    /// A blank IP or a non-numeric port is a parse failure; such input is
    /// rejected before any cache lookup or network I/O happens.
    pub fn parse(raw: &str, default_port: u16) -> Result<Self> {
        let raw = raw.trim();
        let (ip, port_part) = match raw.split_once(':') {
            Some((ip, port)) => (ip, Some(port)),
            None => (raw, None),
        };

        if ip.is_empty() {
            return Err(AppError::InvalidTarget("empty address".to_string()));
        }

        let port = match port_part {
            Some("") | None => default_port,
            Some(p) => p
                .parse::<u16>()
                .map_err(|_| AppError::InvalidTarget(format!("bad port '{}'", p)))?,
        };

        Ok(Self {
            ip: ip.to_string(),
            port,
        })
    }

    // == Key ==
    /// Canonical `ip:port` cache key.
    ///
    /// Equal resolved targets always produce equal keys, however the
    /// address was originally supplied.
    pub fn key(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_port() {
        let target = Target::parse("1.2.3.4:9999", 5121).unwrap();
        assert_eq!(target.ip, "1.2.3.4");
        assert_eq!(target.port, 9999);
    }

    #[test]
    fn test_parse_without_port_uses_default() {
        let target = Target::parse("1.2.3.4", 5121).unwrap();
        assert_eq!(target.ip, "1.2.3.4");
        assert_eq!(target.port, 5121);
    }

    #[test]
    fn test_parse_trailing_colon_uses_default() {
        let target = Target::parse("1.2.3.4:", 5121).unwrap();
        assert_eq!(target.port, 5121);
    }

    #[test]
    fn test_parse_hostname() {
        let target = Target::parse("game.example.com:2302", 5121).unwrap();
        assert_eq!(target.ip, "game.example.com");
        assert_eq!(target.port, 2302);
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert!(Target::parse("", 5121).is_err());
        assert!(Target::parse("   ", 5121).is_err());
        assert!(Target::parse(":9999", 5121).is_err());
    }

    #[test]
    fn test_parse_bad_port_is_error() {
        assert!(Target::parse("1.2.3.4:abc", 5121).is_err());
        assert!(Target::parse("1.2.3.4:99999", 5121).is_err());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let target = Target::parse("  1.2.3.4:9999 ", 5121).unwrap();
        assert_eq!(target.ip, "1.2.3.4");
        assert_eq!(target.port, 9999);
    }

    #[test]
    fn test_key_is_canonical() {
        // Same resolved address, two spellings, one key
        let explicit = Target::parse("1.2.3.4:5121", 9999).unwrap();
        let defaulted = Target::parse("1.2.3.4", 5121).unwrap();
        assert_eq!(explicit.key(), defaulted.key());
        assert_eq!(explicit.key(), "1.2.3.4:5121");
    }

    #[test]
    fn test_probe_request_deserialize() {
        let req: ProbeRequest =
            serde_json::from_str(r#"{"ip_port": "1.2.3.4:9999"}"#).unwrap();
        assert_eq!(req.ip_port, "1.2.3.4:9999");
    }

    #[test]
    fn test_prefill_query_defaults_to_empty() {
        let query = PrefillQuery::default();
        assert!(query.url.is_none());
        assert!(query.ip.is_none());
        assert!(query.port.is_none());
    }
}
